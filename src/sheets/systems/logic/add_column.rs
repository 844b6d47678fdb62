// src/sheets/systems/logic/add_column.rs
use bevy::prelude::*;
use std::collections::HashSet;

use crate::sheets::{
    definitions::{CellData, ColumnDefinition, ColumnKind},
    events::{RequestAddColumn, SheetDataModifiedInRegistryEvent, SheetOperationFeedback},
    resources::SheetRegistry,
};

pub fn handle_add_column_request(
    mut events: EventReader<RequestAddColumn>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;

        // --- Phase 1: Validation (immutable) ---
        let validation_result: Result<(), String> = (|| {
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let metadata = &sheet_data.metadata;
            if matches!(event.kind, ColumnKind::Sku) && metadata.sku_column_index().is_some() {
                return Err("Sheet already has a SKU column; exactly one is allowed.".to_string());
            }
            if let ColumnKind::Spec { spec_id } = event.kind {
                if metadata.get_specification(spec_id).is_none() {
                    return Err(format!(
                        "Cannot bind new column to unknown specification {}.",
                        spec_id
                    ));
                }
            }
            if let Some(pos) = event.position {
                if pos > metadata.columns.len() {
                    return Err(format!(
                        "Insert position {} out of bounds ({} columns).",
                        pos,
                        metadata.columns.len()
                    ));
                }
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let msg = format!("Add column failed for '{}': {}", sheet_name, err_msg);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        // --- Phase 2: Apply (mutable) ---
        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            let metadata = &mut sheet_data.metadata;

            // Determine a unique header when the requested one is taken.
            let mut header = event.header.trim().to_string();
            if header.is_empty() {
                header = "New Column".to_string();
            }
            let existing_headers: HashSet<_> =
                metadata.columns.iter().map(|c| c.header.clone()).collect();
            let mut counter = 1;
            let base = header.clone();
            while existing_headers.contains(&header) {
                header = format!("{} {}", base, counter);
                counter += 1;
            }

            let position = event.position.unwrap_or(metadata.columns.len());
            let new_col_def = ColumnDefinition {
                id: uuid::Uuid::new_v4(),
                header: header.clone(),
                kind: event.kind,
            };
            metadata.columns.insert(position, new_col_def);

            for row in sheet_data.grid.iter_mut().skip(1) {
                if position <= row.len() {
                    row.insert(position, CellData::default());
                } else {
                    row.resize_with(position + 1, CellData::default);
                }
            }
            sheet_data.ensure_header_row();

            let msg = format!(
                "Added column '{}' ({}) to sheet '{}' at position {}.",
                header, event.kind, sheet_name, position
            );
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: false,
            });
            data_modified_writer.write(SheetDataModifiedInRegistryEvent {
                sheet_name: sheet_name.clone(),
            });
        }
    }
}
