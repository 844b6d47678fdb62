// src/sheets/systems/logic/delete_column.rs
use bevy::prelude::*;

use crate::sheets::{
    binding::{resolve_column_bindings, ColumnBinding},
    definitions::ColumnKind,
    events::{
        RequestDeleteColumn, RequestSkuRegeneration, SheetDataModifiedInRegistryEvent,
        SheetOperationFeedback,
    },
    resources::SheetRegistry,
};

pub fn handle_delete_column_request(
    mut events: EventReader<RequestDeleteColumn>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
    mut regen_writer: EventWriter<RequestSkuRegeneration>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let col_idx = event.column_index;

        // --- Phase 1: Validation (immutable) ---
        // Header-fallback bindings count too: dropping such a column changes
        // what feeds the SKU just like dropping an explicitly bound one.
        let validation_result: Result<bool, String> = (|| {
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let col_def = sheet_data.metadata.columns.get(col_idx).ok_or_else(|| {
                format!(
                    "Column index {} out of bounds ({} columns).",
                    col_idx,
                    sheet_data.metadata.columns.len()
                )
            })?;
            if matches!(col_def.kind, ColumnKind::Sku) {
                return Err("The SKU column cannot be deleted.".to_string());
            }
            let was_bound = matches!(
                resolve_column_bindings(&sheet_data.metadata).get(col_idx),
                Some(ColumnBinding::Specification(_))
            );
            Ok(was_bound)
        })();

        let was_bound = match validation_result {
            Ok(was_bound) => was_bound,
            Err(err_msg) => {
                let msg = format!("Delete column failed for '{}': {}", sheet_name, err_msg);
                warn!("{}", msg);
                feedback_writer.write(SheetOperationFeedback {
                    message: msg,
                    is_error: true,
                });
                continue;
            }
        };

        // --- Phase 2: Apply (mutable) ---
        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            let removed = sheet_data.metadata.columns.remove(col_idx);
            for row in sheet_data.grid.iter_mut() {
                if col_idx < row.len() {
                    row.remove(col_idx);
                }
            }

            let msg = format!(
                "Deleted column '{}' from sheet '{}'.",
                removed.header, sheet_name
            );
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: false,
            });
            data_modified_writer.write(SheetDataModifiedInRegistryEvent {
                sheet_name: sheet_name.clone(),
            });

            // Removing a bound column changes what feeds the SKU.
            if was_bound {
                regen_writer.write(RequestSkuRegeneration {
                    sheet_name: sheet_name.clone(),
                });
            }
        }
    }
}
