// src/sheets/systems/logic/update_column_name.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{RequestUpdateColumnName, SheetDataModifiedInRegistryEvent, SheetOperationFeedback},
    resources::SheetRegistry,
};

/// Renames a column header. The header row cell follows the definition.
/// Renaming can attach or detach a header-fallback binding; explicitly
/// bound columns are unaffected by their header text.
pub fn handle_update_column_name(
    mut events: EventReader<RequestUpdateColumnName>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let col_idx = event.column_index;
        let new_header = event.new_header.trim();

        let validation_result: Result<(), String> = (|| {
            if new_header.is_empty() {
                return Err("Column header cannot be empty.".to_string());
            }
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let metadata = &sheet_data.metadata;
            if col_idx >= metadata.columns.len() {
                return Err(format!(
                    "Column index {} out of bounds ({} columns).",
                    col_idx,
                    metadata.columns.len()
                ));
            }
            if metadata
                .columns
                .iter()
                .enumerate()
                .any(|(i, c)| i != col_idx && c.header == new_header)
            {
                return Err(format!("A column named '{}' already exists.", new_header));
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let msg = format!(
                "Rename column {} failed for '{}': {}",
                col_idx, sheet_name, err_msg
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            let old_header = std::mem::replace(
                &mut sheet_data.metadata.columns[col_idx].header,
                new_header.to_string(),
            );
            sheet_data.ensure_header_row();

            let msg = format!(
                "Renamed column '{}' to '{}' in sheet '{}'.",
                old_header, new_header, sheet_name
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
