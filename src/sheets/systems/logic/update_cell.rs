// src/sheets/systems/logic/update_cell.rs
use bevy::prelude::*;
use std::collections::HashSet;

use crate::settings::SkuFormatSettings;
use crate::sheets::{
    definitions::{ColumnKind, SheetKind},
    events::{SheetDataModifiedInRegistryEvent, SheetOperationFeedback, UpdateCellEvent},
    resources::SheetRegistry,
    systems::logic::sku_refresh::refresh_row_sku,
};

pub fn handle_cell_update(
    mut events: EventReader<UpdateCellEvent>,
    mut registry: ResMut<SheetRegistry>,
    settings: Res<SkuFormatSettings>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    let mut modified_sheets: HashSet<String> = HashSet::new();

    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let row_idx = event.row_index;
        let col_idx = event.col_index;
        let new_value = &event.new_value;

        // --- Phase 1: Validation (immutable) ---
        let validation_result: Result<(), String> = (|| {
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            if row_idx == 0 {
                return Err("Row 0 is the header row; rename the column instead.".to_string());
            }
            let row = sheet_data
                .grid
                .get(row_idx)
                .ok_or_else(|| {
                    format!(
                        "Row index {} out of bounds ({} rows).",
                        row_idx,
                        sheet_data.grid.len()
                    )
                })?;
            if row.get(col_idx).is_none() {
                return Err(format!(
                    "Column index {} out of bounds ({} columns).",
                    col_idx,
                    row.len()
                ));
            }
            if let Some(col_def) = sheet_data.metadata.columns.get(col_idx) {
                if matches!(col_def.kind, ColumnKind::Sku) {
                    return Err("The SKU column is derived and read-only.".to_string());
                }
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let full_msg = format!(
                "Cell update rejected for sheet '{}' cell[{},{}]: {}",
                sheet_name, row_idx, col_idx, err_msg
            );
            warn!("{}", full_msg);
            feedback_writer.write(SheetOperationFeedback {
                message: full_msg,
                is_error: true,
            });
            continue;
        }

        // --- Phase 2: Apply (mutable) ---
        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            let Some(cell) = sheet_data
                .grid
                .get_mut(row_idx)
                .and_then(|row| row.get_mut(col_idx))
            else {
                error!(
                    "Cell update failed for '{}' cell[{},{}]: indices invalid after validation.",
                    sheet_name, row_idx, col_idx
                );
                continue;
            };
            if cell.value == *new_value {
                trace!(
                    "Cell value unchanged for '{}' cell[{},{}]. Skipping update.",
                    sheet_name,
                    row_idx,
                    col_idx
                );
                continue;
            }
            trace!(
                "Updating cell [{},{}] in sheet '{}' from '{}' to '{}'.",
                row_idx,
                col_idx,
                sheet_name,
                cell.value,
                new_value
            );
            cell.set(new_value.clone());

            // Keep the derived SKU cell warm for this row. Config sheets
            // carry no SKU column.
            if sheet_data.metadata.kind == SheetKind::Data {
                refresh_row_sku(sheet_data, row_idx, &settings);
            }
            modified_sheets.insert(sheet_name.clone());
        }
    }

    for sheet_name in modified_sheets {
        data_modified_writer.write(SheetDataModifiedInRegistryEvent { sheet_name });
    }
}
