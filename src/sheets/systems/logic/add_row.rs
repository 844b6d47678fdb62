// src/sheets/systems/logic/add_row.rs
use bevy::prelude::*;

use crate::sheets::{
    definitions::CellData,
    events::{AddSheetRowRequest, SheetDataModifiedInRegistryEvent, SheetOperationFeedback},
    resources::SheetRegistry,
};

pub fn handle_add_row_request(
    mut events: EventReader<AddSheetRowRequest>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let Some(sheet_data) = registry.get_sheet_mut(&event.sheet_name) else {
            let msg = format!("Add row failed: sheet '{}' not found.", event.sheet_name);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        sheet_data.ensure_header_row();
        let num_cols = sheet_data.metadata.columns.len();
        // A fresh row is all-empty, so its SKU is "" without a generator run.
        sheet_data.grid.push(vec![CellData::default(); num_cols]);

        trace!(
            "Added row {} to sheet '{}'.",
            sheet_data.grid.len() - 1,
            event.sheet_name
        );
        data_modified_writer.write(SheetDataModifiedInRegistryEvent {
            sheet_name: event.sheet_name.clone(),
        });
    }
}
