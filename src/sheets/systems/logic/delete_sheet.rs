// src/sheets/systems/logic/delete_sheet.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{RequestDeleteSheet, SheetOperationFeedback},
    resources::{SheetRegistry, SpecBaselineCache, ValidationResultsCache},
};

pub fn handle_delete_request(
    mut events: EventReader<RequestDeleteSheet>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut validation_cache: ResMut<ValidationResultsCache>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    for event in events.read() {
        match registry.delete_sheet(&event.sheet_name) {
            Ok(_removed) => {
                // Full teardown: baselines and cached findings must not
                // outlive the sheet, or a later same-named sheet would
                // inherit them.
                baselines.remove_sheet(&event.sheet_name);
                validation_cache.clear_sheet_report(&event.sheet_name);
                let msg = format!("Deleted sheet '{}'.", event.sheet_name);
                info!("{}", msg);
                feedback_writer.write(SheetOperationFeedback {
                    message: msg,
                    is_error: false,
                });
            }
            Err(err_msg) => {
                let msg = format!("Delete sheet failed: {}", err_msg);
                warn!("{}", msg);
                feedback_writer.write(SheetOperationFeedback {
                    message: msg,
                    is_error: true,
                });
            }
        }
    }
}
