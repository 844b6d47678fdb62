// src/sheets/systems/logic/run_validation.rs
use bevy::prelude::*;

use crate::sheets::{
    events::RequestSheetValidation,
    resources::{SheetRegistry, ValidationResultsCache},
    validation::validate_sheet,
};

/// Runs both validation passes for each requested sheet and stores the
/// report. Validation never mutates sheet state; a consumer decides what
/// to do with the findings and when to ask again.
pub fn handle_validation_request(
    mut events: EventReader<RequestSheetValidation>,
    registry: Res<SheetRegistry>,
    mut results: ResMut<ValidationResultsCache>,
) {
    for event in events.read() {
        let Some(sheet_data) = registry.get_sheet(&event.sheet_name) else {
            warn!(
                "Validation requested for unknown sheet '{}'. Clearing any stale report.",
                event.sheet_name
            );
            results.clear_sheet_report(&event.sheet_name);
            continue;
        };

        let report = validate_sheet(sheet_data);
        debug!(
            "Validated sheet '{}': {} missing-value, {} duplicate-SKU finding(s).",
            event.sheet_name,
            report.missing_values.len(),
            report.duplicate_skus.len()
        );
        results.store_report(event.sheet_name.clone(), report);
    }
}
