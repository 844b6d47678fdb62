// src/sheets/systems/logic/delete_specification.rs
use bevy::prelude::*;

use crate::sheets::{
    definitions::ColumnKind,
    events::{
        RequestDeleteSpecification, SheetDataModifiedInRegistryEvent, SheetOperationFeedback,
    },
    resources::{SheetRegistry, SpecBaselineCache},
};

/// Deletes a specification. Columns explicitly bound to it are rewritten to
/// `Free` here — orphan cleanup belongs to this operation, not to the
/// resolver. Cells keep whatever text they hold; the drift surfaces as
/// missing-value findings on the next validation run, and removed value ids
/// deliberately produce no propagation.
pub fn handle_delete_specification(
    mut events: EventReader<RequestDeleteSpecification>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;

        let Some(sheet_data) = registry.get_sheet_mut(sheet_name) else {
            let msg = format!(
                "Delete specification failed: sheet '{}' not found.",
                sheet_name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        let metadata = &mut sheet_data.metadata;
        let Some(pos) = metadata
            .specifications
            .iter()
            .position(|s| s.id == event.spec_id)
        else {
            let msg = format!(
                "Delete specification failed: {} not found on sheet '{}'.",
                event.spec_id, sheet_name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        let removed = metadata.specifications.remove(pos);
        let mut unbound_columns = 0;
        for col in metadata.columns.iter_mut() {
            if matches!(col.kind, ColumnKind::Spec { spec_id } if spec_id == event.spec_id) {
                col.kind = ColumnKind::Free;
                unbound_columns += 1;
            }
        }
        // Baseline teardown, so the propagation system never diffs a ghost.
        baselines.remove_spec(sheet_name, event.spec_id);

        let msg = format!(
            "Deleted specification '{}' from sheet '{}' ({} column(s) unbound).",
            removed.name, sheet_name, unbound_columns
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
