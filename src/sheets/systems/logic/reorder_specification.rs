// src/sheets/systems/logic/reorder_specification.rs
use bevy::prelude::*;

use crate::sheets::{
    events::{RequestReorderSpecification, RequestSkuRegeneration, SheetOperationFeedback},
    resources::SheetRegistry,
};

/// Changes a specification's `order`. The value-level diff cannot see this,
/// so the handler requests a full SKU regeneration for the sheet itself:
/// fragment order is part of every SKU that uses the specification.
pub fn handle_reorder_specification(
    mut events: EventReader<RequestReorderSpecification>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut regen_writer: EventWriter<RequestSkuRegeneration>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;

        let Some(sheet_data) = registry.get_sheet_mut(sheet_name) else {
            let msg = format!(
                "Reorder specification failed: sheet '{}' not found.",
                sheet_name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        let Some(spec) = sheet_data.metadata.get_specification_mut(event.spec_id) else {
            let msg = format!(
                "Reorder specification failed: {} not found on sheet '{}'.",
                event.spec_id, sheet_name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        if spec.order == event.new_order {
            trace!(
                "Specification '{}' already has order {}. Skipping.",
                spec.name,
                event.new_order
            );
            continue;
        }
        let old_order = spec.order;
        spec.order = event.new_order;
        let spec_name = spec.name.clone();

        let msg = format!(
            "Reordered specification '{}' on sheet '{}' from {} to {}.",
            spec_name, sheet_name, old_order, event.new_order
        );
        info!("{}", msg);
        feedback_writer.write(SheetOperationFeedback {
            message: msg,
            is_error: false,
        });
        regen_writer.write(RequestSkuRegeneration {
            sheet_name: sheet_name.clone(),
        });
    }
}
