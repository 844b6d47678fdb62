// src/sheets/systems/logic/create_specification.rs
use bevy::prelude::*;

use crate::sheets::{
    definitions::Specification,
    events::{RequestCreateSpecification, SheetOperationFeedback},
    resources::{SheetRegistry, SpecBaselineCache},
};

pub fn handle_create_specification(
    mut events: EventReader<RequestCreateSpecification>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let name = event.name.trim();

        let validation_result: Result<(), String> = (|| {
            if name.is_empty() {
                return Err("Specification name cannot be empty.".to_string());
            }
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            if sheet_data
                .metadata
                .specifications
                .iter()
                .any(|s| s.name == name)
            {
                return Err(format!(
                    "A specification named '{}' already exists on sheet '{}'.",
                    name, sheet_name
                ));
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let msg = format!("Create specification failed: {}", err_msg);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            let order = sheet_data.metadata.next_spec_order();
            let spec = Specification::new(name, order);
            let spec_id = spec.id;
            // Seed the diff baseline at birth so the first value-level
            // mutation diffs against an empty map, not a missing one.
            baselines.snapshot(sheet_name, &spec);
            sheet_data.metadata.specifications.push(spec);

            let msg = format!(
                "Created specification '{}' ({}) on sheet '{}' with order {}.",
                name, spec_id, sheet_name, order
            );
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: false,
            });
        }
    }
}
