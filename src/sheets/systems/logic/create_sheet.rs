// src/sheets/systems/logic/create_sheet.rs
use bevy::prelude::*;

use crate::sheets::{
    definitions::{SheetKind, SheetMetadata},
    events::{RequestCreateSheet, SheetOperationFeedback},
    resources::{SheetRegistry, SpecBaselineCache},
};

pub fn handle_create_sheet_request(
    mut events: EventReader<RequestCreateSheet>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
) {
    for event in events.read() {
        let name = event.sheet_name.trim();

        let validation_result: Result<(), String> = if name.is_empty() {
            Err("Sheet name cannot be empty or just whitespace.".to_string())
        } else if registry.does_sheet_exist(name) {
            Err(format!("A sheet named '{}' already exists.", name))
        } else {
            Ok(())
        };

        if let Err(err_msg) = validation_result {
            let msg = format!("Create sheet rejected: {}", err_msg);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        let metadata = match event.kind {
            SheetKind::Data => SheetMetadata::create_generic(name.to_string(), 0),
            SheetKind::Config => SheetMetadata {
                kind: SheetKind::Config,
                columns: Vec::new(),
                ..SheetMetadata::create_generic(name.to_string(), 0)
            },
        };

        // Data sheets start with no specifications, so there is nothing to
        // baseline yet; the entry appears when the first spec is created.
        if registry.register(metadata) {
            if let Some(sheet) = registry.get_sheet(name) {
                for spec in &sheet.metadata.specifications {
                    baselines.snapshot(name, spec);
                }
            }
            let msg = format!("Created sheet '{}'.", name);
            info!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: false,
            });
        }
    }
}
