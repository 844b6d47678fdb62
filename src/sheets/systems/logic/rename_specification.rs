// src/sheets/systems/logic/rename_specification.rs
use bevy::prelude::*;

use crate::sheets::{
    definitions::ColumnKind,
    events::{
        RequestRenameSpecification, SheetDataModifiedInRegistryEvent, SheetOperationFeedback,
    },
    resources::SheetRegistry,
};

/// Renames a specification. Headers of explicitly bound columns follow the
/// new name so the header-fallback path cannot diverge for them; cells and
/// SKUs are untouched (a rename moves no value, only the category label).
pub fn handle_rename_specification(
    mut events: EventReader<RequestRenameSpecification>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let new_name = event.new_name.trim();

        let validation_result: Result<String, String> = (|| {
            if new_name.is_empty() {
                return Err("Specification name cannot be empty.".to_string());
            }
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let spec = sheet_data
                .metadata
                .get_specification(event.spec_id)
                .ok_or_else(|| format!("Specification {} not found.", event.spec_id))?;
            if sheet_data
                .metadata
                .specifications
                .iter()
                .any(|s| s.id != event.spec_id && s.name == new_name)
            {
                return Err(format!(
                    "A specification named '{}' already exists on sheet '{}'.",
                    new_name, sheet_name
                ));
            }
            Ok(spec.name.clone())
        })();

        let old_name = match validation_result {
            Ok(old_name) => old_name,
            Err(err_msg) => {
                let msg = format!("Rename specification failed: {}", err_msg);
                warn!("{}", msg);
                feedback_writer.write(SheetOperationFeedback {
                    message: msg,
                    is_error: true,
                });
                continue;
            }
        };

        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            if let Some(spec) = sheet_data.metadata.get_specification_mut(event.spec_id) {
                spec.name = new_name.to_string();
            }
            for col in sheet_data.metadata.columns.iter_mut() {
                if matches!(col.kind, ColumnKind::Spec { spec_id } if spec_id == event.spec_id) {
                    col.header = new_name.to_string();
                }
            }
            sheet_data.ensure_header_row();

            let msg = format!(
                "Renamed specification '{}' to '{}' on sheet '{}'.",
                old_name, new_name, sheet_name
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
