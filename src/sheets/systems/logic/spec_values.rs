// src/sheets/systems/logic/spec_values.rs
//! Handlers for the value-level specification mutations. Each one applies
//! its change and notifies the propagation system with a
//! `SpecificationsChangedEvent`; the diff over there decides whether any
//! cells or SKUs need touching.

use bevy::prelude::*;

use crate::sheets::{
    definitions::SpecValue,
    events::{
        RequestAddSpecValue, RequestRemoveSpecValue, RequestUpdateSpecValue,
        SheetOperationFeedback, SpecificationsChangedEvent,
    },
    resources::SheetRegistry,
};

pub fn handle_add_spec_value(
    mut events: EventReader<RequestAddSpecValue>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut changed_writer: EventWriter<SpecificationsChangedEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;
        let display = event.display_value.trim();

        let validation_result: Result<(), String> = (|| {
            if display.is_empty() {
                return Err("Display value cannot be empty.".to_string());
            }
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let spec = sheet_data
                .metadata
                .get_specification(event.spec_id)
                .ok_or_else(|| format!("Specification {} not found.", event.spec_id))?;
            if spec.match_display(display).is_some() {
                return Err(format!(
                    "Specification '{}' already has a value '{}'.",
                    spec.name, display
                ));
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let msg = format!("Add value failed: {}", err_msg);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            if let Some(spec) = sheet_data.metadata.get_specification_mut(event.spec_id) {
                let value = SpecValue::new(display, event.sku_fragment.clone());
                let value_id = value.id;
                spec.values.push(value);

                let msg = format!(
                    "Added value '{}' ({}) to specification '{}' on sheet '{}'.",
                    display, value_id, spec.name, sheet_name
                );
                info!("{}", msg);
                feedback_writer.write(SheetOperationFeedback {
                    message: msg,
                    is_error: false,
                });
                changed_writer.write(SpecificationsChangedEvent {
                    sheet_name: sheet_name.clone(),
                    spec_id: event.spec_id,
                });
            }
        }
    }
}

pub fn handle_update_spec_value(
    mut events: EventReader<RequestUpdateSpecValue>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut changed_writer: EventWriter<SpecificationsChangedEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;

        let validation_result: Result<(), String> = (|| {
            let sheet_data = registry
                .get_sheet(sheet_name)
                .ok_or_else(|| format!("Sheet '{}' not found.", sheet_name))?;
            let spec = sheet_data
                .metadata
                .get_specification(event.spec_id)
                .ok_or_else(|| format!("Specification {} not found.", event.spec_id))?;
            spec.find_value(event.value_id)
                .ok_or_else(|| format!("Value {} not found.", event.value_id))?;
            if let Some(new_display) = &event.new_display_value {
                if new_display.trim().is_empty() {
                    return Err("Display value cannot be empty.".to_string());
                }
            }
            Ok(())
        })();

        if let Err(err_msg) = validation_result {
            let msg = format!("Update value failed: {}", err_msg);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        if let Some(sheet_data) = registry.get_sheet_mut(sheet_name) {
            if let Some(value) = sheet_data
                .metadata
                .get_specification_mut(event.spec_id)
                .and_then(|spec| spec.find_value_mut(event.value_id))
            {
                let mut changed = false;
                if let Some(new_display) = &event.new_display_value {
                    if value.display_value != *new_display {
                        value.display_value = new_display.clone();
                        changed = true;
                    }
                }
                if let Some(new_fragment) = &event.new_sku_fragment {
                    if value.sku_fragment != *new_fragment {
                        value.sku_fragment = new_fragment.clone();
                        changed = true;
                    }
                }
                if !changed {
                    trace!(
                        "Value {} unchanged on sheet '{}'. Skipping.",
                        event.value_id,
                        sheet_name
                    );
                    continue;
                }
                changed_writer.write(SpecificationsChangedEvent {
                    sheet_name: sheet_name.clone(),
                    spec_id: event.spec_id,
                });
            }
        }
    }
}

pub fn handle_remove_spec_value(
    mut events: EventReader<RequestRemoveSpecValue>,
    mut registry: ResMut<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut changed_writer: EventWriter<SpecificationsChangedEvent>,
) {
    for event in events.read() {
        let sheet_name = &event.sheet_name;

        let Some(sheet_data) = registry.get_sheet_mut(sheet_name) else {
            let msg = format!("Remove value failed: sheet '{}' not found.", sheet_name);
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };
        let Some(spec) = sheet_data.metadata.get_specification_mut(event.spec_id) else {
            let msg = format!(
                "Remove value failed: specification {} not found on sheet '{}'.",
                event.spec_id, sheet_name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };
        let Some(pos) = spec.values.iter().position(|v| v.id == event.value_id) else {
            let msg = format!(
                "Remove value failed: value {} not found in specification '{}'.",
                event.value_id, spec.name
            );
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        };

        let removed = spec.values.remove(pos);
        let msg = format!(
            "Removed value '{}' from specification '{}' on sheet '{}'. \
             Cells still holding it become validation findings.",
            removed.display_value, spec.name, sheet_name
        );
        info!("{}", msg);
        feedback_writer.write(SheetOperationFeedback {
            message: msg,
            is_error: false,
        });
        // The diff sees a vanished id and deliberately propagates nothing;
        // the event still refreshes the baseline.
        changed_writer.write(SpecificationsChangedEvent {
            sheet_name: sheet_name.clone(),
            spec_id: event.spec_id,
        });
    }
}
