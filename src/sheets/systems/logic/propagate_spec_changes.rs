// src/sheets/systems/logic/propagate_spec_changes.rs
//! Propagates specification changes into the cell grids.
//!
//! The mutators announce *that* a specification changed; this system owns
//! the diff baseline and decides *what* follows: a display rename rewrites
//! matching cells in bound columns, a fragment change regenerates the
//! sheet's SKU column, and both can follow from a single diff. Value ids
//! present on only one side of the diff (created or deleted) propagate
//! nothing — that drift is the validator's to report.
//!
//! The baseline for a specification is re-snapshotted only after its
//! rewrite pass fully applied, so there is exactly one pending baseline at
//! a time. This system must never call back into the specification
//! mutators: it takes no mutation EventWriter, which a source-scan test
//! enforces.

use bevy::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

use crate::settings::SkuFormatSettings;
use crate::sheets::{
    binding::{cell_matches_display, columns_bound_to},
    definitions::SheetKind,
    events::{
        RequestSkuRegeneration, SheetDataModifiedInRegistryEvent, SpecificationsChangedEvent,
    },
    resources::{SheetRegistry, SpecBaselineCache},
    systems::logic::sku_refresh::regenerate_sheet_skus,
};

pub fn handle_spec_change_propagation(
    mut ev_changed: EventReader<SpecificationsChangedEvent>,
    mut ev_regen: EventReader<RequestSkuRegeneration>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    settings: Res<SkuFormatSettings>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    // Deduplicate: several mutations of one spec in a frame still get a
    // single diff pass against the one pending baseline.
    let mut changed: Vec<(String, Uuid)> = Vec::new();
    let mut seen: HashSet<(String, Uuid)> = HashSet::new();
    for event in ev_changed.read() {
        let key = (event.sheet_name.clone(), event.spec_id);
        if seen.insert(key.clone()) {
            changed.push(key);
        }
    }

    let mut sheets_to_regenerate: HashSet<String> = HashSet::new();
    for event in ev_regen.read() {
        sheets_to_regenerate.insert(event.sheet_name.clone());
    }

    for (sheet_name, spec_id) in changed {
        let Some(sheet_data) = registry.get_sheet_mut(&sheet_name) else {
            trace!(
                "Sheet '{}' gone before propagation; skipping diff for {}.",
                sheet_name,
                spec_id
            );
            continue;
        };

        // --- Diffing ---
        if sheet_data.metadata.get_specification(spec_id).is_none() {
            // A deleted specification must have had its baseline torn down
            // by the deletion handler. A live baseline here means some
            // other path dropped the spec without teardown.
            if baselines.get(&sheet_name, spec_id).is_some() {
                panic!(
                    "Specification {} vanished from sheet '{}' but its diff baseline \
                     is still present; a teardown was missed.",
                    spec_id, sheet_name
                );
            }
            continue;
        }

        let mut renames: Vec<(String, String)> = Vec::new();
        let mut fragment_changed = false;
        if let Some(baseline) = baselines.get(&sheet_name, spec_id) {
            let spec = sheet_data
                .metadata
                .get_specification(spec_id)
                .expect("checked above");
            for value in &spec.values {
                let Some((old_display, old_fragment)) = baseline.get(&value.id) else {
                    continue; // newly created id: no propagation
                };
                if *old_display != value.display_value {
                    renames.push((old_display.clone(), value.display_value.clone()));
                }
                if *old_fragment != value.sku_fragment {
                    fragment_changed = true;
                }
            }
            // Ids present only in the baseline were deleted: no propagation.
        } else {
            debug!(
                "No baseline yet for specification {} on sheet '{}'; snapshotting without diff.",
                spec_id, sheet_name
            );
        }

        // --- RewritingLabels ---
        let mut rewritten = 0;
        if !renames.is_empty() {
            let bound_columns = columns_bound_to(&sheet_data.metadata, spec_id);
            for row in sheet_data.grid.iter_mut().skip(1) {
                for &col_idx in &bound_columns {
                    let Some(cell) = row.get_mut(col_idx) else {
                        continue;
                    };
                    if cell.is_empty() {
                        continue;
                    }
                    for (old_display, new_display) in &renames {
                        if cell_matches_display(cell, old_display) {
                            cell.set(new_display.clone());
                            rewritten += 1;
                            break;
                        }
                    }
                }
            }
            debug!(
                "Rewrote {} cell label(s) for specification {} on sheet '{}'.",
                rewritten, spec_id, sheet_name
            );
        }

        if fragment_changed {
            sheets_to_regenerate.insert(sheet_name.clone());
        }

        // The rewrite pass for this spec is complete; only now does the
        // baseline advance.
        let spec = sheet_data
            .metadata
            .get_specification(spec_id)
            .expect("checked above");
        baselines.snapshot(&sheet_name, spec);

        if rewritten > 0 {
            data_modified_writer.write(SheetDataModifiedInRegistryEvent {
                sheet_name: sheet_name.clone(),
            });
        }
    }

    // --- RegeneratingSKUs ---
    for sheet_name in sheets_to_regenerate {
        let Some(sheet_data) = registry.get_sheet_mut(&sheet_name) else {
            trace!(
                "Sheet '{}' gone before SKU regeneration; skipping.",
                sheet_name
            );
            continue;
        };
        if sheet_data.metadata.kind != SheetKind::Data {
            continue;
        }
        let rewritten = regenerate_sheet_skus(sheet_data, &settings);
        if rewritten > 0 {
            data_modified_writer.write(SheetDataModifiedInRegistryEvent {
                sheet_name: sheet_name.clone(),
            });
        }
    }
}
