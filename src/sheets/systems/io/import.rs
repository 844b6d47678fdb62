// src/sheets/systems/io/import.rs
use bevy::prelude::*;

use super::export::WorkbookSnapshot;
use crate::sheets::{
    definitions::{CellData, ColumnDefinition, SheetGridData, SheetMetadata, SKU_COLUMN_HEADER},
    events::{SheetDataModifiedInRegistryEvent, SheetOperationFeedback, SheetSnapshotUploaded},
    resources::{SheetRegistry, SpecBaselineCache, ValidationResultsCache},
};

/// A workbook snapshot parked by the host (CLI flag, drag-and-drop) for the
/// startup systems to apply.
#[derive(Resource, Debug)]
pub struct PendingWorkbookSnapshot(pub WorkbookSnapshot);

/// Derives a sheet from an already-tabular value grid. Row 0 is the header
/// row: the header equal to the SKU header becomes the SKU column (column 0
/// by convention when none matches), everything else starts `Free` —
/// bindings attach through the header fallback once specifications exist.
/// Ragged rows are padded; malformed shapes degrade to free text rather
/// than rejecting the import.
pub fn sheet_from_raw_table(name: &str, table: &[Vec<String>]) -> SheetGridData {
    let headers: Vec<String> = table.first().cloned().unwrap_or_default();
    if headers.is_empty() {
        // Nothing to derive from: an empty data sheet.
        return SheetGridData::new(SheetMetadata::create_generic(name.to_string(), 0));
    }

    let sku_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(SKU_COLUMN_HEADER))
        .unwrap_or(0);
    let columns: Vec<ColumnDefinition> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            if idx == sku_col {
                ColumnDefinition::new_sku(header.trim().to_string())
            } else {
                ColumnDefinition::new_free(header.trim().to_string())
            }
        })
        .collect();

    let num_cols = columns.len();
    let metadata = SheetMetadata {
        columns,
        ..SheetMetadata::create_generic(name.to_string(), 0)
    };

    let mut grid: Vec<Vec<CellData>> = table
        .iter()
        .skip(1)
        .map(|row| {
            let mut cells: Vec<CellData> = row
                .iter()
                .take(num_cols)
                .map(|v| CellData::from_value(v.clone()))
                .collect();
            cells.resize_with(num_cols, CellData::default);
            cells
        })
        .collect();

    let mut sheet = SheetGridData {
        metadata,
        grid: Vec::new(),
    };
    sheet.ensure_header_row();
    sheet.grid.append(&mut grid);
    sheet
}

/// Replaces the entire workbook with `snapshot`: registry, diff baselines
/// and cached findings are all rebuilt from scratch. Imported cell content
/// — including previously derived SKU cells — is kept verbatim; the next
/// change regenerates what needs regenerating.
pub fn apply_workbook_snapshot(
    snapshot: &WorkbookSnapshot,
    registry: &mut SheetRegistry,
    baselines: &mut SpecBaselineCache,
    validation_cache: &mut ValidationResultsCache,
) {
    registry.clear();
    baselines.clear();
    validation_cache.clear();

    for sheet in &snapshot.sheets {
        let name = sheet.metadata.sheet_name.clone();
        for spec in &sheet.metadata.specifications {
            baselines.snapshot(&name, spec);
        }
        registry.add_or_replace_sheet(name, sheet.clone());
    }
    info!(
        "Applied workbook snapshot ({} sheet(s), exported {}).",
        snapshot.sheets.len(),
        snapshot.exported_at
    );
}

/// Handles a single-sheet table handed over by a codec collaborator.
pub fn handle_sheet_snapshot_upload(
    mut events: EventReader<SheetSnapshotUploaded>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut validation_cache: ResMut<ValidationResultsCache>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut data_modified_writer: EventWriter<SheetDataModifiedInRegistryEvent>,
) {
    for event in events.read() {
        let name = event.sheet_name.trim();
        if name.is_empty() {
            let msg = "Sheet upload rejected: name cannot be empty.".to_string();
            warn!("{}", msg);
            feedback_writer.write(SheetOperationFeedback {
                message: msg,
                is_error: true,
            });
            continue;
        }

        let sheet = sheet_from_raw_table(name, &event.table);
        let replaced = registry.does_sheet_exist(name);
        // A replaced sheet's derived state does not survive the swap.
        baselines.remove_sheet(name);
        validation_cache.clear_sheet_report(name);
        registry.add_or_replace_sheet(name.to_string(), sheet);

        let msg = format!(
            "{} sheet '{}' from uploaded table ({} data row(s)).",
            if replaced { "Replaced" } else { "Created" },
            name,
            registry
                .get_sheet(name)
                .map(|s| s.data_row_count())
                .unwrap_or(0)
        );
        info!("{}", msg);
        feedback_writer.write(SheetOperationFeedback {
            message: msg,
            is_error: false,
        });
        data_modified_writer.write(SheetDataModifiedInRegistryEvent {
            sheet_name: name.to_string(),
        });
    }
}
