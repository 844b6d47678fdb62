// src/sheets/systems/logic/sku_refresh.rs
//! Shared SKU recomputation helpers. The SKU cell is a derived cache: these
//! functions are the only writers of it, and they write only when the
//! computed string differs from the stored one.

use bevy::prelude::*;

use crate::settings::SkuFormatSettings;
use crate::sheets::binding::row_selection_pairs;
use crate::sheets::definitions::SheetGridData;
use crate::sheets::sku::{generate_sku, SpecValueIndex};

/// Recomputes the SKU cell of every data row. Returns how many cells were
/// rewritten. Panics when the sheet has no SKU column — every data sheet
/// must carry exactly one, so a missing one is a programming error, not a
/// finding.
pub fn regenerate_sheet_skus(sheet: &mut SheetGridData, settings: &SkuFormatSettings) -> usize {
    let meta = &sheet.metadata;
    let grid = &mut sheet.grid;
    let sku_col = meta.sku_column_index().unwrap_or_else(|| {
        panic!(
            "SKU regeneration requested for sheet '{}' which has no SKU column.",
            meta.sheet_name
        )
    });

    let index = SpecValueIndex::build(&meta.specifications);
    let mut rewritten = 0;
    for row in grid.iter_mut().skip(1) {
        let sku = {
            let pairs = row_selection_pairs(meta, row);
            generate_sku(&pairs, &index, settings)
        };
        if let Some(cell) = row.get_mut(sku_col) {
            if cell.value != sku {
                cell.set(sku);
                rewritten += 1;
            }
        }
    }
    if rewritten > 0 {
        debug!(
            "Regenerated {} SKU cell(s) in sheet '{}'.",
            rewritten, meta.sheet_name
        );
    }
    rewritten
}

/// Recomputes the SKU cell of a single data row after a cell edit. Returns
/// true when the cell changed. Row 0 (header) is never refreshed.
pub fn refresh_row_sku(
    sheet: &mut SheetGridData,
    row_index: usize,
    settings: &SkuFormatSettings,
) -> bool {
    if row_index == 0 {
        return false;
    }
    let meta = &sheet.metadata;
    let grid = &mut sheet.grid;
    let sku_col = meta.sku_column_index().unwrap_or_else(|| {
        panic!(
            "SKU refresh requested for sheet '{}' which has no SKU column.",
            meta.sheet_name
        )
    });

    let Some(row) = grid.get_mut(row_index) else {
        return false;
    };
    let index = SpecValueIndex::build(&meta.specifications);
    let sku = {
        let pairs = row_selection_pairs(meta, row);
        generate_sku(&pairs, &index, settings)
    };
    match row.get_mut(sku_col) {
        Some(cell) if cell.value != sku => {
            cell.set(sku);
            true
        }
        _ => false,
    }
}
