// src/sheets/systems/io/export.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sheets::definitions::SheetGridData;
use crate::sheets::resources::SheetRegistry;

/// A whole-workbook snapshot, exchanged atomically with codec
/// collaborators. Export is verbatim — derived SKU cells included — and
/// import of one is a full-state replacement, never a partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookSnapshot {
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub sheets: Vec<SheetGridData>,
}

pub fn build_workbook_snapshot(registry: &SheetRegistry) -> WorkbookSnapshot {
    WorkbookSnapshot {
        exported_at: Utc::now(),
        sheets: registry
            .iter_sheets()
            .map(|(_, data)| data.clone())
            .collect(),
    }
}

/// Flattens one sheet into a plain value table (header row included), the
/// shape the CSV/Excel collaborators consume.
pub fn sheet_to_raw_table(sheet: &SheetGridData) -> Vec<Vec<String>> {
    sheet
        .grid
        .iter()
        .map(|row| row.iter().map(|cell| cell.value.clone()).collect())
        .collect()
}
