// src/sheets/systems/io/mod.rs
pub mod export;
pub mod import;
pub mod startup;

pub use export::{build_workbook_snapshot, sheet_to_raw_table, WorkbookSnapshot};
pub use import::{
    apply_workbook_snapshot, handle_sheet_snapshot_upload, sheet_from_raw_table,
    PendingWorkbookSnapshot,
};
pub use startup::{apply_pending_snapshot, load_sku_format_settings, register_default_sheets_if_needed};

use thiserror::Error;

/// Failures at the snapshot exchange boundary. The core itself never reads
/// file bytes; these cover the JSON shape handed over by a collaborator.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse workbook snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read workbook snapshot: {0}")]
    Io(#[from] std::io::Error),
}
