// src/sheets/events.rs
use bevy::prelude::Event;
use uuid::Uuid;

use super::definitions::{ColumnKind, SheetKind};

// --- Sheet lifecycle ---

/// Request to create a fresh sheet (SKU column at index 0, header row only).
#[derive(Event, Debug, Clone)]
pub struct RequestCreateSheet {
    pub sheet_name: String,
    pub kind: SheetKind,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteSheet {
    pub sheet_name: String,
}

/// Event sent when the user clicks the "Add Row" button in the sheet editor UI.
#[derive(Event, Debug, Clone)]
pub struct AddSheetRowRequest {
    pub sheet_name: String,
}

// --- Cell and column mutation (sent by the grid UI; observed here) ---

#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub sheet_name: String,
    pub row_index: usize,
    pub col_index: usize,
    pub new_value: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestAddColumn {
    pub sheet_name: String,
    pub header: String,
    pub kind: ColumnKind,
    /// Insert position; appended when absent.
    pub position: Option<usize>,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteColumn {
    pub sheet_name: String,
    pub column_index: usize,
}

#[derive(Event, Debug, Clone)]
pub struct RequestUpdateColumnName {
    pub sheet_name: String,
    pub column_index: usize,
    pub new_header: String,
}

// --- Specification store mutation ---

#[derive(Event, Debug, Clone)]
pub struct RequestCreateSpecification {
    pub sheet_name: String,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestRenameSpecification {
    pub sheet_name: String,
    pub spec_id: Uuid,
    pub new_name: String,
}

#[derive(Event, Debug, Clone)]
pub struct RequestDeleteSpecification {
    pub sheet_name: String,
    pub spec_id: Uuid,
}

#[derive(Event, Debug, Clone)]
pub struct RequestReorderSpecification {
    pub sheet_name: String,
    pub spec_id: Uuid,
    pub new_order: u32,
}

#[derive(Event, Debug, Clone)]
pub struct RequestAddSpecValue {
    pub sheet_name: String,
    pub spec_id: Uuid,
    pub display_value: String,
    pub sku_fragment: String,
}

/// Field update on one value; `None` leaves the field untouched.
#[derive(Event, Debug, Clone)]
pub struct RequestUpdateSpecValue {
    pub sheet_name: String,
    pub spec_id: Uuid,
    pub value_id: Uuid,
    pub new_display_value: Option<String>,
    pub new_sku_fragment: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct RequestRemoveSpecValue {
    pub sheet_name: String,
    pub spec_id: Uuid,
    pub value_id: Uuid,
}

// --- Settings ---

/// Partial update of the SKU format settings. Any change regenerates the
/// SKU column of every data sheet.
#[derive(Event, Debug, Clone, Default)]
pub struct RequestUpdateSkuFormat {
    pub delimiter: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

// --- Engine-internal change signals ---

/// Changeset notification from a specification mutator to the propagation
/// system: "this sheet's specification may have changed; diff it against
/// your baseline". Carries ids, never snapshots — the baseline lives with
/// the engine.
#[derive(Event, Debug, Clone)]
pub struct SpecificationsChangedEvent {
    pub sheet_name: String,
    pub spec_id: Uuid,
}

/// Request to recompute the SKU column of a whole sheet (structural change,
/// settings change, import). Value-level diffs go through
/// [`SpecificationsChangedEvent`] instead.
#[derive(Event, Debug, Clone)]
pub struct RequestSkuRegeneration {
    pub sheet_name: String,
}

/// Fired whenever sheet data in the registry was modified, for downstream
/// consumers (render layers, exporters).
#[derive(Event, Debug, Clone)]
pub struct SheetDataModifiedInRegistryEvent {
    pub sheet_name: String,
}

// --- Validation ---

/// On-demand validation of one sheet; results land in
/// `ValidationResultsCache`. Cadence is the caller's business.
#[derive(Event, Debug, Clone)]
pub struct RequestSheetValidation {
    pub sheet_name: String,
}

// --- Import ---

/// An already-tabular sheet snapshot handed over by a codec collaborator.
/// Row 0 is treated as the header row; the core never parses file bytes.
#[derive(Event, Debug, Clone)]
pub struct SheetSnapshotUploaded {
    pub sheet_name: String,
    pub table: Vec<Vec<String>>,
}

// --- Feedback ---

/// Outcome report for a requested operation, surfaced to whatever front-end
/// is listening.
#[derive(Event, Debug, Clone)]
pub struct SheetOperationFeedback {
    pub message: String,
    pub is_error: bool,
}
