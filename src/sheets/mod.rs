// src/sheets/mod.rs

// --- Public Interface ---
pub mod binding;
pub mod definitions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod sku;
pub mod validation;

pub mod systems;

// Re-export types needed externally (UI layers, the headless host, tests)
pub use definitions::{
    CellData, ColumnDefinition, ColumnKind, SheetGridData, SheetKind, SheetMetadata, SpecValue,
    Specification,
};
pub use plugin::SheetsPlugin;
pub use resources::{SheetRegistry, SpecBaselineCache, ValidationResultsCache};
