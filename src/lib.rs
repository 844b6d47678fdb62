// src/lib.rs
//! Specification-to-sheet synchronization and SKU generation core, exposed
//! as a library so the headless binary and the integration tests assemble
//! the same `App`.

pub mod example_definitions;
pub mod settings;
pub mod sheets;

pub use settings::SkuFormatSettings;
pub use sheets::SheetsPlugin;
