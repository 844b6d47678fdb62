// src/sheets/systems/logic/mod.rs

// Declare modules for each handler
pub mod add_column;
pub mod add_row;
pub mod create_sheet;
pub mod create_specification;
pub mod delete_column;
pub mod delete_sheet;
pub mod delete_specification;
pub mod propagate_spec_changes;
pub mod rename_specification;
pub mod reorder_specification;
pub mod run_validation;
pub mod sku_refresh;
pub mod spec_values;
pub mod update_cell;
pub mod update_column_name;
pub mod update_settings;

// Re-export the handler functions for easier use in plugin.rs
pub use add_column::handle_add_column_request;
pub use add_row::handle_add_row_request;
pub use create_sheet::handle_create_sheet_request;
pub use create_specification::handle_create_specification;
pub use delete_column::handle_delete_column_request;
pub use delete_sheet::handle_delete_request;
pub use delete_specification::handle_delete_specification;
pub use propagate_spec_changes::handle_spec_change_propagation;
pub use rename_specification::handle_rename_specification;
pub use reorder_specification::handle_reorder_specification;
pub use run_validation::handle_validation_request;
pub use spec_values::{handle_add_spec_value, handle_remove_spec_value, handle_update_spec_value};
pub use update_cell::handle_cell_update;
pub use update_column_name::handle_update_column_name;
pub use update_settings::handle_update_sku_format;
