// src/sheets/plugin.rs
use bevy::prelude::*;

use super::events::{
    AddSheetRowRequest, RequestAddColumn, RequestAddSpecValue, RequestCreateSheet,
    RequestCreateSpecification, RequestDeleteColumn, RequestDeleteSheet,
    RequestDeleteSpecification, RequestRemoveSpecValue, RequestRenameSpecification,
    RequestReorderSpecification, RequestSheetValidation, RequestSkuRegeneration,
    RequestUpdateColumnName, RequestUpdateSkuFormat, RequestUpdateSpecValue,
    SheetDataModifiedInRegistryEvent, SheetOperationFeedback, SheetSnapshotUploaded,
    SpecificationsChangedEvent, UpdateCellEvent,
};
use super::resources::{SheetRegistry, SpecBaselineCache, ValidationResultsCache};
use super::systems;
use crate::settings::SkuFormatSettings;

// Define system sets for ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum SheetSystemSet {
    /// Mutators processing requested operations against the registry.
    ApplyChanges,
    /// Diff-and-rewrite propagation; must observe a settled registry.
    Propagate,
    /// On-demand validation over the propagated state.
    Validate,
}

/// Plugin wiring the whole synchronization core: registry, baselines,
/// validation cache, the event vocabulary and every handler, ordered so one
/// external mutation is fully propagated before validation reads the sheet.
pub struct SheetsPlugin;

impl Plugin for SheetsPlugin {
    fn build(&self, app: &mut App) {
        // Configure system sets for ordering
        app.configure_sets(
            Update,
            (
                SheetSystemSet::ApplyChanges,
                SheetSystemSet::Propagate.after(SheetSystemSet::ApplyChanges),
                SheetSystemSet::Validate.after(SheetSystemSet::Propagate),
            ),
        );

        // --- Resource Initialization ---
        app.init_resource::<SheetRegistry>()
            .init_resource::<SpecBaselineCache>()
            .init_resource::<ValidationResultsCache>()
            .init_resource::<SkuFormatSettings>();

        // --- Event Registration ---
        app.add_event::<RequestCreateSheet>()
            .add_event::<RequestDeleteSheet>()
            .add_event::<AddSheetRowRequest>()
            .add_event::<UpdateCellEvent>()
            .add_event::<RequestAddColumn>()
            .add_event::<RequestDeleteColumn>()
            .add_event::<RequestUpdateColumnName>()
            .add_event::<RequestCreateSpecification>()
            .add_event::<RequestRenameSpecification>()
            .add_event::<RequestDeleteSpecification>()
            .add_event::<RequestReorderSpecification>()
            .add_event::<RequestAddSpecValue>()
            .add_event::<RequestUpdateSpecValue>()
            .add_event::<RequestRemoveSpecValue>()
            .add_event::<RequestUpdateSkuFormat>()
            .add_event::<SpecificationsChangedEvent>()
            .add_event::<RequestSkuRegeneration>()
            .add_event::<SheetDataModifiedInRegistryEvent>()
            .add_event::<RequestSheetValidation>()
            .add_event::<SheetSnapshotUploaded>()
            .add_event::<SheetOperationFeedback>();

        // --- Startup Systems ---
        app.add_systems(
            Startup,
            (
                systems::io::load_sku_format_settings,
                systems::io::apply_pending_snapshot,
                systems::io::register_default_sheets_if_needed,
            )
                .chain(),
        );

        // --- Update Systems (Organized into Sets) ---
        app.add_systems(
            Update,
            (
                systems::io::handle_sheet_snapshot_upload,
                systems::logic::handle_create_sheet_request,
                systems::logic::handle_delete_request,
                systems::logic::handle_add_row_request,
                systems::logic::handle_add_column_request,
                systems::logic::handle_delete_column_request,
                systems::logic::handle_update_column_name,
                systems::logic::handle_create_specification,
                systems::logic::handle_rename_specification,
                systems::logic::handle_delete_specification,
                systems::logic::handle_reorder_specification,
                systems::logic::handle_add_spec_value,
                systems::logic::handle_update_spec_value,
                systems::logic::handle_remove_spec_value,
                systems::logic::handle_cell_update,
                systems::logic::handle_update_sku_format,
            )
                .chain()
                .in_set(SheetSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            systems::logic::handle_spec_change_propagation.in_set(SheetSystemSet::Propagate),
        );
        app.add_systems(
            Update,
            systems::logic::handle_validation_request.in_set(SheetSystemSet::Validate),
        );

        info!("SheetsPlugin initialized.");
    }
}
