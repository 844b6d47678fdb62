// src/sheets/systems/io/startup.rs
use bevy::prelude::*;

use super::import::{apply_workbook_snapshot, PendingWorkbookSnapshot};
use crate::example_definitions;
use crate::settings::{io::load_settings_from_file, SkuFormatSettings};
use crate::sheets::resources::{SheetRegistry, SpecBaselineCache, ValidationResultsCache};

/// Loads the persisted SKU format settings, keeping defaults when the file
/// is missing or unreadable.
pub fn load_sku_format_settings(mut settings: ResMut<SkuFormatSettings>) {
    match load_settings_from_file() {
        Ok(loaded) => *settings = loaded,
        Err(e) => {
            warn!("Could not load SKU format settings ({}). Using defaults.", e);
        }
    }
}

/// Applies a workbook snapshot parked by the host before startup, then
/// drops the pending resource.
pub fn apply_pending_snapshot(
    mut commands: Commands,
    pending: Option<Res<PendingWorkbookSnapshot>>,
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
    mut validation_cache: ResMut<ValidationResultsCache>,
) {
    let Some(pending) = pending else {
        return;
    };
    apply_workbook_snapshot(
        &pending.0,
        &mut registry,
        &mut baselines,
        &mut validation_cache,
    );
    commands.remove_resource::<PendingWorkbookSnapshot>();
}

/// Registers the default workbook when nothing else populated the registry
/// (fresh start, no snapshot).
pub fn register_default_sheets_if_needed(
    mut registry: ResMut<SheetRegistry>,
    mut baselines: ResMut<SpecBaselineCache>,
) {
    if !registry.get_sheet_names().is_empty() {
        return;
    }
    for metadata in example_definitions::default_workbook() {
        let name = metadata.sheet_name.clone();
        for spec in &metadata.specifications {
            baselines.snapshot(&name, spec);
        }
        if registry.register(metadata) {
            info!("Registered default sheet '{}'.", name);
        }
    }
}
