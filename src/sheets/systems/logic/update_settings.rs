// src/sheets/systems/logic/update_settings.rs
use bevy::prelude::*;

use crate::settings::{io::save_settings_to_file, SkuFormatSettings};
use crate::sheets::{
    events::{RequestSkuRegeneration, RequestUpdateSkuFormat, SheetOperationFeedback},
    resources::SheetRegistry,
};

/// Applies a partial SKU-format update. Any actual change persists the
/// settings and regenerates the SKU column of every data sheet — format is
/// global, so the effect is uniform.
pub fn handle_update_sku_format(
    mut events: EventReader<RequestUpdateSkuFormat>,
    mut settings: ResMut<SkuFormatSettings>,
    registry: Res<SheetRegistry>,
    mut feedback_writer: EventWriter<SheetOperationFeedback>,
    mut regen_writer: EventWriter<RequestSkuRegeneration>,
) {
    for event in events.read() {
        let mut updated = settings.clone();
        if let Some(delimiter) = &event.delimiter {
            updated.delimiter = delimiter.clone();
        }
        if let Some(prefix) = &event.prefix {
            updated.prefix = prefix.clone();
        }
        if let Some(suffix) = &event.suffix {
            updated.suffix = suffix.clone();
        }

        if updated == *settings {
            trace!("SKU format unchanged. Skipping update.");
            continue;
        }
        *settings = updated;

        if let Err(e) = save_settings_to_file(&*settings) {
            error!("Failed to persist SKU format settings: {}", e);
        }

        let msg = format!(
            "Updated SKU format (delimiter '{}', prefix '{}', suffix '{}').",
            settings.delimiter, settings.prefix, settings.suffix
        );
        info!("{}", msg);
        feedback_writer.write(SheetOperationFeedback {
            message: msg,
            is_error: false,
        });

        for sheet_name in registry.get_data_sheet_names() {
            regen_writer.write(RequestSkuRegeneration { sheet_name });
        }
    }
}
