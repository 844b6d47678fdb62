use bevy::log::{error, info};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;

use super::SkuFormatSettings;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "SkuForgeOrg";
const APPLICATION: &str = "SkuForge";
const CONFIG_FILE: &str = "sku_format_settings.json";

fn get_config_path() -> io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join(CONFIG_FILE))
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine project directories for app settings.",
        ))
    }
}

/// Loads the persisted SKU format. A missing file is not an error: the
/// defaults apply until the user changes something.
pub fn load_settings_from_file() -> io::Result<SkuFormatSettings> {
    let config_file = get_config_path()?;
    match fs::File::open(&config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                error!(
                    "Settings: Failed to parse settings file {:?}: {}",
                    &config_file, e
                );
                io::Error::new(
                    ErrorKind::InvalidData,
                    format!("Failed to parse settings file: {}", e),
                )
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "Settings: No settings file at {:?}. Using defaults.",
                config_file
            );
            Ok(SkuFormatSettings::default())
        }
        Err(e) => {
            error!(
                "Settings: Failed to open settings file {:?}: {}",
                &config_file, e
            );
            Err(e)
        }
    }
}

pub fn save_settings_to_file(settings: &SkuFormatSettings) -> io::Result<()> {
    let config_file = get_config_path()?;
    info!("Settings: Saving SKU format to {:?}", config_file);
    let file = fs::File::create(&config_file)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!(
            "Settings: Failed to serialize settings to {:?}: {}",
            &config_file, e
        );
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    Ok(())
}
