pub mod io;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// How generated SKUs are assembled: fragments joined by `delimiter`, the
/// whole string wrapped in `prefix`/`suffix`. Applied uniformly to every
/// sheet; changing any field regenerates all SKU columns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Resource)]
pub struct SkuFormatSettings {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

fn default_delimiter() -> String {
    "-".to_string()
}

impl Default for SkuFormatSettings {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}
