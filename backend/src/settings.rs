//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `RECIPES_*` environment variables, command-line flags, or a
//! configuration file, in the precedence OrthoConfig applies.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::telemetry::LogFormat;

const DEFAULT_UNITS: [&str; 10] = [
    "cups", "g", "kg", "l", "lb", "ml", "oz", "pieces", "tbsp", "tsp",
];
const DEFAULT_QUANTITY_SCALE: u32 = 2;

/// Configuration for the recipe companion runtime.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct RecipeCompanionSettings {
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
    /// Comma-separated unit labels seeding the unit catalog.
    pub units: Option<String>,
    /// Decimal places used when rendering shopping-list quantities.
    pub quantity_scale: Option<u32>,
}

impl RecipeCompanionSettings {
    /// Unit labels to seed, falling back to the built-in list when unset or
    /// blank. Empty entries are dropped.
    pub fn unit_names(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .units
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if configured.is_empty() {
            DEFAULT_UNITS.iter().map(|name| (*name).to_owned()).collect()
        } else {
            configured
        }
    }

    pub fn quantity_scale(&self) -> u32 {
        self.quantity_scale.unwrap_or(DEFAULT_QUANTITY_SCALE)
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}
