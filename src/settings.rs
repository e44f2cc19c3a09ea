use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CALLBACK_NAME: &str = "survey-feedback-callback";
pub const DEFAULT_PLAYER_SCRIPT_URL: &str =
    "https://assets.kpoint.com/orca/media/embed/videofront-vega.js";
pub const DEFAULT_ICON_STYLESHEET_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid generator settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Delay between removing the acknowledgment and handing control back to
    /// the player.
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
    #[serde(default = "default_callback_name")]
    pub callback_name: String,
    #[serde(default = "default_player_script_url")]
    pub player_script_url: String,
    #[serde(default = "default_icon_stylesheet_url")]
    pub icon_stylesheet_url: String,
    #[serde(default = "default_font_styles")]
    pub font_styles: Vec<String>,
    #[serde(default = "default_z_index")]
    pub z_index: String,
    #[serde(default)]
    pub template_dir: Option<String>,
}

fn default_transition_delay_ms() -> u64 {
    300
}

fn default_callback_name() -> String {
    DEFAULT_CALLBACK_NAME.to_string()
}

fn default_player_script_url() -> String {
    DEFAULT_PLAYER_SCRIPT_URL.to_string()
}

fn default_icon_stylesheet_url() -> String {
    DEFAULT_ICON_STYLESHEET_URL.to_string()
}

fn default_font_styles() -> Vec<String> {
    ["300", "400", "500", "700"].iter().map(|s| s.to_string()).collect()
}

fn default_z_index() -> String {
    "1000".to_string()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
            callback_name: default_callback_name(),
            player_script_url: default_player_script_url(),
            icon_stylesheet_url: default_icon_stylesheet_url(),
            font_styles: default_font_styles(),
            z_index: default_z_index(),
            template_dir: None,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<GeneratorSettings, SettingsError> {
    if !path.exists() {
        let defaults = GeneratorSettings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if raw.trim().is_empty() {
        let defaults = GeneratorSettings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_settings(path: &Path, settings: &GeneratorSettings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload).map_err(io_err)
}
