//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_csv_file_name() -> String {
    "pergudangan-links.csv".to_string()
}

fn default_json_file_name() -> String {
    "pergudangan-links.json".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory that exports are written into.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: String,

    #[serde(default = "default_json_file_name")]
    pub json_file_name: String,

    /// Default row limit for list output.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            csv_file_name: default_csv_file_name(),
            json_file_name: default_json_file_name(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.csv_file_name, "pergudangan-links.csv");
        assert_eq!(config.json_file_name, "pergudangan-links.json");
        assert_eq!(config.default_limit, 50);
    }
}
