use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VerseLinkError};
use crate::sources::write_json_atomic;
use crate::types::Side;

/// Name of the configuration file stored inside the `.verselink` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory used to store verselink metadata.
pub const VERSELINK_DIR: &str = ".verselink";

/// Where one edition's records live and how its ids are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Display name of the edition, e.g. `latin`.
    pub name: String,
    /// Path to the JSON record file; relative paths resolve against the
    /// project root.
    pub path: String,
    /// Prefix used when ids are regenerated on export.
    pub id_prefix: String,
}

/// Configuration for a verselink project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseLinkConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// First edition.
    pub a: CollectionConfig,
    /// Second edition.
    pub b: CollectionConfig,
    /// Whether duplicate ids inside one edition are reported by `link`.
    pub warn_on_duplicate_ids: bool,
}

impl Default for VerseLinkConfig {
    fn default() -> Self {
        Self {
            version: 1,
            a: CollectionConfig {
                name: "latin".to_string(),
                path: "latin_verses.json".to_string(),
                id_prefix: "L".to_string(),
            },
            b: CollectionConfig {
                name: "english".to_string(),
                path: "english_verses.json".to_string(),
                id_prefix: "E".to_string(),
            },
            warn_on_duplicate_ids: true,
        }
    }
}

impl VerseLinkConfig {
    /// Returns the collection settings for the given side.
    pub fn collection(&self, side: Side) -> &CollectionConfig {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Resolves a side's record path against `project_root`.
    pub fn collection_path(&self, project_root: &Path, side: Side) -> PathBuf {
        let path = Path::new(&self.collection(side).path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }
}

/// Returns the path to the `.verselink` directory within the given project root.
pub fn get_verselink_dir(project_root: &Path) -> PathBuf {
    project_root.join(VERSELINK_DIR)
}

/// Returns the path to the configuration file within the `.verselink` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_verselink_dir(project_root).join(CONFIG_FILENAME)
}

/// Loads the configuration from disk.
///
/// If the configuration file does not exist, returns the default configuration.
pub fn load_config(project_root: &Path) -> Result<VerseLinkConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        return Ok(VerseLinkConfig::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| VerseLinkError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: VerseLinkConfig =
        serde_json::from_str(&contents).map_err(|e| VerseLinkError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
pub fn save_config(project_root: &Path, config: &VerseLinkConfig) -> Result<()> {
    let config_path = get_config_path(project_root);
    write_json_atomic(&config_path, config).map_err(|e| VerseLinkError::Config {
        message: format!(
            "failed to write config file '{}': {}",
            config_path.display(),
            e
        ),
    })
}
