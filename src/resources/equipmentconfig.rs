//! Equipment configuration resource.
//!
//! Holds where equipment images live and how they are loaded. Defaults are
//! usable without any file; [`EquipmentConfig::load_from_file`] overrides
//! whatever the INI file sets.
//!
//! # Configuration File Format
//!
//! ```ini
//! [equipment]
//! path = ./img/equips/
//! hue = 0
//! smooth = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_EQUIPMENTS_PATH: &str = "./img/equips/";
const DEFAULT_HUE: i32 = 0;
const DEFAULT_SMOOTH: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Equipment configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EquipmentConfig {
    /// Folder prefix for equipment images, including the trailing separator.
    pub equipments_path: String,
    /// Hue shift requested for every equipment bitmap.
    pub hue: i32,
    /// Request smoothed (filtered) bitmaps.
    pub smooth: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            equipments_path: DEFAULT_EQUIPMENTS_PATH.to_string(),
            hue: DEFAULT_HUE,
            smooth: DEFAULT_SMOOTH,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(path) = config.get("equipment", "path") {
            self.set_equipments_path(path);
        }
        if let Some(hue) = config.getint("equipment", "hue").ok().flatten() {
            self.hue = hue as i32;
        }
        if let Some(smooth) = config.getbool("equipment", "smooth").ok().flatten() {
            self.smooth = smooth;
        }

        info!(
            "Loaded config: equipments path={}, hue={}, smooth={}",
            self.equipments_path, self.hue, self.smooth
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("equipment", "path", Some(self.equipments_path.clone()));
        config.set("equipment", "hue", Some(self.hue.to_string()));
        config.set("equipment", "smooth", Some(self.smooth.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the image folder, appending a `/` when missing so file names can be
    /// concatenated directly.
    pub fn set_equipments_path(&mut self, path: impl Into<String>) {
        let mut path = path.into();
        if !path.is_empty() && !path.ends_with('/') && !path.ends_with('\\') {
            path.push('/');
        }
        self.equipments_path = path;
    }
}
