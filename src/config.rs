// src/config.rs
//! Application settings with platform-specific storage

use crate::{
    error::{FakeGpsError, Result},
    location::CoordinatePair,
    sensor::{SensorLayout, DEVICE_SUFFIX, SENSOR_ROOT},
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeGpsConfig {
    pub log_level: String,  // "error", "warn", "info", "debug", "trace"
    pub sensor_root: String,
    pub device_suffix: String,
    pub last_location: Option<CoordinatePair>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for FakeGpsConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            sensor_root: SENSOR_ROOT.to_string(),
            device_suffix: DEVICE_SUFFIX.to_string(),
            last_location: None,
            last_updated: None,
        }
    }
}

impl FakeGpsConfig {
    /// Load configuration from storage
    pub fn load() -> Result<Self> {
        #[cfg(windows)]
        {
            Self::load_from_registry()
        }

        #[cfg(not(windows))]
        {
            Self::load_from_file(&Self::get_config_path()?)
        }
    }

    /// Save configuration to storage
    pub fn save(&self) -> Result<()> {
        #[cfg(windows)]
        {
            self.save_to_registry()
        }

        #[cfg(not(windows))]
        {
            self.save_to_file(&Self::get_config_path()?)
        }
    }

    /// Sensor layout described by this configuration
    pub fn layout(&self) -> SensorLayout {
        SensorLayout::new(self.sensor_root.clone(), self.device_suffix.clone())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    /// Remember the last location written to the driver
    pub fn record_location(&mut self, pair: CoordinatePair) {
        self.last_location = Some(pair.rounded());
        self.last_updated = Some(Utc::now());
    }

    /// Load from Windows Registry
    #[cfg(windows)]
    fn load_from_registry() -> Result<Self> {
        use crate::location::parse_component;
        use crate::store::{ConfigStore, RegistryStore, StoreKey};

        let hkcu = RegistryStore::current_user();
        let key = match hkcu.open(Self::REGISTRY_PATH)? {
            Some(key) => key,
            // Registry key doesn't exist, return default
            None => return Ok(Self::default()),
        };

        let defaults = Self::default();
        let latitude = key.get_string("LastLatitude")?;
        let longitude = key.get_string("LastLongitude")?;
        let last_location = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(CoordinatePair::new(
                parse_component(&lat)?,
                parse_component(&lon)?,
            )),
            _ => None,
        };
        let last_updated = key
            .get_string("LastUpdated")?
            .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        Ok(Self {
            log_level: key.get_string("LogLevel")?.unwrap_or(defaults.log_level),
            sensor_root: key.get_string("SensorRoot")?.unwrap_or(defaults.sensor_root),
            device_suffix: key
                .get_string("DeviceSuffix")?
                .unwrap_or(defaults.device_suffix),
            last_location,
            last_updated,
        })
    }

    #[cfg(windows)]
    const REGISTRY_PATH: &'static str = r"Software\FakeGPS";

    /// Save to Windows Registry
    #[cfg(windows)]
    fn save_to_registry(&self) -> Result<()> {
        use crate::location::format_component;
        use crate::store::{ConfigStore, RegistryStore, StoreKey};

        let hkcu = RegistryStore::current_user();
        let key = hkcu.create(Self::REGISTRY_PATH)?;

        key.set_string("LogLevel", &self.log_level)?;
        key.set_string("SensorRoot", &self.sensor_root)?;
        key.set_string("DeviceSuffix", &self.device_suffix)?;

        if let Some(pair) = self.last_location {
            key.set_string("LastLatitude", &format_component(pair.latitude))?;
            key.set_string("LastLongitude", &format_component(pair.longitude))?;
        }

        if let Some(ts) = self.last_updated {
            key.set_string("LastUpdated", &ts.to_rfc3339())?;
        }

        Ok(())
    }

    /// Load from a JSON config file, defaults when it does not exist
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Save to a JSON config file
    pub fn save_to_file(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FakeGpsError::Other(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FakeGpsError::Other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)
            .map_err(|e| FakeGpsError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path for Unix systems
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| FakeGpsError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("fake-gps")
            .join("config.json"))
    }
}
