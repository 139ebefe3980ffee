// src/sensor.rs
//! FakeGPS sensor discovery and location persistence
//!
//! The driver keeps its position under
//! `SYSTEM\CurrentControlSet\Enum\ROOT\SENSOR\<device>\Device Parameters\FakeGPS`
//! as two fixed-point strings. The device segment varies between installs, so
//! every read and write first searches the sensor root for it.

use crate::{
    error::{FakeGpsError, Result},
    location::{format_component, parse_component, CoordinatePair},
    store::{join_path, ConfigStore, StoreKey},
};
use log::{debug, info};

/// Root under which sensor devices are registered
pub const SENSOR_ROOT: &str = r"SYSTEM\CurrentControlSet\Enum\ROOT\SENSOR";

/// Subkey of a device entry holding the FakeGPS parameters
pub const DEVICE_SUFFIX: &str = r"Device Parameters\FakeGPS";

pub const LATITUDE_PROPERTY: &str = "SENSOR_PROPERTY_LATITUDE";
pub const LONGITUDE_PROPERTY: &str = "SENSOR_PROPERTY_LONGITUDE";

/// Where to look for the driver's parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SensorLayout {
    pub root: String,
    pub suffix: String,
}

impl Default for SensorLayout {
    fn default() -> Self {
        Self {
            root: SENSOR_ROOT.to_string(),
            suffix: DEVICE_SUFFIX.to_string(),
        }
    }
}

impl SensorLayout {
    pub fn new(root: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    /// Full path of the parameters key for one device
    pub fn device_path(&self, device_id: &str) -> String {
        join_path(&[self.root.as_str(), device_id, self.suffix.as_str()])
    }
}

/// Reads and writes the location configured for the FakeGPS driver
pub struct SensorLocation<S> {
    store: S,
    layout: SensorLayout,
}

impl<S: ConfigStore> SensorLocation<S> {
    pub fn new(store: S) -> Self {
        Self::with_layout(store, SensorLayout::default())
    }

    pub fn with_layout(store: S, layout: SensorLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &SensorLayout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find the parameters key of the first device that has one.
    ///
    /// Devices are visited in the order the store lists them; devices
    /// without the FakeGPS subkey are skipped.
    pub fn resolve(&self) -> Result<String> {
        let not_found = || {
            FakeGpsError::NotFound(format!(
                "FakeGPS registry path not found under {}",
                self.layout.root
            ))
        };

        let device_ids = {
            let root = match self.store.open(&self.layout.root) {
                Ok(Some(root)) => root,
                Ok(None) => return Err(not_found()),
                Err(e) => {
                    debug!("Sensor root {} could not be opened: {}", self.layout.root, e);
                    return Err(not_found());
                }
            };
            root.subkey_names().map_err(|e| {
                debug!("Sensor root {} could not be enumerated: {}", self.layout.root, e);
                not_found()
            })?
        };

        for device_id in &device_ids {
            let candidate = self.layout.device_path(device_id);
            match self.store.open(&candidate) {
                Ok(Some(_key)) => {
                    debug!("Found FakeGPS parameters at {}", candidate);
                    return Ok(candidate);
                }
                Ok(None) => debug!("Device {} has no FakeGPS parameters", device_id),
                Err(e) => debug!("Skipping device {}: {}", device_id, e),
            }
        }

        Err(not_found())
    }

    /// Write the pair to the driver's parameters.
    ///
    /// The caller is responsible for range checking; only non-finite values
    /// are rejected here. Latitude is written before longitude and the two
    /// writes are independent: if the second one fails the first stays.
    pub fn set(&self, pair: CoordinatePair) -> Result<()> {
        pair.ensure_finite()?;

        let path = self.resolve()?;
        let key = self.store.create(&path)?;

        let latitude = format_component(pair.latitude);
        let longitude = format_component(pair.longitude);

        key.set_string(LATITUDE_PROPERTY, &latitude)?;
        key.set_string(LONGITUDE_PROPERTY, &longitude)?;

        info!("Set FakeGPS location to {},{} at {}", latitude, longitude, path);
        Ok(())
    }

    /// Read the pair currently stored in the driver's parameters
    pub fn get(&self) -> Result<CoordinatePair> {
        let path = self.resolve()?;

        let key = match self.store.open(&path) {
            Ok(Some(key)) => key,
            Ok(None) => {
                return Err(FakeGpsError::NotFound(format!(
                    "FakeGPS registry path {} not found",
                    path
                )))
            }
            Err(e) => {
                return Err(FakeGpsError::NotFound(format!(
                    "FakeGPS registry path {} could not be opened: {}",
                    path, e
                )))
            }
        };

        let latitude = key.get_string(LATITUDE_PROPERTY)?;
        let longitude = key.get_string(LONGITUDE_PROPERTY)?;

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            (lat, lon) => {
                let missing: Vec<&str> = [
                    (lat.is_none(), LATITUDE_PROPERTY),
                    (lon.is_none(), LONGITUDE_PROPERTY),
                ]
                .iter()
                .filter(|(absent, _)| *absent)
                .map(|(_, name)| *name)
                .collect();

                return Err(FakeGpsError::NotFound(format!(
                    "{} not found in {}",
                    missing.join(" and "),
                    path
                )));
            }
        };

        let pair = CoordinatePair::new(
            parse_stored(LATITUDE_PROPERTY, &latitude)?,
            parse_stored(LONGITUDE_PROPERTY, &longitude)?,
        );
        debug!("Read FakeGPS location {} from {}", pair, path);
        Ok(pair)
    }
}

fn parse_stored(name: &str, text: &str) -> Result<f64> {
    parse_component(text)
        .map_err(|e| FakeGpsError::Store(format!("stored {} is malformed: {}", name, e)))
}
