// src/lib.rs
//! FakeGPS Library
//!
//! Locates the FakeGPS virtual sensor driver's settings in the system
//! configuration store and reads or writes the location it reports.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod location;
pub mod sensor;
pub mod store;

// Re-export main types for convenience
pub use error::{FakeGpsError, Result};
pub use location::CoordinatePair;
pub use sensor::{SensorLayout, SensorLocation};
pub use store::{ConfigStore, MemoryStore, StoreKey};

#[cfg(windows)]
pub use store::RegistryStore;

#[cfg(feature = "gui")]
pub use display::gui::FakeGpsApp;
