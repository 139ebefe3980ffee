// src/location.rs
//! Coordinate pair type, validation and invariant text encoding

use crate::error::{FakeGpsError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of fraction digits kept when a coordinate is stored or displayed
pub const PRECISION: usize = 5;

const SCALE: f64 = 100_000.0;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub latitude: f64,
    pub longitude: f64,
}

impl CoordinatePair {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a pair from two separate text fields.
    ///
    /// A `,` inside a field is read as the decimal separator, so `"37,42"`
    /// is accepted as `37.42`. The result is range checked.
    pub fn from_fields(latitude: &str, longitude: &str) -> Result<Self> {
        let latitude = parse_component(&latitude.trim().replace(',', "."))?;
        let longitude = parse_component(&longitude.trim().replace(',', "."))?;

        let pair = Self::new(latitude, longitude);
        pair.validate()?;
        Ok(pair)
    }

    /// Check both components are finite and inside their ranges
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        self.ensure_finite()?;

        let (lat_min, lat_max) = LATITUDE_RANGE;
        if !(lat_min..=lat_max).contains(&self.latitude) {
            return Err(FakeGpsError::InvalidValue(format!(
                "latitude {} is outside [{}, {}]",
                self.latitude, lat_min, lat_max
            )));
        }

        let (lon_min, lon_max) = LONGITUDE_RANGE;
        if !(lon_min..=lon_max).contains(&self.longitude) {
            return Err(FakeGpsError::InvalidValue(format!(
                "longitude {} is outside [{}, {}]",
                self.longitude, lon_min, lon_max
            )));
        }

        Ok(())
    }

    /// Reject NaN and infinite components, without any range check
    pub fn ensure_finite(&self) -> Result<()> {
        if !self.latitude.is_finite() {
            return Err(FakeGpsError::InvalidValue(format!(
                "latitude must be finite, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() {
            return Err(FakeGpsError::InvalidValue(format!(
                "longitude must be finite, got {}",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Return a copy with both components rounded to five decimals
    pub fn rounded(&self) -> Self {
        Self::new(round_component(self.latitude), round_component(self.longitude))
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            format_component(self.latitude),
            format_component(self.longitude)
        )
    }
}

impl FromStr for CoordinatePair {
    type Err = FakeGpsError;

    /// Parse `"lat,long"` text as given on the command line
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(FakeGpsError::Parse(format!(
                "expected \"latitude,longitude\", got \"{}\"",
                s
            )));
        }

        let pair = Self::new(parse_component(parts[0])?, parse_component(parts[1])?);
        pair.validate()?;
        Ok(pair)
    }
}

/// Round half away from zero to five decimals
pub fn round_component(value: f64) -> f64 {
    let scaled = value * SCALE;
    // Magnitudes this large have no fraction digits left to round
    if !scaled.is_finite() {
        return value;
    }
    // Adding 0.0 folds -0.0 into 0.0
    scaled.round() / SCALE + 0.0
}

/// Fixed-point text with exactly five fraction digits and a `.` separator
pub fn format_component(value: f64) -> String {
    format!("{:.*}", PRECISION, round_component(value))
}

/// Parse invariant decimal text, e.g. `-122.08400`
pub fn parse_component(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|e| FakeGpsError::Parse(format!("\"{}\" is not a decimal number: {}", trimmed, e)))
}
