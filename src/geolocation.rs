// src/geolocation.rs
//! Windows Location API query
//!
//! Asks the operating system where it thinks the device is, which is how a
//! user checks that the FakeGPS driver picked up the configured location.

use crate::{
    error::{FakeGpsError, Result},
    location::CoordinatePair,
};

#[cfg(windows)]
use {
    log::debug,
    windows::{Devices::Geolocation::*, Foundation::TimeSpan},
};

/// Position requests give up after this many seconds
pub const QUERY_TIMEOUT_SECS: i64 = 10;

#[cfg(windows)]
/// Request permission to use the Location API
pub async fn request_location_access() -> Result<()> {
    let access_status = Geolocator::RequestAccessAsync()?.await?;

    match access_status {
        GeolocationAccessStatus::Allowed => {
            debug!("Location access granted");
            Ok(())
        }
        GeolocationAccessStatus::Denied => {
            Err(FakeGpsError::Other("Location access denied by user".to_string()))
        }
        GeolocationAccessStatus::Unspecified => {
            Err(FakeGpsError::Other("Location access unspecified".to_string()))
        }
        _ => Err(FakeGpsError::Other("Unknown location access status".to_string())),
    }
}

#[cfg(windows)]
/// Query the current position reported by Windows
pub async fn query_location() -> Result<CoordinatePair> {
    request_location_access().await?;

    let geolocator = Geolocator::new()?;
    geolocator.SetDesiredAccuracy(PositionAccuracy::High)?;

    // TimeSpan counts 100ns ticks
    let timeout = TimeSpan {
        Duration: 10_000_000 * QUERY_TIMEOUT_SECS,
    };

    let position = geolocator
        .GetGeopositionAsyncWithAgeAndTimeout(timeout, timeout)?
        .await?;
    let point = position.Coordinate()?.Point()?.Position()?;

    debug!(
        "Location API reported {},{}",
        point.Latitude, point.Longitude
    );
    Ok(CoordinatePair::new(point.Latitude, point.Longitude))
}

// Non-Windows implementations
#[cfg(not(windows))]
pub async fn request_location_access() -> Result<()> {
    Err(FakeGpsError::Other(
        "Windows Location Service is only available on Windows".to_string(),
    ))
}

#[cfg(not(windows))]
pub async fn query_location() -> Result<CoordinatePair> {
    request_location_access().await?;
    Err(FakeGpsError::Other(
        "Windows Location Service is only available on Windows".to_string(),
    ))
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_is_unavailable_off_windows() {
        let err = query_location().await.unwrap_err();
        assert!(err.to_string().contains("only available on Windows"));
    }
}
