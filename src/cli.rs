// src/cli.rs
//! Command line options and command execution

use crate::{
    display::{console::ConsoleDisplay, strings::UiStrings},
    error::{FakeGpsError, Result},
    geolocation,
    location::CoordinatePair,
    sensor::SensorLocation,
    store::ConfigStore,
};
use clap::Parser;
use std::io::Write;

/// Set or read the location reported by the FakeGPS sensor driver.
///
/// Run without arguments to open the location form.
#[derive(Debug, Default, Parser)]
#[command(name = "fake-gps", version, about)]
pub struct Cli {
    /// Location to set, as "latitude,longitude" (e.g. "47.6415,-122.1296")
    #[arg(short = 'l', long = "latlong", value_name = "LAT,LONG", allow_hyphen_values = true)]
    pub lat_long: Option<String>,

    /// Print the location stored in the driver's settings
    #[arg(short, long)]
    pub read: bool,

    /// Print the location reported by the Windows location API
    #[arg(short, long)]
    pub get: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Set(CoordinatePair),
    Read,
    Query,
}

impl Cli {
    /// Whether any command was requested (otherwise the GUI opens)
    pub fn has_action(&self) -> bool {
        self.lat_long.is_some() || self.read || self.get
    }

    /// Commands in execution order: set, then read, then query
    pub fn commands(&self) -> Result<Vec<Command>> {
        let mut commands = Vec::new();

        if let Some(text) = self.lat_long.as_deref().filter(|t| !t.trim().is_empty()) {
            let pair: CoordinatePair = text.parse().map_err(|e| {
                FakeGpsError::InvalidValue(format!("Invalid LatLong \"{}\": {}", text, e))
            })?;
            commands.push(Command::Set(pair));
        }
        if self.read {
            commands.push(Command::Read);
        }
        if self.get {
            commands.push(Command::Query);
        }

        Ok(commands)
    }
}

/// Run the commands in order, stopping at the first failure.
///
/// `on_set` receives each location as soon as it has been written to the
/// driver, before any later command runs.
pub async fn execute<S, W>(
    commands: &[Command],
    sensor: &SensorLocation<S>,
    console: &mut ConsoleDisplay<W>,
    strings: &UiStrings,
    mut on_set: impl FnMut(CoordinatePair),
) -> Result<()>
where
    S: ConfigStore,
    W: Write,
{
    for command in commands {
        match command {
            Command::Set(pair) => {
                sensor.set(*pair)?;
                on_set(pair.rounded());
                console.print_location(strings.set_heading, &pair.rounded())?;
            }
            Command::Read => {
                let pair = sensor.get()?;
                console.print_location(strings.read_heading, &pair)?;
            }
            Command::Query => {
                let pair = geolocation::query_location().await?;
                console.print_location(strings.query_heading, &pair)?;
            }
        }
    }

    Ok(())
}
