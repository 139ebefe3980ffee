// src/display/console.rs
//! Coloured console output for the command line front end

use crate::{
    error::{FakeGpsError, Result},
    location::{format_component, CoordinatePair},
};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;

pub struct ConsoleDisplay<W: Write> {
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a heading followed by the latitude and longitude
    pub fn print_location(&mut self, heading: &str, pair: &CoordinatePair) -> Result<()> {
        execute!(self.out, Print(format!("{}\n", heading))).map_err(FakeGpsError::Io)?;

        execute!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print(format!("  Latitude:  {:>12}\n", format_component(pair.latitude))),
            Print(format!("  Longitude: {:>12}\n", format_component(pair.longitude))),
            ResetColor
        )
        .map_err(FakeGpsError::Io)?;

        Ok(())
    }

    pub fn print_error(&mut self, message: &str) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Red),
            Print(format!("Error: {}\n", message)),
            ResetColor
        )
        .map_err(FakeGpsError::Io)?;

        Ok(())
    }

    /// Print an error, falling back to plain `eprintln!` when the console
    /// cannot be written. Returns whether the coloured output succeeded.
    pub fn report_error(&mut self, message: &str) -> bool {
        match self.print_error(message) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Console output failed: {}", e);
                eprintln!("Error: {}", message);
                false
            }
        }
    }
}

impl ConsoleDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl ConsoleDisplay<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}
