// src/display/gui/mod.rs
//! GUI front end - a small form to load and set the FakeGPS location

mod app;

pub use app::FakeGpsApp;

use crate::{
    display::strings::Language,
    error::Result,
    sensor::SensorLocation,
    store::ConfigStore,
};

/// Open the location form and block until the window is closed
pub fn run<S>(sensor: SensorLocation<S>, language: Language) -> Result<()>
where
    S: ConfigStore + 'static,
{
    let strings = language.strings();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([360.0, 180.0])
            .with_resizable(false)
            .with_title(strings.window_title),
        ..Default::default()
    };

    let app = FakeGpsApp::new(sensor, strings);
    eframe::run_native(strings.window_title, options, Box::new(|_cc| Ok(Box::new(app))))?;

    Ok(())
}
