// src/display/gui/app.rs
//! Location form state and eframe::App implementation

use crate::{
    display::strings::UiStrings,
    location::{format_component, CoordinatePair},
    sensor::SensorLocation,
    store::ConfigStore,
};
use eframe::egui;
use log::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct FakeGpsApp<S> {
    sensor: SensorLocation<S>,
    strings: &'static UiStrings,
    pub latitude: String,
    pub longitude: String,
    pub status: Option<Status>,
}

impl<S: ConfigStore> FakeGpsApp<S> {
    pub fn new(sensor: SensorLocation<S>, strings: &'static UiStrings) -> Self {
        Self {
            sensor,
            strings,
            latitude: String::new(),
            longitude: String::new(),
            status: None,
        }
    }

    /// Fill the text fields with the location stored for the driver
    pub fn load_location(&mut self) {
        match self.sensor.get() {
            Ok(pair) => {
                self.latitude = format_component(pair.latitude);
                self.longitude = format_component(pair.longitude);
                self.status = None;
            }
            Err(e) => {
                warn!("Loading location failed: {}", e);
                self.status = Some(Status::Error(format!("{}: {}", self.strings.load_error, e)));
            }
        }
    }

    /// Validate the text fields and write them to the driver
    pub fn save_location(&mut self) {
        let result = CoordinatePair::from_fields(&self.latitude, &self.longitude)
            .and_then(|pair| self.sensor.set(pair.rounded()));

        self.status = Some(match result {
            Ok(()) => Status::Info(self.strings.location_set.to_string()),
            Err(e) => {
                warn!("Setting location failed: {}", e);
                Status::Error(format!("{}: {}", self.strings.save_error, e))
            }
        });
    }
}

impl<S: ConfigStore> eframe::App for FakeGpsApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let strings = self.strings;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("location_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label(strings.latitude_label);
                    ui.text_edit_singleline(&mut self.latitude);
                    ui.end_row();

                    ui.label(strings.longitude_label);
                    ui.text_edit_singleline(&mut self.longitude);
                    ui.end_row();
                });

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button(strings.load_button).clicked() {
                    self.load_location();
                }
                if ui.button(strings.save_button).clicked() {
                    self.save_location();
                }
            });

            match &self.status {
                Some(Status::Info(msg)) => {
                    ui.colored_label(egui::Color32::GREEN, msg);
                }
                Some(Status::Error(msg)) => {
                    ui.colored_label(egui::Color32::RED, msg);
                }
                None => {}
            }
        });
    }
}
