// src/display/mod.rs
//! Presentation layers: console output, localized text and the GUI form

pub mod console;
pub mod strings;

#[cfg(feature = "gui")]
pub mod gui;
