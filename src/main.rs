// src/main.rs
//! FakeGPS - set the location reported by the FakeGPS sensor driver

#[cfg(not(feature = "gui"))]
use clap::CommandFactory;
use clap::Parser;
use env_logger::{Builder, WriteStyle};
#[cfg(feature = "gui")]
use fake_gps::display;
use fake_gps::{
    cli::{self, Cli},
    config::FakeGpsConfig,
    display::{console::ConsoleDisplay, strings::Language},
    store, Result, SensorLocation,
};
use log::{error, warn, LevelFilter};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first (without logging)
    let mut config = FakeGpsConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        FakeGpsConfig::default()
    });

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()
    };
    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Auto)
        .format_timestamp_secs()
        .init();

    let language = Language::detect();

    if !cli.has_action() {
        return match open_gui(&config, language) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("GUI error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run_commands(&cli, &mut config, language).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ConsoleDisplay::stderr().report_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run_commands(cli: &Cli, config: &mut FakeGpsConfig, language: Language) -> Result<()> {
    let commands = cli.commands()?;
    let sensor = SensorLocation::with_layout(store::system_store()?, config.layout());
    let mut console = ConsoleDisplay::stdout();

    // Each successful Set is saved right away, so a later failing Read or
    // Query does not lose it
    cli::execute(&commands, &sensor, &mut console, language.strings(), |pair| {
        config.record_location(pair);
        if let Err(e) = config.save() {
            warn!("Failed to save configuration: {}", e);
        }
    })
    .await
}

#[cfg(feature = "gui")]
fn open_gui(config: &FakeGpsConfig, language: Language) -> Result<()> {
    let sensor = SensorLocation::with_layout(store::system_store()?, config.layout());
    display::gui::run(sensor, language)
}

#[cfg(not(feature = "gui"))]
fn open_gui(_config: &FakeGpsConfig, _language: Language) -> Result<()> {
    eprintln!("Error: The location form requires the 'gui' feature.");
    eprintln!("Build with: cargo build --features gui");
    eprintln!();
    Cli::command().print_help()?;
    Err(fake_gps::FakeGpsError::Other("GUI support not compiled in".to_string()))
}
