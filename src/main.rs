use clap::Parser;
use eframe::egui;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

mod app;
mod cli;
mod config;
mod core;
mod logging;
mod state;
mod ui;

use app::PairSortApp;
use cli::Cli;
use config::AppConfig;
use crate::core::{Relocator, Session, SessionError};

fn main() -> ExitCode {
    // Exits with usage text and status 2 when no files are given
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.log_file.as_deref()) {
        eprintln!("Error: could not open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let config = AppConfig::from_cli(&cli);
    let relocator = Relocator::new(config.destinations(), config.collision);

    let session = match Session::start(&cli.files, &config.session_options(), relocator) {
        Ok(session) => session,
        Err(SessionError::EmptyInput) => {
            eprintln!("Error: no valid image files were found to process.");
            app::show_no_valid_images();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Could not start session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_title(config.window_title),
        ..Default::default()
    };

    info!("Launching application window");
    let title = config.window_title;
    let failed = Arc::new(AtomicBool::new(false));
    let app_failed = failed.clone();
    let result = eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(PairSortApp::new(cc, session, config, app_failed)))),
    );

    match result {
        Ok(()) if failed.load(Ordering::Relaxed) => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Window error: {}", e);
            ExitCode::FAILURE
        }
    }
}
