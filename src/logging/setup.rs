use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

fn default_filter() -> EnvFilter {
    // Our own events at info, GUI stack kept quiet
    let mut filter = EnvFilter::new("info");
    for directive in ["winit=warn", "eframe=warn", "egui=warn", "wgpu=warn", "log=warn"] {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Install the global subscriber: short lines on stdout, and full lines with
/// source locations in `log_file` when one is given. `RUST_LOG` overrides the default filter.
pub fn setup_logging(log_file: Option<&Path>) -> io::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .event_format(BracketedFormatter::full())
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter::compact())
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter()))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    info!("Starting pairsort {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = log_file {
        info!("Logging to file: {:?}", path);
    }
    Ok(())
}
