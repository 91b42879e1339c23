use eframe::egui::Color32;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::core::{CollisionPolicy, Destinations, SessionOptions};

/// Application configuration for a sorting session
///
/// Holds the destination layout, the collision and shuffle choices taken
/// from the command line, and the fixed display constants.
#[derive(Clone)]
pub struct AppConfig {
    pub kept_dir: PathBuf,
    pub discarded_dir: PathBuf,
    pub collision: CollisionPolicy,
    pub seed: Option<u64>,
    pub window_title: &'static str,
    /// Side length of the square box each image is fitted into
    pub image_display_size: u32,
    pub padding: f32,
    pub background: Color32,
    pub error_color: Color32,
    pub placeholder_color: Color32,
    pub neither_button_color: Color32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kept_dir: PathBuf::from(".chosen"),
            discarded_dir: PathBuf::from(".discarded"),
            collision: CollisionPolicy::default(),
            seed: None,
            window_title: "pairsort - choose your favourite",
            image_display_size: 900,
            padding: 7.0,
            background: Color32::from_rgb(0x2d, 0x2d, 0x2d),
            error_color: Color32::from_rgb(220, 50, 50),
            placeholder_color: Color32::from_rgb(0xcc, 0xcc, 0xcc),
            neither_button_color: Color32::from_rgb(200, 30, 30),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by whatever the command line specified
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if let Some(dir) = &cli.kept_dir {
            config.kept_dir = dir.clone();
        }
        if let Some(dir) = &cli.discarded_dir {
            config.discarded_dir = dir.clone();
        }
        config.collision = cli.on_collision;
        config.seed = cli.seed;
        config
    }

    pub fn destinations(&self) -> Destinations {
        Destinations::new(self.kept_dir.clone(), self.discarded_dir.clone())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions { seed: self.seed }
    }

    /// Window size that fits two image boxes side by side plus the button row
    pub fn window_size(&self) -> [f32; 2] {
        let side = self.image_display_size as f32;
        [
            2.0 * side + 6.0 * self.padding,
            side + 4.0 * self.padding + 60.0,
        ]
    }
}
