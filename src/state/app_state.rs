use egui::TextureHandle;
use std::path::{Path, PathBuf};

/// One image box: the file it shows and either its texture or the load error
pub struct DisplayImage {
    pub path: PathBuf,
    pub texture: Option<TextureHandle>,
    pub load_error: Option<String>,
}

impl DisplayImage {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Text shown in place of an image that could not be decoded
    pub fn error_text(&self) -> String {
        match &self.load_error {
            Some(reason) => format!("Error loading:\n{}\n\n{}", self.file_name(), reason),
            None => format!("Error loading:\n{}", self.file_name()),
        }
    }
}

/// Textures for the snapshot currently on screen
#[derive(Default)]
pub struct ImageState {
    pub left: Option<DisplayImage>,
    pub right: Option<DisplayImage>,
}

impl ImageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both textures so the next frame loads the new snapshot
    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Whether a slot already holds `wanted` (or is correctly empty)
    pub fn slot_matches(slot: &Option<DisplayImage>, wanted: Option<&Path>) -> bool {
        match (slot, wanted) {
            (Some(image), Some(path)) => image.path == path,
            (None, None) => true,
            _ => false,
        }
    }
}

/// Session-level UI flags
#[derive(Default)]
pub struct UIState {
    /// Message of a fatal file error waiting to be shown before closing
    pub fatal_error: Option<String>,
    /// Set once the window has been asked to close
    pub closing: bool,
    /// Title last sent to the viewport
    pub window_title: String,
}

impl UIState {
    pub fn new() -> Self {
        Self::default()
    }
}
