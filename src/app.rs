use eframe::egui;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::core::{Decision, Mode, Session, Step};
use crate::state::{ImageState, UIState};
use crate::ui;
use crate::ui::image_renderer::ImageRenderer;

pub struct PairSortApp {
    pub session: Session,
    pub config: AppConfig,
    pub images: ImageState,
    pub ui: UIState,
    /// Raised when the session ends on a file error, read by `main` for the exit code
    failed: Arc<AtomicBool>,
}

impl PairSortApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: Session,
        config: AppConfig,
        failed: Arc<AtomicBool>,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = config.background;
        visuals.window_fill = config.background;
        cc.egui_ctx.set_visuals(visuals);

        Self {
            session,
            config,
            images: ImageState::new(),
            ui: UIState::new(),
            failed,
        }
    }

    /// Load textures for whatever the session currently presents
    fn load_snapshot_images(&mut self, ctx: &egui::Context) {
        let snapshot = self.session.snapshot();
        let max_side = self.config.image_display_size;

        if !ImageState::slot_matches(&self.images.left, snapshot.left) {
            self.images.left = snapshot
                .left
                .map(|path| ImageRenderer::load(ctx, path, "left_image", max_side));
        }
        if !ImageState::slot_matches(&self.images.right, snapshot.right) {
            self.images.right = snapshot
                .right
                .map(|path| ImageRenderer::load(ctx, path, "right_image", max_side));
        }
    }

    /// Hand one decision to the session and react to the outcome
    pub fn submit(&mut self, decision: Decision) {
        match self.session.decide(decision) {
            Ok(Step::Advanced(mode)) => {
                debug!("Session advanced to {:?}", mode);
                self.images.reset();
            }
            Ok(Step::Ignored) => {}
            Err(e) => {
                error!("File error, ending session: {}", e);
                self.ui.fatal_error = Some(e.to_string());
                self.failed.store(true, Ordering::Relaxed);
            }
        }
    }

    fn close(&mut self, ctx: &egui::Context) {
        if !self.ui.closing {
            self.ui.closing = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Blocking native error dialog for a failed move
fn show_file_error(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("File Error")
        .set_description(format!("An error occurred while moving files: {}", message))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

/// Blocking native notice shown when nothing is left after validation
pub fn show_no_valid_images() {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title("No Valid Images")
        .set_description("No valid image files were found to process.")
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn file_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl eframe::App for PairSortApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.closing {
            return;
        }

        if let Some(message) = self.ui.fatal_error.take() {
            show_file_error(&message);
            self.close(ctx);
            return;
        }

        if self.session.mode() == Mode::Terminated {
            info!("No images left, closing window");
            self.close(ctx);
            return;
        }

        self.load_snapshot_images(ctx);

        let snapshot = self.session.snapshot();
        let title = format!(
            "{} [{} | {}]",
            self.config.window_title,
            file_name(snapshot.left),
            file_name(snapshot.right)
        );
        if title != self.ui.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.ui.window_title = title;
        }

        // Panels first, central last; only the first action of the frame counts
        let clicked_neither = ui::render_bottom_panel(self, ctx);
        let clicked_image = ui::render_central_panel(self, ctx);
        let pressed = ui::handle_keyboard_shortcuts(ctx);

        let mode = self.session.mode();
        if let Some(decision) = clicked_neither
            .or(clicked_image)
            .or(pressed)
            .and_then(|action| action.to_decision(mode))
        {
            self.submit(decision);
            ctx.request_repaint();
        }
    }
}
