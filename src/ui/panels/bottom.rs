use crate::app::PairSortApp;
use crate::core::{Mode, Snapshot};
use crate::ui::input::InputAction;
use eframe::egui;
use egui_phosphor::regular as Icon;

/// "3-4 / 10" for a pair, "9 / 9" for the last single image
fn progress_text(snapshot: &Snapshot<'_>) -> String {
    match snapshot.mode {
        Mode::Pair => format!(
            "{}-{} / {}",
            snapshot.position,
            snapshot.position + 1,
            snapshot.total
        ),
        Mode::Single => format!("{} / {}", snapshot.position, snapshot.total),
        Mode::Terminated => format!("{} / {}", snapshot.total, snapshot.total),
    }
}

/// Render the bottom panel with the neither/discard button and progress
pub fn render_bottom_panel(app: &PairSortApp, ctx: &egui::Context) -> Option<InputAction> {
    let snapshot = app.session.snapshot();
    let config = &app.config;
    let mut action = None;

    egui::TopBottomPanel::bottom("bottom_panel")
        .frame(
            egui::Frame::none()
                .fill(config.background)
                .inner_margin(config.padding),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let label = match snapshot.mode {
                    Mode::Pair => format!("{} neither", Icon::X),
                    Mode::Single => format!("{} discard", Icon::TRASH),
                    Mode::Terminated => return,
                };

                let button = egui::Button::new(
                    egui::RichText::new(label)
                        .strong()
                        .color(egui::Color32::WHITE),
                )
                .fill(config.neither_button_color)
                .min_size(egui::vec2(120.0, 30.0));

                if ui.add(button).clicked() {
                    action = Some(InputAction::Neither);
                }

                ui.add_space(config.padding);
                let stats = app.session.stats();
                ui.label(
                    egui::RichText::new(format!(
                        "{}    {} {}  {} {}",
                        progress_text(&snapshot),
                        Icon::HEART,
                        stats.kept,
                        Icon::TRASH,
                        stats.discarded
                    ))
                    .small()
                    .color(config.placeholder_color),
                );
            });
        });

    action
}
