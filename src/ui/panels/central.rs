use crate::app::PairSortApp;
use crate::config::AppConfig;
use crate::core::Mode;
use crate::state::DisplayImage;
use crate::ui::image_renderer::ImageRenderer;
use crate::ui::input::InputAction;
use eframe::egui;

const BOX_ROUNDING: f32 = 4.0;
const BOX_BORDER_WIDTH: f32 = 2.0;
const MESSAGE_FONT_SIZE: f32 = 16.0;

/// Draw one image box and report whether it was clicked
fn render_image_box(
    ui: &mut egui::Ui,
    image: Option<&DisplayImage>,
    config: &AppConfig,
    clickable: bool,
) -> bool {
    let sense = if clickable {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), sense);
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, BOX_ROUNDING, config.background);

    // Raised border, highlighted while a clickable box is hovered
    let border = if clickable && response.hovered() {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(90)
    };
    painter.rect_stroke(
        rect.shrink(BOX_BORDER_WIDTH / 2.0),
        BOX_ROUNDING,
        egui::Stroke::new(BOX_BORDER_WIDTH, border),
    );

    let inner = rect.shrink(config.padding);
    match image {
        Some(DisplayImage {
            texture: Some(texture),
            ..
        }) => {
            let img_size = texture.size_vec2();
            let scale = ImageRenderer::calculate_image_scale(img_size, inner.size());
            let image_rect = egui::Rect::from_center_size(inner.center(), img_size * scale);
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        Some(failed) => {
            painter.text(
                inner.center(),
                egui::Align2::CENTER_CENTER,
                failed.error_text(),
                egui::FontId::proportional(MESSAGE_FONT_SIZE),
                config.error_color,
            );
        }
        None => {
            painter.text(
                inner.center(),
                egui::Align2::CENTER_CENTER,
                "no image",
                egui::FontId::proportional(MESSAGE_FONT_SIZE),
                config.placeholder_color,
            );
        }
    }

    if clickable && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    clickable && response.clicked()
}

/// Render the two image boxes side by side. A click on a box is returned
/// as the corresponding input action.
pub fn render_central_panel(app: &PairSortApp, ctx: &egui::Context) -> Option<InputAction> {
    let mode = app.session.mode();
    let config = &app.config;
    let mut action = None;

    egui::CentralPanel::default()
        .frame(
            egui::Frame::none()
                .fill(config.background)
                .inner_margin(config.padding),
        )
        .show(ctx, |ui| {
            if mode == Mode::Terminated {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("All images sorted")
                            .size(MESSAGE_FONT_SIZE)
                            .color(config.placeholder_color),
                    );
                });
                return;
            }

            ui.columns(2, |columns| {
                if render_image_box(&mut columns[0], app.images.left.as_ref(), config, true) {
                    action = Some(InputAction::ChooseLeft);
                }
                let right_clickable = mode == Mode::Pair;
                if render_image_box(
                    &mut columns[1],
                    app.images.right.as_ref(),
                    config,
                    right_clickable,
                ) {
                    action = Some(InputAction::ChooseRight);
                }
            });
        });

    action
}
