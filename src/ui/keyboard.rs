use eframe::egui;

use super::input::InputAction;

/// Map a key to an input action: arrows pick a side, Down or N means neither
pub fn action_for_key(key: egui::Key) -> Option<InputAction> {
    match key {
        egui::Key::ArrowLeft => Some(InputAction::ChooseLeft),
        egui::Key::ArrowRight => Some(InputAction::ChooseRight),
        egui::Key::ArrowDown | egui::Key::N => Some(InputAction::Neither),
        _ => None,
    }
}

/// First shortcut pressed this frame, if any
pub fn handle_keyboard_shortcuts(ctx: &egui::Context) -> Option<InputAction> {
    ctx.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => action_for_key(*key),
            _ => None,
        })
    })
}
