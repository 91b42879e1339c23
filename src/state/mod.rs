mod app_state;

pub use app_state::{DisplayImage, ImageState, UIState};
