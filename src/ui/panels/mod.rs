mod bottom;
mod central;

pub use bottom::render_bottom_panel;
pub use central::render_central_panel;
