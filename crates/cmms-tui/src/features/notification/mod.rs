//! Toast rendering for the page-level notification surface.

mod render;

pub use render::render_toast;
