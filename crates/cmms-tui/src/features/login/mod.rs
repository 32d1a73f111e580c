//! Login screen feature.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{CONTROLS, Control, LoginForm, LoginState};
pub use update::{handle_key, handle_paste};
