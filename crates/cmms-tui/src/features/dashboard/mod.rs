//! Dashboard screen feature (the landing destination after sign-in).

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{
    DashboardState, Metrics, REFRESH_DELAY, REFRESHED_MESSAGE, UPDATE_PROBABILITY,
};
pub use update::{DashboardCommand, handle_key};
