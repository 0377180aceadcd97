mod auth;
mod feedback;
mod health_check;
mod jokes;
mod preferences;

pub use auth::{login, refresh};
pub use feedback::submit_feedback;
pub use health_check::health_check;
pub use jokes::get_joke;
pub use preferences::{get_preferences, update_preferences};
