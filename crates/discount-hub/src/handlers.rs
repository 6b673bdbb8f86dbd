mod health;
mod hub;

pub use health::health_handler;
pub use hub::{dispatch, handle_text, hub_handler};
