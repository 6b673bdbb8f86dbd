//! WebSocket hub exposing a discount code registry to remote callers.
//!
//! Callers send JSON invocations over `GET /discountHub` and receive one
//! completion per invocation. See [`model::invocation`] for the message
//! shapes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::HubError;
pub use state::AppState;
