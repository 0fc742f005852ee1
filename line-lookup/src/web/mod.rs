//! Web layer for the line lookup.
//!
//! Serves the lookup page, HTML fragments and JSON for the resolved
//! station view, and the cached static assets.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
