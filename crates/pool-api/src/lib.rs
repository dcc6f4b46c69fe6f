//! pool-api: Local HTTP API for the withdrawal lock panel
//!
//! Serves the current lock snapshot to the dashboard frontend and accepts
//! the user's bearer credential.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
