//! pokedex-server: HTTP admin surface for the pokedex.
//!
//! Exposes the five admin panels as JSON endpoints: import-by-range,
//! filtered search with pagination/sort, single-record update by name,
//! delete-by-name / delete-by-type, and collection/database drops.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig};
pub use state::AppState;
