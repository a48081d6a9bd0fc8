//! HTTP surface of the record service.
//!
//! `care_records_router()` returns a composable `Router` holding every page,
//! form and API route, with access logging and an optional static asset
//! fallback. `server` binds it and manages its lifetime.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::care_records_router;
pub use server::{run_until_shutdown, start_server_on, RunningServer, ServerError};
pub use types::ApiContext;
