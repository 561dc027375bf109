//! HTTP API layer.
//!
//! Exposes the premium prediction and patient record services as HTTP
//! endpoints. The router is composable — `app_router()` returns a
//! `Router` that can be mounted on any axum server instance, and the two
//! route groups are available separately.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::{app_router, patient_routes, premium_routes};
pub use server::{serve, ApiServer};
pub use types::ApiContext;
