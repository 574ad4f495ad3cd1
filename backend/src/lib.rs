//! Accounts microservice library modules.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod models;
pub mod outbound;
pub mod resilience;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Correlation middleware applied to every request.
pub use middleware::correlation::Correlation;
