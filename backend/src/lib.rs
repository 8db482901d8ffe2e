//! Lunch voting backend library.
//!
//! The domain layer owns entities, rules and ports; `inbound` and `outbound`
//! hold the adapters that drive and serve it.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
