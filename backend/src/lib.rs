//! Backend library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the emergency alert
//! and account use-cases behind ports, [`inbound`] adapts HTTP requests onto
//! them, and [`outbound`] provides the SMS gateway, credential, and storage
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
