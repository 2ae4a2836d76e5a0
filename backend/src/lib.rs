//! SES Feed backend library.
//!
//! Hexagonal layout: [`domain`] holds the entities, ports, and services;
//! [`inbound`] exposes the REST adapter; [`outbound`] implements the driven
//! ports (identity provider client, key-value persistence).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped trace identifier.
pub use domain::TraceId;
/// Tracing middleware attaching trace identifiers to requests.
pub use middleware::Trace;
