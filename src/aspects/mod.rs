//! Cross-cutting concerns applied around route handlers.
//!
//! Each submodule is an independent wrapper: access control, page caching,
//! timing, audit logging, and feature flags. They do not know about each
//! other; handlers compose them by ordinary function calls and closures.

pub mod audit;
pub mod cache;
pub mod feature;
pub mod metrics;
pub mod secure;
