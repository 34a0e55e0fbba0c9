//! # ModKit
//!
//! Small shared kit used by the bootstrap server modules:
//!
//! - [`TracedClient`]: a `reqwest` wrapper that opens an `outgoing_http` span
//!   per request and propagates a W3C `traceparent` header.
//! - [`runtime::shutdown`]: OS signal handling wired to a `CancellationToken`.

pub use anyhow::Result;

// HTTP utilities
pub mod http;
pub use http::client::TracedClient;

pub mod runtime;
pub use runtime::shutdown::{cancel_on_shutdown, wait_for_shutdown};
