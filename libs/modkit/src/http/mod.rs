//! HTTP utilities shared by outbound adapters.

pub mod client;
pub mod traceparent;
