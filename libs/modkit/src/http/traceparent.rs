//! Minimal W3C Trace Context support for outgoing requests.
//!
//! Only `traceparent` is produced; there is no collector, so each outbound
//! call gets a fresh trace id that is also recorded on the request span for
//! correlation with backend-side logs.

use http::{HeaderMap, HeaderName, HeaderValue};

pub const TRACEPARENT: &str = "traceparent";

/// A freshly generated `traceparent` value (`00-<trace>-<span>-01`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParent {
    pub trace_id: String,
    pub span_id: String,
}

impl TraceParent {
    pub fn generate() -> Self {
        Self {
            trace_id: format!("{:032x}", rand::random::<u128>()),
            span_id: format!("{:016x}", rand::random::<u64>()),
        }
    }

    pub fn header_value(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.span_id)
    }

    /// Insert the header unless the caller already set one.
    pub fn inject(&self, headers: &mut HeaderMap) {
        if headers.contains_key(TRACEPARENT) {
            return;
        }
        if let Ok(value) = HeaderValue::from_str(&self.header_value()) {
            headers.insert(HeaderName::from_static(TRACEPARENT), value);
        }
    }
}

/// Parse the trace id out of a `traceparent` header value.
pub fn parse_trace_id(traceparent: &str) -> Option<&str> {
    let mut parts = traceparent.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("00"), Some(trace), Some(_), Some(_)) if trace.len() == 32 => Some(trace),
        _ => None,
    }
}
