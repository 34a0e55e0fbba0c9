mod deadline;
pub mod error;
pub mod issuer;
pub mod periodic;
pub mod ports;
pub mod reconciler;
pub mod service;
