pub mod local;

pub use local::SessionBootstrapLocalClient;
