pub mod directory;

pub use directory::DirectoryBackend;
