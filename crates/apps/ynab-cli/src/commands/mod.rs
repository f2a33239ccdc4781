//! CLI command implementations.

pub mod serve;
pub mod version;

// Re-export command handlers
pub use serve::serve;
pub use version::version;
