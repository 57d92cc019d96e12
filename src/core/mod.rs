// Public modules
pub mod classify;
pub mod error;
pub mod replace;
pub mod replicate;
pub mod template;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use replace::ReplacementMap;
pub use replicate::{replicate, ReplicateError, ReplicateReport};
pub use template::{create, CreateOutput};
