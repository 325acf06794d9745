pub mod compose;
pub mod discovery;
pub mod error;
pub mod project;
pub mod server;
pub mod validation;

// Re-export main types
pub use compose::*;
pub use error::*;
pub use project::*;
pub use server::*;

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, PROJECT_FILES, SERVER_FILES};
pub use validation::validate_slug;
