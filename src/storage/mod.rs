pub mod error;
pub mod extracts;
pub mod files;
pub mod references;

pub use error::StorageError;
pub use extracts::ExtractStore;
pub use references::{read_permissions, read_references, write_references};
