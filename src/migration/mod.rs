pub mod error;
pub mod inspector;
pub mod publisher;
pub mod reader;
pub mod report;
pub mod rewriter;

pub use error::MigrationError;
pub use inspector::Inspector;
pub use publisher::{references_for_data_sets, AssetPublisher, DATA_SOURCE_PASSWORD_ENV};
pub use reader::DataSetExporter;
pub use report::{BatchReport, ItemStatus};
pub use rewriter::DataSetImporter;
