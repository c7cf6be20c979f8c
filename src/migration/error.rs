use thiserror::Error;

use crate::quicksight::{AssetKind, QuickSightError};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    QuickSight(#[from] QuickSightError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{kind} cannot be created from a {source_kind} source")]
    UnsupportedSource {
        kind: AssetKind,
        source_kind: AssetKind,
    },

    #[error("{kind} {asset_id} needs at least one data set reference")]
    MissingReferences { kind: AssetKind, asset_id: String },

    #[error("invalid version {version}: versions start at 1")]
    InvalidVersion { version: i64 },

    #[error("dashboard {dashboard_id} has no version {version}")]
    VersionNotFound { dashboard_id: String, version: i64 },

    #[error("data source {data_source_id} has credentials without password; set {env_var}")]
    MissingPassword {
        data_source_id: String,
        env_var: &'static str,
    },
}
