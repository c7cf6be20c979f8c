use std::sync::Arc;

use crate::migration::error::MigrationError;
use crate::quicksight::{AssetDescription, AssetKind, QuickSightApi};

/// Read-only Describe Calls für Diagnose
pub struct Inspector {
    api: Arc<dyn QuickSightApi>,
}

impl Inspector {
    pub fn new(api: Arc<dyn QuickSightApi>) -> Self {
        Self { api }
    }

    pub async fn describe(
        &self,
        account_id: &str,
        kind: AssetKind,
        asset_id: &str,
        version: Option<i64>,
    ) -> Result<AssetDescription, MigrationError> {
        let version = match (kind, version) {
            (AssetKind::Template | AssetKind::Dashboard, Some(v)) if v < 1 => {
                return Err(MigrationError::InvalidVersion { version: v })
            }
            (AssetKind::Template | AssetKind::Dashboard, v) => v,
            (_, Some(v)) => {
                tracing::warn!(version = v, "Version ignored for {}", kind);
                None
            }
            (_, None) => None,
        };

        let description = self
            .api
            .describe_asset(account_id, kind, asset_id, version)
            .await?;

        tracing::debug!(
            asset_id = %asset_id,
            status = ?description.summary.status,
            version = ?description.summary.version_number,
            "{} described",
            kind
        );

        Ok(description)
    }
}
