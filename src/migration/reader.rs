use std::sync::Arc;

use crate::migration::error::MigrationError;
use crate::migration::report::BatchReport;
use crate::quicksight::QuickSightApi;
use crate::storage::ExtractStore;

/// Asset Reader: exportiert Data Sets und ihre Permissions ins Extract-Verzeichnis
pub struct DataSetExporter {
    api: Arc<dyn QuickSightApi>,
    store: ExtractStore,
}

impl DataSetExporter {
    pub fn new(api: Arc<dyn QuickSightApi>, store: ExtractStore) -> Self {
        Self { api, store }
    }

    /// Exportiere alle IDs der Reihe nach, Fehler einer ID stoppen den Batch nicht
    pub async fn export(&self, account_id: &str, data_set_ids: &[String]) -> BatchReport {
        let mut report = BatchReport::new("export-data-sets");

        for data_set_id in data_set_ids {
            match self.export_one(account_id, data_set_id).await {
                Ok(arn) => {
                    tracing::info!(
                        data_set_id = %data_set_id,
                        account_id = %account_id,
                        "Data set exported"
                    );
                    report.record_success(data_set_id, arn, Vec::new());
                }
                Err(e) => {
                    tracing::error!(
                        data_set_id = %data_set_id,
                        account_id = %account_id,
                        error = %e,
                        "Data set export failed"
                    );
                    report.record_failure(data_set_id, e);
                }
            }
        }

        report.finish()
    }

    async fn export_one(
        &self,
        account_id: &str,
        data_set_id: &str,
    ) -> Result<Option<String>, MigrationError> {
        let data_set = self.api.describe_data_set(account_id, data_set_id).await?;
        let permissions = self
            .api
            .describe_data_set_permissions(account_id, data_set_id)
            .await?;

        let path = self.store.put_data_set(data_set_id, &data_set).await?;
        self.store.put_permissions(data_set_id, &permissions).await?;

        tracing::debug!(
            data_set_id = %data_set_id,
            path = %path.display(),
            tables = data_set.physical_table_map.len(),
            "Extract written"
        );

        Ok(data_set.arn)
    }
}
