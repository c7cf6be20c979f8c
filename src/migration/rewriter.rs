use indexmap::IndexMap;
use std::sync::Arc;

use crate::migration::error::MigrationError;
use crate::migration::report::BatchReport;
use crate::quicksight::{AssetReceipt, CreateDataSetRequest, PhysicalTable, QuickSightApi};
use crate::storage::ExtractStore;

/// Ergebnis des Umschreibens einer Physical Table Map, jeweils Table IDs in Map-Reihenfolge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepointSummary {
    pub rewritten: Vec<String>,
    /// Varianten ohne umschreibbare Data Source Referenz
    pub skipped: Vec<String>,
    /// Einträge jenseits des Limits, unverändert
    pub truncated: Vec<String>,
}

impl RepointSummary {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.skipped.is_empty() {
            warnings.push(format!(
                "physical tables left unchanged (no CustomSql or RelationalTable): {}",
                self.skipped.join(", ")
            ));
        }
        if !self.truncated.is_empty() {
            warnings.push(format!(
                "physical tables beyond the table limit left unchanged: {}",
                self.truncated.join(", ")
            ));
        }
        warnings
    }
}

/// Setze die Data Source ARN jeder CustomSql bzw. RelationalTable Variante
///
/// Nur die ersten `limit` Einträge werden bearbeitet; `None` bearbeitet alle.
pub fn repoint_physical_tables(
    physical_table_map: &mut IndexMap<String, PhysicalTable>,
    data_source_arn: &str,
    limit: Option<usize>,
) -> RepointSummary {
    let mut summary = RepointSummary::default();

    for (index, (table_id, table)) in physical_table_map.iter_mut().enumerate() {
        if limit.is_some_and(|limit| index >= limit) {
            summary.truncated.push(table_id.clone());
            continue;
        }

        tracing::trace!(
            table_id = %table_id,
            from = table.data_source_arn(),
            to = data_source_arn,
            "Re-pointing physical table"
        );

        match table {
            PhysicalTable::CustomSql(sql) => {
                sql.data_source_arn = data_source_arn.to_string();
                summary.rewritten.push(table_id.clone());
            }
            PhysicalTable::RelationalTable(relational) => {
                relational.data_source_arn = data_source_arn.to_string();
                summary.rewritten.push(table_id.clone());
            }
            PhysicalTable::S3Source(_) => {
                tracing::debug!(
                    table_id = %table_id,
                    variant = table.variant_name(),
                    "Physical table has no data source reference to rewrite"
                );
                summary.skipped.push(table_id.clone());
            }
        }
    }

    summary
}

/// Asset Rewriter: liest Extracts, setzt die Ziel Data Source und legt Data Sets neu an
pub struct DataSetImporter {
    api: Arc<dyn QuickSightApi>,
    store: ExtractStore,
    table_limit: Option<usize>,
}

impl DataSetImporter {
    pub fn new(api: Arc<dyn QuickSightApi>, store: ExtractStore, table_limit: Option<usize>) -> Self {
        Self {
            api,
            store,
            table_limit,
        }
    }

    /// Importiere alle IDs, ein CreateDataSet pro ID, kein Rollback
    pub async fn import(
        &self,
        account_id: &str,
        data_set_ids: &[String],
        data_source_arn: &str,
    ) -> BatchReport {
        let mut report = BatchReport::new("import-data-sets");

        for data_set_id in data_set_ids {
            match self.import_one(account_id, data_set_id, data_source_arn).await {
                Ok((receipt, summary, warnings)) => {
                    for warning in &warnings {
                        tracing::warn!(data_set_id = %data_set_id, "{}", warning);
                    }
                    tracing::info!(
                        data_set_id = %data_set_id,
                        account_id = %account_id,
                        rewritten = summary.rewritten.len(),
                        "Data set created"
                    );
                    report.record_success(data_set_id, receipt.arn, warnings);
                }
                Err(e) => {
                    tracing::error!(
                        data_set_id = %data_set_id,
                        account_id = %account_id,
                        error = %e,
                        "Data set import failed"
                    );
                    report.record_failure(data_set_id, e);
                }
            }
        }

        report.finish()
    }

    async fn import_one(
        &self,
        account_id: &str,
        data_set_id: &str,
        data_source_arn: &str,
    ) -> Result<(AssetReceipt, RepointSummary, Vec<String>), MigrationError> {
        let mut data_set = self.store.get_data_set(data_set_id).await?;
        let permissions = self.store.get_permissions(data_set_id).await?;

        let summary = repoint_physical_tables(
            &mut data_set.physical_table_map,
            data_source_arn,
            self.table_limit,
        );

        let mut warnings = summary.warnings();
        let not_migrated = data_set.fields_not_migrated();
        if !not_migrated.is_empty() {
            warnings.push(format!(
                "fields not sent to CreateDataSet: {}",
                not_migrated.join(", ")
            ));
        }

        let request = CreateDataSetRequest::from_definition(data_set_id, data_set, permissions);
        let receipt = self.api.create_data_set(account_id, &request).await?;

        Ok((receipt, summary, warnings))
    }
}
