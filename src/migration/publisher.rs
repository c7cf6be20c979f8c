use secrecy::SecretString;
use std::sync::Arc;

use crate::migration::error::MigrationError;
use crate::quicksight::{
    AssetKind, AssetReceipt, DataSetReference, DataSourceDefinition, PublishRequest,
    QuickSightApi, ResourcePermission, SourceEntity,
};

/// Umgebungsvariable für das Data Source Passwort, falls die Definition keins enthält
pub const DATA_SOURCE_PASSWORD_ENV: &str = "QS_MIGRATE_DATA_SOURCE_PASSWORD";

const INITIAL_VERSION_LABEL: &str = "1";

/// Publisher für Templates, Analyses, Dashboards und Data Sources
pub struct AssetPublisher {
    api: Arc<dyn QuickSightApi>,
}

impl AssetPublisher {
    pub fn new(api: Arc<dyn QuickSightApi>) -> Self {
        Self { api }
    }

    /// Lege Template, Analysis oder Dashboard an
    pub async fn create(
        &self,
        account_id: &str,
        request: &PublishRequest,
    ) -> Result<AssetReceipt, MigrationError> {
        validate(request)?;

        if let Some(label) = request
            .version_description
            .as_deref()
            .filter(|label| *label != INITIAL_VERSION_LABEL)
        {
            tracing::warn!(
                asset_id = %request.asset_id,
                version = %label,
                "Creating {} with version label other than {}",
                request.kind,
                INITIAL_VERSION_LABEL
            );
        }

        let receipt = self.api.create_asset(account_id, request).await?;

        tracing::info!(
            asset_id = %request.asset_id,
            account_id = %account_id,
            source = %request.source.arn(),
            status = ?receipt.status,
            "{} created",
            request.kind
        );

        Ok(receipt)
    }

    /// Aktualisiere bestehendes Asset, gleiche Struktur wie create
    pub async fn update(
        &self,
        account_id: &str,
        request: &PublishRequest,
    ) -> Result<AssetReceipt, MigrationError> {
        validate(request)?;

        let receipt = self.api.update_asset(account_id, request).await?;

        tracing::info!(
            asset_id = %request.asset_id,
            account_id = %account_id,
            status = ?receipt.status,
            "{} updated",
            request.kind
        );

        Ok(receipt)
    }

    /// Setze die veröffentlichte Version eines Dashboards
    ///
    /// Existiert die Version nicht, wird kein Update gesendet.
    pub async fn publish_dashboard(
        &self,
        account_id: &str,
        dashboard_id: &str,
        version: i64,
    ) -> Result<AssetReceipt, MigrationError> {
        if version < 1 {
            return Err(MigrationError::InvalidVersion { version });
        }

        let not_found = || MigrationError::VersionNotFound {
            dashboard_id: dashboard_id.to_string(),
            version,
        };

        match self
            .api
            .describe_asset(account_id, AssetKind::Dashboard, dashboard_id, Some(version))
            .await
        {
            Ok(found) if found.summary.version_number.is_some_and(|v| v != version) => {
                return Err(not_found())
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => return Err(not_found()),
            Err(e) => return Err(e.into()),
        }

        let receipt = self
            .api
            .update_dashboard_published_version(account_id, dashboard_id, version)
            .await?;

        tracing::info!(
            dashboard_id = %dashboard_id,
            account_id = %account_id,
            version,
            "Dashboard published version updated"
        );

        Ok(receipt)
    }

    /// Wende Permission Datei auf ein Template an
    pub async fn grant_template_permissions(
        &self,
        account_id: &str,
        template_id: &str,
        permissions: &[ResourcePermission],
    ) -> Result<AssetReceipt, MigrationError> {
        let receipt = self
            .api
            .update_template_permissions(account_id, template_id, permissions)
            .await?;

        tracing::info!(
            template_id = %template_id,
            principals = permissions.len(),
            "Template permissions granted"
        );

        Ok(receipt)
    }

    /// Lege Data Source an; fehlt das Passwort in der Datei, wird `fallback_password` genutzt
    pub async fn create_data_source(
        &self,
        account_id: &str,
        mut definition: DataSourceDefinition,
        fallback_password: Option<SecretString>,
    ) -> Result<AssetReceipt, MigrationError> {
        if let Some(credentials) = definition.credentials.as_mut() {
            if credentials.password.is_none() {
                credentials.password = Some(fallback_password.ok_or_else(|| {
                    MigrationError::MissingPassword {
                        data_source_id: definition.data_source_id.clone(),
                        env_var: DATA_SOURCE_PASSWORD_ENV,
                    }
                })?);
            }
        }

        let receipt = self.api.create_data_source(account_id, &definition).await?;

        tracing::info!(
            data_source_id = %definition.data_source_id,
            account_id = %account_id,
            status = ?receipt.status,
            "Data source created"
        );

        Ok(receipt)
    }
}

/// Reference Mapping für Data Sets eines Ziel-Accounts, Placeholder = Data Set ID
pub fn references_for_data_sets(
    region: &str,
    account_id: &str,
    data_set_ids: &[String],
) -> Vec<DataSetReference> {
    data_set_ids
        .iter()
        .map(|id| DataSetReference::for_data_set(region, account_id, id))
        .collect()
}

fn validate(request: &PublishRequest) -> Result<(), MigrationError> {
    let needs_references = match (request.kind, &request.source) {
        (AssetKind::Template, SourceEntity::Analysis { .. }) => true,
        (AssetKind::Template, SourceEntity::Template { .. }) => false,
        (AssetKind::Analysis | AssetKind::Dashboard, SourceEntity::Template { .. }) => true,
        (kind, source) => {
            return Err(MigrationError::UnsupportedSource {
                kind,
                source_kind: source.kind(),
            })
        }
    };

    if needs_references && request.source.data_set_references().is_empty() {
        return Err(MigrationError::MissingReferences {
            kind: request.kind,
            asset_id: request.asset_id.clone(),
        });
    }

    Ok(())
}
