use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_quicksight::types as qs;
use aws_sdk_quicksight::Client;
use secrecy::ExposeSecret;

use crate::quicksight::error::QuickSightError;
use crate::quicksight::models::{
    AssetDescription, AssetKind, AssetReceipt, CreateDataSetRequest, DataSet,
    DataSourceDefinition, PublishRequest, ResourcePermission, SourceEntity,
};
use crate::quicksight::{convert, describe};
use crate::utils::Config;

pub type Result<T> = std::result::Result<T, QuickSightError>;

/// Account- und Region-gebundene Operationen des QuickSight Service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuickSightApi: Send + Sync {
    async fn describe_data_set(&self, account_id: &str, data_set_id: &str) -> Result<DataSet>;

    async fn describe_data_set_permissions(
        &self,
        account_id: &str,
        data_set_id: &str,
    ) -> Result<Vec<ResourcePermission>>;

    async fn create_data_set(
        &self,
        account_id: &str,
        request: &CreateDataSetRequest,
    ) -> Result<AssetReceipt>;

    /// Passwort muss in der Definition gesetzt sein
    async fn create_data_source(
        &self,
        account_id: &str,
        definition: &DataSourceDefinition,
    ) -> Result<AssetReceipt>;

    /// Template, Analysis oder Dashboard anlegen
    async fn create_asset(&self, account_id: &str, request: &PublishRequest)
        -> Result<AssetReceipt>;

    /// Template, Analysis oder Dashboard aktualisieren
    async fn update_asset(&self, account_id: &str, request: &PublishRequest)
        -> Result<AssetReceipt>;

    async fn update_dashboard_published_version(
        &self,
        account_id: &str,
        dashboard_id: &str,
        version_number: i64,
    ) -> Result<AssetReceipt>;

    async fn update_template_permissions(
        &self,
        account_id: &str,
        template_id: &str,
        permissions: &[ResourcePermission],
    ) -> Result<AssetReceipt>;

    /// `version_number` gilt nur für Templates und Dashboards
    async fn describe_asset(
        &self,
        account_id: &str,
        kind: AssetKind,
        asset_id: &str,
        version_number: Option<i64>,
    ) -> Result<AssetDescription>;
}

/// QuickSight Client auf Basis des AWS SDK
pub struct QuickSightClient {
    client: Client,
}

impl QuickSightClient {
    /// Erstelle neuen Client, Region und Profil aus der Config, sonst Default Chain
    pub async fn new(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = ?sdk_config.region().map(|r| r.to_string()),
            "QuickSight client initialized"
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }

    fn template_source(source: &SourceEntity) -> Result<qs::TemplateSourceEntity> {
        let entity = match source {
            SourceEntity::Analysis {
                arn,
                data_set_references,
            } => qs::TemplateSourceEntity::builder()
                .source_analysis(
                    qs::TemplateSourceAnalysis::builder()
                        .arn(arn)
                        .set_data_set_references(Some(convert::references_to_sdk(
                            data_set_references,
                        )?))
                        .build()?,
                )
                .build(),
            SourceEntity::Template { arn, .. } => qs::TemplateSourceEntity::builder()
                .source_template(qs::TemplateSourceTemplate::builder().arn(arn).build()?)
                .build(),
        };

        Ok(entity)
    }

    fn analysis_source(source: &SourceEntity) -> Result<qs::AnalysisSourceEntity> {
        match source {
            SourceEntity::Template {
                arn,
                data_set_references,
            } => Ok(qs::AnalysisSourceEntity::builder()
                .source_template(
                    qs::AnalysisSourceTemplate::builder()
                        .arn(arn)
                        .set_data_set_references(Some(convert::references_to_sdk(
                            data_set_references,
                        )?))
                        .build()?,
                )
                .build()),
            SourceEntity::Analysis { .. } => Err(QuickSightError::Unsupported(
                "analysis source for an analysis".to_string(),
            )),
        }
    }

    fn dashboard_source(source: &SourceEntity) -> Result<qs::DashboardSourceEntity> {
        match source {
            SourceEntity::Template {
                arn,
                data_set_references,
            } => Ok(qs::DashboardSourceEntity::builder()
                .source_template(
                    qs::DashboardSourceTemplate::builder()
                        .arn(arn)
                        .set_data_set_references(Some(convert::references_to_sdk(
                            data_set_references,
                        )?))
                        .build()?,
                )
                .build()),
            SourceEntity::Analysis { .. } => Err(QuickSightError::Unsupported(
                "analysis source for a dashboard".to_string(),
            )),
        }
    }

    async fn describe_data_source(
        &self,
        account_id: &str,
        data_source_id: &str,
    ) -> Result<AssetDescription> {
        let output = self
            .client
            .describe_data_source()
            .aws_account_id(account_id)
            .data_source_id(data_source_id)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeDataSource", e))?;

        let data_source = output.data_source().ok_or(QuickSightError::MissingField {
            operation: "DescribeDataSource",
            field: "DataSource",
        })?;

        Ok(describe::data_source_description(data_source))
    }

    async fn describe_template(
        &self,
        account_id: &str,
        template_id: &str,
        version_number: Option<i64>,
    ) -> Result<AssetDescription> {
        let output = self
            .client
            .describe_template()
            .aws_account_id(account_id)
            .template_id(template_id)
            .set_version_number(version_number)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeTemplate", e))?;

        let template = output.template().ok_or(QuickSightError::MissingField {
            operation: "DescribeTemplate",
            field: "Template",
        })?;

        Ok(describe::template_description(template))
    }

    async fn describe_analysis(
        &self,
        account_id: &str,
        analysis_id: &str,
    ) -> Result<AssetDescription> {
        let output = self
            .client
            .describe_analysis()
            .aws_account_id(account_id)
            .analysis_id(analysis_id)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeAnalysis", e))?;

        let analysis = output.analysis().ok_or(QuickSightError::MissingField {
            operation: "DescribeAnalysis",
            field: "Analysis",
        })?;

        Ok(describe::analysis_description(analysis))
    }

    async fn describe_dashboard(
        &self,
        account_id: &str,
        dashboard_id: &str,
        version_number: Option<i64>,
    ) -> Result<AssetDescription> {
        let output = self
            .client
            .describe_dashboard()
            .aws_account_id(account_id)
            .dashboard_id(dashboard_id)
            .set_version_number(version_number)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeDashboard", e))?;

        let dashboard = output.dashboard().ok_or(QuickSightError::MissingField {
            operation: "DescribeDashboard",
            field: "Dashboard",
        })?;

        Ok(describe::dashboard_description(dashboard))
    }
}

#[async_trait]
impl QuickSightApi for QuickSightClient {
    async fn describe_data_set(&self, account_id: &str, data_set_id: &str) -> Result<DataSet> {
        let output = self
            .client
            .describe_data_set()
            .aws_account_id(account_id)
            .data_set_id(data_set_id)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeDataSet", e))?;

        let data_set = output.data_set().ok_or(QuickSightError::MissingField {
            operation: "DescribeDataSet",
            field: "DataSet",
        })?;

        convert::data_set_from_sdk(data_set)
    }

    async fn describe_data_set_permissions(
        &self,
        account_id: &str,
        data_set_id: &str,
    ) -> Result<Vec<ResourcePermission>> {
        let output = self
            .client
            .describe_data_set_permissions()
            .aws_account_id(account_id)
            .data_set_id(data_set_id)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("DescribeDataSetPermissions", e))?;

        Ok(output
            .permissions()
            .iter()
            .map(convert::permission_from_sdk)
            .collect())
    }

    async fn create_data_set(
        &self,
        account_id: &str,
        request: &CreateDataSetRequest,
    ) -> Result<AssetReceipt> {
        let physical_table_map = convert::physical_table_map_to_sdk(&request.physical_table_map)?;
        let logical_table_map = convert::logical_table_map_to_sdk(&request.logical_table_map)?;
        let permissions = convert::permissions_to_sdk(&request.permissions)?;
        let column_groups = convert::column_groups_to_sdk(&request.column_groups)?;
        let dataset_parameters = convert::dataset_parameters_to_sdk(&request.dataset_parameters)?;

        let output = self
            .client
            .create_data_set()
            .aws_account_id(account_id)
            .data_set_id(&request.data_set_id)
            .name(&request.name)
            .set_physical_table_map(Some(physical_table_map))
            .set_logical_table_map(Some(logical_table_map).filter(|map| !map.is_empty()))
            .import_mode(qs::DataSetImportMode::from(request.import_mode.as_str()))
            .set_data_set_usage_configuration(
                request
                    .usage_configuration
                    .as_ref()
                    .map(convert::usage_configuration_to_sdk),
            )
            .set_column_groups(Some(column_groups).filter(|groups| !groups.is_empty()))
            .set_field_folders(
                Some(convert::field_folders_to_sdk(&request.field_folders))
                    .filter(|folders| !folders.is_empty()),
            )
            .set_dataset_parameters(Some(dataset_parameters).filter(|p| !p.is_empty()))
            .set_permissions(Some(permissions).filter(|p| !p.is_empty()))
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("CreateDataSet", e))?;

        let mut receipt = AssetReceipt::new(AssetKind::DataSet);
        receipt.asset_id = output.data_set_id().map(str::to_string);
        receipt.arn = output.arn().map(str::to_string);
        receipt.http_status = Option::<i32>::from(output.status());
        receipt.request_id = output.request_id().map(str::to_string);

        Ok(receipt)
    }

    async fn create_data_source(
        &self,
        account_id: &str,
        definition: &DataSourceDefinition,
    ) -> Result<AssetReceipt> {
        let credentials = match &definition.credentials {
            Some(pair) => {
                let credential_pair = qs::CredentialPair::builder()
                    .username(&pair.username)
                    .set_password(
                        pair.password
                            .as_ref()
                            .map(|password| password.expose_secret().to_string()),
                    )
                    .build()?;
                Some(
                    qs::DataSourceCredentials::builder()
                        .credential_pair(credential_pair)
                        .build(),
                )
            }
            None => None,
        };

        let output = self
            .client
            .create_data_source()
            .aws_account_id(account_id)
            .data_source_id(&definition.data_source_id)
            .name(&definition.name)
            .r#type(qs::DataSourceType::from(definition.source_type.as_str()))
            .data_source_parameters(convert::data_source_parameters_to_sdk(
                &definition.data_source_parameters,
            )?)
            .set_credentials(credentials)
            .set_ssl_properties(definition.ssl_properties.map(|ssl| {
                qs::SslProperties::builder()
                    .disable_ssl(ssl.disable_ssl)
                    .build()
            }))
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("CreateDataSource", e))?;

        let mut receipt = AssetReceipt::new(AssetKind::DataSource);
        receipt.asset_id = output.data_source_id().map(str::to_string);
        receipt.arn = output.arn().map(str::to_string);
        receipt.status = output.creation_status().map(|s| s.as_str().to_string());
        receipt.http_status = Option::<i32>::from(output.status());
        receipt.request_id = output.request_id().map(str::to_string);

        Ok(receipt)
    }

    async fn create_asset(
        &self,
        account_id: &str,
        request: &PublishRequest,
    ) -> Result<AssetReceipt> {
        let mut receipt = AssetReceipt::new(request.kind);

        match request.kind {
            AssetKind::Template => {
                let output = self
                    .client
                    .create_template()
                    .aws_account_id(account_id)
                    .template_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::template_source(&request.source)?)
                    .set_version_description(request.version_description.clone())
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("CreateTemplate", e))?;

                receipt.asset_id = output.template_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.version_arn = output.version_arn().map(str::to_string);
                receipt.status = output.creation_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            AssetKind::Analysis => {
                let output = self
                    .client
                    .create_analysis()
                    .aws_account_id(account_id)
                    .analysis_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::analysis_source(&request.source)?)
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("CreateAnalysis", e))?;

                receipt.asset_id = output.analysis_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.status = output.creation_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            AssetKind::Dashboard => {
                let output = self
                    .client
                    .create_dashboard()
                    .aws_account_id(account_id)
                    .dashboard_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::dashboard_source(&request.source)?)
                    .set_version_description(request.version_description.clone())
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("CreateDashboard", e))?;

                receipt.asset_id = output.dashboard_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.version_arn = output.version_arn().map(str::to_string);
                receipt.status = output.creation_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            other => {
                return Err(QuickSightError::Unsupported(format!(
                    "publish request for {}",
                    other
                )))
            }
        }

        Ok(receipt)
    }

    async fn update_asset(
        &self,
        account_id: &str,
        request: &PublishRequest,
    ) -> Result<AssetReceipt> {
        let mut receipt = AssetReceipt::new(request.kind);

        match request.kind {
            AssetKind::Template => {
                let output = self
                    .client
                    .update_template()
                    .aws_account_id(account_id)
                    .template_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::template_source(&request.source)?)
                    .set_version_description(request.version_description.clone())
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("UpdateTemplate", e))?;

                receipt.asset_id = output.template_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.version_arn = output.version_arn().map(str::to_string);
                receipt.status = output.creation_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            AssetKind::Analysis => {
                let output = self
                    .client
                    .update_analysis()
                    .aws_account_id(account_id)
                    .analysis_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::analysis_source(&request.source)?)
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("UpdateAnalysis", e))?;

                receipt.asset_id = output.analysis_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.status = output.update_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            AssetKind::Dashboard => {
                let output = self
                    .client
                    .update_dashboard()
                    .aws_account_id(account_id)
                    .dashboard_id(&request.asset_id)
                    .name(&request.name)
                    .source_entity(Self::dashboard_source(&request.source)?)
                    .set_version_description(request.version_description.clone())
                    .send()
                    .await
                    .map_err(|e| QuickSightError::from_sdk("UpdateDashboard", e))?;

                receipt.asset_id = output.dashboard_id().map(str::to_string);
                receipt.arn = output.arn().map(str::to_string);
                receipt.version_arn = output.version_arn().map(str::to_string);
                receipt.status = output.creation_status().map(|s| s.as_str().to_string());
                receipt.http_status = Option::<i32>::from(output.status());
                receipt.request_id = output.request_id().map(str::to_string);
            }
            other => {
                return Err(QuickSightError::Unsupported(format!(
                    "publish request for {}",
                    other
                )))
            }
        }

        Ok(receipt)
    }

    async fn update_dashboard_published_version(
        &self,
        account_id: &str,
        dashboard_id: &str,
        version_number: i64,
    ) -> Result<AssetReceipt> {
        let output = self
            .client
            .update_dashboard_published_version()
            .aws_account_id(account_id)
            .dashboard_id(dashboard_id)
            .version_number(version_number)
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("UpdateDashboardPublishedVersion", e))?;

        let mut receipt = AssetReceipt::new(AssetKind::Dashboard);
        receipt.asset_id = output.dashboard_id().map(str::to_string);
        receipt.arn = output.dashboard_arn().map(str::to_string);
        receipt.http_status = Option::<i32>::from(output.status());
        receipt.request_id = output.request_id().map(str::to_string);

        Ok(receipt)
    }

    async fn update_template_permissions(
        &self,
        account_id: &str,
        template_id: &str,
        permissions: &[ResourcePermission],
    ) -> Result<AssetReceipt> {
        let output = self
            .client
            .update_template_permissions()
            .aws_account_id(account_id)
            .template_id(template_id)
            .set_grant_permissions(Some(convert::permissions_to_sdk(permissions)?))
            .send()
            .await
            .map_err(|e| QuickSightError::from_sdk("UpdateTemplatePermissions", e))?;

        let mut receipt = AssetReceipt::new(AssetKind::Template);
        receipt.asset_id = output.template_id().map(str::to_string);
        receipt.arn = output.template_arn().map(str::to_string);
        receipt.http_status = Option::<i32>::from(output.status());
        receipt.request_id = output.request_id().map(str::to_string);

        Ok(receipt)
    }

    async fn describe_asset(
        &self,
        account_id: &str,
        kind: AssetKind,
        asset_id: &str,
        version_number: Option<i64>,
    ) -> Result<AssetDescription> {
        match kind {
            AssetKind::DataSource => self.describe_data_source(account_id, asset_id).await,
            AssetKind::DataSet => {
                let data_set = QuickSightApi::describe_data_set(self, account_id, asset_id).await?;
                describe::data_set_description(&data_set)
            }
            AssetKind::Template => {
                self.describe_template(account_id, asset_id, version_number)
                    .await
            }
            AssetKind::Analysis => self.describe_analysis(account_id, asset_id).await,
            AssetKind::Dashboard => {
                self.describe_dashboard(account_id, asset_id, version_number)
                    .await
            }
        }
    }
}
