pub mod commands;

pub use commands::{Cli, Commands};

use anyhow::Context;
use secrecy::SecretString;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use crate::migration::{
    references_for_data_sets, AssetPublisher, BatchReport, DataSetExporter, DataSetImporter,
    Inspector, DATA_SOURCE_PASSWORD_ENV,
};
use crate::quicksight::{
    AssetKind, DataSetReference, DataSourceDefinition, PublishRequest, QuickSightApi,
    QuickSightClient, SourceEntity,
};
use crate::storage::{files, read_permissions, read_references, write_references, ExtractStore};
use crate::utils::Config;

use commands::{AnalysisArgs, DashboardArgs, TemplateArgs};

/// Führe einen Subcommand aus und gib das Ergebnis als JSON auf stdout aus
pub async fn run(command: Commands, config: &Config) -> anyhow::Result<ExitCode> {
    match command {
        Commands::ExportDataSets {
            source_account_id,
            data_set_list,
        } => {
            let exporter = DataSetExporter::new(
                connect(config).await,
                ExtractStore::new(&config.extracts_dir),
            );
            let report = exporter.export(&source_account_id, &data_set_list).await;
            finish_batch(&report)
        }

        Commands::ImportDataSets {
            target_account_id,
            data_set_list,
            data_source_arn,
            table_limit,
        } => {
            let limit = match table_limit {
                Some(0) => None,
                Some(limit) => Some(limit),
                None => config.table_limit(),
            };
            let importer = DataSetImporter::new(
                connect(config).await,
                ExtractStore::new(&config.extracts_dir),
                limit,
            );
            let report = importer
                .import(&target_account_id, &data_set_list, &data_source_arn)
                .await;
            finish_batch(&report)
        }

        Commands::CreateDataSource {
            target_account_id,
            definition_file,
        } => {
            let definition: DataSourceDefinition = files::read_json(&definition_file).await?;
            let fallback_password = std::env::var(DATA_SOURCE_PASSWORD_ENV)
                .ok()
                .filter(|password| !password.is_empty())
                .map(|password| SecretString::new(password.into()));

            let receipt = AssetPublisher::new(connect(config).await)
                .create_data_source(&target_account_id, definition, fallback_password)
                .await?;
            print_json(&receipt)
        }

        Commands::ExportReferences {
            account_id,
            data_set_list,
            output,
        } => {
            let region = config
                .region
                .as_deref()
                .context("region required: pass --region-name or set QS_MIGRATE_REGION")?;
            let references = references_for_data_sets(region, &account_id, &data_set_list);
            write_references(&output, &references).await?;

            tracing::info!(
                path = %output.display(),
                references = references.len(),
                "Reference mapping written"
            );
            print_json(&references)
        }

        Commands::CreateTemplate(args) => {
            let account_id = args.source_account_id.clone();
            let request = template_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .create(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::UpdateTemplate(args) => {
            let account_id = args.source_account_id.clone();
            let request = template_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .update(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::GrantTemplatePermissions {
            account_id,
            template_id,
            permissions_file,
        } => {
            let permissions = read_permissions(&permissions_file).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .grant_template_permissions(&account_id, &template_id, &permissions)
                .await?;
            print_json(&receipt)
        }

        Commands::CreateAnalysis(args) => {
            let account_id = args.target_account_id.clone();
            let request = analysis_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .create(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::UpdateAnalysis(args) => {
            let account_id = args.target_account_id.clone();
            let request = analysis_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .update(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::CreateDashboard(args) => {
            let account_id = args.target_account_id.clone();
            let request = dashboard_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .create(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::UpdateDashboard(args) => {
            let account_id = args.target_account_id.clone();
            let request = dashboard_request(args).await?;
            let receipt = AssetPublisher::new(connect(config).await)
                .update(&account_id, &request)
                .await?;
            print_json(&receipt)
        }

        Commands::PublishDashboard {
            target_account_id,
            dashboard_id,
            dashboard_version,
        } => {
            let receipt = AssetPublisher::new(connect(config).await)
                .publish_dashboard(&target_account_id, &dashboard_id, dashboard_version)
                .await?;
            print_json(&receipt)
        }

        Commands::DescribeAnalysis(args) => {
            describe(config, AssetKind::Analysis, &args.account_id, &args.id, None).await
        }

        Commands::DescribeDashboard(args) => {
            describe(
                config,
                AssetKind::Dashboard,
                &args.target.account_id,
                &args.target.id,
                args.version,
            )
            .await
        }

        Commands::DescribeDataSource(args) => {
            describe(config, AssetKind::DataSource, &args.account_id, &args.id, None).await
        }

        Commands::DescribeDataSet(args) => {
            describe(config, AssetKind::DataSet, &args.account_id, &args.id, None).await
        }

        Commands::DescribeTemplate(args) => {
            describe(
                config,
                AssetKind::Template,
                &args.target.account_id,
                &args.target.id,
                args.version,
            )
            .await
        }
    }
}

async fn connect(config: &Config) -> Arc<dyn QuickSightApi> {
    Arc::new(QuickSightClient::new(config).await)
}

async fn describe(
    config: &Config,
    kind: AssetKind,
    account_id: &str,
    asset_id: &str,
    version: Option<i64>,
) -> anyhow::Result<ExitCode> {
    let description = Inspector::new(connect(config).await)
        .describe(account_id, kind, asset_id, version)
        .await?;
    println!("{}", description.detail);
    Ok(ExitCode::SUCCESS)
}

async fn load_references(path: Option<&Path>) -> anyhow::Result<Vec<DataSetReference>> {
    match path {
        Some(path) => Ok(read_references(path).await?),
        None => Ok(Vec::new()),
    }
}

async fn template_request(args: TemplateArgs) -> anyhow::Result<PublishRequest> {
    let data_set_references = load_references(args.dataset_references_file_path.as_deref()).await?;

    let source = match (args.source_analysis_arn, args.source_template_arn) {
        (Some(arn), _) => SourceEntity::Analysis {
            arn,
            data_set_references,
        },
        (None, Some(arn)) => SourceEntity::Template {
            arn,
            data_set_references,
        },
        (None, None) => anyhow::bail!("either --source-analysis-arn or --source-template-arn is required"),
    };

    Ok(PublishRequest {
        kind: AssetKind::Template,
        asset_id: args.template_id,
        name: args.template_name,
        source,
        version_description: args.template_version,
    })
}

async fn analysis_request(args: AnalysisArgs) -> anyhow::Result<PublishRequest> {
    let data_set_references = read_references(&args.dataset_references_file_path).await?;

    Ok(PublishRequest {
        kind: AssetKind::Analysis,
        asset_id: args.analysis_id,
        name: args.analysis_name,
        source: SourceEntity::Template {
            arn: args.source_account_template_arn,
            data_set_references,
        },
        version_description: None,
    })
}

async fn dashboard_request(args: DashboardArgs) -> anyhow::Result<PublishRequest> {
    let data_set_references = read_references(&args.dataset_references_file_path).await?;

    Ok(PublishRequest {
        kind: AssetKind::Dashboard,
        asset_id: args.dashboard_id,
        name: args.dashboard_name,
        source: SourceEntity::Template {
            arn: args.source_account_template_arn,
            data_set_references,
        },
        version_description: args.dashboard_version,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

fn finish_batch(report: &BatchReport) -> anyhow::Result<ExitCode> {
    print_json(report)?;

    if report.has_failures() {
        tracing::warn!(
            succeeded = report.succeeded,
            failed = report.failed,
            "{} finished with failures",
            report.operation
        );
        Ok(ExitCode::FAILURE)
    } else {
        tracing::info!(succeeded = report.succeeded, "{} finished", report.operation);
        Ok(ExitCode::SUCCESS)
    }
}
