use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Migrate QuickSight assets between AWS accounts")]
pub struct Cli {
    /// Path to a TOML config file (default: ./qs-migrate.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// AWS region of the QuickSight account
    #[arg(short = 'r', long = "region-name", global = true)]
    pub region: Option<String>,

    /// Named AWS profile for credentials
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Directory for data set extracts
    #[arg(long, global = true)]
    pub extracts_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export data set definitions and permissions to the extracts directory
    ExportDataSets {
        #[arg(short = 's', long)]
        source_account_id: String,

        /// Data set ids, processed in order
        #[arg(short = 'd', long, num_args = 1.., required = true)]
        data_set_list: Vec<String>,
    },

    /// Re-point exported data sets to a data source and create them in the target account
    ImportDataSets {
        #[arg(short = 't', long)]
        target_account_id: String,

        #[arg(short = 'd', long, num_args = 1.., required = true)]
        data_set_list: Vec<String>,

        /// ARN of the data source in the target account
        #[arg(short = 's', long)]
        data_source_arn: String,

        /// Physical tables rewritten per data set, 0 = unlimited (default from config: 200)
        #[arg(long)]
        table_limit: Option<usize>,
    },

    /// Create a data source from a JSON definition file
    CreateDataSource {
        #[arg(short = 't', long)]
        target_account_id: String,

        #[arg(short = 'f', long)]
        definition_file: PathBuf,
    },

    /// Write a data set reference mapping file for the given account
    ExportReferences {
        #[arg(short = 'a', long)]
        account_id: String,

        #[arg(short = 'd', long, num_args = 1.., required = true)]
        data_set_list: Vec<String>,

        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Create a template from an analysis or another template
    CreateTemplate(TemplateArgs),

    /// Create a new version of an existing template
    UpdateTemplate(TemplateArgs),

    /// Apply a permissions file to a template
    GrantTemplatePermissions {
        #[arg(short = 'a', long)]
        account_id: String,

        #[arg(short = 'i', long)]
        template_id: String,

        #[arg(short = 'f', long)]
        permissions_file: PathBuf,
    },

    /// Create an analysis from a template
    CreateAnalysis(AnalysisArgs),

    /// Update an analysis from a template
    UpdateAnalysis(AnalysisArgs),

    /// Create a dashboard from a template
    CreateDashboard(DashboardArgs),

    /// Create a new dashboard version from a template
    UpdateDashboard(DashboardArgs),

    /// Set the published version of a dashboard
    PublishDashboard {
        #[arg(short = 't', long)]
        target_account_id: String,

        #[arg(short = 'i', long)]
        dashboard_id: String,

        #[arg(short = 'v', long)]
        dashboard_version: i64,
    },

    /// Describe an analysis
    DescribeAnalysis(DescribeArgs),

    /// Describe a dashboard, optionally a specific version
    DescribeDashboard(VersionedDescribeArgs),

    /// Describe a data source
    DescribeDataSource(DescribeArgs),

    /// Describe a data set
    DescribeDataSet(DescribeArgs),

    /// Describe a template, optionally a specific version
    DescribeTemplate(VersionedDescribeArgs),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["source_analysis_arn", "source_template_arn"])
))]
pub struct TemplateArgs {
    /// Account the template lives in
    #[arg(short = 's', long)]
    pub source_account_id: String,

    #[arg(short = 'i', long)]
    pub template_id: String,

    #[arg(short = 'n', long)]
    pub template_name: String,

    /// Version description, "1" for a new template
    #[arg(short = 'v', long)]
    pub template_version: Option<String>,

    /// Reference mapping file, required with an analysis source
    #[arg(short = 'f', long)]
    pub dataset_references_file_path: Option<PathBuf>,

    #[arg(short = 'a', long)]
    pub source_analysis_arn: Option<String>,

    #[arg(long)]
    pub source_template_arn: Option<String>,
}

#[derive(Debug, Args)]
pub struct AnalysisArgs {
    #[arg(short = 't', long)]
    pub target_account_id: String,

    #[arg(short = 'i', long)]
    pub analysis_id: String,

    #[arg(short = 'n', long)]
    pub analysis_name: String,

    /// Template ARN in the source account
    #[arg(short = 's', long)]
    pub source_account_template_arn: String,

    #[arg(short = 'f', long)]
    pub dataset_references_file_path: PathBuf,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[arg(short = 't', long)]
    pub target_account_id: String,

    #[arg(short = 'i', long)]
    pub dashboard_id: String,

    #[arg(short = 'n', long)]
    pub dashboard_name: String,

    #[arg(short = 's', long)]
    pub source_account_template_arn: String,

    #[arg(short = 'f', long)]
    pub dataset_references_file_path: PathBuf,

    /// Version description of the new dashboard version
    #[arg(short = 'v', long)]
    pub dashboard_version: Option<String>,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    #[arg(short = 'a', long)]
    pub account_id: String,

    #[arg(short = 'i', long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct VersionedDescribeArgs {
    #[command(flatten)]
    pub target: DescribeArgs,

    #[arg(long = "version-number")]
    pub version: Option<i64>,
}
