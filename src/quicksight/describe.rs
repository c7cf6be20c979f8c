//! Describe Antworten: Kurzfassung für Checks plus lesbarer Dump der ganzen Ressource.

use aws_sdk_quicksight::types as qs;

use crate::quicksight::convert;
use crate::quicksight::error::QuickSightError;
use crate::quicksight::models::{AssetDescription, AssetKind, AssetSummary, DataSet};

fn messages<'a>(errors: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    errors.flatten().map(str::to_string).collect()
}

pub fn data_source_description(data_source: &qs::DataSource) -> AssetDescription {
    let mut summary = AssetSummary::new(AssetKind::DataSource);
    summary.asset_id = data_source.data_source_id().map(str::to_string);
    summary.arn = data_source.arn().map(str::to_string);
    summary.name = data_source.name().map(str::to_string);
    summary.status = data_source.status().map(|s| s.as_str().to_string());
    summary.errors = messages(data_source.error_info().into_iter().map(|info| info.message()));
    summary.created_time = convert::timestamp(data_source.created_time());
    summary.last_updated_time = convert::timestamp(data_source.last_updated_time());

    AssetDescription {
        summary,
        detail: format!("{:#?}", data_source),
    }
}

/// Data Sets werden als JSON ausgegeben, identisch zur Extract Datei
pub fn data_set_description(data_set: &DataSet) -> Result<AssetDescription, QuickSightError> {
    let mut summary = AssetSummary::new(AssetKind::DataSet);
    summary.asset_id = data_set.data_set_id.clone();
    summary.arn = data_set.arn.clone();
    summary.name = Some(data_set.name.clone());
    summary.created_time = data_set.created_time.clone();
    summary.last_updated_time = data_set.last_updated_time.clone();

    let detail = serde_json::to_string_pretty(data_set)
        .map_err(|e| QuickSightError::InvalidValue(format!("data set: {}", e)))?;

    Ok(AssetDescription { summary, detail })
}

pub fn template_description(template: &qs::Template) -> AssetDescription {
    let mut summary = AssetSummary::new(AssetKind::Template);
    summary.asset_id = template.template_id().map(str::to_string);
    summary.arn = template.arn().map(str::to_string);
    summary.name = template.name().map(str::to_string);
    summary.created_time = convert::timestamp(template.created_time());
    summary.last_updated_time = convert::timestamp(template.last_updated_time());

    if let Some(version) = template.version() {
        summary.version_number = Option::<i64>::from(version.version_number());
        summary.status = version.status().map(|s| s.as_str().to_string());
        summary.source_entity_arn = version.source_entity_arn().map(str::to_string);
        summary.errors = messages(version.errors().iter().map(|e| e.message()));
    }

    AssetDescription {
        summary,
        detail: format!("{:#?}", template),
    }
}

pub fn analysis_description(analysis: &qs::Analysis) -> AssetDescription {
    let mut summary = AssetSummary::new(AssetKind::Analysis);
    summary.asset_id = analysis.analysis_id().map(str::to_string);
    summary.arn = analysis.arn().map(str::to_string);
    summary.name = analysis.name().map(str::to_string);
    summary.status = analysis.status().map(|s| s.as_str().to_string());
    summary.data_set_arns = analysis.data_set_arns().to_vec();
    summary.errors = messages(analysis.errors().iter().map(|e| e.message()));
    summary.created_time = convert::timestamp(analysis.created_time());
    summary.last_updated_time = convert::timestamp(analysis.last_updated_time());

    AssetDescription {
        summary,
        detail: format!("{:#?}", analysis),
    }
}

pub fn dashboard_description(dashboard: &qs::Dashboard) -> AssetDescription {
    let mut summary = AssetSummary::new(AssetKind::Dashboard);
    summary.asset_id = dashboard.dashboard_id().map(str::to_string);
    summary.arn = dashboard.arn().map(str::to_string);
    summary.name = dashboard.name().map(str::to_string);
    summary.created_time = convert::timestamp(dashboard.created_time());
    summary.last_updated_time = convert::timestamp(dashboard.last_updated_time());
    summary.last_published_time = convert::timestamp(dashboard.last_published_time());

    if let Some(version) = dashboard.version() {
        summary.version_number = Option::<i64>::from(version.version_number());
        summary.status = version.status().map(|s| s.as_str().to_string());
        summary.source_entity_arn = version.source_entity_arn().map(str::to_string);
        summary.data_set_arns = version.data_set_arns().to_vec();
        summary.errors = messages(version.errors().iter().map(|e| e.message()));
    }

    AssetDescription {
        summary,
        detail: format!("{:#?}", dashboard),
    }
}
