//! Übersetzung zwischen den serde Modellen und den Typen des AWS SDK.
//!
//! Builder für Shapes mit Pflichtfeldern liefern `Result<_, BuildError>`; fehlende
//! Pflichtfelder fallen dadurch vor dem Request auf und nicht erst im Service.
//!
//! Union-Varianten, die dieses Modell nicht kennt, werden beim Export als
//! `{"Unmodeled": "<debug>"}` festgehalten und erst beim Anlegen abgelehnt.

use aws_sdk_quicksight::error::BuildError;
use aws_sdk_quicksight::primitives::DateTime;
use aws_sdk_quicksight::types as qs;
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::quicksight::error::QuickSightError;
use crate::quicksight::models::{
    AthenaParameters, CalculatedColumn, CastColumnTypeOperation, ColumnDescription, ColumnGroup,
    ColumnLevelPermissionRule, ColumnTag, CreateColumnsOperation, CustomSql, DataSet,
    DataSetReference, DataSetUsageConfiguration, DataSourceParameters, DatasetParameter,
    DatasetParameterDefaultValues, DateTimeDatasetParameter, FieldFolder, FilterOperation,
    GeoSpatialColumnGroup, ImportMode, InputColumn, JoinInstruction, JoinKeyProperties,
    LogicalTable, LogicalTableSource, NewDefaultValues, OutputColumn,
    OverrideDatasetParameterOperation, PerformanceConfiguration, PhysicalTable, ProjectOperation,
    RelationalTable, RenameColumnOperation, ResourcePermission, RowLevelPermissionDataSet,
    RowLevelPermissionTagConfiguration, RowLevelPermissionTagRule, S3Source,
    ScalarDatasetParameter, TagColumnOperation, TransformOperation, UniqueKey,
    UntagColumnOperation, UploadSettings,
};

const DESCRIBE_DATA_SET: &str = "DescribeDataSet";

/// Pflichtfelder liefern `&T`, optionale `Option<&T>`; beides wird hier vereinheitlicht
fn present<'a, T: ?Sized>(value: impl Into<Option<&'a T>>) -> Option<&'a T> {
    value.into()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

pub fn timestamp(value: Option<&DateTime>) -> Option<String> {
    value
        .and_then(|dt| chrono::DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos()))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn date_time_to_sdk(value: &str) -> Result<DateTime, QuickSightError> {
    let parsed = chrono::DateTime::parse_from_rfc3339(value)
        .map_err(|_| QuickSightError::InvalidValue(format!("timestamp {}", value)))?;
    Ok(DateTime::from_secs_and_nanos(
        parsed.timestamp(),
        parsed.timestamp_subsec_nanos(),
    ))
}

fn unmodeled(value: &impl fmt::Debug) -> Value {
    json!({ "Unmodeled": format!("{:?}", value) })
}

// SDK -> Modell

pub fn data_set_from_sdk(data_set: &qs::DataSet) -> Result<DataSet, QuickSightError> {
    let name = data_set.name().ok_or(QuickSightError::MissingField {
        operation: DESCRIBE_DATA_SET,
        field: "Name",
    })?;

    let import_mode = match data_set.import_mode() {
        Some(qs::DataSetImportMode::Spice) => ImportMode::Spice,
        Some(qs::DataSetImportMode::DirectQuery) => ImportMode::DirectQuery,
        Some(other) => {
            return Err(QuickSightError::Unsupported(format!(
                "import mode {}",
                other.as_str()
            )))
        }
        None => {
            return Err(QuickSightError::MissingField {
                operation: DESCRIBE_DATA_SET,
                field: "ImportMode",
            })
        }
    };

    // HashMap Reihenfolge ist zufällig, sortiert bleibt der Export stabil
    let mut physical = data_set
        .physical_table_map()
        .into_iter()
        .flatten()
        .map(|(id, table)| Ok((id.clone(), physical_table_from_sdk(table)?)))
        .collect::<Result<Vec<_>, QuickSightError>>()?;
    physical.sort_by(|a, b| a.0.cmp(&b.0));

    let mut logical = data_set
        .logical_table_map()
        .into_iter()
        .flatten()
        .map(|(id, table)| Ok((id.clone(), logical_table_from_sdk(table)?)))
        .collect::<Result<Vec<_>, QuickSightError>>()?;
    logical.sort_by(|a, b| a.0.cmp(&b.0));

    let mut field_folders: Vec<(String, FieldFolder)> = data_set
        .field_folders()
        .into_iter()
        .flatten()
        .map(|(id, folder)| {
            (
                id.clone(),
                FieldFolder {
                    description: folder.description().map(str::to_string),
                    columns: folder.columns().to_vec(),
                },
            )
        })
        .collect();
    field_folders.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(DataSet {
        arn: data_set.arn().map(str::to_string),
        data_set_id: data_set.data_set_id().map(str::to_string),
        name: name.to_string(),
        created_time: timestamp(data_set.created_time()),
        last_updated_time: timestamp(data_set.last_updated_time()),
        physical_table_map: physical.into_iter().collect::<IndexMap<_, _>>(),
        logical_table_map: logical.into_iter().collect::<IndexMap<_, _>>(),
        output_columns: data_set
            .output_columns()
            .iter()
            .map(|column| OutputColumn {
                name: column.name().map(str::to_string),
                description: column.description().map(str::to_string),
                data_type: column.r#type().map(|t| t.as_str().to_string()),
                sub_type: column.sub_type().map(|t| t.as_str().to_string()),
            })
            .collect(),
        import_mode,
        consumed_spice_capacity_in_bytes: Option::<i64>::from(
            data_set.consumed_spice_capacity_in_bytes(),
        ),
        column_groups: data_set.column_groups().iter().map(column_group_from_sdk).collect(),
        field_folders: field_folders.into_iter().collect::<IndexMap<_, _>>(),
        row_level_permission_data_set: data_set
            .row_level_permission_data_set()
            .map(row_level_permission_from_sdk),
        row_level_permission_tag_configuration: data_set
            .row_level_permission_tag_configuration()
            .map(tag_configuration_from_sdk),
        column_level_permission_rules: data_set
            .column_level_permission_rules()
            .iter()
            .map(|rule| ColumnLevelPermissionRule {
                principals: rule.principals().to_vec(),
                column_names: rule.column_names().to_vec(),
            })
            .collect(),
        data_set_usage_configuration: data_set
            .data_set_usage_configuration()
            .map(usage_configuration_from_sdk),
        dataset_parameters: data_set
            .dataset_parameters()
            .iter()
            .map(dataset_parameter_from_sdk)
            .collect(),
        performance_configuration: data_set.performance_configuration().map(|configuration| {
            PerformanceConfiguration {
                unique_keys: configuration
                    .unique_keys()
                    .iter()
                    .map(|key| UniqueKey {
                        column_names: key.column_names().to_vec(),
                    })
                    .collect(),
            }
        }),
        extra: Map::new(),
    })
}

fn physical_table_from_sdk(table: &qs::PhysicalTable) -> Result<PhysicalTable, QuickSightError> {
    match table {
        qs::PhysicalTable::CustomSql(sql) => Ok(PhysicalTable::CustomSql(CustomSql {
            data_source_arn: sql.data_source_arn().to_string(),
            name: sql.name().to_string(),
            sql_query: sql.sql_query().to_string(),
            columns: sql.columns().iter().map(input_column_from_sdk).collect(),
            extra: Map::new(),
        })),
        qs::PhysicalTable::RelationalTable(relational) => {
            Ok(PhysicalTable::RelationalTable(RelationalTable {
                data_source_arn: relational.data_source_arn().to_string(),
                catalog: relational.catalog().map(str::to_string),
                schema: relational.schema().map(str::to_string),
                name: relational.name().to_string(),
                input_columns: relational
                    .input_columns()
                    .iter()
                    .map(input_column_from_sdk)
                    .collect(),
                extra: Map::new(),
            }))
        }
        qs::PhysicalTable::S3Source(source) => Ok(PhysicalTable::S3Source(S3Source {
            data_source_arn: source.data_source_arn().to_string(),
            upload_settings: source.upload_settings().map(|settings| UploadSettings {
                format: settings.format().map(|f| f.as_str().to_string()),
                start_from_row: Option::<i32>::from(settings.start_from_row()),
                contains_header: Option::<bool>::from(settings.contains_header()),
                text_qualifier: settings.text_qualifier().map(|q| q.as_str().to_string()),
                delimiter: settings.delimiter().map(str::to_string),
            }),
            input_columns: source.input_columns().iter().map(input_column_from_sdk).collect(),
            extra: Map::new(),
        })),
        other => Err(QuickSightError::Unsupported(format!(
            "physical table variant {:?}",
            other
        ))),
    }
}

fn input_column_from_sdk(column: &qs::InputColumn) -> InputColumn {
    InputColumn {
        name: column.name().to_string(),
        data_type: column.r#type().as_str().to_string(),
        sub_type: column.sub_type().map(|t| t.as_str().to_string()),
        extra: Map::new(),
    }
}

fn logical_table_from_sdk(table: &qs::LogicalTable) -> Result<LogicalTable, QuickSightError> {
    let source = present::<qs::LogicalTableSource>(table.source()).ok_or(
        QuickSightError::MissingField {
            operation: DESCRIBE_DATA_SET,
            field: "LogicalTable.Source",
        },
    )?;

    Ok(LogicalTable {
        alias: table.alias().to_string(),
        data_transforms: table.data_transforms().iter().map(transform_from_sdk).collect(),
        source: LogicalTableSource {
            join_instruction: source.join_instruction().map(join_instruction_from_sdk),
            physical_table_id: source.physical_table_id().map(str::to_string),
            data_set_arn: source.data_set_arn().map(str::to_string),
        },
        extra: Map::new(),
    })
}

fn join_instruction_from_sdk(join: &qs::JoinInstruction) -> JoinInstruction {
    let key_properties = |props: &qs::JoinKeyProperties| JoinKeyProperties {
        unique_key: Option::<bool>::from(props.unique_key()),
    };

    JoinInstruction {
        left_operand: join.left_operand().to_string(),
        right_operand: join.right_operand().to_string(),
        left_join_key_properties: join.left_join_key_properties().map(key_properties),
        right_join_key_properties: join.right_join_key_properties().map(key_properties),
        join_type: join.r#type().as_str().to_string(),
        on_clause: join.on_clause().to_string(),
    }
}

fn transform_from_sdk(transform: &qs::TransformOperation) -> TransformOperation {
    match transform {
        qs::TransformOperation::ProjectOperation(op) => {
            TransformOperation::ProjectOperation(ProjectOperation {
                projected_columns: op.projected_columns().to_vec(),
            })
        }
        qs::TransformOperation::FilterOperation(op) => {
            match present::<str>(op.condition_expression()) {
                Some(condition) => TransformOperation::FilterOperation(FilterOperation {
                    condition_expression: condition.to_string(),
                }),
                None => TransformOperation::Unmodeled(unmodeled(transform)),
            }
        }
        qs::TransformOperation::CreateColumnsOperation(op) => {
            TransformOperation::CreateColumnsOperation(CreateColumnsOperation {
                columns: op
                    .columns()
                    .iter()
                    .map(|column| CalculatedColumn {
                        column_name: column.column_name().to_string(),
                        column_id: column.column_id().to_string(),
                        expression: column.expression().to_string(),
                    })
                    .collect(),
            })
        }
        qs::TransformOperation::RenameColumnOperation(op) => {
            TransformOperation::RenameColumnOperation(RenameColumnOperation {
                column_name: op.column_name().to_string(),
                new_column_name: op.new_column_name().to_string(),
            })
        }
        qs::TransformOperation::CastColumnTypeOperation(op) => {
            TransformOperation::CastColumnTypeOperation(CastColumnTypeOperation {
                column_name: op.column_name().to_string(),
                new_column_type: op.new_column_type().as_str().to_string(),
                sub_type: op.sub_type().map(|t| t.as_str().to_string()),
                format: op.format().map(str::to_string),
            })
        }
        qs::TransformOperation::TagColumnOperation(op) => {
            TransformOperation::TagColumnOperation(TagColumnOperation {
                column_name: op.column_name().to_string(),
                tags: op
                    .tags()
                    .iter()
                    .map(|tag| ColumnTag {
                        column_geographic_role: tag
                            .column_geographic_role()
                            .map(|role| role.as_str().to_string()),
                        column_description: tag.column_description().map(|description| {
                            ColumnDescription {
                                text: description.text().map(str::to_string),
                            }
                        }),
                    })
                    .collect(),
            })
        }
        qs::TransformOperation::UntagColumnOperation(op) => {
            TransformOperation::UntagColumnOperation(UntagColumnOperation {
                column_name: op.column_name().to_string(),
                tag_names: op
                    .tag_names()
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
            })
        }
        qs::TransformOperation::OverrideDatasetParameterOperation(op) => {
            TransformOperation::OverrideDatasetParameterOperation(
                OverrideDatasetParameterOperation {
                    parameter_name: op.parameter_name().to_string(),
                    new_parameter_name: op.new_parameter_name().map(str::to_string),
                    new_default_values: op.new_default_values().map(|values| NewDefaultValues {
                        string_static_values: values.string_static_values().to_vec(),
                        decimal_static_values: values.decimal_static_values().to_vec(),
                        date_time_static_values: values
                            .date_time_static_values()
                            .iter()
                            .filter_map(|value| timestamp(Some(value)))
                            .collect(),
                        integer_static_values: values.integer_static_values().to_vec(),
                    }),
                },
            )
        }
        other => TransformOperation::Unmodeled(unmodeled(other)),
    }
}

fn column_group_from_sdk(group: &qs::ColumnGroup) -> ColumnGroup {
    ColumnGroup {
        geo_spatial_column_group: group.geo_spatial_column_group().map(|geo| {
            GeoSpatialColumnGroup {
                name: geo.name().to_string(),
                country_code: geo.country_code().map(|code| code.as_str().to_string()),
                columns: geo.columns().to_vec(),
            }
        }),
    }
}

fn row_level_permission_from_sdk(
    permission: &qs::RowLevelPermissionDataSet,
) -> RowLevelPermissionDataSet {
    RowLevelPermissionDataSet {
        namespace: permission.namespace().map(str::to_string),
        arn: permission.arn().to_string(),
        permission_policy: permission.permission_policy().as_str().to_string(),
        format_version: permission.format_version().map(|v| v.as_str().to_string()),
        status: permission.status().map(|s| s.as_str().to_string()),
    }
}

fn tag_configuration_from_sdk(
    configuration: &qs::RowLevelPermissionTagConfiguration,
) -> RowLevelPermissionTagConfiguration {
    RowLevelPermissionTagConfiguration {
        status: configuration.status().map(|s| s.as_str().to_string()),
        tag_rules: configuration
            .tag_rules()
            .iter()
            .map(|rule| RowLevelPermissionTagRule {
                tag_key: rule.tag_key().to_string(),
                column_name: rule.column_name().to_string(),
                tag_multi_value_delimiter: rule.tag_multi_value_delimiter().map(str::to_string),
                match_all_value: rule.match_all_value().map(str::to_string),
            })
            .collect(),
        tag_rule_configurations: configuration.tag_rule_configurations().to_vec(),
    }
}

fn dataset_parameter_from_sdk(parameter: &qs::DatasetParameter) -> DatasetParameter {
    if let Some(p) = parameter.string_dataset_parameter() {
        DatasetParameter::StringDatasetParameter(ScalarDatasetParameter {
            id: p.id().to_string(),
            name: p.name().to_string(),
            value_type: p.value_type().as_str().to_string(),
            default_values: p.default_values().map(|values| DatasetParameterDefaultValues {
                static_values: values.static_values().to_vec(),
            }),
        })
    } else if let Some(p) = parameter.decimal_dataset_parameter() {
        DatasetParameter::DecimalDatasetParameter(ScalarDatasetParameter {
            id: p.id().to_string(),
            name: p.name().to_string(),
            value_type: p.value_type().as_str().to_string(),
            default_values: p.default_values().map(|values| DatasetParameterDefaultValues {
                static_values: values.static_values().to_vec(),
            }),
        })
    } else if let Some(p) = parameter.integer_dataset_parameter() {
        DatasetParameter::IntegerDatasetParameter(ScalarDatasetParameter {
            id: p.id().to_string(),
            name: p.name().to_string(),
            value_type: p.value_type().as_str().to_string(),
            default_values: p.default_values().map(|values| DatasetParameterDefaultValues {
                static_values: values.static_values().to_vec(),
            }),
        })
    } else if let Some(p) = parameter.date_time_dataset_parameter() {
        DatasetParameter::DateTimeDatasetParameter(DateTimeDatasetParameter {
            id: p.id().to_string(),
            name: p.name().to_string(),
            value_type: p.value_type().as_str().to_string(),
            time_granularity: p.time_granularity().map(|g| g.as_str().to_string()),
            default_values: p.default_values().map(|values| DatasetParameterDefaultValues {
                static_values: values
                    .static_values()
                    .iter()
                    .filter_map(|value| timestamp(Some(value)))
                    .collect(),
            }),
        })
    } else {
        DatasetParameter::Unmodeled(unmodeled(parameter))
    }
}

fn usage_configuration_from_sdk(
    configuration: &qs::DataSetUsageConfiguration,
) -> DataSetUsageConfiguration {
    DataSetUsageConfiguration {
        disable_use_as_direct_query_source: Option::<bool>::from(
            configuration.disable_use_as_direct_query_source(),
        )
        .unwrap_or_default(),
        disable_use_as_imported_source: Option::<bool>::from(
            configuration.disable_use_as_imported_source(),
        )
        .unwrap_or_default(),
    }
}

pub fn permission_from_sdk(permission: &qs::ResourcePermission) -> ResourcePermission {
    ResourcePermission {
        principal: permission.principal().to_string(),
        actions: permission.actions().to_vec(),
    }
}

// Modell -> SDK

pub fn physical_table_map_to_sdk(
    map: &IndexMap<String, PhysicalTable>,
) -> Result<HashMap<String, qs::PhysicalTable>, BuildError> {
    map.iter()
        .map(|(id, table)| Ok((id.clone(), physical_table_to_sdk(table)?)))
        .collect()
}

pub fn logical_table_map_to_sdk(
    map: &IndexMap<String, LogicalTable>,
) -> Result<HashMap<String, qs::LogicalTable>, QuickSightError> {
    map.iter()
        .map(|(id, table)| Ok((id.clone(), logical_table_to_sdk(table)?)))
        .collect()
}

fn physical_table_to_sdk(table: &PhysicalTable) -> Result<qs::PhysicalTable, BuildError> {
    let table = match table {
        PhysicalTable::CustomSql(sql) => qs::PhysicalTable::CustomSql(
            qs::CustomSql::builder()
                .data_source_arn(&sql.data_source_arn)
                .name(&sql.name)
                .sql_query(&sql.sql_query)
                .set_columns(non_empty(input_columns_to_sdk(&sql.columns)?))
                .build()?,
        ),
        PhysicalTable::RelationalTable(relational) => qs::PhysicalTable::RelationalTable(
            qs::RelationalTable::builder()
                .data_source_arn(&relational.data_source_arn)
                .set_catalog(relational.catalog.clone())
                .set_schema(relational.schema.clone())
                .name(&relational.name)
                .set_input_columns(Some(input_columns_to_sdk(&relational.input_columns)?))
                .build()?,
        ),
        PhysicalTable::S3Source(source) => qs::PhysicalTable::S3Source(
            qs::S3Source::builder()
                .data_source_arn(&source.data_source_arn)
                .set_upload_settings(source.upload_settings.as_ref().map(upload_settings_to_sdk))
                .set_input_columns(Some(input_columns_to_sdk(&source.input_columns)?))
                .build()?,
        ),
    };

    Ok(table)
}

fn upload_settings_to_sdk(settings: &UploadSettings) -> qs::UploadSettings {
    qs::UploadSettings::builder()
        .set_format(settings.format.as_deref().map(qs::FileFormat::from))
        .set_start_from_row(settings.start_from_row)
        .set_contains_header(settings.contains_header)
        .set_text_qualifier(settings.text_qualifier.as_deref().map(qs::TextQualifier::from))
        .set_delimiter(settings.delimiter.clone())
        .build()
}

fn input_columns_to_sdk(columns: &[InputColumn]) -> Result<Vec<qs::InputColumn>, BuildError> {
    columns
        .iter()
        .map(|column| {
            qs::InputColumn::builder()
                .name(&column.name)
                .r#type(qs::InputColumnDataType::from(column.data_type.as_str()))
                .set_sub_type(column.sub_type.as_deref().map(qs::ColumnDataSubType::from))
                .build()
        })
        .collect()
}

fn logical_table_to_sdk(table: &LogicalTable) -> Result<qs::LogicalTable, QuickSightError> {
    let transforms = table
        .data_transforms
        .iter()
        .map(transform_to_sdk)
        .collect::<Result<Vec<_>, _>>()?;

    let source = qs::LogicalTableSource::builder()
        .set_join_instruction(
            table
                .source
                .join_instruction
                .as_ref()
                .map(join_instruction_to_sdk)
                .transpose()?,
        )
        .set_physical_table_id(table.source.physical_table_id.clone())
        .set_data_set_arn(table.source.data_set_arn.clone())
        .build();

    Ok(qs::LogicalTable::builder()
        .alias(&table.alias)
        .set_data_transforms(non_empty(transforms))
        .source(source)
        .build()?)
}

fn join_instruction_to_sdk(join: &JoinInstruction) -> Result<qs::JoinInstruction, BuildError> {
    let key_properties = |props: &JoinKeyProperties| {
        qs::JoinKeyProperties::builder()
            .set_unique_key(props.unique_key)
            .build()
    };

    qs::JoinInstruction::builder()
        .left_operand(&join.left_operand)
        .right_operand(&join.right_operand)
        .set_left_join_key_properties(join.left_join_key_properties.as_ref().map(key_properties))
        .set_right_join_key_properties(join.right_join_key_properties.as_ref().map(key_properties))
        .r#type(qs::JoinType::from(join.join_type.as_str()))
        .on_clause(&join.on_clause)
        .build()
}

fn transform_to_sdk(
    transform: &TransformOperation,
) -> Result<qs::TransformOperation, QuickSightError> {
    let operation = match transform {
        TransformOperation::ProjectOperation(op) => qs::TransformOperation::ProjectOperation(
            qs::ProjectOperation::builder()
                .set_projected_columns(Some(op.projected_columns.clone()))
                .build()?,
        ),
        TransformOperation::FilterOperation(op) => qs::TransformOperation::FilterOperation(
            qs::FilterOperation::builder()
                .condition_expression(&op.condition_expression)
                .build(),
        ),
        TransformOperation::CreateColumnsOperation(op) => {
            let columns = op
                .columns
                .iter()
                .map(|column| {
                    qs::CalculatedColumn::builder()
                        .column_name(&column.column_name)
                        .column_id(&column.column_id)
                        .expression(&column.expression)
                        .build()
                })
                .collect::<Result<Vec<_>, _>>()?;

            qs::TransformOperation::CreateColumnsOperation(
                qs::CreateColumnsOperation::builder()
                    .set_columns(Some(columns))
                    .build()?,
            )
        }
        TransformOperation::RenameColumnOperation(op) => {
            qs::TransformOperation::RenameColumnOperation(
                qs::RenameColumnOperation::builder()
                    .column_name(&op.column_name)
                    .new_column_name(&op.new_column_name)
                    .build()?,
            )
        }
        TransformOperation::CastColumnTypeOperation(op) => {
            qs::TransformOperation::CastColumnTypeOperation(
                qs::CastColumnTypeOperation::builder()
                    .column_name(&op.column_name)
                    .new_column_type(qs::ColumnDataType::from(op.new_column_type.as_str()))
                    .set_sub_type(op.sub_type.as_deref().map(qs::ColumnDataSubType::from))
                    .set_format(op.format.clone())
                    .build()?,
            )
        }
        TransformOperation::TagColumnOperation(op) => {
            let tags = op
                .tags
                .iter()
                .map(|tag| {
                    qs::ColumnTag::builder()
                        .set_column_geographic_role(
                            tag.column_geographic_role
                                .as_deref()
                                .map(qs::GeoSpatialDataRole::from),
                        )
                        .set_column_description(tag.column_description.as_ref().map(
                            |description| {
                                qs::ColumnDescription::builder()
                                    .set_text(description.text.clone())
                                    .build()
                            },
                        ))
                        .build()
                })
                .collect();

            qs::TransformOperation::TagColumnOperation(
                qs::TagColumnOperation::builder()
                    .column_name(&op.column_name)
                    .set_tags(Some(tags))
                    .build()?,
            )
        }
        TransformOperation::UntagColumnOperation(op) => {
            qs::TransformOperation::UntagColumnOperation(
                qs::UntagColumnOperation::builder()
                    .column_name(&op.column_name)
                    .set_tag_names(Some(
                        op.tag_names
                            .iter()
                            .map(|name| qs::ColumnTagName::from(name.as_str()))
                            .collect(),
                    ))
                    .build()?,
            )
        }
        TransformOperation::OverrideDatasetParameterOperation(op) => {
            let new_default_values = op
                .new_default_values
                .as_ref()
                .map(|values| -> Result<qs::NewDefaultValues, QuickSightError> {
                    Ok(qs::NewDefaultValues::builder()
                        .set_string_static_values(non_empty(values.string_static_values.clone()))
                        .set_decimal_static_values(non_empty(values.decimal_static_values.clone()))
                        .set_date_time_static_values(non_empty(
                            values
                                .date_time_static_values
                                .iter()
                                .map(|value| date_time_to_sdk(value))
                                .collect::<Result<Vec<_>, _>>()?,
                        ))
                        .set_integer_static_values(non_empty(values.integer_static_values.clone()))
                        .build())
                })
                .transpose()?;

            qs::TransformOperation::OverrideDatasetParameterOperation(
                qs::OverrideDatasetParameterOperation::builder()
                    .parameter_name(&op.parameter_name)
                    .set_new_parameter_name(op.new_parameter_name.clone())
                    .set_new_default_values(new_default_values)
                    .build()?,
            )
        }
        TransformOperation::Unmodeled(_) => {
            return Err(QuickSightError::Unsupported(format!(
                "transform operation {}",
                transform.operation_name()
            )))
        }
    };

    Ok(operation)
}

pub fn field_folders_to_sdk(
    folders: &IndexMap<String, FieldFolder>,
) -> HashMap<String, qs::FieldFolder> {
    folders
        .iter()
        .map(|(id, folder)| {
            (
                id.clone(),
                qs::FieldFolder::builder()
                    .set_description(folder.description.clone())
                    .set_columns(Some(folder.columns.clone()))
                    .build(),
            )
        })
        .collect()
}

pub fn column_groups_to_sdk(groups: &[ColumnGroup]) -> Result<Vec<qs::ColumnGroup>, BuildError> {
    groups
        .iter()
        .map(|group| {
            let geo = group
                .geo_spatial_column_group
                .as_ref()
                .map(|geo| {
                    qs::GeoSpatialColumnGroup::builder()
                        .name(&geo.name)
                        .set_country_code(
                            geo.country_code.as_deref().map(qs::GeoSpatialCountryCode::from),
                        )
                        .set_columns(Some(geo.columns.clone()))
                        .build()
                })
                .transpose()?;

            Ok(qs::ColumnGroup::builder()
                .set_geo_spatial_column_group(geo)
                .build())
        })
        .collect()
}

pub fn dataset_parameters_to_sdk(
    parameters: &[DatasetParameter],
) -> Result<Vec<qs::DatasetParameter>, QuickSightError> {
    parameters.iter().map(dataset_parameter_to_sdk).collect()
}

fn dataset_parameter_to_sdk(
    parameter: &DatasetParameter,
) -> Result<qs::DatasetParameter, QuickSightError> {
    let parameter = match parameter {
        DatasetParameter::StringDatasetParameter(p) => {
            qs::DatasetParameter::builder().string_dataset_parameter(
                qs::StringDatasetParameter::builder()
                    .id(&p.id)
                    .name(&p.name)
                    .value_type(qs::DatasetParameterValueType::from(p.value_type.as_str()))
                    .set_default_values(p.default_values.as_ref().map(|values| {
                        qs::StringDatasetParameterDefaultValues::builder()
                            .set_static_values(Some(values.static_values.clone()))
                            .build()
                    }))
                    .build()?,
            ).build()
        }
        DatasetParameter::DecimalDatasetParameter(p) => {
            qs::DatasetParameter::builder().decimal_dataset_parameter(
                qs::DecimalDatasetParameter::builder()
                    .id(&p.id)
                    .name(&p.name)
                    .value_type(qs::DatasetParameterValueType::from(p.value_type.as_str()))
                    .set_default_values(p.default_values.as_ref().map(|values| {
                        qs::DecimalDatasetParameterDefaultValues::builder()
                            .set_static_values(Some(values.static_values.clone()))
                            .build()
                    }))
                    .build()?,
            ).build()
        }
        DatasetParameter::IntegerDatasetParameter(p) => {
            qs::DatasetParameter::builder().integer_dataset_parameter(
                qs::IntegerDatasetParameter::builder()
                    .id(&p.id)
                    .name(&p.name)
                    .value_type(qs::DatasetParameterValueType::from(p.value_type.as_str()))
                    .set_default_values(p.default_values.as_ref().map(|values| {
                        qs::IntegerDatasetParameterDefaultValues::builder()
                            .set_static_values(Some(values.static_values.clone()))
                            .build()
                    }))
                    .build()?,
            ).build()
        }
        DatasetParameter::DateTimeDatasetParameter(p) => {
            let default_values = p
                .default_values
                .as_ref()
                .map(|values| -> Result<_, QuickSightError> {
                    let static_values = values
                        .static_values
                        .iter()
                        .map(|value| date_time_to_sdk(value))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(qs::DateTimeDatasetParameterDefaultValues::builder()
                        .set_static_values(Some(static_values))
                        .build())
                })
                .transpose()?;

            qs::DatasetParameter::builder().date_time_dataset_parameter(
                qs::DateTimeDatasetParameter::builder()
                    .id(&p.id)
                    .name(&p.name)
                    .value_type(qs::DatasetParameterValueType::from(p.value_type.as_str()))
                    .set_time_granularity(
                        p.time_granularity.as_deref().map(qs::TimeGranularity::from),
                    )
                    .set_default_values(default_values)
                    .build()?,
            ).build()
        }
        DatasetParameter::Unmodeled(value) => {
            return Err(QuickSightError::Unsupported(format!(
                "dataset parameter {}",
                value
            )))
        }
    };

    Ok(parameter)
}

pub fn usage_configuration_to_sdk(
    configuration: &DataSetUsageConfiguration,
) -> qs::DataSetUsageConfiguration {
    qs::DataSetUsageConfiguration::builder()
        .set_disable_use_as_direct_query_source(Some(
            configuration.disable_use_as_direct_query_source,
        ))
        .set_disable_use_as_imported_source(Some(configuration.disable_use_as_imported_source))
        .build()
}

pub fn permissions_to_sdk(
    permissions: &[ResourcePermission],
) -> Result<Vec<qs::ResourcePermission>, BuildError> {
    permissions
        .iter()
        .map(|permission| {
            qs::ResourcePermission::builder()
                .principal(&permission.principal)
                .set_actions(Some(permission.actions.clone()))
                .build()
        })
        .collect()
}

pub fn references_to_sdk(
    references: &[DataSetReference],
) -> Result<Vec<qs::DataSetReference>, BuildError> {
    references
        .iter()
        .map(|reference| {
            qs::DataSetReference::builder()
                .data_set_placeholder(&reference.data_set_placeholder)
                .data_set_arn(&reference.data_set_arn)
                .build()
        })
        .collect()
}

pub fn data_source_parameters_to_sdk(
    parameters: &DataSourceParameters,
) -> Result<qs::DataSourceParameters, BuildError> {
    let parameters = match parameters {
        DataSourceParameters::PostgreSqlParameters(db) => {
            qs::DataSourceParameters::PostgreSqlParameters(
                qs::PostgreSqlParameters::builder()
                    .host(&db.host)
                    .port(db.port)
                    .database(&db.database)
                    .build()?,
            )
        }
        DataSourceParameters::MySqlParameters(db) => qs::DataSourceParameters::MySqlParameters(
            qs::MySqlParameters::builder()
                .host(&db.host)
                .port(db.port)
                .database(&db.database)
                .build()?,
        ),
        DataSourceParameters::AuroraPostgreSqlParameters(db) => {
            qs::DataSourceParameters::AuroraPostgreSqlParameters(
                qs::AuroraPostgreSqlParameters::builder()
                    .host(&db.host)
                    .port(db.port)
                    .database(&db.database)
                    .build()?,
            )
        }
        DataSourceParameters::AthenaParameters(AthenaParameters {
            work_group,
            role_arn,
        }) => qs::DataSourceParameters::AthenaParameters(
            qs::AthenaParameters::builder()
                .set_work_group(work_group.clone())
                .set_role_arn(role_arn.clone())
                .build(),
        ),
    };

    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relational(arn: &str) -> PhysicalTable {
        PhysicalTable::RelationalTable(RelationalTable {
            data_source_arn: arn.to_string(),
            catalog: None,
            schema: Some("public".to_string()),
            name: "orders".to_string(),
            input_columns: vec![
                InputColumn::new("id", "INTEGER"),
                InputColumn {
                    sub_type: Some("FIXED".to_string()),
                    ..InputColumn::new("amount", "DECIMAL")
                },
            ],
            extra: Map::new(),
        })
    }

    #[test]
    fn test_physical_table_keeps_variant_and_arn() {
        let mut map = IndexMap::new();
        map.insert("t1".to_string(), relational("arn:new"));

        let sdk_map = physical_table_map_to_sdk(&map).expect("Failed to convert");

        match sdk_map.get("t1") {
            Some(qs::PhysicalTable::RelationalTable(table)) => {
                assert_eq!(table.data_source_arn(), "arn:new");
                assert_eq!(table.name(), "orders");
                assert_eq!(table.input_columns().len(), 2);
                assert_eq!(
                    table.input_columns()[1].sub_type(),
                    Some(&qs::ColumnDataSubType::Fixed)
                );
            }
            other => panic!("unexpected physical table: {:?}", other),
        }
    }

    #[test]
    fn test_sdk_physical_table_round_trips_into_model() {
        let table = relational("arn:old");
        let sdk_table = physical_table_to_sdk(&table).expect("Failed to convert");

        let back = physical_table_from_sdk(&sdk_table).expect("Failed to convert back");

        assert_eq!(back, table);
    }

    #[test]
    fn test_logical_table_with_transforms() {
        let table = LogicalTable {
            alias: "orders".to_string(),
            data_transforms: vec![
                TransformOperation::RenameColumnOperation(RenameColumnOperation {
                    column_name: "id".to_string(),
                    new_column_name: "order_id".to_string(),
                }),
                TransformOperation::ProjectOperation(ProjectOperation {
                    projected_columns: vec!["order_id".to_string()],
                }),
                TransformOperation::CastColumnTypeOperation(CastColumnTypeOperation {
                    column_name: "amount".to_string(),
                    new_column_type: "DECIMAL".to_string(),
                    sub_type: Some("FLOAT".to_string()),
                    format: None,
                }),
            ],
            source: LogicalTableSource {
                physical_table_id: Some("t1".to_string()),
                ..Default::default()
            },
            extra: Map::new(),
        };

        let sdk_table = logical_table_to_sdk(&table).expect("Failed to convert");

        assert_eq!(sdk_table.alias(), "orders");
        assert_eq!(sdk_table.data_transforms().len(), 3);
        assert_eq!(logical_table_from_sdk(&sdk_table).expect("Failed to convert back"), table);
    }

    #[test]
    fn test_custom_sql_without_columns() {
        let table = PhysicalTable::CustomSql(CustomSql {
            data_source_arn: "arn:a".to_string(),
            name: "q".to_string(),
            sql_query: "select 1".to_string(),
            columns: Vec::new(),
            extra: Map::new(),
        });

        // Columns sind optional, leere Liste wird weggelassen
        assert!(physical_table_to_sdk(&table).is_ok());
    }

    #[test]
    fn test_data_set_export_keeps_folders_parameters_and_overrides() {
        let logical = qs::LogicalTable::builder()
            .alias("sales")
            .source(qs::LogicalTableSource::builder().physical_table_id("t1").build())
            .data_transforms(qs::TransformOperation::OverrideDatasetParameterOperation(
                qs::OverrideDatasetParameterOperation::builder()
                    .parameter_name("region")
                    .new_parameter_name("sales_region")
                    .build()
                    .expect("Failed to build override"),
            ))
            .build()
            .expect("Failed to build logical table");
        let parameter = qs::DatasetParameter::builder().string_dataset_parameter(
            qs::StringDatasetParameter::builder()
                .id("p-1")
                .name("region")
                .value_type(qs::DatasetParameterValueType::SingleValued)
                .default_values(
                    qs::StringDatasetParameterDefaultValues::builder()
                        .static_values("EU")
                        .build(),
                )
                .build()
                .expect("Failed to build parameter"),
        ).build();
        let data_set = qs::DataSet::builder()
            .name("sales")
            .import_mode(qs::DataSetImportMode::Spice)
            .logical_table_map("l1", logical)
            .field_folders(
                "finance",
                qs::FieldFolder::builder().columns("amount").build(),
            )
            .output_columns(
                qs::OutputColumn::builder()
                    .name("amount")
                    .r#type(qs::ColumnDataType::Decimal)
                    .sub_type(qs::ColumnDataSubType::Fixed)
                    .build(),
            )
            .column_groups(
                qs::ColumnGroup::builder()
                    .geo_spatial_column_group(
                        qs::GeoSpatialColumnGroup::builder()
                            .name("geo")
                            .columns("city")
                            .build()
                            .expect("Failed to build column group"),
                    )
                    .build(),
            )
            .column_level_permission_rules(
                qs::ColumnLevelPermissionRule::builder()
                    .principals("arn:user")
                    .column_names("amount")
                    .build(),
            )
            .dataset_parameters(parameter)
            .build();

        let model = data_set_from_sdk(&data_set).expect("Failed to convert data set");

        assert!(matches!(
            model.logical_table_map["l1"].data_transforms[0],
            TransformOperation::OverrideDatasetParameterOperation(_)
        ));
        assert_eq!(model.field_folders["finance"].columns, vec!["amount"]);
        assert_eq!(model.output_columns[0].sub_type.as_deref(), Some("FIXED"));
        assert_eq!(model.column_level_permission_rules.len(), 1);

        let json = serde_json::to_value(&model).expect("Failed to serialize");
        for field in [
            "FieldFolders",
            "OutputColumns",
            "ColumnGroups",
            "ColumnLevelPermissionRules",
            "DatasetParameters",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(
            json["DatasetParameters"][0]["StringDatasetParameter"]["DefaultValues"]["StaticValues"],
            json!(["EU"])
        );

        // Zurück in SDK Typen für CreateDataSet
        assert!(logical_table_map_to_sdk(&model.logical_table_map).is_ok());
        assert_eq!(
            dataset_parameters_to_sdk(&model.dataset_parameters)
                .expect("Failed to convert parameters")
                .len(),
            1
        );
        assert_eq!(column_groups_to_sdk(&model.column_groups).expect("Failed").len(), 1);
    }

    #[test]
    fn test_unmodeled_transform_is_refused_when_sending() {
        let table = LogicalTable {
            alias: "sales".to_string(),
            data_transforms: vec![TransformOperation::Unmodeled(
                json!({"PivotOperation": {"Columns": ["region"]}}),
            )],
            source: LogicalTableSource {
                physical_table_id: Some("t1".to_string()),
                ..Default::default()
            },
            extra: Map::new(),
        };

        let err = logical_table_to_sdk(&table).expect_err("Unmodeled transform must not be sent");

        assert_eq!(err.to_string(), "unsupported transform operation PivotOperation");
    }

    #[test]
    fn test_date_time_parameter_values_keep_their_instant() {
        let value = date_time_to_sdk("2024-03-01T12:30:00Z").expect("Failed to parse");

        assert_eq!(timestamp(Some(&value)).as_deref(), Some("2024-03-01T12:30:00Z"));
        assert!(date_time_to_sdk("gestern").is_err());
    }
}
