use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Asset-Typen des QuickSight Service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    DataSource,
    DataSet,
    Template,
    Analysis,
    Dashboard,
}

impl AssetKind {
    pub fn as_str(&self) -> &str {
        match self {
            AssetKind::DataSource => "datasource",
            AssetKind::DataSet => "dataset",
            AssetKind::Template => "template",
            AssetKind::Analysis => "analysis",
            AssetKind::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ARN im Format arn:aws:quicksight:<region>:<account>:<kind>/<id>
pub fn asset_arn(region: &str, account_id: &str, kind: AssetKind, asset_id: &str) -> String {
    format!("arn:aws:quicksight:{}:{}:{}/{}", region, account_id, kind, asset_id)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportMode {
    #[default]
    Spice,
    DirectQuery,
}

impl ImportMode {
    pub fn as_str(&self) -> &str {
        match self {
            ImportMode::Spice => "SPICE",
            ImportMode::DirectQuery => "DIRECT_QUERY",
        }
    }
}

/// Data Set Definition, wie sie DescribeDataSet liefert.
///
/// Felder, die hier nicht modelliert sind, landen in `extra` und werden
/// beim Schreiben unverändert wieder ausgegeben.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DataSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<String>,
    pub physical_table_map: IndexMap<String, PhysicalTable>,
    #[serde(default)]
    pub logical_table_map: IndexMap<String, LogicalTable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_columns: Vec<OutputColumn>,
    pub import_mode: ImportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_spice_capacity_in_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_groups: Vec<ColumnGroup>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub field_folders: IndexMap<String, FieldFolder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_level_permission_data_set: Option<RowLevelPermissionDataSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_level_permission_tag_configuration: Option<RowLevelPermissionTagConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_level_permission_rules: Vec<ColumnLevelPermissionRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_usage_configuration: Option<DataSetUsageConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dataset_parameters: Vec<DatasetParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_configuration: Option<PerformanceConfiguration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataSet {
    /// Felder, die CreateDataSet nicht übernimmt
    pub fn fields_not_migrated(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        if self.row_level_permission_data_set.is_some() {
            fields.push("RowLevelPermissionDataSet".to_string());
        }
        if self.row_level_permission_tag_configuration.is_some() {
            fields.push("RowLevelPermissionTagConfiguration".to_string());
        }
        if !self.column_level_permission_rules.is_empty() {
            fields.push("ColumnLevelPermissionRules".to_string());
        }
        if self.performance_configuration.is_some() {
            fields.push("PerformanceConfiguration".to_string());
        }
        fields.extend(self.extra.keys().cloned());

        for (table_id, table) in &self.physical_table_map {
            fields.extend(
                table
                    .extra()
                    .keys()
                    .map(|key| format!("PhysicalTableMap.{}.{}", table_id, key)),
            );
        }

        fields
    }
}

/// Physical Table: genau eine Variante ist gesetzt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PhysicalTable {
    CustomSql(CustomSql),
    RelationalTable(RelationalTable),
    S3Source(S3Source),
}

impl PhysicalTable {
    pub fn variant_name(&self) -> &str {
        match self {
            PhysicalTable::CustomSql(_) => "CustomSql",
            PhysicalTable::RelationalTable(_) => "RelationalTable",
            PhysicalTable::S3Source(_) => "S3Source",
        }
    }

    pub fn data_source_arn(&self) -> &str {
        match self {
            PhysicalTable::CustomSql(sql) => &sql.data_source_arn,
            PhysicalTable::RelationalTable(table) => &table.data_source_arn,
            PhysicalTable::S3Source(source) => &source.data_source_arn,
        }
    }

    pub fn extra(&self) -> &Map<String, Value> {
        match self {
            PhysicalTable::CustomSql(sql) => &sql.extra,
            PhysicalTable::RelationalTable(table) => &table.extra,
            PhysicalTable::S3Source(source) => &source.extra,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomSql {
    pub data_source_arn: String,
    pub name: String,
    pub sql_query: String,
    #[serde(default)]
    pub columns: Vec<InputColumn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RelationalTable {
    pub data_source_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default)]
    pub input_columns: Vec<InputColumn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct S3Source {
    pub data_source_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_settings: Option<UploadSettings>,
    #[serde(default)]
    pub input_columns: Vec<InputColumn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UploadSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_from_row: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_qualifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InputColumn {
    pub name: String,
    #[serde(rename = "Type")]
    pub data_type: String,
    /// FIXED oder FLOAT bei DECIMAL Spalten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputColumn {
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OutputColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LogicalTable {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_transforms: Vec<TransformOperation>,
    pub source: LogicalTableSource,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LogicalTableSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_instruction: Option<JoinInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct JoinInstruction {
    pub left_operand: String,
    pub right_operand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_join_key_properties: Option<JoinKeyProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_join_key_properties: Option<JoinKeyProperties>,
    #[serde(rename = "Type")]
    pub join_type: String,
    pub on_clause: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct JoinKeyProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_key: Option<bool>,
}

/// Data Transform eines Logical Table.
///
/// Unbekannte Operationen bleiben als JSON in `Unmodeled` erhalten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TransformOperation {
    ProjectOperation(ProjectOperation),
    FilterOperation(FilterOperation),
    CreateColumnsOperation(CreateColumnsOperation),
    RenameColumnOperation(RenameColumnOperation),
    CastColumnTypeOperation(CastColumnTypeOperation),
    TagColumnOperation(TagColumnOperation),
    UntagColumnOperation(UntagColumnOperation),
    OverrideDatasetParameterOperation(OverrideDatasetParameterOperation),
    #[serde(untagged)]
    Unmodeled(Value),
}

impl TransformOperation {
    pub fn operation_name(&self) -> String {
        match self {
            TransformOperation::ProjectOperation(_) => "ProjectOperation".to_string(),
            TransformOperation::FilterOperation(_) => "FilterOperation".to_string(),
            TransformOperation::CreateColumnsOperation(_) => "CreateColumnsOperation".to_string(),
            TransformOperation::RenameColumnOperation(_) => "RenameColumnOperation".to_string(),
            TransformOperation::CastColumnTypeOperation(_) => "CastColumnTypeOperation".to_string(),
            TransformOperation::TagColumnOperation(_) => "TagColumnOperation".to_string(),
            TransformOperation::UntagColumnOperation(_) => "UntagColumnOperation".to_string(),
            TransformOperation::OverrideDatasetParameterOperation(_) => {
                "OverrideDatasetParameterOperation".to_string()
            }
            TransformOperation::Unmodeled(value) => value
                .as_object()
                .and_then(|object| object.keys().next().cloned())
                .unwrap_or_else(|| "Unmodeled".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectOperation {
    pub projected_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FilterOperation {
    pub condition_expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateColumnsOperation {
    pub columns: Vec<CalculatedColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CalculatedColumn {
    pub column_name: String,
    pub column_id: String,
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RenameColumnOperation {
    pub column_name: String,
    pub new_column_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CastColumnTypeOperation {
    pub column_name: String,
    pub new_column_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TagColumnOperation {
    pub column_name: String,
    pub tags: Vec<ColumnTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_geographic_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_description: Option<ColumnDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UntagColumnOperation {
    pub column_name: String,
    pub tag_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OverrideDatasetParameterOperation {
    pub parameter_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_parameter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_default_values: Option<NewDefaultValues>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct NewDefaultValues {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub string_static_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decimal_static_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_time_static_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integer_static_values: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_spatial_column_group: Option<GeoSpatialColumnGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GeoSpatialColumnGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FieldFolder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RowLevelPermissionDataSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub arn: String,
    pub permission_policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RowLevelPermissionTagConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub tag_rules: Vec<RowLevelPermissionTagRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_rule_configurations: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RowLevelPermissionTagRule {
    pub tag_key: String,
    pub column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_multi_value_delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_all_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnLevelPermissionRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_names: Vec<String>,
}

/// Data Set Parameter; unbekannte Varianten bleiben als JSON erhalten
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DatasetParameter {
    StringDatasetParameter(ScalarDatasetParameter<String>),
    DecimalDatasetParameter(ScalarDatasetParameter<f64>),
    IntegerDatasetParameter(ScalarDatasetParameter<i64>),
    DateTimeDatasetParameter(DateTimeDatasetParameter),
    #[serde(untagged)]
    Unmodeled(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ScalarDatasetParameter<T> {
    pub id: String,
    pub name: String,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_values: Option<DatasetParameterDefaultValues<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DateTimeDatasetParameter {
    pub id: String,
    pub name: String,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_granularity: Option<String>,
    /// RFC 3339 Zeitpunkte
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_values: Option<DatasetParameterDefaultValues<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetParameterDefaultValues<T> {
    #[serde(default)]
    pub static_values: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PerformanceConfiguration {
    #[serde(default)]
    pub unique_keys: Vec<UniqueKey>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UniqueKey {
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetUsageConfiguration {
    #[serde(default)]
    pub disable_use_as_direct_query_source: bool,
    #[serde(default)]
    pub disable_use_as_imported_source: bool,
}

/// Principal + erlaubte Actions, wird unverändert übernommen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ResourcePermission {
    pub principal: String,
    pub actions: Vec<String>,
}

/// Reference Mapping Eintrag: Placeholder → Ziel Data Set ARN
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetReference {
    pub data_set_placeholder: String,
    pub data_set_arn: String,
}

impl DataSetReference {
    /// Placeholder = Data Set ID, ARN im Ziel-Account
    pub fn for_data_set(region: &str, account_id: &str, data_set_id: &str) -> Self {
        Self {
            data_set_placeholder: data_set_id.to_string(),
            data_set_arn: asset_arn(region, account_id, AssetKind::DataSet, data_set_id),
        }
    }
}

/// CreateDataSet Payload
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDataSetRequest {
    pub data_set_id: String,
    pub name: String,
    pub physical_table_map: IndexMap<String, PhysicalTable>,
    pub logical_table_map: IndexMap<String, LogicalTable>,
    pub import_mode: ImportMode,
    pub usage_configuration: Option<DataSetUsageConfiguration>,
    pub column_groups: Vec<ColumnGroup>,
    pub field_folders: IndexMap<String, FieldFolder>,
    pub dataset_parameters: Vec<DatasetParameter>,
    pub permissions: Vec<ResourcePermission>,
}

impl CreateDataSetRequest {
    pub fn from_definition(
        data_set_id: &str,
        data_set: DataSet,
        permissions: Vec<ResourcePermission>,
    ) -> Self {
        Self {
            data_set_id: data_set_id.to_string(),
            name: data_set.name,
            physical_table_map: data_set.physical_table_map,
            logical_table_map: data_set.logical_table_map,
            import_mode: data_set.import_mode,
            usage_configuration: data_set.data_set_usage_configuration,
            column_groups: data_set.column_groups,
            field_folders: data_set.field_folders,
            dataset_parameters: data_set.dataset_parameters,
            permissions,
        }
    }
}

/// Data Source Definition aus JSON Datei
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSourceDefinition {
    pub data_source_id: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub source_type: String,
    pub data_source_parameters: DataSourceParameters,
    #[serde(default)]
    pub credentials: Option<CredentialPair>,
    #[serde(default)]
    pub ssl_properties: Option<SslProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DataSourceParameters {
    PostgreSqlParameters(DatabaseParameters),
    MySqlParameters(DatabaseParameters),
    AuroraPostgreSqlParameters(DatabaseParameters),
    AthenaParameters(AthenaParameters),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseParameters {
    pub host: String,
    pub port: i32,
    pub database: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AthenaParameters {
    #[serde(default)]
    pub work_group: Option<String>,
    #[serde(default)]
    pub role_arn: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialPair {
    pub username: String,
    /// Fehlt das Passwort, wird QS_MIGRATE_DATA_SOURCE_PASSWORD gelesen
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|password| SecretString::new(password.into())))
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SslProperties {
    #[serde(default)]
    pub disable_ssl: bool,
}

/// Quelle für Template, Analysis oder Dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntity {
    Analysis {
        arn: String,
        data_set_references: Vec<DataSetReference>,
    },
    Template {
        arn: String,
        data_set_references: Vec<DataSetReference>,
    },
}

impl SourceEntity {
    pub fn arn(&self) -> &str {
        match self {
            SourceEntity::Analysis { arn, .. } | SourceEntity::Template { arn, .. } => arn,
        }
    }

    pub fn data_set_references(&self) -> &[DataSetReference] {
        match self {
            SourceEntity::Analysis { data_set_references, .. }
            | SourceEntity::Template { data_set_references, .. } => data_set_references,
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            SourceEntity::Analysis { .. } => AssetKind::Analysis,
            SourceEntity::Template { .. } => AssetKind::Template,
        }
    }
}

/// Create/Update Request für Template, Analysis oder Dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub kind: AssetKind,
    pub asset_id: String,
    pub name: String,
    pub source: SourceEntity,
    pub version_description: Option<String>,
}

/// Ergebnis eines mutierenden Calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AssetReceipt {
    pub kind: AssetKind,
    pub asset_id: Option<String>,
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_arn: Option<String>,
    pub status: Option<String>,
    pub http_status: Option<i32>,
    pub request_id: Option<String>,
}

impl AssetReceipt {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            asset_id: None,
            arn: None,
            version_arn: None,
            status: None,
            http_status: None,
            request_id: None,
        }
    }
}

/// Ergebnis eines Describe Calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AssetSummary {
    pub kind: AssetKind,
    pub asset_id: Option<String>,
    pub arn: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_entity_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_set_arns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub created_time: Option<String>,
    pub last_updated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_published_time: Option<String>,
}

impl AssetSummary {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            asset_id: None,
            arn: None,
            name: None,
            status: None,
            version_number: None,
            source_entity_arn: None,
            data_set_arns: Vec::new(),
            errors: Vec::new(),
            created_time: None,
            last_updated_time: None,
            last_published_time: None,
        }
    }
}

/// Describe Ergebnis: Kurzfassung plus vollständige Service Antwort
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescription {
    pub summary: AssetSummary,
    /// Lesbarer Dump der Service Antwort
    pub detail: String,
}
