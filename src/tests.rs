#[cfg(test)]
mod integration_tests {
    use indexmap::IndexMap;
    use secrecy::SecretString;
    use serde_json::{Map, Value};
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::migration::{
        references_for_data_sets, AssetPublisher, DataSetExporter, DataSetImporter,
        ItemStatus, MigrationError,
    };
    use crate::quicksight::error::RESOURCE_NOT_FOUND;
    use crate::quicksight::{
        AssetDescription, AssetKind, AssetReceipt, AssetSummary, CredentialPair, DataSet,
        DataSourceDefinition,
        DataSourceParameters, DatabaseParameters, ImportMode, LogicalTable, LogicalTableSource,
        MockQuickSightApi, PhysicalTable, PublishRequest, QuickSightApi, QuickSightClient,
        QuickSightError, RelationalTable, ResourcePermission, SourceEntity, TransformOperation,
    };
    use crate::storage::{read_references, write_references, ExtractStore};
    use crate::utils::Config;

    const ACCOUNT: &str = "111122223333";

    fn relational(arn: &str) -> PhysicalTable {
        PhysicalTable::RelationalTable(RelationalTable {
            data_source_arn: arn.to_string(),
            catalog: None,
            schema: Some("public".to_string()),
            name: "orders".to_string(),
            input_columns: Vec::new(),
            extra: Map::new(),
        })
    }

    fn data_set(id: &str, tables: usize) -> DataSet {
        let physical_table_map: IndexMap<_, _> = (0..tables)
            .map(|i| (format!("t{:03}", i), relational("arn:old")))
            .collect();

        let mut logical_table_map = IndexMap::new();
        logical_table_map.insert(
            "l000".to_string(),
            LogicalTable {
                alias: "orders".to_string(),
                data_transforms: Vec::new(),
                source: LogicalTableSource {
                    physical_table_id: Some("t000".to_string()),
                    ..Default::default()
                },
                extra: Map::new(),
            },
        );

        DataSet {
            arn: Some(format!("arn:aws:quicksight:us-east-1:{}:dataset/{}", ACCOUNT, id)),
            data_set_id: Some(id.to_string()),
            name: format!("Data set {}", id),
            physical_table_map,
            logical_table_map,
            import_mode: ImportMode::Spice,
            ..Default::default()
        }
    }

    /// Extract im JSON Layout von DescribeDataSet bzw. der AWS CLI
    const SALES_EXTRACT: &str = r#"{
        "Arn": "arn:aws:quicksight:us-east-1:111122223333:dataset/sales",
        "DataSetId": "sales",
        "Name": "Sales",
        "CreatedTime": "2024-03-01T12:30:00Z",
        "PhysicalTableMap": {
            "orders": {"RelationalTable": {
                "DataSourceArn": "arn:aws:quicksight:us-east-1:111122223333:datasource/pg-old",
                "Catalog": "analytics",
                "Schema": "public",
                "Name": "orders",
                "InputColumns": [
                    {"Name": "id", "Type": "INTEGER"},
                    {"Name": "amount", "Type": "DECIMAL", "SubType": "FIXED"},
                    {"Name": "region", "Type": "STRING"}
                ]
            }}
        },
        "LogicalTableMap": {
            "orders-logical": {
                "Alias": "orders",
                "DataTransforms": [
                    {"OverrideDatasetParameterOperation": {
                        "ParameterName": "region",
                        "NewParameterName": "sales_region"
                    }},
                    {"PivotOperation": {"Columns": ["region"], "Aggregation": "SUM"}},
                    {"CastColumnTypeOperation": {
                        "ColumnName": "amount",
                        "NewColumnType": "DECIMAL",
                        "SubType": "FLOAT"
                    }}
                ],
                "Source": {"PhysicalTableId": "orders"}
            }
        },
        "OutputColumns": [
            {"Name": "amount", "Type": "DECIMAL", "SubType": "FLOAT"},
            {"Name": "region", "Type": "STRING"}
        ],
        "ImportMode": "SPICE",
        "ConsumedSpiceCapacityInBytes": 4096,
        "FieldFolders": {
            "finance": {"Description": "Money", "Columns": ["amount"]}
        },
        "DataSetUsageConfiguration": {
            "DisableUseAsDirectQuerySource": false,
            "DisableUseAsImportedSource": false
        },
        "DatasetParameters": [
            {"StringDatasetParameter": {
                "Id": "p-region",
                "Name": "region",
                "ValueType": "SINGLE_VALUED",
                "DefaultValues": {"StaticValues": ["EU"]}
            }}
        ],
        "UseAs": "RLS_RULES"
    }"#;

    fn permissions() -> Vec<ResourcePermission> {
        vec![ResourcePermission {
            principal: format!("arn:aws:quicksight:us-east-1:{}:user/default/admin", ACCOUNT),
            actions: vec!["quicksight:DescribeDataSet".to_string()],
        }]
    }

    fn not_found(operation: &'static str) -> QuickSightError {
        QuickSightError::Service {
            operation,
            code: Some(RESOURCE_NOT_FOUND.to_string()),
            message: "resource not found".to_string(),
        }
    }

    fn receipt(kind: AssetKind, arn: &str) -> AssetReceipt {
        let mut receipt = AssetReceipt::new(kind);
        receipt.arn = Some(arn.to_string());
        receipt.http_status = Some(201);
        receipt
    }

    #[tokio::test]
    async fn test_export_continues_after_failed_id() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path());

        let mut mock = MockQuickSightApi::new();
        mock.expect_describe_data_set().returning(|_, id| {
            if id == "missing" {
                Err(not_found("DescribeDataSet"))
            } else {
                Ok(data_set(id, 1))
            }
        });
        mock.expect_describe_data_set_permissions()
            .times(2)
            .returning(|_, _| Ok(permissions()));

        let exporter = DataSetExporter::new(Arc::new(mock), store.clone());
        let ids = vec!["ds1".to_string(), "missing".to_string(), "ds3".to_string()];

        let report = exporter.export(ACCOUNT, &ids).await;

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.items[1].status, ItemStatus::Failed);
        assert!(store.data_set_path("ds1").exists());
        assert!(store.permissions_path("ds3").exists());
        assert!(!store.data_set_path("missing").exists());
    }

    #[tokio::test]
    async fn test_re_export_overwrites_with_same_content() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path().join("qs_extracts"));

        let mut mock = MockQuickSightApi::new();
        mock.expect_describe_data_set()
            .returning(|_, id| Ok(data_set(id, 3)));
        mock.expect_describe_data_set_permissions()
            .returning(|_, _| Ok(permissions()));
        let exporter = DataSetExporter::new(Arc::new(mock), store.clone());
        let ids = vec!["ds1".to_string()];

        exporter.export(ACCOUNT, &ids).await;
        let first = std::fs::read(store.data_set_path("ds1")).expect("Failed to read extract");
        exporter.export(ACCOUNT, &ids).await;
        let second = std::fs::read(store.data_set_path("ds1")).expect("Failed to read extract");

        assert_eq!(first, second);
        assert_eq!(
            store.get_permissions("ds1").await.expect("Failed to load"),
            permissions()
        );
    }

    #[tokio::test]
    async fn test_relational_table_moves_from_old_to_new_data_source() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path());

        let mut source = MockQuickSightApi::new();
        source
            .expect_describe_data_set()
            .returning(|_, id| Ok(data_set(id, 1)));
        source
            .expect_describe_data_set_permissions()
            .returning(|_, _| Ok(permissions()));
        DataSetExporter::new(Arc::new(source), store.clone())
            .export(ACCOUNT, &["ds1".to_string()])
            .await;

        let exported = data_set("ds1", 1);
        let mut target = MockQuickSightApi::new();
        target
            .expect_create_data_set()
            .withf(move |account, request| {
                let mut expected_tables = exported.physical_table_map.clone();
                expected_tables.insert("t000".to_string(), relational("arn:new"));

                account.to_string() == "444455556666"
                    && request.data_set_id == "ds1"
                    && request.name == exported.name
                    && request.physical_table_map == expected_tables
                    && request.logical_table_map == exported.logical_table_map
                    && request.import_mode == exported.import_mode
                    && request.permissions == permissions()
            })
            .times(1)
            .returning(|_, _| {
                Ok(receipt(
                    AssetKind::DataSet,
                    "arn:aws:quicksight:us-east-1:444455556666:dataset/ds1",
                ))
            });

        let report = DataSetImporter::new(Arc::new(target), store, Some(200))
            .import("444455556666", &["ds1".to_string()], "arn:new")
            .await;

        assert_eq!(report.succeeded, 1);
        assert!(report.items[0].warnings.is_empty());
    }

    #[tokio::test]
    async fn test_service_layout_extract_survives_export_and_import() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path());
        let described: DataSet =
            serde_json::from_str(SALES_EXTRACT).expect("Failed to parse service layout");

        let mut source = MockQuickSightApi::new();
        source
            .expect_describe_data_set()
            .returning(move |_, _| Ok(described.clone()));
        source
            .expect_describe_data_set_permissions()
            .returning(|_, _| Ok(permissions()));
        let report = DataSetExporter::new(Arc::new(source), store.clone())
            .export(ACCOUNT, &["sales".to_string()])
            .await;
        assert_eq!(report.succeeded, 1);

        let written: Value = serde_json::from_slice(
            &std::fs::read(store.data_set_path("sales")).expect("Failed to read extract"),
        )
        .expect("Failed to parse extract");
        let expected: Value = serde_json::from_str(SALES_EXTRACT).expect("Failed to parse json");
        assert_eq!(written, expected);

        let new_arn = "arn:aws:quicksight:us-east-1:444455556666:datasource/pg-new";
        let mut target = MockQuickSightApi::new();
        target
            .expect_create_data_set()
            .withf(move |_, request| {
                let columns = match &request.physical_table_map["orders"] {
                    PhysicalTable::RelationalTable(table) if table.data_source_arn == new_arn => {
                        &table.input_columns
                    }
                    _ => return false,
                };
                let transforms = &request.logical_table_map["orders-logical"].data_transforms;

                columns[1].sub_type.as_deref() == Some("FIXED")
                    && matches!(
                        transforms[0],
                        TransformOperation::OverrideDatasetParameterOperation(_)
                    )
                    && transforms[1].operation_name() == "PivotOperation"
                    && request.field_folders["finance"].columns == vec!["amount".to_string()]
                    && request.dataset_parameters.len() == 1
            })
            .times(1)
            .returning(|_, _| {
                Ok(receipt(
                    AssetKind::DataSet,
                    "arn:aws:quicksight:us-east-1:444455556666:dataset/sales",
                ))
            });

        let report = DataSetImporter::new(Arc::new(target), store, Some(200))
            .import("444455556666", &["sales".to_string()], new_arn)
            .await;

        assert_eq!(report.succeeded, 1);
        assert_eq!(
            report.items[0].warnings,
            vec!["fields not sent to CreateDataSet: UseAs".to_string()]
        );
    }

    #[tokio::test]
    async fn test_import_continues_after_missing_extract() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path());
        for id in ["ds1", "ds3"] {
            store
                .put_data_set(id, &data_set(id, 2))
                .await
                .expect("Failed to seed extract");
            store
                .put_permissions(id, &permissions())
                .await
                .expect("Failed to seed permissions");
        }

        let mut mock = MockQuickSightApi::new();
        mock.expect_create_data_set()
            .times(2)
            .returning(|_, request| {
                Ok(receipt(
                    AssetKind::DataSet,
                    &format!("arn:aws:quicksight:us-east-1:{}:dataset/{}", ACCOUNT, request.data_set_id),
                ))
            });

        let ids = vec!["ds1".to_string(), "ds2".to_string(), "ds3".to_string()];
        let report = DataSetImporter::new(Arc::new(mock), store, Some(200))
            .import(ACCOUNT, &ids, "arn:new")
            .await;

        let statuses: Vec<_> = report.items.iter().map(|i| (i.id.as_str(), i.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("ds1", ItemStatus::Succeeded),
                ("ds2", ItemStatus::Failed),
                ("ds3", ItemStatus::Succeeded),
            ]
        );
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_import_caps_physical_tables_at_limit() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = ExtractStore::new(dir.path());
        store
            .put_data_set("exact", &data_set("exact", 200))
            .await
            .expect("Failed to seed extract");
        store
            .put_data_set("over", &data_set("over", 201))
            .await
            .expect("Failed to seed extract");
        for id in ["exact", "over"] {
            store
                .put_permissions(id, &permissions())
                .await
                .expect("Failed to seed permissions");
        }

        let mut mock = MockQuickSightApi::new();
        mock.expect_create_data_set()
            .withf(|_, request| {
                let rewritten = request
                    .physical_table_map
                    .values()
                    .filter(|t| t.data_source_arn() == "arn:new")
                    .count();
                match request.data_set_id.as_str() {
                    "exact" => rewritten == 200,
                    "over" => {
                        rewritten == 200
                            && request.physical_table_map["t200"].data_source_arn() == "arn:old"
                    }
                    _ => false,
                }
            })
            .times(2)
            .returning(|_, _| Ok(AssetReceipt::new(AssetKind::DataSet)));

        let ids = vec!["exact".to_string(), "over".to_string()];
        let report = DataSetImporter::new(Arc::new(mock), store, Some(200))
            .import(ACCOUNT, &ids, "arn:new")
            .await;

        assert_eq!(report.succeeded, 2);
        assert!(report.items[0].warnings.is_empty());
        assert_eq!(report.items[1].warnings.len(), 1);
        assert!(report.items[1].warnings[0].contains("t200"));
    }

    #[tokio::test]
    async fn test_reference_mapping_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("refs.json");
        let ids = vec!["sales".to_string(), "orders".to_string(), "returns".to_string()];
        let references = references_for_data_sets("us-east-1", ACCOUNT, &ids);

        write_references(&path, &references)
            .await
            .expect("Failed to write references");
        let loaded = read_references(&path).await.expect("Failed to read references");

        let written: HashSet<_> = references.into_iter().collect();
        let read: HashSet<_> = loaded.into_iter().collect();
        assert_eq!(written, read);
    }

    #[tokio::test]
    async fn test_publish_missing_version_never_updates() {
        let mut mock = MockQuickSightApi::new();
        mock.expect_describe_asset()
            .withf(|_, kind, id, version| {
                *kind == AssetKind::Dashboard && id.to_string() == "dash1" && *version == Some(3)
            })
            .times(1)
            .returning(|_, _, _, _| Err(not_found("DescribeDashboard")));
        mock.expect_update_dashboard_published_version().times(0);

        let publisher = AssetPublisher::new(Arc::new(mock));
        let result = publisher.publish_dashboard(ACCOUNT, "dash1", 3).await;

        match result {
            Err(MigrationError::VersionNotFound {
                dashboard_id,
                version,
            }) => {
                assert_eq!(dashboard_id, "dash1");
                assert_eq!(version, 3);
            }
            other => panic!("expected VersionNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_existing_version() {
        let mut mock = MockQuickSightApi::new();
        mock.expect_describe_asset().returning(|_, kind, id, version| {
            let mut summary = AssetSummary::new(kind);
            summary.asset_id = Some(id.to_string());
            summary.version_number = version;
            Ok(AssetDescription {
                summary,
                detail: String::new(),
            })
        });
        mock.expect_update_dashboard_published_version()
            .withf(|_, id, version| id.to_string() == "dash1" && *version == 2)
            .times(1)
            .returning(|_, _, _| {
                Ok(receipt(
                    AssetKind::Dashboard,
                    "arn:aws:quicksight:us-east-1:111122223333:dashboard/dash1",
                ))
            });

        let publisher = AssetPublisher::new(Arc::new(mock));
        let receipt = publisher
            .publish_dashboard(ACCOUNT, "dash1", 2)
            .await
            .expect("Failed to publish");

        assert_eq!(receipt.kind, AssetKind::Dashboard);
    }

    #[tokio::test]
    async fn test_publish_rejects_version_zero_without_calls() {
        let mock = MockQuickSightApi::new();
        let publisher = AssetPublisher::new(Arc::new(mock));

        let result = publisher.publish_dashboard(ACCOUNT, "dash1", 0).await;

        assert!(matches!(result, Err(MigrationError::InvalidVersion { version: 0 })));
    }

    #[tokio::test]
    async fn test_create_dashboard_passes_references() {
        let references = references_for_data_sets("us-east-1", ACCOUNT, &["ds1".to_string()]);
        let request = PublishRequest {
            kind: AssetKind::Dashboard,
            asset_id: "dash1".to_string(),
            name: "Sales".to_string(),
            source: SourceEntity::Template {
                arn: "arn:aws:quicksight:us-east-1:999988887777:template/t1".to_string(),
                data_set_references: references.clone(),
            },
            version_description: Some("1".to_string()),
        };

        let mut mock = MockQuickSightApi::new();
        mock.expect_create_asset()
            .withf(move |_, req| req.source.data_set_references() == references.as_slice())
            .times(1)
            .returning(|_, req| {
                let mut receipt = AssetReceipt::new(req.kind);
                receipt.status = Some("CREATION_IN_PROGRESS".to_string());
                Ok(receipt)
            });

        let receipt = AssetPublisher::new(Arc::new(mock))
            .create(ACCOUNT, &request)
            .await
            .expect("Failed to create dashboard");

        assert_eq!(receipt.status.as_deref(), Some("CREATION_IN_PROGRESS"));
    }

    #[tokio::test]
    async fn test_service_error_surfaces_verbatim() {
        let mut mock = MockQuickSightApi::new();
        mock.expect_update_asset().returning(|_, _| {
            Err(QuickSightError::Service {
                operation: "UpdateAnalysis",
                code: Some("AccessDeniedException".to_string()),
                message: "not authorized".to_string(),
            })
        });

        let request = PublishRequest {
            kind: AssetKind::Analysis,
            asset_id: "a1".to_string(),
            name: "Sales".to_string(),
            source: SourceEntity::Template {
                arn: "arn:aws:quicksight:us-east-1:999988887777:template/t1".to_string(),
                data_set_references: references_for_data_sets("us-east-1", ACCOUNT, &["ds1".to_string()]),
            },
            version_description: None,
        };

        let err = tokio_test::assert_err!(
            AssetPublisher::new(Arc::new(mock))
                .update(ACCOUNT, &request)
                .await
        );

        assert_eq!(
            err.to_string(),
            "UpdateAnalysis failed (AccessDeniedException): not authorized"
        );
    }

    fn postgres_definition(password: Option<&str>) -> DataSourceDefinition {
        DataSourceDefinition {
            data_source_id: "pg".to_string(),
            name: "Postgres".to_string(),
            source_type: "POSTGRESQL".to_string(),
            data_source_parameters: DataSourceParameters::PostgreSqlParameters(DatabaseParameters {
                host: "db.internal".to_string(),
                port: 5432,
                database: "analytics".to_string(),
            }),
            credentials: Some(CredentialPair {
                username: "quicksight".to_string(),
                password: password.map(|p| SecretString::new(p.into())),
            }),
            ssl_properties: None,
        }
    }

    #[tokio::test]
    async fn test_data_source_without_password_fails_before_call() {
        let mut mock = MockQuickSightApi::new();
        mock.expect_create_data_source().times(0);

        let result = AssetPublisher::new(Arc::new(mock))
            .create_data_source(ACCOUNT, postgres_definition(None), None)
            .await;

        assert!(matches!(result, Err(MigrationError::MissingPassword { .. })));
    }

    #[tokio::test]
    async fn test_data_source_uses_fallback_password() {
        let mut mock = MockQuickSightApi::new();
        mock.expect_create_data_source()
            .withf(|_, definition| {
                definition
                    .credentials
                    .as_ref()
                    .is_some_and(|c| c.password.is_some())
            })
            .times(1)
            .returning(|_, _| Ok(AssetReceipt::new(AssetKind::DataSource)));

        let receipt = AssetPublisher::new(Arc::new(mock))
            .create_data_source(
                ACCOUNT,
                postgres_definition(None),
                Some(SecretString::new("from-env".into())),
            )
            .await
            .expect("Failed to create data source");

        assert_eq!(receipt.kind, AssetKind::DataSource);
    }

    #[test]
    fn test_secret_is_not_printed() {
        let definition = postgres_definition(Some("hunter2"));

        let debug = format!("{:?}", definition);

        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    #[ignore] // Run mit: cargo test -- --ignored --nocapture
    async fn test_quicksight_connection() {
        let account_id = std::env::var("QS_MIGRATE_TEST_ACCOUNT_ID").unwrap_or_default();
        let data_set_id = std::env::var("QS_MIGRATE_TEST_DATA_SET_ID").unwrap_or_default();

        if account_id.is_empty() || data_set_id.is_empty() {
            println!("Skipping QuickSight test - no account configured");
            return;
        }

        let config = Config::load(None).expect("Failed to load config");
        let client = QuickSightClient::new(&config).await;

        match client.describe_data_set(&account_id, &data_set_id).await {
            Ok(data_set) => {
                println!("✓ QuickSight connection successful");
                println!("  Data set: {} ({} physical tables)", data_set.name, data_set.physical_table_map.len());
            }
            Err(e) => {
                println!("✗ QuickSight connection failed: {}", e);
                panic!("QuickSight test failed");
            }
        }
    }
}
