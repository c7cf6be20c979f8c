use std::path::PathBuf;

use crate::quicksight::{DataSet, ResourcePermission};
use crate::storage::error::StorageError;
use crate::storage::files::{read_json, write_json};

/// Lokales Extract-Verzeichnis für exportierte Data Sets
///
/// Pro Data Set zwei Dateien: `<id>_dataset.json` und `<id>_dataset_permissions.json`.
#[derive(Debug, Clone)]
pub struct ExtractStore {
    root: PathBuf,
}

impl ExtractStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_set_path(&self, data_set_id: &str) -> PathBuf {
        self.root.join(format!("{}_dataset.json", data_set_id))
    }

    pub fn permissions_path(&self, data_set_id: &str) -> PathBuf {
        self.root.join(format!("{}_dataset_permissions.json", data_set_id))
    }

    /// Speichere Data Set Definition, bestehende Datei wird überschrieben
    pub async fn put_data_set(
        &self,
        data_set_id: &str,
        data_set: &DataSet,
    ) -> Result<PathBuf, StorageError> {
        let path = self.data_set_path(data_set_id);
        write_json(&path, data_set).await?;
        Ok(path)
    }

    pub async fn get_data_set(&self, data_set_id: &str) -> Result<DataSet, StorageError> {
        read_json(&self.data_set_path(data_set_id)).await
    }

    /// Speichere Permission Set des Data Sets
    pub async fn put_permissions(
        &self,
        data_set_id: &str,
        permissions: &[ResourcePermission],
    ) -> Result<PathBuf, StorageError> {
        let path = self.permissions_path(data_set_id);
        write_json(&path, permissions).await?;
        Ok(path)
    }

    pub async fn get_permissions(
        &self,
        data_set_id: &str,
    ) -> Result<Vec<ResourcePermission>, StorageError> {
        read_json(&self.permissions_path(data_set_id)).await
    }
}
