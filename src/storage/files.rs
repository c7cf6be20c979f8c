use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::storage::error::StorageError;

/// Lese JSON Datei in typisiertes Modell
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let raw = tokio::fs::read(path).await.map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Schreibe Pretty JSON, legt fehlende Verzeichnisse an und überschreibt bestehende Dateien
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let mut body = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    body.push(b'\n');

    tokio::fs::write(path, body)
        .await
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "JSON file written");

    Ok(())
}
