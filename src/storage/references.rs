use std::collections::BTreeSet;
use std::path::Path;

use crate::quicksight::{DataSetReference, ResourcePermission};
use crate::storage::error::StorageError;
use crate::storage::files::{read_json, write_json};

/// Lese Reference Mapping Datei
pub async fn read_references(path: &Path) -> Result<Vec<DataSetReference>, StorageError> {
    read_json(path).await
}

/// Schreibe Reference Mapping Datei, doppelte Paare werden zusammengefasst
pub async fn write_references(
    path: &Path,
    references: &[DataSetReference],
) -> Result<(), StorageError> {
    let unique: BTreeSet<&DataSetReference> = references.iter().collect();
    let ordered: Vec<&DataSetReference> = unique.into_iter().collect();
    write_json(path, &ordered).await
}

/// Lese Permission Datei, z.B. für Template Permissions
pub async fn read_permissions(path: &Path) -> Result<Vec<ResourcePermission>, StorageError> {
    read_json(path).await
}
