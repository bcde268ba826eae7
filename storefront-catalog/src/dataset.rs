//! The static catalog served when the remote service is unavailable.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CatalogError;
use crate::source::decode_catalog;

/// Catalog bundled into the binary at build time.
const BUNDLED_PRODUCTS: &str = include_str!("../data/products.json");

/// The fallback dataset: the bundled copy, optionally replaced by a file.
#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    override_path: Option<PathBuf>,
}

impl StaticDataset {
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Use `path` instead of the bundled copy when it can be read.
    pub fn with_override(path: Option<PathBuf>) -> Self {
        Self {
            override_path: path,
        }
    }

    /// Raw upstream records. Never fails: an unreadable override falls back
    /// to the bundled copy, and an undecodable bundled copy yields nothing.
    pub fn values(&self) -> Vec<Value> {
        if let Some(path) = &self.override_path {
            match load_file(path) {
                Ok(values) => return values,
                Err(e) => log::warn!(
                    "Static dataset {} unusable, using bundled copy: {e}",
                    path.display()
                ),
            }
        }
        match decode_catalog(BUNDLED_PRODUCTS) {
            Ok(values) => values,
            Err(e) => {
                log::error!("Bundled static dataset is corrupt: {e}");
                Vec::new()
            }
        }
    }
}

fn load_file(path: &Path) -> Result<Vec<Value>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    decode_catalog(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_decodes() {
        let values = StaticDataset::bundled().values();
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| v.is_object()));
    }

    #[test]
    fn test_override_file_is_used() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"[{"id": "ONLY1"}]"#).unwrap();
        let values = StaticDataset::with_override(Some(path)).values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["id"], "ONLY1");
    }

    #[test]
    fn test_bad_override_uses_bundled() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();
        let bundled = StaticDataset::bundled().values();
        assert_eq!(StaticDataset::with_override(Some(path)).values(), bundled);

        let missing = dir.path().join("missing.json");
        assert_eq!(StaticDataset::with_override(Some(missing)).values().len(), bundled.len());
    }
}
