use std::collections::BTreeMap;
use std::path::PathBuf;

use super::store::KeyValueStore;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるKeyValueStore実装。
/// ファイルは `{ key: value }` のオブジェクト1つ。書き込みは一時ファイル経由で置き換える。
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, JsonStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let items = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), JsonStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    type Error = JsonStoreError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let mut items = self.read_all()?;
        tracing::debug!(path = %self.path.display(), key, "store read");
        Ok(items.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)?;
        tracing::debug!(path = %self.path.display(), key, bytes = value.len(), "store write");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.get_item("library").unwrap().is_none());
    }

    #[test]
    fn roundtrip_set_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = JsonFileStore::new(&path);

        store.set_item("library", r#"[{"title":"Dune"}]"#).unwrap();
        store.set_item("other", "x").unwrap();

        // 新しいインスタンスで読み直す
        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get_item("library").unwrap().as_deref(),
            Some(r#"[{"title":"Dune"}]"#)
        );
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("x"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn set_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));
        store.set_item("library", "first").unwrap();
        store.set_item("library", "second").unwrap();
        assert_eq!(store.get_item("library").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get_item("library"),
            Err(JsonStoreError::Json(_))
        ));
    }
}
