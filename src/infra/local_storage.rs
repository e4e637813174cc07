use crate::domain::model::book::BookRecord;
use crate::domain::model::library::Library;
use crate::domain::repository::LibraryRepository;

use super::store::KeyValueStore;

/// Library全体を保存するキー
pub const LIBRARY_KEY: &str = "library";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to encode library: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed persisted library: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// KeyValueStoreの固定キー1つにLibraryをJSON配列として保存するLibraryRepository実装。
pub struct LocalStorageRepository<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorageRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> LibraryRepository for LocalStorageRepository<S> {
    type Error = PersistError;

    fn load(&self) -> Result<Vec<BookRecord>, Self::Error> {
        let Some(raw) = self
            .store
            .get_item(LIBRARY_KEY)
            .map_err(|e| PersistError::Store(Box::new(e)))?
        else {
            return Ok(Vec::new());
        };
        // 保存値が `null` でも空扱い
        let books: Option<Vec<BookRecord>> =
            serde_json::from_str(&raw).map_err(PersistError::Malformed)?;
        Ok(books.unwrap_or_default())
    }

    fn save(&self, library: &Library) -> Result<(), Self::Error> {
        let raw = serde_json::to_string(library).map_err(PersistError::Encode)?;
        self.store
            .set_item(LIBRARY_KEY, &raw)
            .map_err(|e| PersistError::Store(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::book::Pages;
    use crate::infra::store::MemoryStore;

    fn make_library() -> Library {
        Library::from_records(vec![
            BookRecord::new("Dune", "Frank Herbert", 412, false),
            BookRecord::new("Neuromancer", "William Gibson", "271", true),
        ])
    }

    #[test]
    fn empty_store_loads_empty() {
        let repo = LocalStorageRepository::new(MemoryStore::new());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn stored_null_loads_empty() {
        let store = MemoryStore::new();
        store.set_item(LIBRARY_KEY, "null").unwrap();
        let repo = LocalStorageRepository::new(store);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn roundtrip_save_load() {
        let repo = LocalStorageRepository::new(MemoryStore::new());
        let library = make_library();
        repo.save(&library).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, library.books());
        assert_eq!(loaded[1].pages(), &Pages::Text("271".into()));
    }

    #[test]
    fn save_writes_json_array_under_fixed_key() {
        let store = MemoryStore::new();
        let repo = LocalStorageRepository::new(&store);
        repo.save(&make_library()).unwrap();

        let raw = store.get_item(LIBRARY_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"title":"Dune","author":"Frank Herbert","pages":412,"isRead":false},{"title":"Neuromancer","author":"William Gibson","pages":"271","isRead":true}]"#
        );
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = MemoryStore::new();
        let repo = LocalStorageRepository::new(&store);
        repo.save(&make_library()).unwrap();
        repo.save(&Library::new()).unwrap();
        assert_eq!(store.get_item(LIBRARY_KEY).unwrap().as_deref(), Some("[]"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_value_is_an_error() {
        let store = MemoryStore::new();
        store.set_item(LIBRARY_KEY, "{not json").unwrap();
        let repo = LocalStorageRepository::new(store);
        assert!(matches!(repo.load(), Err(PersistError::Malformed(_))));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let store = MemoryStore::new();
        store
            .set_item(LIBRARY_KEY, r#"[{"title":"Dune","isRead":"yes"}]"#)
            .unwrap();
        let repo = LocalStorageRepository::new(store);
        assert!(matches!(repo.load(), Err(PersistError::Malformed(_))));
    }
}
