use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

/// 文字列キー → 文字列値の永続ストア。
/// 書き込みは値全体の置き換え（last write wins）。
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// プロセス内だけのストア。テストや一時セッション用。
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    type Error = S::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_item(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("library").unwrap(), None);

        store.set_item("library", "[]").unwrap();
        assert_eq!(store.get_item("library").unwrap().as_deref(), Some("[]"));

        store.set_item("library", "[1]").unwrap();
        assert_eq!(store.get_item("library").unwrap().as_deref(), Some("[1]"));
    }
}
