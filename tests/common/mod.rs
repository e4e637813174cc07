//! Shared test harness for integration tests.

#![allow(dead_code)]

use bookshelf_mcp::application::service::LibraryService;
use bookshelf_mcp::domain::model::book::BookRecord;
use bookshelf_mcp::domain::model::library::Library;
use bookshelf_mcp::domain::repository::LibraryRepository;
use bookshelf_mcp::infra::local_storage::LocalStorageRepository;
use bookshelf_mcp::infra::store::{KeyValueStore, MemoryStore};

// =============================================================================
// FailingStore — 書き込みが常に失敗するストア
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
pub struct DiskFull;

/// 読み込みは種データ（無ければ空）、書き込みは常にエラー。
pub struct FailingStore {
    seed: Option<String>,
}

impl FailingStore {
    pub fn empty() -> Self {
        Self { seed: None }
    }

    /// 保存済みLibraryがある状態から始める。
    pub fn seeded(library: &Library) -> Self {
        Self {
            seed: Some(serde_json::to_string(library).unwrap()),
        }
    }
}

impl KeyValueStore for FailingStore {
    type Error = DiskFull;

    fn get_item(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.seed.clone())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
        Err(DiskFull)
    }
}

// =============================================================================
// TestLibrary — テスト用Library作成ヘルパー
// =============================================================================

pub struct TestLibrary;

impl TestLibrary {
    /// 標準的なテスト用Library（挿入順）:
    /// ```text
    /// 1. Dune         / Frank Herbert  / 412   / not read
    /// 2. Neuromancer  / William Gibson / "271" / read
    /// 3. Hyperion     / Dan Simmons    / 482   / not read
    /// ```
    pub fn standard() -> Library {
        Library::from_records(vec![
            BookRecord::new("Dune", "Frank Herbert", 412, false),
            BookRecord::new("Neuromancer", "William Gibson", "271", true),
            BookRecord::new("Hyperion", "Dan Simmons", 482, false),
        ])
    }

    /// MemoryStoreにLibraryを保存してLibraryServiceを開く。
    pub fn service_with_library(
        library: &Library,
    ) -> LibraryService<LocalStorageRepository<MemoryStore>> {
        let repo = LocalStorageRepository::new(MemoryStore::new());
        repo.save(library).unwrap();
        LibraryService::open(repo).unwrap()
    }

    pub fn titles(library: &Library) -> Vec<String> {
        library.iter().map(|b| b.title().to_string()).collect()
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
