use super::model::book::BookRecord;
use super::model::library::Library;

/// 永続化の抽象。Infra層が実装する。
/// 保存は常にLibrary全体の置き換え（差分なし）。
pub trait LibraryRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存済みレコード列。未保存なら空。
    fn load(&self) -> Result<Vec<BookRecord>, Self::Error>;
    fn save(&self, library: &Library) -> Result<(), Self::Error>;
}
