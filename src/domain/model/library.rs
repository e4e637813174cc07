use serde::{Deserialize, Deserializer, Serialize};

use super::book::BookRecord;
use super::sort::SortField;
use crate::domain::error::DomainError;

/// Library — 集約ルート。titleの重複を持たない、挿入順つきのBookRecord列。
/// 全レコード操作はここを経由する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<BookRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込んだレコード列からLibraryを組み立てる。
    /// 同じtitleが複数あれば先勝ちで、後続は捨てる。
    pub fn from_records(records: impl IntoIterator<Item = BookRecord>) -> Self {
        let mut library = Self::new();
        for record in records {
            let title = record.title().to_string();
            if !library.add(record) {
                tracing::warn!(%title, "dropping duplicate title from stored library");
            }
        }
        library
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.books.iter()
    }

    /// 末尾に追加する。同じtitleが既にあれば何もせずfalseを返す。
    pub fn add(&mut self, book: BookRecord) -> bool {
        if self.contains(&book) {
            return false;
        }
        self.books.push(book);
        true
    }

    /// 追加。重複は `DuplicateTitle` として返す（状態は変えない）。
    pub fn try_add(&mut self, book: BookRecord) -> Result<(), DomainError> {
        if self.contains(&book) {
            return Err(DomainError::DuplicateTitle(book.title().to_string()));
        }
        self.books.push(book);
        Ok(())
    }

    /// titleが完全一致するレコードを削除して返す。無ければNone。
    pub fn remove(&mut self, title: &str) -> Option<BookRecord> {
        let pos = self.position(title)?;
        Some(self.books.remove(pos))
    }

    pub fn find(&self, title: &str) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.title() == title)
    }

    pub fn contains(&self, book: &BookRecord) -> bool {
        self.contains_title(book.title())
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// 既読フラグを反転し、反転後の値を返す。
    pub fn toggle_read(&mut self, title: &str) -> Result<bool, DomainError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.title() == title)
            .ok_or_else(|| DomainError::BookNotFound(title.to_string()))?;
        Ok(book.toggle_read())
    }

    /// 指定キーで並び替える。同順の要素は元の相対順を保つ（安定ソート）。
    pub fn sort_by(&mut self, field: SortField) {
        self.books.sort_by(|a, b| field.compare(a, b));
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|b| b.title() == title)
    }
}

impl From<Vec<BookRecord>> for Library {
    fn from(records: Vec<BookRecord>) -> Self {
        Self::from_records(records)
    }
}

/// 逆シリアライズも `from_records` を通し、title重複を持ち込まない。
impl<'de> Deserialize<'de> for Library {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<BookRecord>::deserialize(deserializer).map(Library::from)
    }
}
