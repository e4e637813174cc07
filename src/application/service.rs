use crate::domain::error::DomainError;
use crate::domain::model::book::BookRecord;
use crate::domain::model::library::Library;
use crate::domain::model::sort::SortField;
use crate::domain::repository::LibraryRepository;

use super::error::AppError;
use super::view::{self, BookCard};

/// Libraryに対するユースケース。
/// 起動時に load → Library構築、以降は mutate → save のパターンで操作する。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    library: Library,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// 保存済みLibraryを読み込んでServiceを作る。壊れた保存値はエラーとして返す。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let records = repo.load().map_err(|e| AppError::Storage(Box::new(e)))?;
        let library = Library::from_records(records);
        tracing::info!(books = library.len(), "library loaded");
        Ok(Self { repo, library })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 表示用カード一覧
    pub fn cards(&self) -> Vec<BookCard> {
        view::render_cards(&self.library)
    }

    /// 本を追加する。同じtitleがあれば `DuplicateTitle` を返し、何も保存しない。
    pub fn add_book(&mut self, book: BookRecord) -> Result<(), AppError> {
        let title = book.title().to_string();
        self.commit(|library| library.try_add(book))?;
        tracing::info!(%title, "book added");
        Ok(())
    }

    /// 本を削除する。該当なしは何もしない。削除したかどうかを返す。
    pub fn remove_book(&mut self, title: &str) -> Result<bool, AppError> {
        let removed = self.commit(|library| Ok(library.remove(title).is_some()))?;
        if removed {
            tracing::info!(%title, "book removed");
        } else {
            tracing::debug!(%title, "remove: no such book");
        }
        Ok(removed)
    }

    /// 既読フラグを反転する。反転後の値を返す。
    pub fn toggle_read(&mut self, title: &str) -> Result<bool, AppError> {
        let is_read = self.commit(|library| library.toggle_read(title))?;
        tracing::info!(%title, is_read, "read status toggled");
        Ok(is_read)
    }

    /// 並び替えて、その順序で保存する。
    pub fn sort_by(&mut self, field: SortField) -> Result<(), AppError> {
        self.commit(|library| {
            library.sort_by(field);
            Ok(())
        })?;
        tracing::info!(%field, "library sorted");
        Ok(())
    }

    // --- private ---

    /// 複製に変更を適用して保存し、保存できたときだけ差し替える。
    /// 失敗時（ドメインエラー・保存エラーとも）は元のLibraryのまま。
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Library) -> Result<T, DomainError>,
    ) -> Result<T, AppError> {
        let mut next = self.library.clone();
        let out = mutate(&mut next)?;
        self.persist(&next)?;
        self.library = next;
        Ok(out)
    }

    fn persist(&self, library: &Library) -> Result<(), AppError> {
        self.repo
            .save(library)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }
}
