#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("this book already exists in your library: {0}")]
    DuplicateTitle(String),

    #[error("book not found: {0}")]
    BookNotFound(String),

    #[error("unknown sort field: '{0}' (use: title, author, pages)")]
    UnknownSortField(String),
}
