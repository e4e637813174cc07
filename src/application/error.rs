use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    /// 利用者に見せるべき重複エラーか
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::Domain(DomainError::DuplicateTitle(_)))
    }
}
