use super::domain::{Points, ReceiptId};

/// Storage abstraction for receipt id → points pairs.
///
/// Implementations must make an `insert` that has returned visible to every later
/// `fetch` of the same id. Nothing is promised across different ids.
pub trait PointsRepository: Send + Sync {
    fn insert(&self, id: ReceiptId, points: Points) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<Points>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("receipt id already recorded")]
    Conflict,
    #[error("No receipt found for that ID.")]
    NotFound,
    #[error("points store unavailable: {0}")]
    Unavailable(String),
}
