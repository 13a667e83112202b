use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Points, RawReceipt, Receipt, ReceiptId};
use super::repository::{PointsRepository, RepositoryError};
use super::scoring::{ScoreBreakdown, ScoringEngine};
use super::validation::{decode, validate, ValidationRejected};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReceipt {
    pub id: ReceiptId,
    pub points: Points,
}

/// Composes validation, scoring, id generation, and the points repository.
pub struct ReceiptService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
}

impl<R> ReceiptService<R>
where
    R: PointsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_engine(repository, ScoringEngine::standard())
    }

    pub fn with_engine(repository: Arc<R>, engine: ScoringEngine) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate and score a receipt, then record its points under a new id.
    pub fn submit(&self, raw: RawReceipt) -> Result<ProcessedReceipt, ReceiptServiceError> {
        let receipt = Self::accept(raw)?;
        let points = self.engine.score(&receipt);
        self.record(&receipt, points)
    }

    /// Like [`submit`](Self::submit), also returning the per-rule contributions.
    pub fn submit_itemized(
        &self,
        raw: RawReceipt,
    ) -> Result<(ProcessedReceipt, ScoreBreakdown), ReceiptServiceError> {
        let receipt = Self::accept(raw)?;
        let breakdown = self.engine.breakdown(&receipt);
        let processed = self.record(&receipt, breakdown.total)?;
        Ok((processed, breakdown))
    }

    /// Same as [`submit`](Self::submit), starting from an undecoded JSON body.
    pub fn submit_json(&self, body: &[u8]) -> Result<ProcessedReceipt, ReceiptServiceError> {
        let raw = decode(body).map_err(|rejected| {
            debug!(bytes = body.len(), "receipt body failed strict decoding");
            rejected
        })?;
        self.submit(raw)
    }

    /// Points previously recorded for `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<Points, ReceiptServiceError> {
        let points = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(points)
    }

    fn accept(raw: RawReceipt) -> Result<Receipt, ValidationRejected> {
        validate(raw).map_err(|rejected| {
            debug!("receipt rejected during validation");
            rejected
        })
    }

    fn record(
        &self,
        receipt: &Receipt,
        points: Points,
    ) -> Result<ProcessedReceipt, ReceiptServiceError> {
        let id = ReceiptId::generate();
        self.repository.insert(id.clone(), points)?;

        info!(receipt_id = %id, points, retailer = receipt.retailer(), "receipt processed");
        Ok(ProcessedReceipt { id, points })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationRejected),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
