//! Receipt intake, validation, and points scoring.
//!
//! Submissions arrive as [`RawReceipt`] values decoded under a strict schema. The
//! validator turns them into immutable [`Receipt`] values (or a uniform
//! [`ValidationRejected`]), the [`ScoringEngine`] sums independent rule
//! contributions, and the [`ReceiptService`] stores the result under a fresh
//! [`ReceiptId`] in whatever [`PointsRepository`] it was handed.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Points, RawItem, RawReceipt, Receipt, ReceiptId};
pub use repository::{PointsRepository, RepositoryError};
pub use router::{receipt_router, INVALID_RECEIPT_MESSAGE, RECEIPT_NOT_FOUND_MESSAGE};
pub use scoring::{score, ScoreBreakdown, ScoreComponent, ScoringEngine, ScoringRule};
pub use service::{ProcessedReceipt, ReceiptService, ReceiptServiceError};
pub use validation::{decode, validate, ValidationRejected};
