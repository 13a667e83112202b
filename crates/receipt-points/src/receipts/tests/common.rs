use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Points, RawItem, RawReceipt, Receipt, ReceiptId};
use crate::receipts::repository::{PointsRepository, RepositoryError};
use crate::receipts::validation::validate;
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn item(description: &str, price: &str) -> RawItem {
    RawItem {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

/// Single-item receipt that scores exactly 1 point (the "a" retailer).
pub(super) fn minimal_receipt() -> RawReceipt {
    RawReceipt {
        retailer: "a".to_string(),
        purchase_date: "2025-01-02".to_string(),
        purchase_time: "00:00".to_string(),
        items: vec![item("item", "0.01")],
        total: "0.01".to_string(),
    }
}

pub(super) fn target_receipt() -> RawReceipt {
    RawReceipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

pub(super) fn corner_market_receipt() -> RawReceipt {
    RawReceipt {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
        total: "9.00".to_string(),
    }
}

pub(super) fn valid(raw: RawReceipt) -> Receipt {
    validate(raw).expect("fixture validates")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) points: Arc<Mutex<HashMap<ReceiptId, Points>>>,
}

impl PointsRepository for MemoryRepository {
    fn insert(&self, id: ReceiptId, points: Points) -> Result<(), RepositoryError> {
        let mut guard = self.points.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, points);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<Points>, RepositoryError> {
        let guard = self.points.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).copied())
    }
}

pub(super) struct UnavailableRepository;

impl PointsRepository for UnavailableRepository {
    fn insert(&self, _id: ReceiptId, _points: Points) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("cache offline".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<Points>, RepositoryError> {
        Err(RepositoryError::Unavailable("cache offline".to_string()))
    }
}

pub(super) fn build_service() -> (ReceiptService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = ReceiptService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: ReceiptService<MemoryRepository>) -> axum::Router {
    receipt_router(Arc::new(service))
}

pub(super) fn to_json(raw: &RawReceipt) -> Vec<u8> {
    serde_json::to_vec(raw).expect("fixture serializes")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
