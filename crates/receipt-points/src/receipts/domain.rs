use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points awarded to a receipt.
pub type Points = u64;

/// Opaque identifier handed back after a receipt is processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receipt exactly as submitted. Every field is an untrusted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawReceipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<RawItem>,
    pub total: String,
}

/// Line item exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawItem {
    pub short_description: String,
    pub price: String,
}

/// Validated receipt. Only the validator constructs one, and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    retailer: String,
    purchased_at: NaiveDateTime,
    total_cents: u64,
    items: Vec<Item>,
}

impl Receipt {
    pub(crate) fn new(
        retailer: String,
        purchased_at: NaiveDateTime,
        total_cents: u64,
        items: Vec<Item>,
    ) -> Self {
        debug_assert!(!items.is_empty(), "receipts carry at least one item");
        Self {
            retailer,
            purchased_at,
            total_cents,
            items,
        }
    }

    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    /// Naive local purchase time; no timezone is attached.
    pub fn purchased_at(&self) -> NaiveDateTime {
        self.purchased_at
    }

    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    description: String,
    price_cents: u64,
}

impl Item {
    pub(crate) fn new(description: String, price_cents: u64) -> Self {
        Self {
            description,
            price_cents,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }
}

/// Format an amount of cents back into the `0.00` form used on the wire.
pub(crate) fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
