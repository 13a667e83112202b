use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::domain::{Item, RawItem, RawReceipt, Receipt};

/// The single outcome for every malformed submission. Carries no cause on purpose:
/// callers only ever learn that the receipt was invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("The receipt is invalid.")]
pub struct ValidationRejected;

struct Patterns {
    label: Regex,
    amount: Regex,
    date: Regex,
    time: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        label: Regex::new(r"^[A-Za-z0-9 &\-]+$").expect("label pattern compiles"),
        amount: Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("amount pattern compiles"),
        date: Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"),
        time: Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("time pattern compiles"),
    })
}

/// Decode a JSON body into a [`RawReceipt`]. Malformed JSON, wrong types, missing
/// fields, and unknown fields are all rejected the same way.
pub fn decode(body: &[u8]) -> Result<RawReceipt, ValidationRejected> {
    serde_json::from_slice(body).map_err(|_| ValidationRejected)
}

/// Convert a raw submission into a trusted [`Receipt`], or reject it as a whole.
pub fn validate(raw: RawReceipt) -> Result<Receipt, ValidationRejected> {
    let RawReceipt {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    } = raw;

    let retailer = label(retailer)?;
    let purchased_at = purchase_instant(&purchase_date, &purchase_time)?;
    let total_cents = amount_in_cents(&total)?;

    if items.is_empty() {
        return Err(ValidationRejected);
    }

    let items = items
        .into_iter()
        .map(validate_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Receipt::new(retailer, purchased_at, total_cents, items))
}

fn validate_item(raw: RawItem) -> Result<Item, ValidationRejected> {
    let description = label(raw.short_description)?;
    let price_cents = amount_in_cents(&raw.price)?;
    Ok(Item::new(description, price_cents))
}

/// Retailer names and item descriptions: ASCII letters and digits, spaces, hyphens, ampersands.
fn label(raw: String) -> Result<String, ValidationRejected> {
    if patterns().label.is_match(&raw) {
        Ok(raw)
    } else {
        Err(ValidationRejected)
    }
}

fn purchase_instant(date: &str, time: &str) -> Result<NaiveDateTime, ValidationRejected> {
    let patterns = patterns();
    // chrono accepts unpadded fields, so the exact shape is checked first.
    if !patterns.date.is_match(date) || !patterns.time.is_match(time) {
        return Err(ValidationRejected);
    }

    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
        .map_err(|_| ValidationRejected)
}

/// Parse `units.cc` into cents without going through floating point.
pub(crate) fn amount_in_cents(raw: &str) -> Result<u64, ValidationRejected> {
    if !patterns().amount.is_match(raw) {
        return Err(ValidationRejected);
    }

    let (units, cents) = raw.split_once('.').ok_or(ValidationRejected)?;
    let units: u64 = units.parse().map_err(|_| ValidationRejected)?;
    let cents: u64 = cents.parse().map_err(|_| ValidationRejected)?;

    units
        .checked_mul(100)
        .and_then(|whole| whole.checked_add(cents))
        .ok_or(ValidationRejected)
}
