use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use super::domain::{format_cents, Points, Receipt};

const ROUND_DOLLAR_POINTS: Points = 50;
const QUARTER_MULTIPLE_POINTS: Points = 25;
const POINTS_PER_ITEM_PAIR: Points = 5;
const ODD_DAY_POINTS: Points = 6;
const AFTERNOON_POINTS: Points = 10;

/// A description bonus is 0.2 points per dollar, rounded up: one point per 500 cents.
const CENTS_PER_DESCRIPTION_POINT: u64 = 500;

/// Exclusive bounds of the afternoon window, in minutes after midnight.
const AFTERNOON_OPENS: u32 = 14 * 60;
const AFTERNOON_CLOSES: u32 = 16 * 60;

/// One independent scoring rule. Each rule only reads the receipt and reports its
/// own contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerName,
        ScoringRule::RoundDollarTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "Retailer name",
            ScoringRule::RoundDollarTotal => "Round-dollar total",
            ScoringRule::QuarterMultipleTotal => "Quarter-multiple total",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::DescriptionLength => "Description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonPurchase => "Afternoon purchase",
        }
    }

    pub fn points(self, receipt: &Receipt) -> Points {
        match self {
            ScoringRule::RetailerName => retailer_name(receipt),
            ScoringRule::RoundDollarTotal => round_dollar_total(receipt),
            ScoringRule::QuarterMultipleTotal => quarter_multiple_total(receipt),
            ScoringRule::ItemPairs => item_pairs(receipt),
            ScoringRule::DescriptionLength => description_length(receipt),
            ScoringRule::OddPurchaseDay => odd_purchase_day(receipt),
            ScoringRule::AfternoonPurchase => afternoon_purchase(receipt),
        }
    }

    fn notes(self, receipt: &Receipt) -> String {
        match self {
            ScoringRule::RetailerName => format!(
                "{} alphanumeric characters in '{}'",
                alphanumeric_count(receipt.retailer()),
                receipt.retailer()
            ),
            ScoringRule::RoundDollarTotal | ScoringRule::QuarterMultipleTotal => {
                format!("total {}", format_cents(receipt.total_cents()))
            }
            ScoringRule::ItemPairs => format!("{} items", receipt.items().len()),
            ScoringRule::DescriptionLength => {
                let qualifying = receipt
                    .items()
                    .iter()
                    .filter(|item| trimmed_len(item.description()) % 3 == 0)
                    .count();
                format!("{qualifying} descriptions with a length divisible by 3")
            }
            ScoringRule::OddPurchaseDay => {
                format!("purchased on {}", receipt.purchased_at().date())
            }
            ScoringRule::AfternoonPurchase => {
                format!("purchased at {}", receipt.purchased_at().format("%H:%M"))
            }
        }
    }
}

fn retailer_name(receipt: &Receipt) -> Points {
    alphanumeric_count(receipt.retailer()) as Points
}

fn round_dollar_total(receipt: &Receipt) -> Points {
    if receipt.total_cents() % 100 == 0 {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

fn quarter_multiple_total(receipt: &Receipt) -> Points {
    if receipt.total_cents() % 25 == 0 {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

fn item_pairs(receipt: &Receipt) -> Points {
    ((receipt.items().len() / 2) as Points).saturating_mul(POINTS_PER_ITEM_PAIR)
}

fn description_length(receipt: &Receipt) -> Points {
    let bonuses = receipt
        .items()
        .iter()
        .filter(|item| trimmed_len(item.description()) % 3 == 0)
        .map(|item| item.price_cents().div_ceil(CENTS_PER_DESCRIPTION_POINT));
    saturating_total(bonuses)
}

fn odd_purchase_day(receipt: &Receipt) -> Points {
    if receipt.purchased_at().day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

fn afternoon_purchase(receipt: &Receipt) -> Points {
    let purchased = receipt.purchased_at();
    let minute_of_day = purchased.hour() * 60 + purchased.minute();
    if AFTERNOON_OPENS < minute_of_day && minute_of_day < AFTERNOON_CLOSES {
        AFTERNOON_POINTS
    } else {
        0
    }
}

fn alphanumeric_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_alphanumeric()).count()
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Points for a receipt under the standard rule set.
pub fn score(receipt: &Receipt) -> Points {
    saturating_total(ScoringRule::ALL.iter().map(|rule| rule.points(receipt)))
}

/// Amounts reach `u64::MAX` cents, so totals clamp instead of wrapping.
fn saturating_total(points: impl Iterator<Item = Points>) -> Points {
    points.fold(0, Points::saturating_add)
}

/// Ordered list of rules applied to every receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    rules: Vec<ScoringRule>,
}

impl ScoringEngine {
    pub fn new(rules: Vec<ScoringRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(ScoringRule::ALL.to_vec())
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn score(&self, receipt: &Receipt) -> Points {
        saturating_total(self.rules.iter().map(|rule| rule.points(receipt)))
    }

    /// Per-rule contributions in rule order, for audits and the CLI.
    pub fn breakdown(&self, receipt: &Receipt) -> ScoreBreakdown {
        let components: Vec<ScoreComponent> = self
            .rules
            .iter()
            .map(|&rule| ScoreComponent {
                rule,
                points: rule.points(receipt),
                notes: rule.notes(receipt),
            })
            .collect();
        let total = saturating_total(components.iter().map(|component| component.points));

        ScoreBreakdown { total, components }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: Points,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: Points,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn points_for(&self, rule: ScoringRule) -> Points {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .fold(0, Points::saturating_add)
    }
}
