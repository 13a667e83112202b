use crate::infra::InMemoryPointsRepository;
use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    decode, validate, RawItem, RawReceipt, ReceiptService, ScoreBreakdown, ScoringEngine,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file to score, or `-` to read from stdin
    pub(crate) path: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let body = read_input(&args.path)?;
    let receipt = validate(decode(&body)?)?;
    let breakdown = ScoringEngine::standard().breakdown(&receipt);

    println!("Receipt from {}", receipt.retailer());
    render_breakdown(&breakdown);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryPointsRepository::default());
    let service = ReceiptService::new(repository.clone());

    println!("Receipt points demo");
    for raw in reference_receipts() {
        let retailer = raw.retailer.clone();
        let (processed, breakdown) = service.submit_itemized(raw)?;
        let stored = service.points(&processed.id)?;

        println!("\n{} -> id {}", retailer, processed.id);
        println!("Stored points: {}", stored);
        render_breakdown(&breakdown);
    }

    println!("\nReceipts held in memory: {}", repository.len()?);
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>, AppError> {
    if path.as_os_str() == "-" {
        let mut body = Vec::new();
        std::io::stdin().read_to_end(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read(path)?)
    }
}

fn render_breakdown(breakdown: &ScoreBreakdown) {
    println!("Points by rule");
    for component in &breakdown.components {
        println!(
            "- {}: {} ({})",
            component.rule.label(),
            component.points,
            component.notes
        );
    }
    println!("Total: {}", breakdown.total);
}

fn item(description: &str, price: &str) -> RawItem {
    RawItem {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

fn reference_receipts() -> Vec<RawReceipt> {
    vec![
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
        },
        RawReceipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![item("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
        },
    ]
}
