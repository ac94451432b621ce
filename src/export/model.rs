// src/export/model.rs

use crate::core::calculator::rollup::{ProposalLine, ProposalSection};
use serde::Serialize;

/// Flat proposal line for CSV (the csv writer cannot serialize nested structs).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProposalLineExport {
    pub section: &'static str,
    pub label: String,
    pub category: &'static str,
    pub cost: f64,
    pub price: f64,
    pub tax: f64,
    pub total: f64,
}

impl ProposalLineExport {
    pub const HEADERS: [&'static str; 7] =
        ["section", "label", "category", "cost", "price", "tax", "total"];
}

impl From<&ProposalLine> for ProposalLineExport {
    fn from(line: &ProposalLine) -> Self {
        Self {
            section: match line.section {
                ProposalSection::Materials => "materials",
                ProposalSection::Row => "row",
                ProposalSection::Labor => "labor",
            },
            label: line.label.clone(),
            category: line.category.to_db_str(),
            cost: round_cents(line.amount.cost),
            price: round_cents(line.amount.price),
            tax: round_cents(line.amount.tax),
            total: round_cents(line.amount.total),
        }
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
