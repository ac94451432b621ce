//! Combines material sheets, financial rows and clocked labor into the
//! internal cost breakdown and the client-facing proposal.

use super::aggregator::{UNKNOWN_LABEL, share_of};
use super::ordering::sort_for_display;
use super::pricing::{PricedAmount, price_for};
use crate::models::category::Category;
use crate::models::financial_row::FinancialRow;
use crate::models::job::LaborPricing;
use crate::models::material::MaterialItem;
use serde::Serialize;
use std::collections::BTreeMap;

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: Category,
    pub rows: usize,
    pub quantity: f64,
    pub total_cost: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialCategoryTotals {
    pub category: String,
    pub items: usize,
    pub cost: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSheetTotals {
    pub sheet_id: i64,
    pub sheet_name: String,
    pub categories: Vec<MaterialCategoryTotals>,
    pub items: usize,
    pub cost: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialBreakdown {
    pub sheets: Vec<MaterialSheetTotals>,
    pub items: usize,
    pub cost: f64,
    pub price: f64,
}

/// Actual clocked labor priced at the job's labor rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LaborTotals {
    pub man_hours: f64,
    pub hourly_rate: f64,
    pub billable_rate: f64,
    pub cost: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrandTotals {
    pub total_cost: f64,
    pub total_price: f64,
    pub profit: f64,
    pub margin_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub categories: Vec<CategoryTotals>,
    pub financial_cost: f64,
    pub financial_price: f64,
    /// Hours budgeted on labor rows (sum of their quantities).
    pub budgeted_labor_hours: f64,
    pub materials: MaterialBreakdown,
    pub labor: LaborTotals,
    pub totals: GrandTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalSection {
    Materials,
    Row,
    Labor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalLine {
    pub section: ProposalSection,
    pub label: String,
    pub category: Category,
    #[serde(flatten)]
    pub amount: PricedAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    pub markup_percent: f64,
    pub lines: Vec<ProposalLine>,
    /// Sum of prices before tax.
    pub subtotal: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

/// Sheet → category tree of the active workbook, sheets in sheet order and
/// categories by name.
pub fn material_breakdown(items: &[MaterialItem]) -> MaterialBreakdown {
    let mut sheets: BTreeMap<(i64, i64), MaterialSheetTotals> = BTreeMap::new();
    let mut categories: BTreeMap<(i64, String), MaterialCategoryTotals> = BTreeMap::new();

    for item in items {
        let name = if item.sheet_name.trim().is_empty() {
            UNKNOWN_LABEL.to_string()
        } else {
            item.sheet_name.clone()
        };
        let sheet = sheets
            .entry((item.sheet_order, item.sheet_id))
            .or_insert_with(|| MaterialSheetTotals {
                sheet_id: item.sheet_id,
                sheet_name: name,
                categories: Vec::new(),
                items: 0,
                cost: 0.0,
                price: 0.0,
            });
        sheet.items += 1;
        sheet.cost += item.cost();
        sheet.price += item.price();

        let category = if item.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            item.category.trim().to_string()
        };
        let c = categories
            .entry((item.sheet_id, category.clone()))
            .or_insert_with(|| MaterialCategoryTotals {
                category,
                items: 0,
                cost: 0.0,
                price: 0.0,
            });
        c.items += 1;
        c.cost += item.cost();
        c.price += item.price();
    }

    for ((sheet_id, _), totals) in categories {
        if let Some(sheet) = sheets.values_mut().find(|s| s.sheet_id == sheet_id) {
            sheet.categories.push(totals);
        }
    }

    let sheets: Vec<MaterialSheetTotals> = sheets.into_values().collect();
    MaterialBreakdown {
        items: sheets.iter().map(|s| s.items).sum(),
        cost: sheets.iter().map(|s| s.cost).sum(),
        price: sheets.iter().map(|s| s.price).sum(),
        sheets,
    }
}

/// Per-category totals of financial rows, in `Category::ALL` order. Only
/// categories with at least one row are listed.
pub fn category_totals(rows: &[FinancialRow]) -> Vec<CategoryTotals> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<&FinancialRow> =
                rows.iter().filter(|r| r.category == category).collect();
            if in_category.is_empty() {
                return None;
            }
            Some(CategoryTotals {
                category,
                rows: in_category.len(),
                quantity: in_category.iter().map(|r| r.quantity).sum(),
                total_cost: in_category.iter().map(|r| r.total_cost).sum(),
                total_price: in_category.iter().map(|r| r.selling_price).sum(),
            })
        })
        .collect()
}

/// Summed quantity of labor rows: the budgeted labor hours.
pub fn budgeted_labor_hours(rows: &[FinancialRow]) -> f64 {
    rows.iter()
        .filter(|r| r.category.is_labor())
        .map(|r| r.quantity)
        .sum()
}

/// Clocked man-hours priced at the job's rate; zero when no rate is set.
pub fn labor_totals(man_hours: f64, pricing: Option<&LaborPricing>) -> LaborTotals {
    let Some(p) = pricing else {
        return LaborTotals {
            man_hours,
            ..LaborTotals::default()
        };
    };
    LaborTotals {
        man_hours,
        hourly_rate: p.hourly_rate,
        billable_rate: p.billable_rate,
        cost: man_hours * p.hourly_rate,
        price: man_hours * p.billable_rate,
    }
}

pub fn grand_totals(total_cost: f64, total_price: f64) -> GrandTotals {
    let profit = total_price - total_cost;
    GrandTotals {
        total_cost,
        total_price,
        profit,
        margin_pct: share_of(profit, total_price),
    }
}

/// Internal cost breakdown: rows carry their own markup, materials their
/// own price per unit.
pub fn cost_breakdown(
    rows: &[FinancialRow],
    materials: &MaterialBreakdown,
    labor: LaborTotals,
) -> CostBreakdown {
    let categories = category_totals(rows);
    let financial_cost: f64 = categories.iter().map(|c| c.total_cost).sum();
    let financial_price: f64 = categories.iter().map(|c| c.total_price).sum();

    let totals = grand_totals(
        materials.cost + financial_cost + labor.cost,
        materials.price + financial_price + labor.price,
    );

    CostBreakdown {
        categories,
        financial_cost,
        financial_price,
        budgeted_labor_hours: budgeted_labor_hours(rows),
        materials: materials.clone(),
        labor,
        totals,
    }
}

/// Client-facing proposal: one line per material sheet, then every row in
/// display order, then clocked labor. The job-wide markup and tax are
/// applied on top of each line's already-priced figure.
pub fn proposal(
    rows: &[FinancialRow],
    materials: &MaterialBreakdown,
    labor: LaborTotals,
    markup_percent: f64,
) -> Proposal {
    let mut lines: Vec<ProposalLine> = Vec::new();

    for sheet in &materials.sheets {
        lines.push(ProposalLine {
            section: ProposalSection::Materials,
            label: sheet.sheet_name.clone(),
            category: Category::Materials,
            amount: price_for(sheet.price, Category::Materials, markup_percent),
        });
    }

    let mut ordered = rows.to_vec();
    sort_for_display(&mut ordered);
    for row in &ordered {
        let label = if row.description.is_empty() {
            row.category.label().to_string()
        } else {
            row.description.clone()
        };
        lines.push(ProposalLine {
            section: ProposalSection::Row,
            label,
            category: row.category,
            amount: price_for(row.selling_price, row.category, markup_percent),
        });
    }

    if labor.price > 0.0 {
        lines.push(ProposalLine {
            section: ProposalSection::Labor,
            label: format!("Crew labor ({:.2} man-hours)", labor.man_hours),
            category: Category::Labor,
            amount: price_for(labor.price, Category::Labor, markup_percent),
        });
    }

    Proposal {
        markup_percent,
        subtotal: lines.iter().map(|l| l.amount.price).sum(),
        total_tax: lines.iter().map(|l| l.amount.tax).sum(),
        grand_total: lines.iter().map(|l| l.amount.total).sum(),
        lines,
    }
}
