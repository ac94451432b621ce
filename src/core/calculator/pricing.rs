//! # Pricing
//!
//! Markup and tax rules applied to cost figures.
//!
//! - Labor is never marked up and never taxed.
//! - Every other category gets the markup, then a flat 7% tax on the
//!   marked-up price.
//!
//! The proposal markup is a single job-wide percentage chosen when the
//! proposal is viewed; the per-row markup stored on financial rows only
//! feeds the row's own selling price, and is ignored on labor rows.

use crate::models::category::Category;
use serde::Serialize;

/// Fixed sales tax rate applied to non-labor proposal lines.
pub const TAX_RATE: f64 = 0.07;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PricedAmount {
    pub cost: f64,
    pub price: f64,
    pub tax: f64,
    pub total: f64,
}

/// `cost × (1 + markup_percent / 100)`
pub fn apply_markup(cost: f64, markup_percent: f64) -> f64 {
    cost * (1.0 + markup_percent / 100.0)
}

/// `quantity × unit_cost`
pub fn row_total_cost(quantity: f64, unit_cost: f64) -> f64 {
    quantity * unit_cost
}

/// Selling price persisted on a financial row. Labor rows sell at cost.
pub fn row_selling_price(total_cost: f64, category: Category, markup_percent: f64) -> f64 {
    if category.is_labor() {
        total_cost
    } else {
        apply_markup(total_cost, markup_percent)
    }
}

/// Price, tax and total for `cost` in `category` under `markup_percent`.
pub fn price_for(cost: f64, category: Category, markup_percent: f64) -> PricedAmount {
    if category.is_labor() {
        return PricedAmount {
            cost,
            price: cost,
            tax: 0.0,
            total: cost,
        };
    }

    let price = apply_markup(cost, markup_percent);
    let tax = price * TAX_RATE;
    PricedAmount {
        cost,
        price,
        tax,
        total: price + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn labor_ignores_markup_and_tax() {
        for markup in [0.0, 15.0, 100.0, -20.0] {
            let p = price_for(480.0, Category::Labor, markup);
            assert_eq!(p.total, 480.0);
            assert_eq!(p.price, 480.0);
            assert_eq!(p.tax, 0.0);
        }
    }

    #[test]
    fn zero_markup_is_cost_plus_tax() {
        for category in [
            Category::Subcontractor,
            Category::Materials,
            Category::Equipment,
            Category::Other,
        ] {
            let p = price_for(200.0, category, 0.0);
            assert!(close(p.total, 200.0 * 1.07));
        }
    }

    #[test]
    fn subcontractor_proposal_line() {
        let cost = row_total_cost(10.0, 60.0);
        assert_eq!(cost, 600.0);
        let selling = apply_markup(cost, 20.0);
        assert!(close(selling, 720.0));

        let p = price_for(selling, Category::Subcontractor, 15.0);
        assert!(close(p.price, 828.0));
        assert!(close(p.tax, 57.96));
        assert!(close(p.total, 885.96));
    }
}
