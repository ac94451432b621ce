use super::category::Category;
use crate::core::calculator::pricing;
use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// A job-scoped ad-hoc cost line.
///
/// `total_cost` and `selling_price` are derived from the raw inputs and
/// persisted with them. `order_index` is a fractional sort key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRow {
    pub id: i64,
    pub job_id: i64,
    pub category: Category,
    pub description: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub markup_percent: f64,
    pub total_cost: f64,
    pub selling_price: f64,
    pub order_index: f64,
    pub notes: Option<String>,
}

/// Raw inputs of a new row as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRowInput {
    pub category: Category,
    pub description: String,
    pub quantity: Option<f64>,
    pub unit_cost: Option<f64>,
    pub markup_percent: Option<f64>,
    pub notes: Option<String>,
}

/// Partial edit of an existing row; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialRowPatch {
    pub category: Option<Category>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_cost: Option<f64>,
    pub markup_percent: Option<f64>,
    pub notes: Option<String>,
}

fn finite(field: &'static str, value: f64) -> AppResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidNumber { field, value })
    }
}

impl FinancialRow {
    /// Validate the input and derive totals. The row is not persisted yet
    /// (`id == 0`).
    pub fn from_input(job_id: i64, input: FinancialRowInput, order_index: f64) -> AppResult<Self> {
        let quantity = finite("quantity", input.quantity.ok_or(AppError::MissingField("quantity"))?)?;
        let unit_cost = finite(
            "unit_cost",
            input.unit_cost.ok_or(AppError::MissingField("unit_cost"))?,
        )?;
        let markup_percent = finite("markup_percent", input.markup_percent.unwrap_or(0.0))?;

        let mut row = Self {
            id: 0,
            job_id,
            category: input.category,
            description: input.description.trim().to_string(),
            quantity,
            unit_cost,
            markup_percent,
            total_cost: 0.0,
            selling_price: 0.0,
            order_index,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
        };
        row.recompute();
        Ok(row)
    }

    /// Edited copy of the row. `order_index` is never touched.
    pub fn with_patch(&self, patch: FinancialRowPatch) -> AppResult<Self> {
        let mut row = self.clone();
        if let Some(c) = patch.category {
            row.category = c;
        }
        if let Some(d) = patch.description {
            row.description = d.trim().to_string();
        }
        if let Some(q) = patch.quantity {
            row.quantity = finite("quantity", q)?;
        }
        if let Some(u) = patch.unit_cost {
            row.unit_cost = finite("unit_cost", u)?;
        }
        if let Some(m) = patch.markup_percent {
            row.markup_percent = finite("markup_percent", m)?;
        }
        if let Some(n) = patch.notes {
            row.notes = Some(n).filter(|n| !n.trim().is_empty());
        }
        row.recompute();
        Ok(row)
    }

    fn recompute(&mut self) {
        self.total_cost = pricing::row_total_cost(self.quantity, self.unit_cost);
        self.selling_price =
            pricing::row_selling_price(self.total_cost, self.category, self.markup_percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: Category, qty: f64, unit: f64, markup: f64) -> FinancialRowInput {
        FinancialRowInput {
            category,
            description: "Line".into(),
            quantity: Some(qty),
            unit_cost: Some(unit),
            markup_percent: Some(markup),
            notes: None,
        }
    }

    #[test]
    fn labor_row_ignores_its_markup() {
        let row = FinancialRow::from_input(1, input(Category::Labor, 10.0, 50.0, 30.0), 0.0).unwrap();
        assert_eq!(row.total_cost, 500.0);
        assert_eq!(row.selling_price, 500.0);
        assert_eq!(row.markup_percent, 30.0);
    }

    #[test]
    fn recategorizing_to_labor_drops_the_markup() {
        let row = FinancialRow::from_input(1, input(Category::Equipment, 2.0, 100.0, 10.0), 0.0).unwrap();
        assert!((row.selling_price - 220.0).abs() < 1e-9);

        let patch = FinancialRowPatch {
            category: Some(Category::Labor),
            ..Default::default()
        };
        let labor = row.with_patch(patch).unwrap();
        assert_eq!(labor.selling_price, 200.0);
    }
}
