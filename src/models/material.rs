use serde::Serialize;

/// Lifecycle of a material workbook. Only the newest active one is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookStatus {
    Active,
    Archived,
}

impl WorkbookStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkbookStatus::Active => "active",
            WorkbookStatus::Archived => "archived",
        }
    }
}

/// A material line item of the job's active workbook, joined with the
/// sheet it sits on. Price per unit is entered independently of cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialItem {
    pub id: i64,
    pub sheet_id: i64,
    pub sheet_name: String,
    pub sheet_order: i64,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
    pub price_per_unit: f64,
}

impl MaterialItem {
    pub fn cost(&self) -> f64 {
        self.quantity * self.cost_per_unit
    }

    pub fn price(&self) -> f64 {
        self.quantity * self.price_per_unit
    }
}

/// Inputs of a material item to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterialItem {
    pub sheet_id: i64,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
    pub price_per_unit: f64,
}
