use serde::Serialize;
use std::fmt;

/// Category tag of an ad-hoc financial row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Labor,
    Subcontractor,
    Materials,
    Equipment,
    Other,
}

impl Category {
    /// Display order used by the cost breakdown.
    pub const ALL: [Category; 5] = [
        Category::Labor,
        Category::Subcontractor,
        Category::Materials,
        Category::Equipment,
        Category::Other,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Category::Labor => "labor",
            Category::Subcontractor => "subcontractor",
            Category::Materials => "materials",
            Category::Equipment => "equipment",
            Category::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "labor" => Some(Category::Labor),
            "subcontractor" => Some(Category::Subcontractor),
            "materials" => Some(Category::Materials),
            "equipment" => Some(Category::Equipment),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Lenient parser for CLI input (case-insensitive, a few aliases).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "labour" | "lab" => Some(Category::Labor),
            "sub" | "subs" => Some(Category::Subcontractor),
            "material" | "mat" => Some(Category::Materials),
            "equip" => Some(Category::Equipment),
            other => Category::from_db_str(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Labor => "Labor",
            Category::Subcontractor => "Subcontractor",
            Category::Materials => "Materials",
            Category::Equipment => "Equipment",
            Category::Other => "Other",
        }
    }

    pub fn is_labor(&self) -> bool {
        matches!(self, Category::Labor)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
