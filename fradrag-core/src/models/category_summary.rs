use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a category list as rendered by the dashboard and the reports.
///
/// Shared by the personal-deduction and business-expense summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_original_amount: Decimal,
    #[serde(rename = "predefinedCategories", default)]
    pub predefined_categories: Vec<String>,
}
