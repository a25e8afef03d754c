pub mod calculations;
pub mod models;
pub mod rules;

pub use calculations::{
    CalculationError, SavingExpenseCalculator, business_expense_summary,
    calculate_saving_expenses, personal_deductions, summarize_personal_deductions,
};
pub use models::*;
pub use rules::{ClassifiedTransaction, RuleMatcher};
