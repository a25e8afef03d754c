//! Write-off calculations over questionnaire answers.
//!
//! [`SavingExpenseCalculator`] runs one [`sections::SectionCalculator`] per
//! questionnaire section and collects the amounts into
//! [`DeductionTotals`](crate::DeductionTotals); the presenters reshape
//! totals and classified transactions into category lists.

pub mod aggregator;
pub mod common;
mod error;
pub mod presenter;
pub mod sections;

pub use aggregator::{SavingExpenseCalculator, calculate_saving_expenses};
pub use error::CalculationError;
pub use presenter::{business_expense_summary, personal_deductions, summarize_personal_deductions};
