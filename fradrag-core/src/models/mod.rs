mod category_summary;
mod deduction_config;
mod deduction_totals;
mod questionnaire;
mod transaction;

pub use category_summary::CategorySummary;
pub use deduction_config::{DeductionConfig, DeductionConfigError};
pub use deduction_totals::DeductionTotals;
pub use questionnaire::{Answer, FieldValue, QuestionnaireItem, Section, SubAnswer};
pub use transaction::{DeductionStatus, Rule, Transaction, TransactionType};
