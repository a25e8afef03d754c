//! File loaders feeding the deduction engine: questionnaire snapshots
//! (JSON or flat CSV), classification rules and bank transactions (CSV).

mod error;
mod questionnaire;
mod transactions;

pub use error::LoaderError;
pub use questionnaire::{QuestionnaireLoader, QuestionnaireRecord};
pub use transactions::{RuleLoader, RuleRecord, TransactionLoader, TransactionRecord};
