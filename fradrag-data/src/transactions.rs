//! CSV loaders for classification rules and bank transactions.
//!
//! ## Rules
//!
//! | Column | Type | Notes |
//! |--------------------|--------|--------------------------------------------|
//! | `value` | string | Matched inside the transaction description |
//! | `category` | string | e.g. `Office supplies` |
//! | `deduction_status` | string | `deductible` or `not_deductible` |
//! | `transaction_type` | string | `expense` or `income` |
//!
//! ```csv
//! value,category,deduction_status,transaction_type
//! clas ohlson,Office supplies,deductible,expense
//! ```
//!
//! ## Transactions
//!
//! | Column | Type | Notes |
//! |--------------------|--------|----------------------------------------|
//! | `description` | string | Free text from the bank statement |
//! | `amount` | string | `1,250.00`; unparseable amounts are 0 |
//! | `transaction_type` | string | `expense` or `income` |
//!
//! Header names are case-sensitive; column order does not matter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use fradrag_core::calculations::common::parse_amount;
use fradrag_core::{DeductionStatus, Rule, Transaction, TransactionType};
use serde::Deserialize;
use tracing::debug;

use crate::LoaderError;

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleRecord {
    pub value: String,
    pub category: String,
    pub deduction_status: String,
    pub transaction_type: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub description: String,
    #[serde(default)]
    pub amount: String,
    pub transaction_type: String,
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

pub struct RuleLoader;

impl RuleLoader {
    /// Parse rules in file order.
    ///
    /// # Errors
    ///
    /// * [`LoaderError::Csv`] for structurally invalid CSV.
    /// * [`LoaderError::InvalidValue`] for an unknown status or type.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Rule>, LoaderError> {
        let rules = csv_reader(reader)
            .deserialize::<RuleRecord>()
            .enumerate()
            .map(|(idx, result)| convert_rule(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = rules.len(), "loaded rules");
        Ok(rules)
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<Rule>, LoaderError> {
        Self::parse(open(path)?)
    }
}

pub struct TransactionLoader;

impl TransactionLoader {
    /// Parse transactions in file order.
    ///
    /// # Errors
    ///
    /// * [`LoaderError::Csv`] for structurally invalid CSV.
    /// * [`LoaderError::InvalidValue`] for an unknown transaction type.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Transaction>, LoaderError> {
        let transactions = csv_reader(reader)
            .deserialize::<TransactionRecord>()
            .enumerate()
            .map(|(idx, result)| convert_transaction(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<Transaction>, LoaderError> {
        Self::parse(open(path)?)
    }
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn convert_rule(
    record: RuleRecord,
    row: usize,
) -> Result<Rule, LoaderError> {
    let deduction_status = DeductionStatus::parse(&record.deduction_status).ok_or_else(|| {
        LoaderError::InvalidValue {
            column: "deduction_status",
            value: record.deduction_status.clone(),
            row,
        }
    })?;
    let transaction_type = parse_transaction_type(&record.transaction_type, row)?;

    Ok(Rule {
        value: record.value,
        category: record.category,
        deduction_status,
        transaction_type,
    })
}

fn convert_transaction(
    record: TransactionRecord,
    row: usize,
) -> Result<Transaction, LoaderError> {
    let transaction_type = parse_transaction_type(&record.transaction_type, row)?;

    Ok(Transaction {
        amount: parse_amount(&record.amount),
        description: record.description,
        transaction_type,
    })
}

fn parse_transaction_type(
    value: &str,
    row: usize,
) -> Result<TransactionType, LoaderError> {
    TransactionType::parse(value).ok_or_else(|| LoaderError::InvalidValue {
        column: "transaction_type",
        value: value.to_string(),
        row,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, LoaderError> {
    File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // rules
    // =========================================================================

    #[test]
    fn rules_parse_in_file_order() {
        let csv = "\
value,category,deduction_status,transaction_type
clas ohlson,Office supplies,deductible,expense
 Netflix ,Entertainment,Not Deductible,EXPENSE
finn.no,Sales,deductible,income
";

        let rules = RuleLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            rules,
            vec![
                Rule {
                    value: "clas ohlson".into(),
                    category: "Office supplies".into(),
                    deduction_status: DeductionStatus::Deductible,
                    transaction_type: TransactionType::Expense,
                },
                Rule {
                    value: "Netflix".into(),
                    category: "Entertainment".into(),
                    deduction_status: DeductionStatus::NotDeductible,
                    transaction_type: TransactionType::Expense,
                },
                Rule {
                    value: "finn.no".into(),
                    category: "Sales".into(),
                    deduction_status: DeductionStatus::Deductible,
                    transaction_type: TransactionType::Income,
                },
            ]
        );
    }

    #[test]
    fn rules_unknown_status_reports_row() {
        let csv = "\
value,category,deduction_status,transaction_type
kiwi,Groceries,deductible,expense
ruter,Travel,maybe,expense
";

        match RuleLoader::parse(csv.as_bytes()) {
            Err(LoaderError::InvalidValue { column, value, row }) => {
                assert_eq!(column, "deduction_status");
                assert_eq!(value, "maybe");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn rules_missing_column_is_csv_error() {
        let csv = "value,category\nkiwi,Groceries\n";

        assert!(matches!(
            RuleLoader::parse(csv.as_bytes()),
            Err(LoaderError::Csv(_))
        ));
    }

    // =========================================================================
    // transactions
    // =========================================================================

    #[test]
    fn transactions_use_lenient_amounts() {
        let csv = "\
description,amount,transaction_type
Clas Ohlson Storo,\"1,250.00\",expense
Mystery,n/a,expense
Finn.no salg,,income
";

        let transactions = TransactionLoader::parse(csv.as_bytes()).unwrap();

        let amounts: Vec<_> = transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec!(1250), dec!(0), dec!(0)]);
        assert_eq!(transactions[2].transaction_type, TransactionType::Income);
    }

    #[test]
    fn transactions_unknown_type_reports_row() {
        let csv = "\
description,amount,transaction_type
Kiwi,100,refund
";

        assert!(matches!(
            TransactionLoader::parse(csv.as_bytes()),
            Err(LoaderError::InvalidValue {
                column: "transaction_type",
                row: 1,
                ..
            })
        ));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let result = TransactionLoader::load_from_file(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }
}
