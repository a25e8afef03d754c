use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }
}

/// Whether a rule's category counts toward the write-off total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionStatus {
    Deductible,
    NotDeductible,
}

impl DeductionStatus {
    /// Case-insensitive; accepts `not deductible` with a space as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "deductible" => Some(Self::Deductible),
            "not_deductible" => Some(Self::NotDeductible),
            _ => None,
        }
    }
}

/// A bank transaction line to be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
}

/// User-defined classification rule.
///
/// `value` is matched as a substring of the transaction description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub value: String,
    pub category: String,
    pub deduction_status: DeductionStatus,
    pub transaction_type: TransactionType,
}
