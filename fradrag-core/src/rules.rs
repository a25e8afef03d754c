//! Classifies transactions with user-defined rules.
//!
//! A rule matches when its transaction type equals the transaction's and its
//! value occurs in the transaction description. Both sides are compared
//! lowercased with whitespace collapsed, so `"  REMA   1000 "` matches the
//! rule value `"rema 1000"`. Rules are tried in order and the first match
//! wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Rule, Transaction};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded regex should be valid"));

/// Lowercases, trims and collapses inner whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// A transaction together with the rule that classified it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub transaction: Transaction,
    pub rule: Option<Rule>,
}

/// Rules with their values pre-normalized for repeated matching.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    rules: Vec<(String, Rule)>,
}

impl RuleMatcher {
    /// Rules whose value is blank after normalization can never match and
    /// are dropped.
    pub fn new(rules: Vec<Rule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|rule| {
                let needle = normalize(&rule.value);
                if needle.is_empty() {
                    debug!(category = %rule.category, "ignoring rule with blank value");
                    None
                } else {
                    Some((needle, rule))
                }
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first rule matching `transaction`.
    pub fn find_match(
        &self,
        transaction: &Transaction,
    ) -> Option<&Rule> {
        let description = normalize(&transaction.description);
        self.rules
            .iter()
            .find(|(needle, rule)| {
                rule.transaction_type == transaction.transaction_type
                    && description.contains(needle.as_str())
            })
            .map(|(_, rule)| rule)
    }

    /// Pairs every transaction with its matching rule, keeping input order.
    pub fn classify(
        &self,
        transactions: Vec<Transaction>,
    ) -> Vec<ClassifiedTransaction> {
        transactions
            .into_iter()
            .map(|transaction| {
                let rule = self.find_match(&transaction).cloned();
                if rule.is_none() {
                    debug!(description = %transaction.description, "no rule matched");
                }
                ClassifiedTransaction { transaction, rule }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{DeductionStatus, TransactionType};

    fn rule(
        value: &str,
        category: &str,
        transaction_type: TransactionType,
    ) -> Rule {
        Rule {
            value: value.to_string(),
            category: category.to_string(),
            deduction_status: DeductionStatus::Deductible,
            transaction_type,
        }
    }

    fn expense(description: &str) -> Transaction {
        Transaction {
            description: description.to_string(),
            amount: dec!(100),
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize("  REMA \t 1000\n"), "rema 1000");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn match_ignores_case_and_spacing() {
        let matcher = RuleMatcher::new(vec![rule("Rema  1000", "Groceries", TransactionType::Expense)]);

        let found = matcher.find_match(&expense("VISA 1234 rema 1000 majorstuen"));

        assert_eq!(found.map(|r| r.category.as_str()), Some("Groceries"));
    }

    #[test]
    fn match_respects_transaction_type() {
        let matcher = RuleMatcher::new(vec![rule("vipps", "Side income", TransactionType::Income)]);

        assert_eq!(matcher.find_match(&expense("Vipps payment")), None);
    }

    #[test]
    fn first_matching_rule_wins() {
        let matcher = RuleMatcher::new(vec![
            rule("ruter", "Travel", TransactionType::Expense),
            rule("ruter app", "Apps", TransactionType::Expense),
        ]);

        let found = matcher.find_match(&expense("Ruter App ticket"));

        assert_eq!(found.map(|r| r.category.as_str()), Some("Travel"));
    }

    #[test]
    fn blank_rules_are_dropped() {
        let matcher = RuleMatcher::new(vec![
            rule("   ", "Anything", TransactionType::Expense),
            rule("kiwi", "Groceries", TransactionType::Expense),
        ]);

        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.find_match(&expense("Coop Extra")), None);
    }

    #[test]
    fn classify_keeps_order_and_unmatched() {
        let matcher = RuleMatcher::new(vec![rule("kiwi", "Groceries", TransactionType::Expense)]);

        let classified = matcher.classify(vec![expense("Narvesen"), expense("KIWI 505")]);

        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].rule, None);
        assert_eq!(
            classified[1].rule.as_ref().map(|r| r.category.as_str()),
            Some("Groceries")
        );
    }
}
