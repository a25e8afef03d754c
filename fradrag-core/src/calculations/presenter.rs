//! Reshapes calculated amounts into [`CategorySummary`] lists.
//!
//! Both the personal-deduction list and the business-expense list use the
//! same row shape so the dashboard and report views can render either.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::SavingExpenseCalculator;
use crate::models::{
    CategorySummary, DeductionConfig, DeductionStatus, DeductionTotals, QuestionnaireItem,
    Section, TransactionType,
};
use crate::rules::ClassifiedTransaction;

/// One row per section, in dashboard order.
///
/// Personal deductions have no original amount or predefined categories;
/// those fields are emitted empty to keep the shared row shape.
pub fn summarize_personal_deductions(totals: &DeductionTotals) -> Vec<CategorySummary> {
    Section::DISPLAY_ORDER
        .into_iter()
        .map(|section| CategorySummary {
            title: section.title().to_string(),
            total_amount: totals.amount(section),
            total_original_amount: Decimal::ZERO,
            predefined_categories: Vec::new(),
        })
        .collect()
}

/// Calculates and summarizes in one step.
pub fn personal_deductions(
    questionnaires: Option<&[QuestionnaireItem]>,
    config: &DeductionConfig,
) -> Vec<CategorySummary> {
    let totals = SavingExpenseCalculator::new(config).calculate(questionnaires);
    summarize_personal_deductions(&totals)
}

/// Groups classified expenses by category, in order of first appearance.
///
/// `total_original_amount` is what was spent, `total_amount` the part that
/// is deductible, and `predefined_categories` lists the rule values that
/// matched. Income and unclassified transactions are left out.
pub fn business_expense_summary(transactions: &[ClassifiedTransaction]) -> Vec<CategorySummary> {
    let mut by_category: IndexMap<&str, CategorySummary> = IndexMap::new();

    for classified in transactions {
        let Some(rule) = &classified.rule else {
            continue;
        };
        if classified.transaction.transaction_type != TransactionType::Expense {
            continue;
        }

        let summary = by_category
            .entry(rule.category.as_str())
            .or_insert_with(|| CategorySummary {
                title: rule.category.clone(),
                total_amount: Decimal::ZERO,
                total_original_amount: Decimal::ZERO,
                predefined_categories: Vec::new(),
            });

        let amount = classified.transaction.amount;
        let deductible = match rule.deduction_status {
            DeductionStatus::Deductible => amount,
            DeductionStatus::NotDeductible => Decimal::ZERO,
        };

        match (
            summary.total_original_amount.checked_add(amount),
            summary.total_amount.checked_add(deductible),
        ) {
            (Some(original), Some(total)) => {
                summary.total_original_amount = original;
                summary.total_amount = total;
                if !summary.predefined_categories.contains(&rule.value) {
                    summary.predefined_categories.push(rule.value.clone());
                }
            }
            _ => warn!(
                category = %rule.category,
                amount = %amount,
                "category total overflowed; transaction skipped"
            ),
        }
    }

    by_category.into_values().collect()
}
