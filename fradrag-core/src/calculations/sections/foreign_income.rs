//! Foreign Income: credit for tax already paid abroad.
//!
//! The section holds a single question, so only the first answer is read.

use rust_decimal::Decimal;

use super::{SectionCalculator, first_answer};
use crate::calculations::CalculationError;
use crate::calculations::common::{extract_expense, mul};
use crate::models::{QuestionnaireItem, Section};

sub_questions! {
    pub enum ForeignIncomeQuestion {
        IncomeFromAbroad => "Have income from abroad",
    }
}

const FOREIGN_INCOME: &str = "Foreign income";
const FOREIGN_TAX_PAID: &str = "Tax paid abroad";
const NORWAY_TAX_RATE: &str = "Norwegian tax rate (%)";

/// Has no configurable amounts; the rate comes from the answer.
#[derive(Debug, Clone, Default)]
pub struct ForeignIncomeCalculator;

impl ForeignIncomeCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl SectionCalculator for ForeignIncomeCalculator {
    fn section(&self) -> Section {
        Section::ForeignIncome
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        let Some((ForeignIncomeQuestion::IncomeFromAbroad, entries)) =
            first_answer::<ForeignIncomeQuestion>(self.section(), item)?
        else {
            return Ok(Decimal::ZERO);
        };

        if extract_expense(entries, FOREIGN_INCOME).is_zero() {
            return Ok(Decimal::ZERO);
        }

        let tax_paid = extract_expense(entries, FOREIGN_TAX_PAID);
        let rate = extract_expense(entries, NORWAY_TAX_RATE) / Decimal::ONE_HUNDRED;
        mul(tax_paid, rate, "foreign tax credit")
    }
}
