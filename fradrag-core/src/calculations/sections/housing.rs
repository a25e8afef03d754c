//! Housing and Property.

use rust_decimal::Decimal;

use super::{SectionCalculator, SubQuestion, fold_answers};
use crate::calculations::CalculationError;
use crate::calculations::common::{add, extract_expense, is_yes};
use crate::models::{QuestionnaireItem, Section, SubAnswer};

sub_questions! {
    pub enum HousingAndPropertyQuestion {
        SaleOfProperty => "Sold a property",
    }
}

const PRIMARY_RESIDENCE: &str =
    "Was the property your primary residence for at least 12 of the last 24 months?";
const SALE_EXPENSES: &str = "Expenses related to the sale";

/// Has no configurable amounts.
#[derive(Debug, Clone, Default)]
pub struct HousingAndPropertyCalculator;

impl HousingAndPropertyCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Sale expenses count only for a primary residence.
    fn sale_of_property(entries: &[SubAnswer]) -> Decimal {
        if is_yes(entries, PRIMARY_RESIDENCE) {
            extract_expense(entries, SALE_EXPENSES)
        } else {
            Decimal::ZERO
        }
    }
}

impl SectionCalculator for HousingAndPropertyCalculator {
    fn section(&self) -> Section {
        Section::HousingAndProperty
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        fold_answers(
            self.section(),
            item,
            Decimal::ZERO,
            |total, question: HousingAndPropertyQuestion, entries| {
                let amount = match question {
                    HousingAndPropertyQuestion::SaleOfProperty => Self::sale_of_property(entries),
                };
                add(total, amount, question.title())
            },
        )
    }
}
