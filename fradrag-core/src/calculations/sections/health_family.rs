//! Health and Family: childcare for young children and documented care
//! for older children with special needs.

use rust_decimal::Decimal;

use super::{SectionCalculator, SubQuestion, fold_answers};
use crate::calculations::CalculationError;
use crate::calculations::common::{add, extract_expense, is_yes, mul, sub};
use crate::models::{DeductionConfig, QuestionnaireItem, Section, SubAnswer};

sub_questions! {
    pub enum HealthAndFamilyQuestion {
        YoungChildren => "Have children aged 11 years or younger",
        SpecialNeedsChildren => "Have children aged 12 years or older with special needs",
    }
}

const NUMBER_OF_CHILDREN: &str = "Number of children";
const CHILDCARE_EXPENSES: &str = "Documented childcare expenses";
const HAS_DOCUMENTED_CARE: &str = "Do you have documented care expenses?";
const CARE_EXPENSES: &str = "Documented care expenses";

#[derive(Debug, Clone)]
pub struct HealthAndFamilyCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> HealthAndFamilyCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }

    /// Documented childcare, capped at the base cap plus one additional cap
    /// per child after the first. Without children the cap is zero.
    fn childcare(
        &self,
        entries: &[SubAnswer],
    ) -> Result<Decimal, CalculationError> {
        let children = extract_expense(entries, NUMBER_OF_CHILDREN);
        let expenses = extract_expense(entries, CHILDCARE_EXPENSES);

        let cap = if children > Decimal::ZERO {
            let additional_children = sub(children, Decimal::ONE, "childcare cap")?;
            let additional_cap = mul(
                additional_children,
                self.config.childcare_additional_child_cap,
                "childcare cap",
            )?;
            add(self.config.childcare_base_cap, additional_cap, "childcare cap")?
        } else {
            Decimal::ZERO
        };

        Ok(expenses.min(cap))
    }

    fn special_needs_care(
        &self,
        entries: &[SubAnswer],
    ) -> Decimal {
        if is_yes(entries, HAS_DOCUMENTED_CARE) {
            extract_expense(entries, CARE_EXPENSES)
        } else {
            Decimal::ZERO
        }
    }
}

impl SectionCalculator for HealthAndFamilyCalculator<'_> {
    fn section(&self) -> Section {
        Section::HealthAndFamily
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        fold_answers(self.section(), item, Decimal::ZERO, |total, question: HealthAndFamilyQuestion, entries| {
            let amount = match question {
                HealthAndFamilyQuestion::YoungChildren => self.childcare(entries)?,
                HealthAndFamilyQuestion::SpecialNeedsChildren => self.special_needs_care(entries),
            };
            add(total, amount, question.title())
        })
    }
}
