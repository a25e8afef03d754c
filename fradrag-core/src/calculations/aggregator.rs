//! Runs every section calculator over one questionnaire.
//!
//! Calculation is best effort: a missing questionnaire gives all zeros, and
//! a section whose calculator fails is logged and counted as zero without
//! affecting the other sections. Callers always receive a complete
//! [`DeductionTotals`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fradrag_core::{
//!     Answer, DeductionConfig, QuestionnaireItem, SavingExpenseCalculator, Section, SubAnswer,
//! };
//!
//! let questionnaire = vec![QuestionnaireItem::new(
//!     Section::WorkAndEducation,
//!     vec![Answer::new().with("Member of Trade Union", vec![SubAnswer::new()])],
//! )];
//!
//! let config = DeductionConfig::default();
//! let totals = SavingExpenseCalculator::new(&config).calculate(Some(&questionnaire));
//!
//! assert_eq!(totals.work_and_education_expense_amount, dec!(3850));
//! assert_eq!(totals.bank_and_loans_expense_amount, dec!(0));
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::calculations::sections::{
    BankAndLoansCalculator, ForeignIncomeCalculator, GiftsOrDonationsCalculator,
    HealthAndFamilyCalculator, HobbyCalculator, HousingAndPropertyCalculator, SectionCalculator,
    WorkAndEducationCalculator,
};
use crate::models::{DeductionConfig, DeductionTotals, QuestionnaireItem, Section};

#[derive(Debug, Clone)]
pub struct SavingExpenseCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> SavingExpenseCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }

    /// Computes the deductible amount of every section.
    ///
    /// `None` stands for a user who has not answered the questionnaire yet.
    pub fn calculate(
        &self,
        questionnaires: Option<&[QuestionnaireItem]>,
    ) -> DeductionTotals {
        let Some(questionnaires) = questionnaires else {
            debug!("no questionnaire answers; all deductions are zero");
            return DeductionTotals::default();
        };

        let by_section = index_by_section(questionnaires);
        let mut totals = DeductionTotals::default();

        for calculator in self.calculators() {
            let section = calculator.section();
            let amount = by_section
                .get(&section)
                .map(|item| run_isolated(calculator.as_ref(), item))
                .unwrap_or(Decimal::ZERO);
            totals.set_amount(section, amount);
        }

        totals
    }

    fn calculators(&self) -> [Box<dyn SectionCalculator + 'a>; 7] {
        [
            Box::new(WorkAndEducationCalculator::new(self.config)),
            Box::new(HealthAndFamilyCalculator::new(self.config)),
            Box::new(BankAndLoansCalculator::new(self.config)),
            Box::new(HobbyCalculator::new(self.config)),
            Box::new(HousingAndPropertyCalculator::new()),
            Box::new(GiftsOrDonationsCalculator::new(self.config)),
            Box::new(ForeignIncomeCalculator::new()),
        ]
    }
}

/// Calculates with [`DeductionConfig::default`].
pub fn calculate_saving_expenses(questionnaires: Option<&[QuestionnaireItem]>) -> DeductionTotals {
    SavingExpenseCalculator::new(&DeductionConfig::default()).calculate(questionnaires)
}

/// Later items win when a section title appears twice.
fn index_by_section(questionnaires: &[QuestionnaireItem]) -> HashMap<Section, &QuestionnaireItem> {
    let mut by_section = HashMap::new();
    for item in questionnaires {
        match item.section() {
            Some(section) => {
                if by_section.insert(section, item).is_some() {
                    debug!(section = %section, "duplicate section; keeping the later answers");
                }
            }
            None => debug!(question = %item.question, "ignoring unknown questionnaire section"),
        }
    }
    by_section
}

fn run_isolated(
    calculator: &dyn SectionCalculator,
    item: &QuestionnaireItem,
) -> Decimal {
    calculator.calculate(item).unwrap_or_else(|e| {
        error!(
            section = %calculator.section(),
            error = %e,
            "deduction calculation failed; section counted as zero"
        );
        Decimal::ZERO
    })
}
