//! Hobby, Odd jobs, and Extra incomes.

use rust_decimal::Decimal;

use super::{SectionCalculator, SubQuestion, fold_answers};
use crate::calculations::CalculationError;
use crate::calculations::common::{add, extract_expense};
use crate::models::{DeductionConfig, QuestionnaireItem, Section};

sub_questions! {
    pub enum HobbyQuestion {
        SoleProprietorship => "Have a sole proprietorship",
        OddJobs => "Have income from odd jobs",
    }
}

const PROPRIETORSHIP_EXPENSE: &str = "Proprietorship expense";
const ODD_JOB_SALARY: &str = "Odd job salary";

#[derive(Debug, Clone)]
pub struct HobbyCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> HobbyCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }
}

impl SectionCalculator for HobbyCalculator<'_> {
    fn section(&self) -> Section {
        Section::HobbyOddJobsAndExtraIncomes
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        fold_answers(
            self.section(),
            item,
            Decimal::ZERO,
            |total, question: HobbyQuestion, entries| {
                let amount = match question {
                    HobbyQuestion::SoleProprietorship => {
                        extract_expense(entries, PROPRIETORSHIP_EXPENSE)
                    }
                    HobbyQuestion::OddJobs => {
                        extract_expense(entries, ODD_JOB_SALARY).min(self.config.odd_jobs_cap)
                    }
                };
                add(total, amount, question.title())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::sections::test_support::answer;
    use crate::models::Answer;

    fn calculate(answers: Vec<Answer>) -> Result<Decimal, CalculationError> {
        let config = DeductionConfig::default();
        let item = QuestionnaireItem::new(Section::HobbyOddJobsAndExtraIncomes, answers);
        HobbyCalculator::new(&config).calculate(&item)
    }

    #[test]
    fn proprietorship_expense_is_taken_as_is() {
        let business = answer(
            HobbyQuestion::SoleProprietorship.title(),
            &[(PROPRIETORSHIP_EXPENSE, "48,250.75")],
        );

        assert_eq!(calculate(vec![business]), Ok(dec!(48250.75)));
    }

    #[test]
    fn odd_job_salary_is_capped() {
        let small = answer(HobbyQuestion::OddJobs.title(), &[(ODD_JOB_SALARY, "4,500")]);
        let big = answer(HobbyQuestion::OddJobs.title(), &[(ODD_JOB_SALARY, "9,000")]);

        assert_eq!(calculate(vec![small]), Ok(dec!(4500)));
        assert_eq!(calculate(vec![big]), Ok(dec!(6000)));
    }
}
