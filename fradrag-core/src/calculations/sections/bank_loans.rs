//! Bank and Loans: interest and losses are deductible at the ordinary tax
//! rate; BSU deposits give a capped percentage.

use rust_decimal::Decimal;

use super::{SectionCalculator, SubQuestion, fold_answers};
use crate::calculations::CalculationError;
use crate::calculations::common::{
    add, capped_share, extract_expense, mul, parse_amount, sum_expenses,
};
use crate::models::{DeductionConfig, QuestionnaireItem, Section, SubAnswer};

sub_questions! {
    pub enum BankAndLoansQuestion {
        Loan => "Have a loan",
        Refinancing => "Refinanced a loan",
        JointLoan => "Have a joint loan",
        BsuSavings => "Save in BSU",
        SecuritiesLoss => "Loss on sale of securities",
    }
}

const INTEREST_PAID: &str = "Interest paid";
const REFINANCING_COSTS: &str = "Refinancing costs";
const OWNERSHIP_SHARE: &str = "Your share of the loan (%)";
const BSU_SAVINGS: &str = "Amount saved in BSU this year";
const SECURITIES_LOSS: &str = "Loss amount";

#[derive(Debug, Clone)]
pub struct BankAndLoansCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> BankAndLoansCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }

    /// Every entry carrying `field` is one loan or loss; they are summed
    /// before the tax rate applies.
    fn taxed_sum(
        &self,
        entries: &[SubAnswer],
        field: &'static str,
    ) -> Result<Decimal, CalculationError> {
        mul(
            sum_expenses(entries, field)?,
            self.config.standard_tax_rate,
            field,
        )
    }

    /// Each loan entry is weighted by the owner's share before the tax rate.
    /// An entry without its own share uses the first share given in the
    /// answer.
    fn joint_loan(
        &self,
        entries: &[SubAnswer],
    ) -> Result<Decimal, CalculationError> {
        let fallback_share = extract_expense(entries, OWNERSHIP_SHARE);

        let owned_interest = entries
            .iter()
            .filter_map(|entry| {
                let interest = parse_amount(entry.get(INTEREST_PAID)?);
                let share = entry
                    .get(OWNERSHIP_SHARE)
                    .map(parse_amount)
                    .unwrap_or(fallback_share);
                Some((interest, share))
            })
            .try_fold(Decimal::ZERO, |total, (interest, share)| {
                let owned = mul(interest, share, "joint loan interest")? / Decimal::ONE_HUNDRED;
                add(total, owned, "joint loan interest")
            })?;

        mul(owned_interest, self.config.standard_tax_rate, "joint loan interest")
    }
}

impl SectionCalculator for BankAndLoansCalculator<'_> {
    fn section(&self) -> Section {
        Section::BankAndLoans
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        fold_answers(
            self.section(),
            item,
            Decimal::ZERO,
            |total, question: BankAndLoansQuestion, entries| {
                let amount = match question {
                    BankAndLoansQuestion::Loan => self.taxed_sum(entries, INTEREST_PAID)?,
                    BankAndLoansQuestion::Refinancing => {
                        self.taxed_sum(entries, REFINANCING_COSTS)?
                    }
                    BankAndLoansQuestion::JointLoan => self.joint_loan(entries)?,
                    BankAndLoansQuestion::BsuSavings => capped_share(
                        extract_expense(entries, BSU_SAVINGS),
                        self.config.bsu_rate,
                        self.config.bsu_cap,
                        "BSU deduction",
                    )?,
                    BankAndLoansQuestion::SecuritiesLoss => {
                        self.taxed_sum(entries, SECURITIES_LOSS)?
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
    use crate::calculations::sections::test_support::{answer, repeated};
    use crate::models::Answer;

    fn calculate(answers: Vec<Answer>) -> Result<Decimal, CalculationError> {
        let config = DeductionConfig::default();
        let item = QuestionnaireItem::new(Section::BankAndLoans, answers);
        BankAndLoansCalculator::new(&config).calculate(&item)
    }

    #[test]
    fn loan_interest_is_taxed_at_standard_rate() {
        let loan = answer(BankAndLoansQuestion::Loan.title(), &[(INTEREST_PAID, "10,000")]);

        assert_eq!(calculate(vec![loan]), Ok(dec!(2200)));
    }

    #[test]
    fn several_loans_are_summed() {
        let loans = repeated(
            BankAndLoansQuestion::Loan.title(),
            &[&[(INTEREST_PAID, "10,000")], &[(INTEREST_PAID, "5,000")]],
        );

        assert_eq!(calculate(vec![loans]), Ok(dec!(3300)));
    }

    #[test]
    fn refinancing_and_securities_loss_use_standard_rate() {
        let refinancing = answer(BankAndLoansQuestion::Refinancing.title(), &[(REFINANCING_COSTS, "2,000")]);
        let loss = answer(BankAndLoansQuestion::SecuritiesLoss.title(), &[(SECURITIES_LOSS, "8,000")]);

        assert_eq!(calculate(vec![refinancing, loss]), Ok(dec!(2200)));
    }

    #[test]
    fn joint_loan_applies_ownership_share_first() {
        let joint = answer(
            BankAndLoansQuestion::JointLoan.title(),
            &[(INTEREST_PAID, "20,000"), (OWNERSHIP_SHARE, "50")],
        );

        // 20,000 × 50% × 22%
        assert_eq!(calculate(vec![joint]), Ok(dec!(2200)));
    }

    #[test]
    fn joint_loan_entries_fall_back_to_first_share() {
        let joint = repeated(
            BankAndLoansQuestion::JointLoan.title(),
            &[
                &[(INTEREST_PAID, "10,000"), (OWNERSHIP_SHARE, "50")],
                &[(INTEREST_PAID, "10,000")],
                &[(INTEREST_PAID, "10,000"), (OWNERSHIP_SHARE, "100")],
            ],
        );

        // (5,000 + 5,000 + 10,000) × 22%
        assert_eq!(calculate(vec![joint]), Ok(dec!(4400)));
    }

    #[test]
    fn bsu_savings_are_capped() {
        let small = answer(BankAndLoansQuestion::BsuSavings.title(), &[(BSU_SAVINGS, "27,500")]);

        assert_eq!(calculate(vec![small]), Ok(dec!(2750)));

        let config = DeductionConfig {
            bsu_cap: dec!(1000),
            ..DeductionConfig::default()
        };
        let item = QuestionnaireItem::new(
            Section::BankAndLoans,
            vec![answer(BankAndLoansQuestion::BsuSavings.title(), &[(BSU_SAVINGS, "27,500")])],
        );
        assert_eq!(BankAndLoansCalculator::new(&config).calculate(&item), Ok(dec!(1000)));
    }
}
