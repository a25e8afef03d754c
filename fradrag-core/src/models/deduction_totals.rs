use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Section;

/// Deductible amount per questionnaire section.
///
/// Serialized with the camelCase keys the dashboard reads, amounts as JSON
/// numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub work_and_education_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub health_and_family_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bank_and_loans_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub hobby_oddjobs_and_extra_incomes_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub housing_and_property_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gifts_or_donations_expense_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub foreign_income_expense_amount: Decimal,
}

impl DeductionTotals {
    pub fn amount(
        &self,
        section: Section,
    ) -> Decimal {
        match section {
            Section::WorkAndEducation => self.work_and_education_expense_amount,
            Section::HealthAndFamily => self.health_and_family_expense_amount,
            Section::BankAndLoans => self.bank_and_loans_expense_amount,
            Section::HobbyOddJobsAndExtraIncomes => {
                self.hobby_oddjobs_and_extra_incomes_expense_amount
            }
            Section::HousingAndProperty => self.housing_and_property_expense_amount,
            Section::GiftsOrDonations => self.gifts_or_donations_expense_amount,
            Section::ForeignIncome => self.foreign_income_expense_amount,
        }
    }

    pub fn set_amount(
        &mut self,
        section: Section,
        amount: Decimal,
    ) {
        let slot = match section {
            Section::WorkAndEducation => &mut self.work_and_education_expense_amount,
            Section::HealthAndFamily => &mut self.health_and_family_expense_amount,
            Section::BankAndLoans => &mut self.bank_and_loans_expense_amount,
            Section::HobbyOddJobsAndExtraIncomes => {
                &mut self.hobby_oddjobs_and_extra_incomes_expense_amount
            }
            Section::HousingAndProperty => &mut self.housing_and_property_expense_amount,
            Section::GiftsOrDonations => &mut self.gifts_or_donations_expense_amount,
            Section::ForeignIncome => &mut self.foreign_income_expense_amount,
        };
        *slot = amount;
    }

    /// Sum over all sections, or `None` if it leaves the decimal range.
    pub fn total(&self) -> Option<Decimal> {
        Section::DISPLAY_ORDER
            .into_iter()
            .try_fold(Decimal::ZERO, |total, section| {
                total.checked_add(self.amount(section))
            })
    }
}
