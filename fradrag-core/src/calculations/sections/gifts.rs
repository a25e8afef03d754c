//! Gifts or Donations.
//!
//! The section holds a single question, so only the first answer is read.

use rust_decimal::Decimal;

use super::{SectionCalculator, first_answer};
use crate::calculations::CalculationError;
use crate::calculations::common::extract_expense;
use crate::models::{DeductionConfig, QuestionnaireItem, Section};

sub_questions! {
    pub enum GiftsOrDonationsQuestion {
        Donations => "Have given gifts to voluntary organizations",
    }
}

const DONATION_AMOUNT: &str = "Donation amount";

#[derive(Debug, Clone)]
pub struct GiftsOrDonationsCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> GiftsOrDonationsCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }
}

impl SectionCalculator for GiftsOrDonationsCalculator<'_> {
    fn section(&self) -> Section {
        Section::GiftsOrDonations
    }

    /// Donations below the minimum give nothing; above it they are deducted
    /// up to the cap.
    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        let Some((GiftsOrDonationsQuestion::Donations, entries)) =
            first_answer::<GiftsOrDonationsQuestion>(self.section(), item)?
        else {
            return Ok(Decimal::ZERO);
        };

        let donation = extract_expense(entries, DONATION_AMOUNT);
        if donation >= self.config.donation_minimum {
            Ok(donation.min(self.config.donation_cap))
        } else {
            Ok(Decimal::ZERO)
        }
    }
}
