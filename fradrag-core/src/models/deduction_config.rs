//! Rates, caps and thresholds used by the section calculators.
//!
//! [`DeductionConfig::default`] carries the amounts currently applied in
//! the product. Every field can be overridden (typically from a TOML file)
//! when the tax rules change from one income year to the next; missing
//! fields keep their default.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`DeductionConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionConfigError {
    /// A rate must lie between 0 and 1 inclusive.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// Caps, bases and thresholds must not be negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionConfig {
    /// Ordinary income tax rate applied to interest and losses.
    pub standard_tax_rate: Decimal,

    /// Childcare cap for the first child aged 11 or younger.
    pub childcare_base_cap: Decimal,
    /// Cap added for each further child.
    pub childcare_additional_child_cap: Decimal,

    /// Deduction granted to trade union members.
    pub trade_union_base: Decimal,

    /// Kilometres subtracted from the doubled one-way commute distance.
    pub commute_distance_offset: Decimal,
    /// Allowance per deductible kilometre and workday.
    pub commute_rate_per_km: Decimal,
    /// Travel expenses below this amount are not deductible; above it only
    /// the excess is.
    pub commute_floor: Decimal,

    pub fisherman_rate: Decimal,
    pub fisherman_cap: Decimal,

    pub seafarer_rate: Decimal,
    pub seafarer_cap: Decimal,

    /// Standard deduction for foreign employees working in Norway.
    pub foreign_employee_rate: Decimal,
    pub foreign_employee_cap: Decimal,

    /// Tax deduction rate on BSU (youth home savings) deposits.
    pub bsu_rate: Decimal,
    pub bsu_cap: Decimal,

    /// Tax-free amount for salary from odd jobs.
    pub odd_jobs_cap: Decimal,

    /// Gifts below this amount do not qualify.
    pub donation_minimum: Decimal,
    pub donation_cap: Decimal,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            standard_tax_rate: dec!(0.22),
            childcare_base_cap: dec!(25000),
            childcare_additional_child_cap: dec!(15000),
            trade_union_base: dec!(3850),
            commute_distance_offset: dec!(37),
            commute_rate_per_km: dec!(1.56),
            commute_floor: dec!(23100),
            fisherman_rate: dec!(0.30),
            fisherman_cap: dec!(150000),
            seafarer_rate: dec!(0.30),
            seafarer_cap: dec!(80000),
            foreign_employee_rate: dec!(0.10),
            foreign_employee_cap: dec!(40000),
            bsu_rate: dec!(0.10),
            bsu_cap: dec!(27500),
            odd_jobs_cap: dec!(6000),
            donation_minimum: dec!(500),
            donation_cap: dec!(25000),
        }
    }
}

impl DeductionConfig {
    /// Checks every rate lies in `[0, 1]` and every other amount is
    /// non-negative. The first offending field is reported.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use fradrag_core::{DeductionConfig, DeductionConfigError};
    ///
    /// let config = DeductionConfig {
    ///     bsu_cap: Decimal::NEGATIVE_ONE,
    ///     ..DeductionConfig::default()
    /// };
    ///
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(DeductionConfigError::NegativeAmount {
    ///         name: "bsu_cap",
    ///         value: Decimal::NEGATIVE_ONE,
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), DeductionConfigError> {
        let rates = [
            ("standard_tax_rate", self.standard_tax_rate),
            ("fisherman_rate", self.fisherman_rate),
            ("seafarer_rate", self.seafarer_rate),
            ("foreign_employee_rate", self.foreign_employee_rate),
            ("bsu_rate", self.bsu_rate),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(DeductionConfigError::InvalidRate { name, value });
            }
        }

        let amounts = [
            ("childcare_base_cap", self.childcare_base_cap),
            (
                "childcare_additional_child_cap",
                self.childcare_additional_child_cap,
            ),
            ("trade_union_base", self.trade_union_base),
            ("commute_distance_offset", self.commute_distance_offset),
            ("commute_rate_per_km", self.commute_rate_per_km),
            ("commute_floor", self.commute_floor),
            ("fisherman_cap", self.fisherman_cap),
            ("seafarer_cap", self.seafarer_cap),
            ("foreign_employee_cap", self.foreign_employee_cap),
            ("bsu_cap", self.bsu_cap),
            ("odd_jobs_cap", self.odd_jobs_cap),
            ("donation_minimum", self.donation_minimum),
            ("donation_cap", self.donation_cap),
        ];
        for (name, value) in amounts {
            if value < Decimal::ZERO {
                return Err(DeductionConfigError::NegativeAmount { name, value });
            }
        }

        Ok(())
    }
}
