//! Work and Education: union membership, long commutes, occupation-specific
//! deductions and home office.
//!
//! | Sub-question | Deduction |
//! |--------------|-----------|
//! | Member of Trade Union | fixed base, granted once for the whole section |
//! | Commute distance more than 37 km | `(2 × km − 37) × 1.56 × workdays`, only the excess over 23,100 |
//! | Work as a fisherman | 30% of fishing income, at most 150,000 |
//! | Work as a seafarer | 30% of seafarer income, at most 80,000 |
//! | Foreign employee in Norway | 10% of taxable income, at most 40,000 |
//! | Have a home office | office share of the home's operating costs |

use rust_decimal::Decimal;
use tracing::warn;

use super::{SectionCalculator, SubQuestion, fold_answers};
use crate::calculations::CalculationError;
use crate::calculations::common::{add, capped_share, extract_expense, mul, sub};
use crate::models::{DeductionConfig, QuestionnaireItem, Section, SubAnswer};

sub_questions! {
    pub enum WorkAndEducationQuestion {
        TradeUnion => "Member of Trade Union",
        LongCommute => "Commute distance more than 37 km",
        Fisherman => "Work as a fisherman",
        Seafarer => "Work as a seafarer",
        ForeignEmployee => "Foreign employee in Norway",
        HomeOffice => "Have a home office",
    }
}

const COMMUTE_DISTANCE: &str = "Distance to work (km)";
const WORKDAYS: &str = "Number of workdays";
const FISHING_INCOME: &str = "Income from fishing";
const SEAFARER_INCOME: &str = "Income as a seafarer";
const TAXABLE_INCOME: &str = "Taxable income";
const OFFICE_AREA: &str = "Home office area (sqm)";
const HOME_AREA: &str = "Total home area (sqm)";
const OPERATING_COSTS: &str = "Operating costs for the home";

#[derive(Debug, Clone)]
pub struct WorkAndEducationCalculator<'a> {
    config: &'a DeductionConfig,
}

impl<'a> WorkAndEducationCalculator<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }

    /// Starting total: the union base if any answer in the section mentions
    /// union membership, whatever position the key has.
    fn base_amount(
        &self,
        item: &QuestionnaireItem,
    ) -> Decimal {
        let title = WorkAndEducationQuestion::TradeUnion.title();
        if item.answers.iter().any(|answer| answer.contains(title)) {
            self.config.trade_union_base
        } else {
            Decimal::ZERO
        }
    }

    /// Travel between home and work. The distance is one way; the doubled
    /// distance is reduced by the configured offset before the per-km rate
    /// applies, and only the part above the floor is deductible.
    fn commute(
        &self,
        entries: &[SubAnswer],
    ) -> Result<Decimal, CalculationError> {
        let distance = extract_expense(entries, COMMUTE_DISTANCE);
        let workdays = extract_expense(entries, WORKDAYS);
        if distance < Decimal::ZERO {
            warn!(distance = %distance, "negative commute distance");
        }

        let round_trip = mul(distance, Decimal::TWO, "commute distance")?;
        let deductible_distance =
            sub(round_trip, self.config.commute_distance_offset, "commute distance")?;
        let per_day = mul(
            deductible_distance,
            self.config.commute_rate_per_km,
            "commute amount",
        )?;
        let amount = mul(per_day, workdays, "commute amount")?;

        if amount > self.config.commute_floor {
            sub(amount, self.config.commute_floor, "commute amount")
        } else {
            Ok(Decimal::ZERO)
        }
    }

    fn home_office(
        &self,
        entries: &[SubAnswer],
    ) -> Result<Decimal, CalculationError> {
        let office_area = extract_expense(entries, OFFICE_AREA);
        let home_area = extract_expense(entries, HOME_AREA);
        let operating_costs = extract_expense(entries, OPERATING_COSTS);

        let Some(share) = office_area.checked_div(home_area) else {
            warn!(
                office_area = %office_area,
                home_area = %home_area,
                "home area is zero; home office deduction skipped"
            );
            return Ok(Decimal::ZERO);
        };

        mul(share, operating_costs, "home office")
    }
}

impl SectionCalculator for WorkAndEducationCalculator<'_> {
    fn section(&self) -> Section {
        Section::WorkAndEducation
    }

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError> {
        let config = self.config;

        fold_answers(
            self.section(),
            item,
            self.base_amount(item),
            |total, question: WorkAndEducationQuestion, entries| {
                let amount = match question {
                    // Already counted in the base amount.
                    WorkAndEducationQuestion::TradeUnion => Decimal::ZERO,
                    WorkAndEducationQuestion::LongCommute => self.commute(entries)?,
                    WorkAndEducationQuestion::Fisherman => capped_share(
                        extract_expense(entries, FISHING_INCOME),
                        config.fisherman_rate,
                        config.fisherman_cap,
                        "fisherman deduction",
                    )?,
                    WorkAndEducationQuestion::Seafarer => capped_share(
                        extract_expense(entries, SEAFARER_INCOME),
                        config.seafarer_rate,
                        config.seafarer_cap,
                        "seafarer deduction",
                    )?,
                    WorkAndEducationQuestion::ForeignEmployee => capped_share(
                        extract_expense(entries, TAXABLE_INCOME),
                        config.foreign_employee_rate,
                        config.foreign_employee_cap,
                        "foreign employee deduction",
                    )?,
                    WorkAndEducationQuestion::HomeOffice => self.home_office(entries)?,
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
    use crate::calculations::sections::test_support::{answer, capture_logs};
    use crate::models::Answer;

    fn calculate(answers: Vec<Answer>) -> Result<Decimal, CalculationError> {
        let config = DeductionConfig::default();
        let item = QuestionnaireItem::new(Section::WorkAndEducation, answers);
        WorkAndEducationCalculator::new(&config).calculate(&item)
    }

    fn commute(distance: &str, workdays: &str) -> Answer {
        answer(
            WorkAndEducationQuestion::LongCommute.title(),
            &[(COMMUTE_DISTANCE, distance), (WORKDAYS, workdays)],
        )
    }

    // =========================================================================
    // Trade union
    // =========================================================================

    #[test]
    fn trade_union_alone_yields_base_amount() {
        let union = answer(WorkAndEducationQuestion::TradeUnion.title(), &[("Union name", "Fellesforbundet")]);

        assert_eq!(calculate(vec![union]), Ok(dec!(3850)));
    }

    #[test]
    fn trade_union_key_is_found_in_any_position() {
        let mut mixed = answer(WorkAndEducationQuestion::Fisherman.title(), &[(FISHING_INCOME, "100,000")]);
        mixed.insert(WorkAndEducationQuestion::TradeUnion.title(), vec![]);

        // 3,850 base + 30,000 fisherman
        assert_eq!(calculate(vec![mixed]), Ok(dec!(33850)));
    }

    #[test]
    fn no_trade_union_starts_at_zero() {
        assert_eq!(calculate(vec![]), Ok(dec!(0)));
    }

    // =========================================================================
    // Commute
    // =========================================================================

    #[test]
    fn commute_below_floor_is_zero() {
        // (2 × 40 − 37) × 1.56 × 200 = 13,416 < 23,100
        assert_eq!(calculate(vec![commute("40", "200")]), Ok(dec!(0)));
    }

    #[test]
    fn commute_above_floor_deducts_excess() {
        // (2 × 100 − 37) × 1.56 × 230 = 58,484.4
        assert_eq!(calculate(vec![commute("100", "230")]), Ok(dec!(35384.4)));
    }

    #[test]
    fn negative_commute_distance_is_accepted_with_warning() {
        let (_guard, logs) = capture_logs();

        assert_eq!(calculate(vec![commute("-40", "200")]), Ok(dec!(0)));
        let output = logs.contents();
        assert!(output.contains("WARN"), "got {output:?}");
        assert!(output.contains("negative commute distance"), "got {output:?}");
        assert!(output.contains("distance=-40"), "got {output:?}");
    }

    #[test]
    fn commute_with_missing_values_is_zero() {
        assert_eq!(calculate(vec![commute("", "abc")]), Ok(dec!(0)));
    }

    // =========================================================================
    // Occupation deductions
    // =========================================================================

    #[test]
    fn fisherman_deduction_is_capped() {
        let big = answer(WorkAndEducationQuestion::Fisherman.title(), &[(FISHING_INCOME, "1,000,000")]);

        assert_eq!(calculate(vec![big]), Ok(dec!(150000)));
    }

    #[test]
    fn seafarer_deduction_is_thirty_percent_until_cap() {
        let small = answer(WorkAndEducationQuestion::Seafarer.title(), &[(SEAFARER_INCOME, "200,000")]);
        let big = answer(WorkAndEducationQuestion::Seafarer.title(), &[(SEAFARER_INCOME, "400,000")]);

        assert_eq!(calculate(vec![small]), Ok(dec!(60000)));
        assert_eq!(calculate(vec![big]), Ok(dec!(80000)));
    }

    #[test]
    fn foreign_employee_deduction_is_capped() {
        let small = answer(WorkAndEducationQuestion::ForeignEmployee.title(), &[(TAXABLE_INCOME, "350,000")]);
        let big = answer(WorkAndEducationQuestion::ForeignEmployee.title(), &[(TAXABLE_INCOME, "650,000")]);

        assert_eq!(calculate(vec![small]), Ok(dec!(35000)));
        assert_eq!(calculate(vec![big]), Ok(dec!(40000)));
    }

    // =========================================================================
    // Home office
    // =========================================================================

    #[test]
    fn home_office_uses_area_share_of_costs() {
        let office = answer(
            WorkAndEducationQuestion::HomeOffice.title(),
            &[(OFFICE_AREA, "10"), (HOME_AREA, "80"), (OPERATING_COSTS, "40,000")],
        );

        assert_eq!(calculate(vec![office]), Ok(dec!(5000)));
    }

    #[test]
    fn home_office_with_zero_home_area_is_zero() {
        let (_guard, logs) = capture_logs();
        let office = answer(
            WorkAndEducationQuestion::HomeOffice.title(),
            &[(OFFICE_AREA, "10"), (HOME_AREA, ""), (OPERATING_COSTS, "40,000")],
        );

        assert_eq!(calculate(vec![office]), Ok(dec!(0)));
        assert!(logs.contents().contains("home area is zero"));
    }

    #[test]
    fn answers_accumulate_on_top_of_base() {
        let answers = vec![
            answer(WorkAndEducationQuestion::TradeUnion.title(), &[]),
            commute("100", "230"),
            answer(WorkAndEducationQuestion::Seafarer.title(), &[(SEAFARER_INCOME, "100,000")]),
        ];

        // 3,850 + 35,384.4 + 30,000
        assert_eq!(calculate(answers), Ok(dec!(69234.4)));
    }
}
