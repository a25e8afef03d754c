//! One calculator per questionnaire section.
//!
//! Every calculator folds over the section's answers. Each answer is
//! dispatched on its first sub-question key, which is looked up in the
//! section's sub-question enum; a key the enum does not know leaves the
//! running total unchanged so new questions can appear in stored data
//! before they are handled here.

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::CalculationError;
use crate::models::{QuestionnaireItem, Section, SubAnswer};

/// Maps sub-question titles to an enum and back.
pub trait SubQuestion: Sized + Copy {
    fn title(&self) -> &'static str;
    fn parse(title: &str) -> Option<Self>;
}

/// Declares a sub-question enum together with its title table.
macro_rules! sub_questions {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $title:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::calculations::sections::SubQuestion for $name {
            fn title(&self) -> &'static str {
                match self {
                    $($name::$variant => $title),+
                }
            }

            fn parse(title: &str) -> Option<Self> {
                match title {
                    $($title => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

mod bank_loans;
mod foreign_income;
mod gifts;
mod health_family;
mod hobby;
mod housing;
mod work_education;

pub use bank_loans::{BankAndLoansCalculator, BankAndLoansQuestion};
pub use foreign_income::{ForeignIncomeCalculator, ForeignIncomeQuestion};
pub use gifts::{GiftsOrDonationsCalculator, GiftsOrDonationsQuestion};
pub use health_family::{HealthAndFamilyCalculator, HealthAndFamilyQuestion};
pub use hobby::{HobbyCalculator, HobbyQuestion};
pub use housing::{HousingAndPropertyCalculator, HousingAndPropertyQuestion};
pub use work_education::{WorkAndEducationCalculator, WorkAndEducationQuestion};

/// Computes the deductible amount of one section.
pub trait SectionCalculator {
    fn section(&self) -> Section;

    fn calculate(
        &self,
        item: &QuestionnaireItem,
    ) -> Result<Decimal, CalculationError>;
}

/// Folds every answer of `item` through `rule`, starting at `initial`.
///
/// Answers whose first key is not a known `Q` are skipped. An answer with
/// no key at all is an error.
fn fold_answers<Q, F>(
    section: Section,
    item: &QuestionnaireItem,
    initial: Decimal,
    mut rule: F,
) -> Result<Decimal, CalculationError>
where
    Q: SubQuestion,
    F: FnMut(Decimal, Q, &[SubAnswer]) -> Result<Decimal, CalculationError>,
{
    item.answers
        .iter()
        .enumerate()
        .try_fold(initial, |total, (index, answer)| {
            let (key, entries) = answer
                .first()
                .ok_or(CalculationError::EmptyAnswer { section, index })?;
            match Q::parse(key) {
                Some(question) => rule(total, question, entries),
                None => {
                    trace!(section = %section, key, "unhandled sub-question");
                    Ok(total)
                }
            }
        })
}

/// The first answer of a single-question section, checked against `Q`.
///
/// Returns `None` when the section has no answers or the first answer is
/// about a question `Q` does not know.
fn first_answer<Q: SubQuestion>(
    section: Section,
    item: &QuestionnaireItem,
) -> Result<Option<(Q, &[SubAnswer])>, CalculationError> {
    let Some(answer) = item.answers.first() else {
        return Ok(None);
    };
    if item.answers.len() > 1 {
        tracing::debug!(
            section = %section,
            ignored = item.answers.len() - 1,
            "only the first answer is read"
        );
    }
    let (key, entries) = answer
        .first()
        .ok_or(CalculationError::EmptyAnswer { section, index: 0 })?;
    match Q::parse(key) {
        Some(question) => Ok(Some((question, entries))),
        None => {
            trace!(section = %section, key, "unhandled sub-question");
            Ok(None)
        }
    }
}
