use thiserror::Error;

use crate::models::Section;

/// Errors raised by a section calculator.
///
/// The aggregator never lets these escape: a failing section is logged and
/// counted as zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// An answer object without any sub-question in it.
    #[error("answer {index} in '{section}' has no sub-question")]
    EmptyAnswer { section: Section, index: usize },

    /// An intermediate amount left the representable decimal range.
    #[error("arithmetic overflow while computing {context}")]
    Overflow { context: &'static str },
}
