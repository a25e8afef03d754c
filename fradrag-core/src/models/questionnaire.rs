//! Questionnaire answer snapshot as stored by the user profile.
//!
//! A questionnaire is a list of [`QuestionnaireItem`]s, one per tax topic.
//! Each item holds a list of [`Answer`]s; an answer maps a sub-question title
//! to the [`SubAnswer`] entries given for it, and a sub-answer maps field
//! labels to the raw string the user typed or selected.
//!
//! ```
//! use fradrag_core::{Answer, QuestionnaireItem, Section, SubAnswer};
//!
//! let item = QuestionnaireItem::new(
//!     Section::GiftsOrDonations,
//!     vec![Answer::new().with(
//!         "Have given gifts to voluntary organizations",
//!         vec![SubAnswer::new().with("Donation amount", "2,500")],
//!     )],
//! );
//!
//! assert_eq!(item.section(), Some(Section::GiftsOrDonations));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// The seven top-level tax topics of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    HealthAndFamily,
    BankAndLoans,
    WorkAndEducation,
    HousingAndProperty,
    GiftsOrDonations,
    HobbyOddJobsAndExtraIncomes,
    ForeignIncome,
}

impl Section {
    /// Sections in the order they are shown on the dashboard and in reports.
    pub const DISPLAY_ORDER: [Section; 7] = [
        Section::HealthAndFamily,
        Section::BankAndLoans,
        Section::WorkAndEducation,
        Section::HousingAndProperty,
        Section::GiftsOrDonations,
        Section::HobbyOddJobsAndExtraIncomes,
        Section::ForeignIncome,
    ];

    /// The question title used for this section in stored answers.
    pub fn title(&self) -> &'static str {
        match self {
            Self::HealthAndFamily => "Health and Family",
            Self::BankAndLoans => "Bank and Loans",
            Self::WorkAndEducation => "Work and Education",
            Self::HousingAndProperty => "Housing and Property",
            Self::GiftsOrDonations => "Gifts or Donations",
            Self::HobbyOddJobsAndExtraIncomes => "Hobby, Odd jobs, and Extra incomes",
            Self::ForeignIncome => "Foreign Income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::DISPLAY_ORDER
            .into_iter()
            .find(|section| section.title() == s)
    }
}

impl fmt::Display for Section {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One answered questionnaire section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireItem {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl QuestionnaireItem {
    pub fn new(
        section: Section,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            question: section.title().to_string(),
            answers,
        }
    }

    /// The section this item answers, or `None` for an unknown title.
    pub fn section(&self) -> Option<Section> {
        Section::parse(&self.question)
    }
}

/// Sub-question title mapped to the entries given for it.
///
/// Key order is preserved; calculators dispatch on the first key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answer(IndexMap<String, Vec<SubAnswer>>);

impl Answer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Answer::insert`].
    pub fn with(
        mut self,
        sub_question: impl Into<String>,
        entries: Vec<SubAnswer>,
    ) -> Self {
        self.insert(sub_question, entries);
        self
    }

    pub fn insert(
        &mut self,
        sub_question: impl Into<String>,
        entries: Vec<SubAnswer>,
    ) {
        self.0.insert(sub_question.into(), entries);
    }

    /// Entries for `sub_question`, created empty if the key is new.
    pub fn entries_mut(
        &mut self,
        sub_question: &str,
    ) -> &mut Vec<SubAnswer> {
        self.0.entry(sub_question.to_string()).or_default()
    }

    /// The first sub-question and its entries.
    pub fn first(&self) -> Option<(&str, &[SubAnswer])> {
        self.0
            .first()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    pub fn contains(
        &self,
        sub_question: &str,
    ) -> bool {
        self.0.contains_key(sub_question)
    }
}

/// Field label mapped to its raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubAnswer(IndexMap<String, FieldValue>);

impl SubAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0.insert(field.into(), FieldValue(value.into()));
    }

    pub fn get(
        &self,
        field: &str,
    ) -> Option<&str> {
        self.0.get(field).map(|value| value.0.as_str())
    }
}

/// Raw field value.
///
/// The front end stores everything as strings, but older documents carry
/// plain JSON numbers, booleans or nulls. Those are kept in string form so
/// the extractor sees one representation: numbers as written, booleans as
/// `"yes"`/`"no"`, null as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValue(String);

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                f.write_str("a string, number, boolean or null")
            }

            fn visit_str<E: de::Error>(
                self,
                v: &str,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(
                self,
                v: String,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(v))
            }

            fn visit_bool<E: de::Error>(
                self,
                v: bool,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(if v { "yes" } else { "no" }.to_string()))
            }

            fn visit_i64<E: de::Error>(
                self,
                v: i64,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(
                self,
                v: u64,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(
                self,
                v: f64,
            ) -> Result<FieldValue, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::default())
            }

            fn visit_some<D>(
                self,
                deserializer: D,
            ) -> Result<FieldValue, D::Error>
            where
                D: Deserializer<'de>,
            {
                FieldValue::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}
