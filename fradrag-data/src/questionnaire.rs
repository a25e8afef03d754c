//! Questionnaire snapshot loading.
//!
//! ## JSON
//!
//! The document stored on the user profile: a top-level array of
//! `{ "question": ..., "answers": [...] }` objects. A document whose top
//! level is not an array (`null`, an object, ...) means the user has not
//! answered yet and loads as `None`.
//!
//! ## CSV
//!
//! One row per field value. Column order does not matter.
//!
//! | Column | Type | Notes |
//! |----------------|---------|-----------------------------------------------|
//! | `section` | string | Section title, e.g. `Bank and Loans` |
//! | `answer` | integer | 1-based answer number within the section |
//! | `sub_question` | string | e.g. `Have a loan` |
//! | `entry` | integer | 1-based entry number (repeated groups) |
//! | `field` | string | e.g. `Interest paid` |
//! | `value` | string | raw value, e.g. `42,500` |
//!
//! ```csv
//! section,answer,sub_question,entry,field,value
//! Bank and Loans,1,Have a loan,1,Interest paid,"42,500"
//! Bank and Loans,1,Have a loan,2,Interest paid,"7,500"
//! ```
//!
//! Sections keep the order of their first row; answers and entries are
//! ordered by number.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use fradrag_core::{Answer, QuestionnaireItem, Section, SubAnswer};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::LoaderError;

/// Upper bound on `entry` numbers; entries are stored densely.
const MAX_ENTRY: usize = 1000;

/// A single row of the flat questionnaire CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuestionnaireRecord {
    pub section: String,
    pub answer: usize,
    pub sub_question: String,
    pub entry: usize,
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// Loader for questionnaire snapshots.
pub struct QuestionnaireLoader;

impl QuestionnaireLoader {
    /// Parse a JSON questionnaire document.
    ///
    /// Returns `Ok(None)` when the top level is not an array.
    pub fn parse_json<R: Read>(reader: R) -> Result<Option<Vec<QuestionnaireItem>>, LoaderError> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::from_json_value(document)
    }

    pub fn from_json_value(document: Value) -> Result<Option<Vec<QuestionnaireItem>>, LoaderError> {
        if !document.is_array() {
            warn!(
                kind = json_kind(&document),
                "questionnaire document is not an array; treating as unanswered"
            );
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(document)?))
    }

    /// Parse flat CSV rows and fold them into questionnaire items.
    pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<QuestionnaireItem>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: QuestionnaireRecord = result?;
            records.push(record);
        }

        Self::fold(records)
    }

    /// Build nested questionnaire items from flat records.
    pub fn fold(records: Vec<QuestionnaireRecord>) -> Result<Vec<QuestionnaireItem>, LoaderError> {
        let mut sections: Vec<(String, BTreeMap<usize, Answer>)> = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            check_index("answer", record.answer, usize::MAX, row)?;
            check_index("entry", record.entry, MAX_ENTRY, row)?;

            let position = match sections
                .iter()
                .position(|(title, _)| *title == record.section)
            {
                Some(position) => position,
                None => {
                    if Section::parse(&record.section).is_none() {
                        warn!(section = %record.section, row, "unknown questionnaire section");
                    }
                    sections.push((record.section.clone(), BTreeMap::new()));
                    sections.len() - 1
                }
            };

            let answer = sections[position].1.entry(record.answer).or_default();
            let entries = answer.entries_mut(&record.sub_question);
            if entries.len() < record.entry {
                entries.resize_with(record.entry, SubAnswer::new);
            }
            entries[record.entry - 1].insert(record.field, record.value);
        }

        debug!(sections = sections.len(), "folded questionnaire rows");

        Ok(sections
            .into_iter()
            .map(|(question, answers)| QuestionnaireItem {
                question,
                answers: answers.into_values().collect(),
            })
            .collect())
    }

    /// Load from a path; `.csv` files use the CSV layout, anything else is
    /// read as JSON.
    pub fn load_from_file(path: &Path) -> Result<Option<Vec<QuestionnaireItem>>, LoaderError> {
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_csv = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::parse_csv(file).map(Some)
        } else {
            Self::parse_json(file)
        }
    }
}

fn check_index(
    column: &'static str,
    value: usize,
    max: usize,
    row: usize,
) -> Result<(), LoaderError> {
    if value == 0 || value > max {
        return Err(LoaderError::InvalidValue {
            column,
            value: value.to_string(),
            row,
        });
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
