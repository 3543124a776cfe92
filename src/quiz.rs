use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

pub const MIN_QUESTION_COUNT: u8 = 3;
pub const MAX_QUESTION_COUNT: u8 = 50;
pub const MAX_SUBJECT_CHARS: usize = 30;

/// One generated quiz, keyed by item index ("1", "2", …) in document order.
///
/// Entries are kept as raw JSON values because the model is free to return
/// anything; `table::project_rows` is where the shape gets checked.
pub type QuizResult = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tone = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{tone}")
    }
}

/// Everything one generation run needs. Built once per invocation and
/// handed through the pipeline by reference.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub source_text: String,
    pub question_count: u8,
    pub subject: String,
    pub difficulty: Difficulty,
    pub response_schema: Value,
}

impl GenerationRequest {
    /// Checks the user-supplied knobs before any extraction or model call.
    pub fn validate_inputs(question_count: u8, subject: &str) -> Result<()> {
        if subject.trim().is_empty() {
            bail!("Please provide a subject with --subject.");
        }
        if subject.chars().count() > MAX_SUBJECT_CHARS {
            bail!(
                "Subject must be at most {} characters (got {}).",
                MAX_SUBJECT_CHARS,
                subject.chars().count()
            );
        }
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&question_count) {
            bail!(
                "Question count must be between {} and {}.",
                MIN_QUESTION_COUNT,
                MAX_QUESTION_COUNT
            );
        }
        Ok(())
    }
}

/// A single quiz entry as the response schema describes it. All fields
/// default to empty so a sparse item still projects to a row.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct McqItem {
    #[serde(default)]
    pub mcq: String,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub correct: String,
}
