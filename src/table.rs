use anyhow::Result;
use serde_json::Value;

use crate::quiz::{McqItem, QuizResult};

const OPTION_SEPARATOR: &str = " || ";
const CSV_HEADER: [&str; 3] = ["Question", "Options", "Correct Answer"];

/// Display-only projection of one quiz item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub question: String,
    pub options: String,
    pub correct: String,
}

/// Flattens a quiz into display rows, one per item, in key order.
///
/// Returns `None` when any entry isn't shaped like an MCQ item, which is
/// distinct from a structured-but-empty quiz (`Some(vec![])`).
pub fn project_rows(quiz: &QuizResult) -> Option<Vec<TableRow>> {
    let mut rows = Vec::with_capacity(quiz.len());

    for value in quiz.values() {
        let item: McqItem = serde_json::from_value(value.clone()).ok()?;
        let options = item
            .options
            .iter()
            .map(|(label, text)| format!("{label}: {}", display_value(text)))
            .collect::<Vec<_>>()
            .join(OPTION_SEPARATOR);

        rows.push(TableRow {
            question: item.mcq,
            options,
            correct: item.correct,
        });
    }

    Some(rows)
}

/// Flags items whose correct-answer label is not among the option labels.
/// The model is never forced to honor that invariant, so it gets surfaced
/// as a warning instead of failing the whole quiz.
pub fn correct_label_warnings(quiz: &QuizResult) -> Vec<String> {
    let mut warnings = Vec::new();

    for (key, value) in quiz {
        let Ok(item) = serde_json::from_value::<McqItem>(value.clone()) else {
            continue;
        };
        if !item.correct.is_empty() && !item.options.contains_key(&item.correct) {
            warnings.push(format!(
                "Question {key}: correct answer '{}' is not one of the option labels.",
                item.correct
            ));
        }
    }

    warnings
}

/// Encodes rows as a UTF-8 CSV document with a fixed header.
pub fn to_csv(rows: &[TableRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([&row.question, &row.options, &row.correct])?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to finish CSV encoding: {err}"))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiz_from(value: Value) -> QuizResult {
        value.as_object().expect("test quiz should be an object").clone()
    }

    #[test]
    fn rows_follow_key_order_and_join_options() {
        let quiz = quiz_from(json!({
            "1": {
                "mcq": "Q1",
                "options": {"A": "x", "B": "y"},
                "correct": "A"
            },
            "2": {
                "mcq": "Q2",
                "options": {"A": "p", "B": "q", "C": "r"},
                "correct": "C"
            }
        }));

        let rows = project_rows(&quiz).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "Q1");
        assert_eq!(rows[0].options, "A: x || B: y");
        assert_eq!(rows[0].correct, "A");
        assert_eq!(rows[1].question, "Q2");
        assert_eq!(rows[1].options, "A: p || B: q || C: r");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let quiz = quiz_from(json!({"1": {}}));
        let rows = project_rows(&quiz).unwrap();
        assert_eq!(
            rows[0],
            TableRow {
                question: String::new(),
                options: String::new(),
                correct: String::new(),
            }
        );
    }

    #[test]
    fn non_object_entry_signals_failure() {
        let quiz = quiz_from(json!({"1": "not an item"}));
        assert!(project_rows(&quiz).is_none());
    }

    #[test]
    fn empty_quiz_is_zero_rows_not_failure() {
        let quiz = QuizResult::new();
        assert_eq!(project_rows(&quiz), Some(Vec::new()));
    }

    #[test]
    fn non_string_option_text_is_rendered() {
        let quiz = quiz_from(json!({
            "1": {"mcq": "Q", "options": {"A": 42}, "correct": "A"}
        }));
        let rows = project_rows(&quiz).unwrap();
        assert_eq!(rows[0].options, "A: 42");
    }

    #[test]
    fn unknown_correct_label_is_flagged() {
        let quiz = quiz_from(json!({
            "1": {"mcq": "Q1", "options": {"A": "x"}, "correct": "D"},
            "2": {"mcq": "Q2", "options": {"A": "x"}, "correct": "A"}
        }));

        let warnings = correct_label_warnings(&quiz);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Question 1"));
        assert!(warnings[0].contains("'D'"));
    }

    #[test]
    fn empty_correct_label_is_not_flagged() {
        let quiz = quiz_from(json!({
            "1": {"mcq": "Q1", "options": {"A": "x"}, "correct": ""}
        }));
        assert!(correct_label_warnings(&quiz).is_empty());
    }

    #[test]
    fn csv_has_header_and_one_record_per_row() {
        let rows = vec![TableRow {
            question: "Q1".into(),
            options: "A: x || B: y".into(),
            correct: "A".into(),
        }];

        let bytes = to_csv(&rows).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Question,Options,Correct Answer"));
        assert_eq!(lines.next(), Some("Q1,A: x || B: y,A"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let rows = vec![TableRow {
            question: "What, exactly?".into(),
            options: "A: x".into(),
            correct: "A".into(),
        }];

        let bytes = to_csv(&rows).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        assert!(csv.contains("\"What, exactly?\""));
    }
}
