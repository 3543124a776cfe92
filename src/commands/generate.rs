use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::extract;
use crate::llm::{self, NormalizedQuiz};
use crate::palette::Palette;
use crate::quiz::{Difficulty, GenerationRequest};
use crate::schema;
use crate::table::{self, TableRow};
use crate::utils::pluralize;

pub async fn run(
    path: PathBuf,
    count: u8,
    subject: String,
    difficulty: Difficulty,
    output: PathBuf,
    schema_path: Option<PathBuf>,
    review: bool,
) -> Result<()> {
    // User input problems are reported before the document is even opened.
    GenerationRequest::validate_inputs(count, &subject)?;

    let source_text = extract::extract_from_path(&path)?;
    let response_schema = schema::load_response_schema(schema_path.as_deref())?;

    let request = GenerationRequest {
        source_text,
        question_count: count,
        subject: subject.trim().to_string(),
        difficulty,
        response_schema,
    };

    let client = llm::ensure_client()?;

    println!(
        "{}",
        Palette::dim(format!(
            "Generating {} from {} ...",
            pluralize("question", count as usize),
            path.display()
        ))
    );

    let completion = llm::request_quiz(&client, &request)
        .await
        .with_context(|| "Quiz generation failed")?;

    let quiz = match llm::normalize(&completion.text) {
        NormalizedQuiz::Structured(quiz) => quiz,
        NormalizedQuiz::Unstructured(raw) => {
            println!(
                "{}",
                Palette::paint(
                    Palette::DANGER,
                    "The model response did not contain a structured quiz. Raw response:"
                )
            );
            println!("\n{raw}");
            return Ok(());
        }
    };

    let Some(rows) = table::project_rows(&quiz) else {
        println!(
            "{}",
            Palette::paint(
                Palette::DANGER,
                "Could not extract structured quiz data from the model response. Raw response:"
            )
        );
        println!("\n{}", completion.text);
        return Ok(());
    };

    for warning in table::correct_label_warnings(&quiz) {
        println!("{}", Palette::paint(Palette::WARNING, warning));
    }

    print_table(&rows);

    let csv = table::to_csv(&rows)?;
    fs::write(&output, csv)
        .with_context(|| format!("Failed to write CSV to {}", output.display()))?;

    println!(
        "{} {} saved to {}",
        Palette::paint(Palette::SUCCESS, "Done:"),
        pluralize("question", rows.len()),
        Palette::paint(Palette::ACCENT, output.display())
    );

    if let Some(usage) = completion.usage {
        println!(
            "{}",
            Palette::dim(format!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.input_tokens, usage.output_tokens, usage.total_tokens
            ))
        );
    }

    if review {
        let quiz_json = serde_json::to_string_pretty(&quiz)?;
        let review_text = llm::request_quiz_review(&client, &request.subject, &quiz_json)
            .await
            .with_context(|| "Quiz review failed")?;
        println!("\n{}", Palette::paint(Palette::INFO, "Expert review"));
        println!("{review_text}");
    }

    Ok(())
}

fn print_table(rows: &[TableRow]) {
    for (index, row) in rows.iter().enumerate() {
        println!(
            "\n{} {}",
            Palette::paint(Palette::INFO, format!("{}.", index + 1)),
            row.question
        );
        if !row.options.is_empty() {
            println!("   {}", row.options);
        }
        println!(
            "   Answer: {}",
            Palette::paint(Palette::SUCCESS, &row.correct)
        );
    }
    println!();
}
