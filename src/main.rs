use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueHint};

use mcqgen::commands::generate;
use mcqgen::llm;
use mcqgen::quiz::Difficulty;

#[derive(Parser, Debug)]
#[command(
    name = "mcqgen",
    version,
    about = "Multiple-choice quizzes from your documents, in your terminal.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a quiz from a PDF or TXT document
    Generate {
        /// Path to the source document
        #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// Subject the questions are for (max 30 characters)
        #[arg(long, short, value_name = "SUBJECT")]
        subject: String,
        /// Number of questions to generate
        #[arg(
            long,
            short = 'n',
            value_name = "COUNT",
            default_value_t = 5,
            value_parser = clap::value_parser!(u8).range(3..=50)
        )]
        count: u8,
        /// Difficulty tone of the questions
        #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
        difficulty: Difficulty,
        /// Where to write the CSV export
        #[arg(long, short, value_name = "PATH", default_value = "mcqs.csv", value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Response schema file; defaults to the bundled Response.json
        #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        schema: Option<PathBuf>,
        /// Ask the model to review the generated quiz afterwards
        #[arg(long, default_value_t = false)]
        review: bool,
    },
    /// Manage the OpenAI API key
    Llm {
        /// Store a new API key in the local auth file
        #[arg(long, value_name = "KEY", conflicts_with = "clear")]
        set: Option<String>,
        /// Remove the stored API key from the local auth file
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Verify the configured API key by calling the OpenAI API
        #[arg(long, conflicts_with = "clear")]
        test: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            path,
            subject,
            count,
            difficulty,
            output,
            schema,
            review,
        } => {
            generate::run(path, count, subject, difficulty, output, schema, review).await?;
        }
        Command::Llm { set, clear, test } => handle_llm_command(set, clear, test).await?,
    }

    Ok(())
}

async fn handle_llm_command(set: Option<String>, clear: bool, test: bool) -> Result<()> {
    let mut action_taken = false;

    if let Some(key) = set {
        llm::store_api_key(&key)?;
        println!("Stored OpenAI API key in the local auth file.");
        action_taken = true;
    }

    if clear {
        let removed = llm::clear_api_key()?;
        if removed {
            println!("Removed the stored OpenAI API key.");
        } else {
            println!("No OpenAI API key found in the auth file.");
        }
        action_taken = true;
    }

    if test {
        let source = llm::test_configured_api_key().await?;
        println!("OpenAI API key from the {} is valid.", source.description());
        action_taken = true;
    }

    if !action_taken {
        bail!("No action provided. Use --set, --clear, or --test.");
    }
    Ok(())
}
