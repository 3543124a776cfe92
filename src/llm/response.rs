use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, InputMessage, InputRole, OutputItem, OutputMessageContent,
    },
};

use crate::quiz::QuizResult;

const MAX_OUTPUT_TOKENS: u32 = 5000;

/// Raw model output plus whatever usage accounting came back with it.
#[derive(Clone, Debug)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// Outcome of trying to read a completion as a quiz. Callers branch on the
/// variant: `Structured` renders as a table, `Unstructured` is shown verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedQuiz {
    Structured(QuizResult),
    Unstructured(String),
}

/// Recovers a quiz object from unstructured model output.
///
/// Completions often wrap the JSON in commentary, so this slices from the
/// first `{` to the last `}` and tries to parse that span. Anything that
/// doesn't parse degrades to `Unstructured` with the input untouched; this
/// function never fails.
pub fn normalize(raw: &str) -> NormalizedQuiz {
    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return NormalizedQuiz::Unstructured(raw.to_string()),
    };

    match serde_json::from_str::<QuizResult>(span) {
        Ok(quiz) => NormalizedQuiz::Structured(quiz),
        Err(_) => NormalizedQuiz::Unstructured(raw.to_string()),
    }
}

/// One blocking round-trip to the model. No retries, no streaming.
pub async fn request_single_text_response(
    client: &Client<OpenAIConfig>,
    model: &str,
    system_prompt: &str,
    user_prompt: &str,
    temperature: f32,
) -> Result<Completion> {
    let request = CreateResponseArgs::default()
        .model(model)
        .max_output_tokens(MAX_OUTPUT_TOKENS)
        .temperature(temperature)
        .input(vec![
            InputMessage {
                role: InputRole::System,
                content: vec![system_prompt.into()],
                status: None,
            },
            InputMessage {
                role: InputRole::User,
                content: vec![user_prompt.into()],
                status: None,
            },
        ])
        .build()?;

    let response = client
        .responses()
        .create(request)
        .await
        .with_context(|| "Failed to get response from LLM")?;

    let usage = response.usage.as_ref().map(|usage| TokenUsage {
        input_tokens: usage.input_tokens.into(),
        output_tokens: usage.output_tokens.into(),
        total_tokens: usage.total_tokens.into(),
    });

    for item in response.output {
        if let OutputItem::Message(message) = item {
            for content in message.content {
                if let OutputMessageContent::OutputText(text) = content {
                    let trimmed = text.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Ok(Completion {
                        text: trimmed.to_string(),
                        usage,
                    });
                }
            }
        }
    }

    bail!("No text output returned from model")
}
