use anyhow::Result;
use async_openai::{Client, config::OpenAIConfig};

use super::response::{Completion, request_single_text_response};
use crate::quiz::GenerationRequest;

const QUIZ_MODEL: &str = "gpt-4o-mini";
const QUIZ_TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = r#"
You are an expert MCQ maker.
You always answer with strict JSON matching the schema you are given, with no surrounding prose.
"#;

/// Interpolates the generation request into the quiz prompt. Pure; the
/// source text is passed through untruncated.
pub fn build_quiz_prompt(request: &GenerationRequest) -> String {
    let response_json =
        serde_json::to_string(&request.response_schema).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Text: {text}\n\n\
         Given the above text, create a quiz of {number} multiple choice questions \
         for {subject} students in {tone} tone.\n\n\
         Rules:\n\
         - Do not repeat questions\n\
         - Ensure questions match the text\n\
         - Generate exactly {number} MCQs\n\n\
         ### RESPONSE_JSON\n\
         {response_json}",
        text = request.source_text,
        number = request.question_count,
        subject = request.subject,
        tone = request.difficulty,
        response_json = response_json,
    )
}

pub async fn request_quiz(
    client: &Client<OpenAIConfig>,
    request: &GenerationRequest,
) -> Result<Completion> {
    let user_prompt = build_quiz_prompt(request);

    request_single_text_response(client, QUIZ_MODEL, SYSTEM_PROMPT, &user_prompt, QUIZ_TEMPERATURE)
        .await
}
