use anyhow::Result;
use async_openai::{Client, config::OpenAIConfig};

use super::response::request_single_text_response;

const REVIEW_MODEL: &str = "gpt-4o-mini";
const REVIEW_TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = r#"
You are an expert English grammarian and educator.
You review multiple choice quizzes for complexity and clarity.
"#;

/// Asks the model to critique a generated quiz. Returns the review text;
/// the quiz itself is not modified.
pub async fn request_quiz_review(
    client: &Client<OpenAIConfig>,
    subject: &str,
    quiz_json: &str,
) -> Result<String> {
    let user_prompt = format!(
        "Given the following quiz for {subject} students:\n\
         {quiz_json}\n\n\
         Tasks:\n\
         1. Evaluate question complexity (max 50 words)\n\
         2. Improve tone if needed\n\
         3. Fix unclear questions\n\n\
         Return the improved quiz only if changes are required."
    );

    let completion = request_single_text_response(
        client,
        REVIEW_MODEL,
        SYSTEM_PROMPT,
        &user_prompt,
        REVIEW_TEMPERATURE,
    )
    .await?;

    Ok(completion.text)
}
