use anyhow::{Context, Result, bail};
use async_openai::{Client, config::OpenAIConfig};

use super::secrets::{
    API_KEY_ENV, ApiKeySource, lookup_api_key, prompt_for_api_key, store_api_key,
};

/// Builds the OpenAI client the pipeline will own. Prompts for a key on
/// first use and stores it; an empty answer aborts before any generation.
pub fn ensure_client() -> Result<Client<OpenAIConfig>> {
    let key = match lookup_api_key()? {
        Some((key, _source)) => key,
        None => {
            let key = prompt_for_api_key()?;
            if key.is_empty() {
                bail!(
                    "No API key provided. Set {} or run `mcqgen llm --set <KEY>`.",
                    API_KEY_ENV
                );
            }
            store_api_key(&key)?;
            key
        }
    };

    initialize_client(&key)
}

pub async fn test_configured_api_key() -> Result<ApiKeySource> {
    let Some((key, source)) = lookup_api_key()? else {
        bail!(
            "No API key configured. Set {} or run `mcqgen llm --set <KEY>`.",
            API_KEY_ENV
        );
    };

    let client = initialize_client(&key)?;
    healthcheck_client(&client).await?;
    Ok(source)
}

fn initialize_client(api_key: &str) -> Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config))
}

async fn healthcheck_client(client: &Client<OpenAIConfig>) -> Result<()> {
    client
        .models()
        .list()
        .await
        .context("Failed to validate API key with OpenAI")?;
    Ok(())
}
