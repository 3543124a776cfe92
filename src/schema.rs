use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Default response schema shipped with the binary. Describes the JSON
/// shape the model is asked to fill in: item index -> { mcq, options, correct }.
const DEFAULT_RESPONSE_SCHEMA: &str = include_str!("../Response.json");

/// Loads the response schema, preferring a user-supplied file.
///
/// A schema that fails to load or parse is fatal: generation without a
/// target shape would just produce free text.
pub fn load_response_schema(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file at {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse schema file at {}", path.display()))
        }
        None => serde_json::from_str(DEFAULT_RESPONSE_SCHEMA)
            .context("Bundled response schema is not valid JSON"),
    }
}
