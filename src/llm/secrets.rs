use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::{Password, theme::ColorfulTheme};
use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use crate::utils::{get_data_dir, strip_controls_and_escapes, trim_line};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const AUTH_FILE_NAME: &str = "auth.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    AuthFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::AuthFile => "local auth file",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AuthFile {
    openai_api_key: Option<String>,
}

#[cfg(test)]
const TEST_AUTH_PATH_ENV: &str = "MCQGEN_TEST_AUTH_PATH";

/// Resolves the OpenAI API key, env var first, auth file second.
pub fn lookup_api_key() -> Result<Option<(String, ApiKeySource)>> {
    if let Ok(value) = env::var(API_KEY_ENV)
        && !value.trim().is_empty()
    {
        return Ok(Some((value, ApiKeySource::Environment)));
    }

    let auth_path = auth_file_path()?;
    let Some(auth) = read_auth_file(&auth_path)? else {
        return Ok(None);
    };

    let key = auth
        .openai_api_key
        .as_deref()
        .and_then(trim_line)
        .map(str::to_string);

    Ok(key.map(|key| (key, ApiKeySource::AuthFile)))
}

pub fn store_api_key(api_key: &str) -> Result<()> {
    let trimmed = trim_line(api_key).with_context(|| "Cannot store an empty API key")?;

    let auth_path = auth_file_path()?;
    let mut auth = read_auth_file(&auth_path)?.unwrap_or_default();
    auth.openai_api_key = Some(trimmed.to_string());

    write_auth_file(&auth_path, &auth)
}

pub fn clear_api_key() -> Result<bool> {
    let auth_path = auth_file_path()?;
    let Some(mut auth) = read_auth_file(&auth_path)? else {
        return Ok(false);
    };

    if auth.openai_api_key.take().is_none() {
        return Ok(false);
    }

    fs::remove_file(&auth_path).with_context(|| {
        format!("Failed to remove auth file at {}", auth_path.display())
    })?;
    Ok(true)
}

pub fn prompt_for_api_key() -> Result<String> {
    println!(
        "{} (https://platform.openai.com/account/api-keys). It's stored locally for future runs.",
        Palette::paint(Palette::SUCCESS, "Enter your OpenAI API key")
    );
    println!(
        "{}",
        Palette::dim("You can also export it as OPENAI_API_KEY.")
    );
    let raw = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API Key")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read API key from the terminal")?;

    Ok(strip_controls_and_escapes(&raw))
}

fn auth_file_path() -> Result<PathBuf> {
    #[cfg(test)]
    {
        if let Ok(path) = env::var(TEST_AUTH_PATH_ENV)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = get_data_dir()?;
    Ok(data_dir.join(AUTH_FILE_NAME))
}

fn read_auth_file(path: &Path) -> Result<Option<AuthFile>> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(Some(AuthFile::default())),
        Ok(contents) => {
            let parsed: AuthFile = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse auth file at {}", path.display()))?;
            Ok(Some(parsed))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read auth file at {}", path.display()))
        }
    }
}

fn write_auth_file(path: &Path, value: &AuthFile) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("Failed to write auth file at {}", path.display()))?;
    Ok(())
}
