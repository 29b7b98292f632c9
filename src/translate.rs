use crate::config::Config;
use crate::languages::Language;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Translation request body. Source is always English.
#[derive(Debug, Serialize)]
struct TranslateRequest {
    q: String,
    source: String,
    target: String,
    format: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationData,
}

#[derive(Debug, Deserialize)]
struct TranslationData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Translate an English phrase into the target language.
///
/// Returns the translated text on success. Transient service failures are
/// retried; other errors propagate to the caller.
pub async fn translate_phrase(
    client: &reqwest::Client,
    config: &Config,
    phrase: &str,
    target: Language,
) -> Result<String> {
    // English to English needs no service round trip
    if target == Language::ENGLISH {
        return Ok(phrase.to_string());
    }

    let request = TranslateRequest {
        q: phrase.to_string(),
        source: "en".to_string(),
        target: target.code().to_string(),
        format: "text".to_string(),
    };

    let translated = with_retry_if(
        &RetryConfig::api_call(),
        &format!("Translation to {}", target.name()),
        || async {
            let response = client
                .post(&config.translate_api_url)
                .query(&[("key", config.google_api_key.as_str())])
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .context("Failed to send request to translation service")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
                anyhow::bail!("Translation API error ({}): {}", status, body);
            }

            let translate_response: TranslateResponse = response
                .json()
                .await
                .context("Failed to parse translation response")?;

            let translated = translate_response
                .data
                .translations
                .first()
                .map(|t| t.translated_text.clone())
                .context("Translation response contained no translations")?;

            Ok(translated)
        },
        is_retryable_error,
    )
    .await?;

    Ok(translated)
}

/// Retry 429 and 5xx; fail immediately on other 4xx. Transport errors are
/// treated as transient.
fn is_retryable_error(error: &anyhow::Error) -> bool {
    let error_str = error.to_string();

    // Error format: "Translation API error (400 Bad Request): ..."
    if error_str.contains("Translation API error") {
        if let Some(start) = error_str.find('(') {
            if let Some(end) = error_str[start..].find(')') {
                let status_str = &error_str[start + 1..start + end];
                let status_num = status_str.split_whitespace().next().unwrap_or("");
                if let Ok(status) = status_num.parse::<u16>() {
                    return status == 429 || status >= 500;
                }
            }
        }
    }

    true
}
