use crate::config::Config;
use crate::languages::Language;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
struct VoiceSelection {
    #[serde(rename = "languageCode")]
    language_code: String,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: String,
    #[serde(rename = "sampleRateHertz")]
    sample_rate_hertz: u32,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

/// Synthesize spoken audio for a phrase in the given language.
///
/// Requests LINEAR16 output, which the service returns as a complete WAV
/// stream, base64-encoded. Returns the decoded WAV bytes.
pub async fn synthesize_speech(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    language: Language,
) -> Result<Vec<u8>> {
    let request = SynthesizeRequest {
        input: SynthesisInput {
            text: text.to_string(),
        },
        voice: VoiceSelection {
            language_code: language.code().to_string(),
        },
        audio_config: AudioConfig {
            audio_encoding: "LINEAR16".to_string(),
            sample_rate_hertz: config.tts_sample_rate_hz,
        },
    };

    let audio_content = with_retry_if(
        &RetryConfig::api_call(),
        &format!("Speech synthesis in {}", language.name()),
        || async {
            let response = client
                .post(&config.tts_api_url)
                .query(&[("key", config.google_api_key.as_str())])
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .context("Failed to send request to speech synthesis service")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
                anyhow::bail!("Speech synthesis API error ({}): {}", status, body);
            }

            let synthesize_response: SynthesizeResponse = response
                .json()
                .await
                .context("Failed to parse speech synthesis response")?;

            Ok(synthesize_response.audio_content)
        },
        is_retryable_error,
    )
    .await?;

    let audio = base64::engine::general_purpose::STANDARD
        .decode(audio_content.as_bytes())
        .context("Speech synthesis response contained invalid base64 audio")?;

    if audio.is_empty() {
        anyhow::bail!("Speech synthesis response contained no audio");
    }

    Ok(audio)
}

/// Retry 429 and 5xx; fail immediately on other 4xx.
fn is_retryable_error(error: &anyhow::Error) -> bool {
    let error_str = error.to_string();

    if error_str.contains("Speech synthesis API error") {
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
