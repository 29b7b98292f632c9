use crate::config::Config;
use crate::languages::Language;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The two recognition outcomes the UI must tell apart. `NoSpeech` means the
/// service processed the request but heard nothing intelligible; `Service`
/// covers transport, authentication and server-side failures.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no speech could be understood")]
    NoSpeech,

    #[error("speech recognition request failed: {0}")]
    Service(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

/// Send captured microphone audio to the recognition service and return the
/// transcript.
///
/// Not retried on failure: the pronunciation loop re-prompts the user
/// manually instead.
pub async fn recognize_speech(
    client: &reqwest::Client,
    config: &Config,
    samples: &[i16],
    sample_rate_hz: u32,
    language: Language,
) -> Result<String, RecognitionError> {
    let request = RecognizeRequest {
        config: RecognitionConfig {
            encoding: "LINEAR16".to_string(),
            sample_rate_hertz: sample_rate_hz,
            language_code: language.code().to_string(),
        },
        audio: RecognitionAudio {
            content: base64::engine::general_purpose::STANDARD.encode(pcm_bytes(samples)),
        },
    };

    let response = client
        .post(&config.stt_api_url)
        .query(&[("key", config.google_api_key.as_str())])
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| RecognitionError::Service(e.to_string()))?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(RecognitionError::Service(
            "invalid credentials or insufficient permissions".to_string(),
        ));
    }
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        return Err(RecognitionError::Service(format!("{}: {}", status, body)));
    }

    let recognize_response: RecognizeResponse = response
        .json()
        .await
        .map_err(|e| RecognitionError::Service(format!("unreadable response: {}", e)))?;

    let transcript = recognize_response
        .results
        .iter()
        .filter_map(|result| result.alternatives.first())
        .map(|alt| alt.transcript.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let transcript = transcript.trim().to_string();
    if transcript.is_empty() {
        return Err(RecognitionError::NoSpeech);
    }

    debug!(transcript = %transcript, "speech recognized");
    Ok(transcript)
}

/// Little-endian byte view of 16-bit PCM samples, the LINEAR16 wire format.
fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
