use anyhow::{Context, Result};

const DEFAULT_TRANSLATE_API_URL: &str =
    "https://translation.googleapis.com/language/translate/v2";
const DEFAULT_TTS_API_URL: &str =
    "https://texttospeech.googleapis.com/v1/text:synthesize";
const DEFAULT_STT_API_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

#[derive(Debug, Clone)]
pub struct Config {
    // Shared key for the translation, synthesis and recognition services
    pub google_api_key: String,

    // Service endpoints (overridable so tests can point at a mock server)
    pub translate_api_url: String,
    pub tts_api_url: String,
    pub stt_api_url: String,

    // Audio
    pub audio_file: String,
    pub tts_sample_rate_hz: u32,
    pub capture_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY not set")?,

            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATE_API_URL.to_string()),
            tts_api_url: std::env::var("TTS_API_URL")
                .unwrap_or_else(|_| DEFAULT_TTS_API_URL.to_string()),
            stt_api_url: std::env::var("STT_API_URL")
                .unwrap_or_else(|_| DEFAULT_STT_API_URL.to_string()),

            audio_file: std::env::var("AUDIO_FILE")
                .unwrap_or_else(|_| "trans.wav".to_string()),
            tts_sample_rate_hz: std::env::var("TTS_SAMPLE_RATE_HZ")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(22050),
            capture_timeout_secs: std::env::var("CAPTURE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "GOOGLE_API_KEY",
            "TRANSLATE_API_URL",
            "TTS_API_URL",
            "STT_API_URL",
            "AUDIO_FILE",
            "TTS_SAMPLE_RATE_HZ",
            "CAPTURE_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");

        let config = Config::from_env().expect("Should succeed with key set");

        assert_eq!(config.google_api_key, "test-key");
        assert_eq!(config.translate_api_url, DEFAULT_TRANSLATE_API_URL);
        assert_eq!(config.tts_api_url, DEFAULT_TTS_API_URL);
        assert_eq!(config.stt_api_url, DEFAULT_STT_API_URL);
        assert_eq!(config.audio_file, "trans.wav");
        assert_eq!(config.tts_sample_rate_hz, 22050);
        assert_eq!(config.capture_timeout_secs, 10);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");
        std::env::set_var("TRANSLATE_API_URL", "http://localhost:9000/translate");
        std::env::set_var("AUDIO_FILE", "/tmp/phrase.wav");
        std::env::set_var("CAPTURE_TIMEOUT_SECS", "5");

        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.translate_api_url, "http://localhost:9000/translate");
        assert_eq!(config.audio_file, "/tmp/phrase.wav");
        assert_eq!(config.capture_timeout_secs, 5);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("GOOGLE_API_KEY", "test-key");
        std::env::set_var("TTS_SAMPLE_RATE_HZ", "not-a-number");

        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.tts_sample_rate_hz, 22050);
        clear_env();
    }
}
