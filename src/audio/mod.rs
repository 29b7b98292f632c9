//! Audio device and file handling: WAV read/write, blocking playback of the
//! synthesized phrase, and microphone capture for pronunciation attempts.

pub mod capture;
pub mod playback;
pub mod wav;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Audio file error: {0}")]
    File(String),

    #[error("Audio capture error: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, AudioError>;
