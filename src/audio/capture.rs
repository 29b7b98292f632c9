use crate::audio::wav::{downmix_mono, f32_to_i16};
use crate::audio::{AudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// RMS level below which a chunk counts as silence.
const SILENCE_RMS_THRESHOLD: f32 = 0.015;

/// How much trailing silence ends the utterance once speech was heard.
const TRAILING_SILENCE: Duration = Duration::from_millis(1200);

/// A recorded utterance: mono 16-bit PCM plus the device sample rate.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub samples: Vec<i16>,
    pub sample_rate_hz: u32,
}

/// Decides when an utterance is over: after speech has been heard, a run of
/// trailing silence ends it. Pure sample accounting, no device access.
pub struct SilenceTracker {
    threshold: f32,
    trailing_needed: usize,
    heard_speech: bool,
    trailing_silent: usize,
}

impl SilenceTracker {
    pub fn new(sample_rate_hz: u32, threshold: f32, trailing: Duration) -> Self {
        Self {
            threshold,
            trailing_needed: (sample_rate_hz as f64 * trailing.as_secs_f64()) as usize,
            heard_speech: false,
            trailing_silent: 0,
        }
    }

    /// Account for one chunk of mono samples. Returns true once the
    /// utterance is complete.
    pub fn push(&mut self, chunk: &[f32]) -> bool {
        if chunk.is_empty() {
            return false;
        }

        if rms(chunk) >= self.threshold {
            self.heard_speech = true;
            self.trailing_silent = 0;
        } else if self.heard_speech {
            self.trailing_silent += chunk.len();
        }

        self.heard_speech && self.trailing_silent >= self.trailing_needed
    }

    pub fn heard_speech(&self) -> bool {
        self.heard_speech
    }
}

/// Root-mean-square level of a chunk.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Record from the default microphone until trailing silence or the overall
/// timeout, whichever comes first. Blocks the calling thread.
pub fn record_utterance(timeout: Duration) -> Result<Utterance> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| AudioError::Device("No input device available".into()))?;

    info!(
        "Using input device: {}",
        device.name().unwrap_or_else(|_| "Unknown".to_string())
    );

    let supported = device
        .default_input_config()
        .map_err(|e| AudioError::Device(format!("Failed to get input config: {}", e)))?;

    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();
    let channels = config.channels;
    let sample_rate_hz = config.sample_rate.0;

    let (chunk_tx, chunk_rx) = crossbeam_channel::unbounded::<Vec<f32>>();

    let err_fn = |err| {
        tracing::error!("Audio input stream error: {}", err);
    };

    // Each callback downmixes to mono and ships the chunk to the recording
    // loop; the stream itself never blocks.
    let stream = match sample_format {
        SampleFormat::F32 => device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let _ = chunk_tx.try_send(downmix_mono(data, channels));
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::Device(format!("Failed to build input stream: {}", e)))?,
        SampleFormat::I16 => device
            .build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let as_f32: Vec<f32> =
                        data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                    let _ = chunk_tx.try_send(downmix_mono(&as_f32, channels));
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::Device(format!("Failed to build input stream: {}", e)))?,
        other => {
            return Err(AudioError::Device(format!(
                "Unsupported input sample format: {:?}",
                other
            )))
        }
    };

    stream
        .play()
        .map_err(|e| AudioError::Device(format!("Failed to start input stream: {}", e)))?;

    let mut tracker = SilenceTracker::new(sample_rate_hz, SILENCE_RMS_THRESHOLD, TRAILING_SILENCE);
    let mut recorded: Vec<f32> = Vec::new();
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            debug!("capture timeout reached");
            break;
        }

        match chunk_rx.recv_timeout(remaining.min(Duration::from_millis(200))) {
            Ok(chunk) => {
                let finished = tracker.push(&chunk);
                recorded.extend_from_slice(&chunk);
                if finished {
                    debug!("trailing silence detected, ending capture");
                    break;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                return Err(AudioError::Capture("Input stream closed unexpectedly".into()))
            }
        }
    }

    drop(stream);

    if recorded.is_empty() {
        return Err(AudioError::Capture("No audio was captured".into()));
    }

    info!(
        samples = recorded.len(),
        sample_rate_hz,
        heard_speech = tracker.heard_speech(),
        "capture finished"
    );

    Ok(Utterance {
        samples: recorded.iter().copied().map(f32_to_i16).collect(),
        sample_rate_hz,
    })
}
