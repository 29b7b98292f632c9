use crate::audio::wav::read_wav;
use crate::audio::{AudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Play a WAV file on the default output device, blocking until the last
/// sample has been handed to the device.
pub fn play_wav_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let (samples, sample_rate, channels) = read_wav(path.as_ref())?;
    if samples.is_empty() {
        return Err(AudioError::File("WAV file contains no samples".into()));
    }

    // Mono frames in f32 for the output callback
    let mono: Vec<f32> = if channels <= 1 {
        samples.iter().map(|&s| s as f32 / i16::MAX as f32).collect()
    } else {
        samples
            .chunks(channels as usize)
            .map(|frame| {
                frame.iter().map(|&s| s as f32 / i16::MAX as f32).sum::<f32>()
                    / frame.len() as f32
            })
            .collect()
    };

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioError::Device("No output device available".into()))?;

    debug!(
        "Using output device: {}",
        device.name().unwrap_or_else(|_| "Unknown".to_string())
    );

    let out_channels = device
        .default_output_config()
        .map_err(|e| AudioError::Device(format!("Failed to get output config: {}", e)))?
        .channels() as usize;

    // Ask the device for the file's rate so no resampling is needed
    let config = StreamConfig {
        channels: out_channels as u16,
        sample_rate: SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let frame_count = mono.len();
    let queue = Arc::new(Mutex::new(mono));
    let queue_for_stream = Arc::clone(&queue);
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);

    let err_fn = |err| {
        tracing::error!("Audio output stream error: {}", err);
    };

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut buf = queue_for_stream.lock();
                let frames_needed = data.len() / out_channels;
                let frames_available = buf.len().min(frames_needed);

                for i in 0..frames_available {
                    let sample = buf[i];
                    for c in 0..out_channels {
                        data[i * out_channels + c] = sample;
                    }
                }
                buf.drain(0..frames_available);

                // Silence after the file runs out
                for value in &mut data[frames_available * out_channels..] {
                    *value = 0.0;
                }

                if buf.is_empty() {
                    let _ = done_tx.try_send(());
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::Device(format!("Failed to build output stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| AudioError::Device(format!("Failed to start output stream: {}", e)))?;

    // Wait for the callback to drain the queue, bounded by the clip length
    // plus a margin in case the device stalls
    let clip = Duration::from_secs_f64(frame_count as f64 / sample_rate as f64);
    let deadline = clip + Duration::from_secs(2);
    done_rx
        .recv_timeout(deadline)
        .map_err(|_| AudioError::Device("Playback did not complete in time".into()))?;

    // Let the final buffer reach the speaker before tearing the stream down
    std::thread::sleep(Duration::from_millis(150));
    drop(stream);

    info!(frames = frame_count, "playback finished");
    Ok(())
}
