use crate::audio::{AudioError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tracing::debug;

/// Write 16-bit PCM samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<()> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)
        .map_err(|e| AudioError::File(format!("Failed to create WAV writer: {}", e)))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| AudioError::File(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| AudioError::File(format!("Failed to finalize WAV file: {}", e)))?;

    debug!(samples = samples.len(), path = ?path.as_ref(), "wrote WAV file");
    Ok(())
}

/// Read a WAV file into 16-bit PCM samples.
///
/// Returns `(samples, sample_rate, channels)`. 16-bit integer and 32-bit
/// float sources are accepted; float samples are clamped and rescaled.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, u32, u16)> {
    let mut reader = WavReader::open(path.as_ref())
        .map_err(|e| AudioError::File(format!("Failed to open WAV file: {}", e)))?;

    let spec = reader.spec();
    debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        bits = spec.bits_per_sample,
        "reading WAV file"
    );

    let samples: Result<Vec<i16>> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map_err(|e| AudioError::File(format!("Failed to read sample: {}", e))))
            .collect(),
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| {
                s.map(f32_to_i16)
                    .map_err(|e| AudioError::File(format!("Failed to read sample: {}", e)))
            })
            .collect(),
        (format, bits) => Err(AudioError::File(format!(
            "Unsupported WAV format: {:?} {} bits",
            format, bits
        ))),
    };

    Ok((samples?, spec.sample_rate, spec.channels))
}

/// Convert a float sample in [-1.0, 1.0] to 16-bit PCM.
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Average interleaved frames down to mono.
pub fn downmix_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
