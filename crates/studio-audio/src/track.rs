//! Core audio track type.
//!
//! Tracks are mono f32 sample buffers in the -1.0..1.0 range at a fixed
//! 44.1 kHz working rate. Decoded input at other rates is resampled on
//! load; all processing assumes [`SAMPLE_RATE`].

use std::io::Cursor;
use std::path::Path;

use crate::error::{AudioError, AudioResult};

/// Working sample rate for all processing.
pub const SAMPLE_RATE: u32 = 44_100;

/// A mono PCM audio buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    /// Samples in -1.0..1.0
    pub samples: Vec<f32>,
    /// Sample rate, always [`SAMPLE_RATE`] after load
    pub sample_rate: u32,
}

impl Default for AudioTrack {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: SAMPLE_RATE,
        }
    }
}

impl AudioTrack {
    /// Create a track from raw samples at the working rate.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: SAMPLE_RATE,
        }
    }

    /// Create a silent track of the given duration.
    pub fn silent(duration_ms: u64) -> Self {
        let count = (duration_ms * SAMPLE_RATE as u64 / 1000) as usize;
        Self::from_samples(vec![0.0; count])
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Duration in milliseconds.
    pub fn len_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Peak absolute amplitude.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Overlay another track on top of this one, starting at `position_ms`,
    /// with a gain applied to the overlaid copy. The result keeps this
    /// track's length; overhanging samples of `other` are dropped. Summed
    /// samples are clamped to the valid range.
    pub fn overlay(&self, other: &AudioTrack, position_ms: u64, gain_db: f32) -> AudioTrack {
        let mut samples = self.samples.clone();
        let offset = (position_ms * self.sample_rate as u64 / 1000) as usize;
        let gain = db_to_linear(gain_db);

        for (i, sample) in other.samples.iter().enumerate() {
            let Some(slot) = samples.get_mut(offset + i) else {
                break;
            };
            *slot = (*slot + sample * gain).clamp(-1.0, 1.0);
        }

        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Apply a flat gain in decibels.
    pub fn gain_db(&self, db: f32) -> AudioTrack {
        let gain = db_to_linear(db);
        AudioTrack {
            samples: self
                .samples
                .iter()
                .map(|s| (s * gain).clamp(-1.0, 1.0))
                .collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Reverse the sample order.
    pub fn reversed(&self) -> AudioTrack {
        let mut samples = self.samples.clone();
        samples.reverse();
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Keep only the first `duration_ms`.
    pub fn truncated(&self, duration_ms: u64) -> AudioTrack {
        let count = (duration_ms * self.sample_rate as u64 / 1000) as usize;
        AudioTrack {
            samples: self.samples.iter().copied().take(count).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Nearest-neighbour resample by a speed factor. Raises pitch and
    /// shortens the track for factors above 1.0; this is the documented
    /// pitch-shift approximation, not a true pitch shifter.
    pub fn resampled(&self, speed: f32) -> AudioTrack {
        if self.samples.is_empty() || speed <= 0.0 {
            return self.clone();
        }
        let out_len = (self.samples.len() as f32 / speed).round() as usize;
        let samples = (0..out_len)
            .map(|i| {
                let src = ((i as f32 * speed) as usize).min(self.samples.len() - 1);
                self.samples[src]
            })
            .collect();
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// One-pole low-pass filter.
    pub fn low_pass(&self, cutoff_hz: f32) -> AudioTrack {
        if self.samples.is_empty() || cutoff_hz <= 0.0 {
            return self.clone();
        }
        let dt = 1.0 / self.sample_rate as f32;
        let rc = 1.0 / (2.0 * std::f32::consts::PI * cutoff_hz);
        let alpha = dt / (rc + dt);

        let mut samples = Vec::with_capacity(self.samples.len());
        let mut prev = 0.0f32;
        for &sample in &self.samples {
            prev += alpha * (sample - prev);
            samples.push(prev);
        }
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Linear fade-in over the leading `duration_ms`.
    pub fn fade_in(&self, duration_ms: u64) -> AudioTrack {
        let mut samples = self.samples.clone();
        let count = ((duration_ms * self.sample_rate as u64 / 1000) as usize).min(samples.len());
        for (i, sample) in samples.iter_mut().take(count).enumerate() {
            *sample *= i as f32 / count.max(1) as f32;
        }
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Linear fade-out over the trailing `duration_ms`.
    pub fn fade_out(&self, duration_ms: u64) -> AudioTrack {
        let mut samples = self.samples.clone();
        let len = samples.len();
        let count = ((duration_ms * self.sample_rate as u64 / 1000) as usize).min(len);
        for i in 0..count {
            let factor = (count - i) as f32 / count.max(1) as f32;
            samples[len - count + i] *= factor;
        }
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Extend with trailing silence up to `duration_ms`. Longer tracks are
    /// returned unchanged.
    pub fn pad_to(&self, duration_ms: u64) -> AudioTrack {
        let target = (duration_ms * self.sample_rate as u64 / 1000) as usize;
        let mut samples = self.samples.clone();
        if samples.len() < target {
            samples.resize(target, 0.0);
        }
        AudioTrack {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Scale so the peak equals `ceiling` (no-op for silent tracks).
    pub fn normalized(&self, ceiling: f32) -> AudioTrack {
        let peak = self.peak();
        if peak <= f32::EPSILON {
            return self.clone();
        }
        let factor = ceiling / peak;
        AudioTrack {
            samples: self.samples.iter().map(|s| s * factor).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Decode WAV bytes into a track.
    ///
    /// Accepts 16-bit integer and 32-bit float payloads; multi-channel
    /// input is averaged down to mono and foreign sample rates are
    /// resampled to the working rate.
    pub fn from_wav_bytes(bytes: &[u8]) -> AudioResult<AudioTrack> {
        if bytes.is_empty() {
            return Err(AudioError::EmptyPayload);
        }
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()?,
            (hound::SampleFormat::Float, 32) => {
                reader.samples::<f32>().collect::<Result<_, _>>()?
            }
            (format, bits) => {
                return Err(AudioError::unsupported_format(format!(
                    "{:?} at {} bits",
                    format, bits
                )))
            }
        };

        let channels = spec.channels.max(1) as usize;
        let mono: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        let track = AudioTrack {
            samples: mono,
            sample_rate: spec.sample_rate,
        };
        Ok(track.at_working_rate())
    }

    /// Write the track as 16-bit mono WAV.
    pub fn write_wav(&self, path: &Path) -> AudioResult<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Resample to [`SAMPLE_RATE`] if needed (nearest-neighbour).
    fn at_working_rate(&self) -> AudioTrack {
        if self.sample_rate == SAMPLE_RATE || self.samples.is_empty() {
            let mut track = self.clone();
            track.sample_rate = SAMPLE_RATE;
            return track;
        }
        let ratio = self.sample_rate as f64 / SAMPLE_RATE as f64;
        let out_len = (self.samples.len() as f64 / ratio) as usize;
        let samples = (0..out_len)
            .map(|i| {
                let src = ((i as f64 * ratio) as usize).min(self.samples.len() - 1);
                self.samples[src]
            })
            .collect();
        AudioTrack {
            samples,
            sample_rate: SAMPLE_RATE,
        }
    }
}

/// Convert decibels to a linear gain factor.
pub fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}
