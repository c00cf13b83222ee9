//! Beat-window slicing and per-window dominant frequency extraction.

use rayon::prelude::*;
use std::ops::Range;
use thiserror::Error;

use super::decode::Waveform;
use super::spectral::spectral_properties;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("tempo must be a positive number of beats per minute, got {0}")]
    InvalidTempo(f64),

    #[error("sample rate must be positive")]
    InvalidSampleRate,
}

/// Splits a waveform into one-beat windows and reports one frequency each.
#[derive(Clone, Debug)]
pub struct FrequencyTracker {
    bpm: f64,
}

impl FrequencyTracker {
    pub fn new(bpm: f64) -> Result<Self, TrackerError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TrackerError::InvalidTempo(bpm));
        }
        Ok(Self { bpm })
    }

    /// Window length in seconds: one beat.
    pub fn window_duration(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Samples per window at `sample_rate`, never less than one.
    pub fn window_samples(&self, sample_rate: u32) -> usize {
        ((sample_rate as f64 * self.window_duration()).round() as usize).max(1)
    }

    /// Sample ranges of every window in temporal order.
    ///
    /// All windows but the last are exactly one beat long; the last one
    /// takes every remaining sample, so it may run up to two beats.
    pub fn windows(&self, len: usize, sample_rate: u32) -> Vec<Range<usize>> {
        if len == 0 {
            return Vec::new();
        }
        let size = self.window_samples(sample_rate);
        let full = (len / size).max(1) - 1;

        let mut ranges: Vec<Range<usize>> = (0..full).map(|i| i * size..(i + 1) * size).collect();
        let tail_start = full * size;
        if tail_start < len {
            ranges.push(tail_start..len);
        }
        ranges
    }

    /// One representative frequency per window; `None` marks a window with
    /// no discernible pitch.
    pub fn track(&self, waveform: &Waveform) -> Result<Vec<Option<f64>>, TrackerError> {
        if waveform.sample_rate == 0 {
            return Err(TrackerError::InvalidSampleRate);
        }
        let ranges = self.windows(waveform.len(), waveform.sample_rate);
        log::info!(
            "Tracking {} window(s) of {:.3}s at {:.1} BPM",
            ranges.len(),
            self.window_duration(),
            self.bpm
        );

        let frequencies = ranges
            .into_par_iter()
            .enumerate()
            .map(|(index, range)| {
                let window = &waveform.samples[range];
                match spectral_properties(window, waveform.sample_rate) {
                    Ok(summary) => summary.dominant_frequency(),
                    Err(err) => {
                        log::debug!("Window {}: {}", index, err);
                        None
                    }
                }
            })
            .collect();

        Ok(frequencies)
    }
}
