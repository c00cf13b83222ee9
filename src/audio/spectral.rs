//! Amplitude-spectrum statistics for a single analysis window.

use rustfft::{num_complex::Complex, FftPlanner};
use thiserror::Error;

use super::features::SpectralSummary;

/// Standard deviation of the normalised amplitudes, relative to their mean,
/// below which the spectrum counts as flat.
const FLAT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectralError {
    #[error("window contains no samples")]
    EmptyWindow,

    #[error("window spectrum has no energy")]
    Silent,

    #[error("window spectrum is flat across {bins} bins")]
    FlatSpectrum { bins: usize },
}

/// Compute spectral statistics of `samples` recorded at `sample_rate` Hz.
pub fn spectral_properties(samples: &[f32], sample_rate: u32) -> Result<SpectralSummary, SpectralError> {
    if samples.is_empty() {
        return Err(SpectralError::EmptyWindow);
    }

    let n = samples.len();
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    // Real input: bins above n/2 mirror the lower half.
    let magnitudes: Vec<f64> = buffer[..n / 2 + 1].iter().map(|c| c.norm()).collect();
    let freq_resolution = sample_rate as f64 / n as f64;

    summarize(&magnitudes, freq_resolution)
}

/// Statistics over a magnitude spectrum whose bin `k` sits at
/// `k * freq_resolution` Hz.
pub fn summarize(magnitudes: &[f64], freq_resolution: f64) -> Result<SpectralSummary, SpectralError> {
    let bins = magnitudes.len();
    if bins == 0 {
        return Err(SpectralError::EmptyWindow);
    }

    let total: f64 = magnitudes.iter().sum();
    if !total.is_finite() || total <= f64::EPSILON {
        return Err(SpectralError::Silent);
    }

    let freq = |k: usize| k as f64 * freq_resolution;
    let amp: Vec<f64> = magnitudes.iter().map(|m| m / total).collect();

    let mean: f64 = amp.iter().enumerate().map(|(k, a)| freq(k) * a).sum();
    let sd = amp
        .iter()
        .enumerate()
        .map(|(k, a)| a * (freq(k) - mean).powi(2))
        .sum::<f64>()
        .sqrt();

    let mode = freq(argmax(&amp));

    let mut cumulative = Vec::with_capacity(bins);
    let mut running = 0.0;
    for a in &amp {
        running += a;
        cumulative.push(running);
    }
    let median = freq(crossing_bin(&cumulative, 0.5));
    let q25 = freq(crossing_bin(&cumulative, 0.25));
    let q75 = freq(crossing_bin(&cumulative, 0.75));

    // Moments of the amplitude values themselves.
    let amp_mean = 1.0 / bins as f64;
    let variance = amp.iter().map(|a| (a - amp_mean).powi(2)).sum::<f64>() / bins as f64;
    let w = variance.sqrt();
    if bins < 2 || w <= FLAT_TOLERANCE * amp_mean {
        return Err(SpectralError::FlatSpectrum { bins });
    }

    let dof = (bins - 1) as f64;
    let third: f64 = amp.iter().map(|a| (a - amp_mean).powi(3)).sum();
    let fourth: f64 = amp.iter().map(|a| (a - amp_mean).powi(4)).sum();
    let skew = (third / dof) / w.powi(3);
    let kurtosis = (fourth / dof) / w.powi(4);

    Ok(SpectralSummary {
        mean,
        sd,
        median,
        mode,
        q25,
        q75,
        iqr: q75 - q25,
        skew,
        kurtosis,
    })
}

/// Index of the largest value; the first one wins a tie.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// First bin whose cumulative amplitude exceeds `q`.
fn crossing_bin(cumulative: &[f64], q: f64) -> usize {
    cumulative
        .iter()
        .position(|&c| c > q)
        .unwrap_or(cumulative.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: u32, seconds: f64) -> Vec<f32> {
        let n = (sample_rate as f64 * seconds) as usize;
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn silent_window_is_reported_not_divided() {
        let result = spectral_properties(&vec![0.0; 8000], 8000);
        assert_eq!(result, Err(SpectralError::Silent));
    }

    #[test]
    fn empty_window_is_reported() {
        assert_eq!(spectral_properties(&[], 8000), Err(SpectralError::EmptyWindow));
    }

    #[test]
    fn single_sample_is_flat() {
        let result = spectral_properties(&[0.5], 8000);
        assert_eq!(result, Err(SpectralError::FlatSpectrum { bins: 1 }));
    }

    #[test]
    fn constant_magnitudes_are_flat() {
        let result = summarize(&[2.0; 64], 1.0);
        assert_eq!(result, Err(SpectralError::FlatSpectrum { bins: 64 }));
    }

    #[test]
    fn pure_tone_mode_is_tone_frequency() {
        let summary = spectral_properties(&sine(440.0, 8000, 1.0), 8000).unwrap();
        assert!((summary.mode - 440.0).abs() < 1e-9);
        assert!(summary.skew.is_finite());
        assert!(summary.kurtosis.is_finite());
        assert!(summary.kurtosis > summary.skew);
    }

    #[test]
    fn quartiles_bracket_the_median() {
        let summary = summarize(&[1.0, 2.0, 4.0, 2.0, 1.0], 10.0).unwrap();
        // cumulative: 0.1, 0.3, 0.7, 0.9, 1.0
        assert_eq!(summary.q25, 10.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.q75, 30.0);
        assert_eq!(summary.iqr, 20.0);
        assert_eq!(summary.mode, 20.0);
        assert!((summary.mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn mode_tie_prefers_lowest_bin() {
        let summary = summarize(&[0.0, 3.0, 1.0, 3.0], 5.0).unwrap();
        assert_eq!(summary.mode, 5.0);
    }

    #[test]
    fn dc_only_signal_has_zero_mode() {
        let summary = summarize(&[5.0, 1.0, 0.5, 0.25], 1.0).unwrap();
        assert_eq!(summary.mode, 0.0);
        assert_eq!(summary.median, 0.0);
        assert_eq!(summary.dominant_frequency(), None);
    }
}
