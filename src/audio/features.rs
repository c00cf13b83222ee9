/// Statistics of one window's normalised amplitude spectrum.
///
/// Frequencies are in Hz. `skew` and `kurtosis` describe the distribution of
/// amplitude values across bins, so they behave like a flatness measure
/// rather than a shape measure over frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralSummary {
    pub mean: f64,
    pub sd: f64,
    pub median: f64,
    pub mode: f64,
    pub q25: f64,
    pub q75: f64,
    pub iqr: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

impl SpectralSummary {
    /// Dominant frequency: the mode, or the median when the mode lands on
    /// the DC bin. `None` when neither gives a positive frequency.
    pub fn dominant_frequency(&self) -> Option<f64> {
        let candidate = if self.mode == 0.0 { self.median } else { self.mode };
        (candidate > 0.0).then_some(candidate)
    }
}
