pub mod decode;
pub mod features;
pub mod spectral;
pub mod tracker;

pub use decode::{decode_audio, Waveform};
pub use features::SpectralSummary;
pub use spectral::{spectral_properties, SpectralError};
pub use tracker::{FrequencyTracker, TrackerError};
