//! Audio loading: decode, downmix and resample.

mod decode;
mod resample;
mod signal;

pub use decode::decode_audio_file;
pub use resample::resample;
pub use signal::AudioSignal;
