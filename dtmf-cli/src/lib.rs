use goertzel_dtmf::detector::{DetectorConfig, DetectorError, DtmfDetector, SUPPORTED_RATES};
use goertzel_dtmf::Button;
use hound::{SampleFormat, WavReader};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Default frame length handed to the detector.
pub const DEFAULT_FRAME_SIZE: usize = 256;

/// Header fields of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Total samples across all channels.
    pub samples: u32,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub int_samples: bool,
}

impl WavInfo {
    pub fn avg_bytes_per_sec(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample / 8)
    }

    /// Mono 16-bit integer PCM at a rate the detector has tables for.
    pub fn is_supported(&self) -> bool {
        self.channels == 1
            && self.int_samples
            && self.bits_per_sample == 16
            && SUPPORTED_RATES.contains(&self.sample_rate)
    }
}

impl fmt::Display for WavInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {}Hz, {} channels, {} avg bytes per sec",
            self.samples,
            self.sample_rate,
            self.channels,
            self.avg_bytes_per_sec()
        )
    }
}

/// Open `path` and read its header without decoding samples.
pub fn read_wav_info(path: &Path) -> Result<WavInfo, Box<dyn Error>> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    Ok(WavInfo {
        samples: reader.len(),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        int_samples: spec.sample_format == SampleFormat::Int,
    })
}

/// Decode every sample of a 16-bit integer WAV file.
pub fn read_wav_i16(path: &Path) -> Result<Vec<i16>, Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}

/// Run `samples` through a detector in `frame_size` chunks. The final
/// partial frame is padded with silence.
pub fn detect_buttons(
    samples: &[i16],
    sample_rate: u32,
    frame_size: usize,
    config: DetectorConfig,
) -> Result<Vec<Button>, DetectorError> {
    let mut detector = DtmfDetector::with_config(frame_size, sample_rate, config)?;
    let mut found = Vec::new();
    let mut frame = vec![0i16; frame_size];
    for chunk in samples.chunks(frame_size) {
        frame[..chunk.len()].copy_from_slice(chunk);
        frame[chunk.len()..].fill(0);
        detector.process(&frame, &mut found)?;
    }
    log::debug!(
        "scanned {} samples in {}-sample frames, {} buttons",
        samples.len(),
        frame_size,
        found.len()
    );
    Ok(found)
}

/// Log to stderr at the level given by `RUST_LOG` (default `warn`), keeping
/// stdout free for program output.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
