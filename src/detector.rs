//! Fixed-point DTMF detector.
//!
//! Samples are gathered into batches whose length depends on the sample
//! rate. Each batch is scaled to use the full 16-bit range and fed through a
//! bank of 18 integer Goertzel resonators: eight near-DTMF row/column
//! frequencies, two auxiliary dial frequencies and eight harmonic guards. A
//! key is reported when the strongest row and column dominate every other
//! resonator and their levels are within the allowed twist.
//!
//! All arithmetic is 32-bit with wrap-around, matching common DSP intrinsics.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::tone::Button;

/// Resonators per sample rate.
pub const COEFF_COUNT: usize = 18;

/// Resonators covering the DTMF row and column groups.
const DIAL_TONES: usize = 8;

/// Dial tones plus the two auxiliary frequencies averaged into the noise floor.
const DIAL_AND_AUX: usize = 10;

/// Column index whose neighbour check is relaxed.
const FIRST_COLUMN: usize = 4;

// Q15 coefficients, about 32768*cos(2*pi*f/fs). The first eight sit close to
// the DTMF frequencies, chosen so their harmonics share low common factors.
const COEFFS_8KHZ: [i16; COEFF_COUNT] = [
    27860,  // 706 Hz
    26745,  // 784 Hz
    25529,  // 863 Hz
    24216,  // 941 Hz
    19747,  // 1176 Hz
    16384,  // 1333 Hz
    12773,  // 1490 Hz
    8967,   // 1547 Hz
    21319,  // 1098 Hz
    29769,  // 549 Hz
    32706,  // 78 Hz
    32210,  // 235 Hz
    31778,  // 314 Hz
    31226,  // 392 Hz
    -1009,  // 2039 Hz
    -12772, // 2510 Hz
    -22811, // 2980 Hz
    -30555, // 3529 Hz
];

const COEFFS_16KHZ: [i16; COEFF_COUNT] = [
    31516, 31226, 30903, 30555, 29335, 28379, 27316, 26149, 29768, 32008, 32752, 32628, 32518,
    32380, 22812, 18097, 12777, 6026,
];

const COEFFS_44_1KHZ: [i16; COEFF_COUNT] = [
    32601, 32563, 32520, 32473, 32308, 32178, 32031, 31869, 32367, 32667, 32765, 32749, 32734,
    32716, 31394, 30694, 29858, 28712,
];

/// Sample rates with a coefficient table.
pub const SUPPORTED_RATES: [u32; 3] = [8000, 16000, 44100];

struct RateProfile {
    coeffs: &'static [i16; COEFF_COUNT],
    batch: usize,
}

fn rate_profile(sample_rate: u32) -> Option<RateProfile> {
    match sample_rate {
        8000 => Some(RateProfile {
            coeffs: &COEFFS_8KHZ,
            batch: 102,
        }),
        16000 => Some(RateProfile {
            coeffs: &COEFFS_16KHZ,
            batch: 204,
        }),
        44100 => Some(RateProfile {
            coeffs: &COEFFS_44_1KHZ,
            batch: 512,
        }),
        _ => None,
    }
}

/// Detection thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Minimum mean absolute sample value; quieter batches are silence.
    pub power_threshold: i32,
    /// Required ratio of the winning row/column over each harmonic guard.
    pub tone_ratio: i32,
    /// Required ratio of the winning row/column over the other dial tones.
    pub dial_tone_ratio: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            power_threshold: 328,
            tone_ratio: 16,
            dial_tone_ratio: 6,
        }
    }
}

#[cfg(feature = "std")]
fn env_or(key: &str, default: i32) -> i32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
}

#[cfg(feature = "std")]
impl DetectorConfig {
    /// Defaults overridden by `DTMF_POWER_THRESHOLD`, `DTMF_TONE_RATIO` and
    /// `DTMF_DIAL_TONE_RATIO`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            power_threshold: env_or("DTMF_POWER_THRESHOLD", d.power_threshold),
            tone_ratio: env_or("DTMF_TONE_RATIO", d.tone_ratio),
            dial_tone_ratio: env_or("DTMF_DIAL_TONE_RATIO", d.dial_tone_ratio),
        }
    }
}

/// Errors produced when building or feeding a [`DtmfDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorError {
    /// No coefficient table exists for the sample rate.
    UnsupportedSampleRate(u32),
    /// Frames must contain at least one sample and fit in memory alongside a batch.
    InvalidFrameSize,
    /// A frame passed to [`DtmfDetector::process`] had the wrong length.
    FrameSizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorError::UnsupportedSampleRate(rate) => write!(
                f,
                "unsupported sample rate {rate} Hz (expected one of {SUPPORTED_RATES:?})"
            ),
            DetectorError::InvalidFrameSize => {
                write!(f, "frame size must be non-zero and addressable")
            }
            DetectorError::FrameSizeMismatch { expected, actual } => {
                write!(f, "frame has {actual} samples, expected {expected}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DetectorError {}

/// Receiver for detected keys.
pub trait DetectSink {
    fn on_detect(&mut self, button: Button);
}

impl DetectSink for Vec<Button> {
    fn on_detect(&mut self, button: Button) {
        self.push(button);
    }
}

impl<F: FnMut(Button)> DetectSink for F {
    fn on_detect(&mut self, button: Button) {
        self(button)
    }
}

/// Streaming DTMF detector fed with fixed-size frames of 16-bit PCM.
pub struct DtmfDetector {
    sample_rate: u32,
    frame_size: usize,
    batch: usize,
    coeffs: &'static [i16; COEFF_COUNT],
    config: DetectorConfig,
    /// Carried-over samples followed by the current frame.
    samples: Vec<i16>,
    scratch: Vec<i16>,
    pending: usize,
    prev: Option<Button>,
    armed: bool,
}

impl DtmfDetector {
    /// Detector with default thresholds.
    ///
    /// # Errors
    ///
    /// [`DetectorError::UnsupportedSampleRate`] unless `sample_rate` is one of
    /// [`SUPPORTED_RATES`]; [`DetectorError::InvalidFrameSize`] for a zero
    /// `frame_size` or one too large to buffer alongside a batch.
    pub fn new(frame_size: usize, sample_rate: u32) -> Result<Self, DetectorError> {
        Self::with_config(frame_size, sample_rate, DetectorConfig::default())
    }

    /// Detector with explicit thresholds; fails like [`DtmfDetector::new`].
    pub fn with_config(
        frame_size: usize,
        sample_rate: u32,
        config: DetectorConfig,
    ) -> Result<Self, DetectorError> {
        if frame_size == 0 {
            return Err(DetectorError::InvalidFrameSize);
        }
        let profile =
            rate_profile(sample_rate).ok_or(DetectorError::UnsupportedSampleRate(sample_rate))?;
        let capacity = frame_size
            .checked_add(profile.batch)
            .ok_or(DetectorError::InvalidFrameSize)?;
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(capacity)
            .map_err(|_| DetectorError::InvalidFrameSize)?;
        samples.resize(capacity, 0);
        Ok(Self {
            sample_rate,
            frame_size,
            batch: profile.batch,
            coeffs: profile.coeffs,
            config,
            samples,
            scratch: vec![0; profile.batch],
            pending: 0,
            prev: None,
            armed: false,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Samples analysed per Goertzel pass.
    pub fn batch_len(&self) -> usize {
        self.batch
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Drop buffered samples and tone state.
    pub fn reset(&mut self) {
        self.pending = 0;
        self.prev = None;
        self.armed = false;
    }

    /// Feed one frame and report newly registered keys to `sink`.
    ///
    /// A key is registered on the batch following a silence-to-tone
    /// transition, provided that batch still carries a tone. Holding a key
    /// therefore reports it once.
    ///
    /// # Errors
    ///
    /// [`DetectorError::FrameSizeMismatch`] if `frame.len()` differs from the
    /// configured frame size. Nothing is buffered in that case.
    pub fn process<S: DetectSink + ?Sized>(
        &mut self,
        frame: &[i16],
        sink: &mut S,
    ) -> Result<(), DetectorError> {
        if frame.len() != self.frame_size {
            return Err(DetectorError::FrameSizeMismatch {
                expected: self.frame_size,
                actual: frame.len(),
            });
        }
        self.samples[self.pending..self.pending + self.frame_size].copy_from_slice(frame);
        self.pending += self.frame_size;

        let mut offset = 0;
        while self.pending >= self.batch {
            let batch = &self.samples[offset..offset + self.batch];
            let button = classify(batch, &mut self.scratch, self.coeffs, &self.config);

            if self.armed {
                if let Some(b) = button {
                    #[cfg(feature = "verbose-logging")]
                    log::debug!("registered '{}' at {} Hz", b, self.sample_rate);
                    sink.on_detect(b);
                }
                self.armed = false;
            }
            if button.is_some() && self.prev.is_none() {
                self.armed = true;
            }
            self.prev = button;

            offset += self.batch;
            self.pending -= self.batch;
        }
        self.samples.copy_within(offset..offset + self.pending, 0);
        Ok(())
    }
}

/// Q15 multiply of a 16-bit coefficient by a 32-bit accumulator, rounded.
#[inline]
fn mpy48sr(o16: i16, o32: i32) -> i32 {
    let k = i32::from(o16);
    let lo = ((o32 as u16 as i32) * k + 0x4000) >> 15;
    let hi = i32::from((o32 >> 16) as i16) * k;
    (hi << 1).wrapping_add(lo)
}

/// Left shifts needed to normalize `x` into `[0x40000000, 0x7fffffff]`
/// (or the negative mirror). Zero maps to 0 and -1 to 31.
#[inline]
fn norm_l(x: i32) -> i32 {
    match x {
        0 => 0,
        -1 => 31,
        _ => {
            let v = if x < 0 { !x } else { x };
            v.leading_zeros() as i32 - 1
        }
    }
}

/// Second-order Goertzel resonator in fixed point.
struct Resonator {
    coeff: i16,
    s1: i32,
    s2: i32,
}

impl Resonator {
    fn new(coeff: i16) -> Self {
        Self {
            coeff,
            s1: 0,
            s2: 0,
        }
    }

    #[inline]
    fn push(&mut self, x: i16) {
        let s = mpy48sr(self.coeff, self.s1 << 1)
            .wrapping_sub(self.s2)
            .wrapping_add(i32::from(x));
        self.s2 = self.s1;
        self.s1 = s;
    }

    /// `s1^2 + s2^2 - coeff*s1*s2` on the state scaled down by 10 bits.
    fn power(&self) -> i32 {
        let s1 = self.s1 >> 10;
        let s2 = self.s2 >> 10;
        let cross = i32::from(mpy48sr(self.coeff, s1 << 1) as i16) * i32::from(s2 as i16);
        let sq = |v: i32| i32::from(v as i16) * i32::from(v as i16);
        sq(s1).wrapping_add(sq(s2)).wrapping_sub(cross)
    }
}

fn goertzel_power(coeff: i16, samples: &[i16]) -> i32 {
    let mut r = Resonator::new(coeff);
    for &x in samples {
        r.push(x);
    }
    r.power()
}

/// Index of the first strictly largest positive entry in `range`, else `default`.
fn strongest(mag: &[i32], range: core::ops::Range<usize>, default: usize) -> usize {
    let mut best = default;
    let mut level = 0;
    for i in range {
        if level < mag[i] {
            best = i;
            level = mag[i];
        }
    }
    best
}

/// Classify one batch as a key or silence.
fn classify(
    batch: &[i16],
    scratch: &mut [i16],
    coeffs: &[i16; COEFF_COUNT],
    config: &DetectorConfig,
) -> Option<Button> {
    let mean = batch.iter().map(|&s| i32::from(s).abs()).sum::<i32>() / batch.len() as i32;
    if mean < config.power_threshold {
        return None;
    }

    let dial = batch
        .iter()
        .filter(|&&s| s != 0)
        .map(|&s| norm_l(i32::from(s)))
        .fold(32, i32::min);
    let shift = (dial - 16).clamp(0, 16) as u32;
    for (dst, &s) in scratch.iter_mut().zip(batch) {
        *dst = (i32::from(s) << shift) as i16;
    }

    let mut mag = [0i32; COEFF_COUNT];
    for (m, &k) in mag.iter_mut().zip(coeffs.iter()) {
        *m = goertzel_power(k, scratch);
    }
    #[cfg(feature = "verbose-logging")]
    log::trace!("goertzel powers {:?}", mag);

    let row = strongest(&mag, 0..4, 0);
    let col = strongest(&mag, FIRST_COLUMN..DIAL_TONES, FIRST_COLUMN);
    let (row_level, col_level) = (mag[row], mag[col]);

    let mut floor = mag[..DIAL_AND_AUX]
        .iter()
        .fold(0i32, |acc, &m| acc.wrapping_add(m))
        .wrapping_sub(row_level)
        .wrapping_sub(col_level)
        >> 3;
    if floor == 0 {
        floor = 1;
    }
    if row_level.wrapping_div(floor) < config.dial_tone_ratio
        || col_level.wrapping_div(floor) < config.dial_tone_ratio
    {
        return None;
    }

    // twist
    if row_level < (col_level >> 2) {
        return None;
    }
    if col_level < ((row_level >> 1) - (row_level >> 3)) {
        return None;
    }

    for m in mag.iter_mut() {
        if *m == 0 {
            *m = 1;
        }
    }

    for &guard in &mag[DIAL_AND_AUX..] {
        if row_level.wrapping_div(guard) < config.tone_ratio
            || col_level.wrapping_div(guard) < config.tone_ratio
        {
            return None;
        }
    }

    let col_ratio = if col == FIRST_COLUMN {
        config.dial_tone_ratio / 3
    } else {
        config.dial_tone_ratio
    };
    for &other in &mag[..DIAL_AND_AUX] {
        if other == col_level || other == row_level {
            continue;
        }
        if row_level.wrapping_div(other) < config.dial_tone_ratio
            || col_level.wrapping_div(other) < col_ratio
        {
            return None;
        }
    }

    Button::from_grid(row, col - FIRST_COLUMN)
}
