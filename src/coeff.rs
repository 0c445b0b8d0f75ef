//! Goertzel coefficient generation for DTMF detection.
//!
//! For a target frequency `f` sampled at `fs` the Goertzel recurrence needs
//! `2*cos(2*pi*f/fs)`. Fixed-point detectors store that value as a 16-bit
//! integer scaled by [`COEFF_SCALE`], truncated toward zero.

use core::f64::consts::PI;
use core::fmt;

use libm::cos;

/// The eight DTMF row and column frequencies in Hz, low group first.
pub const DTMF_FREQUENCIES: [f64; 8] = [
    697.0, 770.0, 852.0, 941.0, 1209.0, 1336.0, 1477.0, 1633.0,
];

/// Sample rates covered by [`write_report`].
pub const SAMPLE_RATES: [f64; 4] = [8000.0, 16000.0, 44000.0, 44100.0];

/// Scale applied to `2*cos(w)` before truncation.
///
/// `2.0 * 16383.5 == 32767.0`, so the full coefficient range maps onto
/// `[-32767, 32767]` without saturating.
pub const COEFF_SCALE: f64 = 16383.5;

/// Number of coefficients per sample rate: fundamentals then second harmonics.
pub const TABLE_LEN: usize = DTMF_FREQUENCIES.len() * 2;

/// Errors reported by [`try_generate_coeff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoeffError {
    /// The sample rate was zero, negative or non-finite.
    InvalidSampleRate,
    /// The frequency was negative or non-finite.
    InvalidFrequency,
}

impl fmt::Display for CoeffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoeffError::InvalidSampleRate => {
                write!(f, "sample rate must be finite and positive")
            }
            CoeffError::InvalidFrequency => {
                write!(f, "frequency must be finite and non-negative")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoeffError {}

/// Quantized Goertzel coefficient for `freq` at `sample_rate`.
///
/// Computes `trunc(16383.5 * 2*cos(2*pi*freq/sample_rate))`. The conversion
/// discards the fractional part, so negative coefficients round toward zero
/// rather than toward negative infinity.
///
/// No validation is performed. A zero sample rate produces a non-finite
/// intermediate which the float-to-int conversion maps to `0`; use
/// [`try_generate_coeff`] to reject such inputs instead.
pub fn generate_coeff(freq: f64, sample_rate: f64) -> i16 {
    let normalized_freq = freq / sample_rate;
    let coeff = 2.0 * cos(2.0 * PI * normalized_freq);
    (COEFF_SCALE * coeff) as i16
}

/// Validating form of [`generate_coeff`].
///
/// # Errors
///
/// Returns [`CoeffError::InvalidSampleRate`] for a non-positive or non-finite
/// rate and [`CoeffError::InvalidFrequency`] for a negative or non-finite
/// frequency.
pub fn try_generate_coeff(freq: f64, sample_rate: f64) -> Result<i16, CoeffError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(CoeffError::InvalidSampleRate);
    }
    if !freq.is_finite() || freq < 0.0 {
        return Err(CoeffError::InvalidFrequency);
    }
    Ok(generate_coeff(freq, sample_rate))
}

/// All coefficients for one sample rate in report order: the eight DTMF
/// frequencies followed by their second harmonics.
pub fn coeff_table(sample_rate: f64) -> [i16; TABLE_LEN] {
    let mut table = [0i16; TABLE_LEN];
    let (fundamentals, harmonics) = table.split_at_mut(DTMF_FREQUENCIES.len());
    for ((fund, harm), &freq) in fundamentals
        .iter_mut()
        .zip(harmonics.iter_mut())
        .zip(DTMF_FREQUENCIES.iter())
    {
        *fund = generate_coeff(freq, sample_rate);
        *harm = generate_coeff(freq * 2.0, sample_rate);
    }
    table
}

/// Write the sixteen coefficients for `sample_rate`, one per line.
#[cfg(feature = "std")]
pub fn generate_coeffs<W: std::io::Write>(out: &mut W, sample_rate: f64) -> std::io::Result<()> {
    for coeff in coeff_table(sample_rate) {
        writeln!(out, "{coeff}")?;
    }
    Ok(())
}

/// Write a `sampling rate <rate>` header, the coefficients and a blank line.
#[cfg(feature = "std")]
pub fn generate_coeffs_nice<W: std::io::Write>(
    out: &mut W,
    sample_rate: f64,
) -> std::io::Result<()> {
    writeln!(out, "sampling rate {sample_rate}")?;
    generate_coeffs(out, sample_rate)?;
    writeln!(out)
}

/// Write the coefficient blocks for every rate in [`SAMPLE_RATES`].
#[cfg(feature = "std")]
pub fn write_report<W: std::io::Write>(out: &mut W) -> std::io::Result<()> {
    for rate in SAMPLE_RATES {
        generate_coeffs_nice(out, rate)?;
    }
    Ok(())
}
