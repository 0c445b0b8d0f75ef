//! # goertzel-dtmf - Goertzel coefficients and DTMF detection
//!
//! Fixed-point building blocks for detecting telephone keypad tones on small
//! targets. Coefficients are computed as `2*cos(2*pi*f/fs)` and quantized to
//! 16 bits with a scale of `16383.5`; the detector runs an integer-only
//! Goertzel filter bank over batches of PCM samples.
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::io` report writers and environment configuration
//! - `verbose-logging`: detector diagnostics through the `log` facade
//!
//! ## Example
//!
//! ```
//! use goertzel_dtmf::coeff::{coeff_table, generate_coeff};
//! use goertzel_dtmf::detector::DtmfDetector;
//! use goertzel_dtmf::tone::{synthesize, Button};
//!
//! assert_eq!(generate_coeff(697.0, 8000.0), 27978);
//! assert_eq!(coeff_table(8000.0).len(), 16);
//!
//! let mut detector = DtmfDetector::new(160, 8000).unwrap();
//! let mut pcm = synthesize(Button::Five, 8000, 60, 8000.0);
//! pcm.resize(640, 0);
//! let mut found: Vec<Button> = Vec::new();
//! for frame in pcm.chunks(160) {
//!     detector.process(frame, &mut found).unwrap();
//! }
//! assert_eq!(found, vec![Button::Five]);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Goertzel coefficient generation
///
/// Quantized `2*cos(w)` coefficients for the DTMF frequencies and their
/// second harmonics.
pub mod coeff;

/// Fixed-point DTMF detector
///
/// Integer Goertzel filter bank with silence, twist and harmonic checks.
pub mod detector;

/// DTMF keypad model and tone synthesis
pub mod tone;

pub use coeff::{coeff_table, generate_coeff, CoeffError};
pub use detector::{DetectSink, DetectorConfig, DetectorError, DtmfDetector};
pub use tone::Button;
