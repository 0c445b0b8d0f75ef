//! DTMF keypad model and PCM tone synthesis.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;

use libm::sin;

use crate::coeff::DTMF_FREQUENCIES;

/// One key of the 4x4 DTMF keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    One,
    Two,
    Three,
    A,
    Four,
    Five,
    Six,
    B,
    Seven,
    Eight,
    Nine,
    C,
    Star,
    Zero,
    Pound,
    D,
}

const KEYPAD: [[Button; 4]; 4] = [
    [Button::One, Button::Two, Button::Three, Button::A],
    [Button::Four, Button::Five, Button::Six, Button::B],
    [Button::Seven, Button::Eight, Button::Nine, Button::C],
    [Button::Star, Button::Zero, Button::Pound, Button::D],
];

impl Button {
    /// All sixteen keys in row-major keypad order.
    pub const ALL: [Button; 16] = [
        Button::One,
        Button::Two,
        Button::Three,
        Button::A,
        Button::Four,
        Button::Five,
        Button::Six,
        Button::B,
        Button::Seven,
        Button::Eight,
        Button::Nine,
        Button::C,
        Button::Star,
        Button::Zero,
        Button::Pound,
        Button::D,
    ];

    /// Key at `row` (low group) and `col` (high group), both `0..4`.
    pub fn from_grid(row: usize, col: usize) -> Option<Button> {
        KEYPAD.get(row).and_then(|r| r.get(col)).copied()
    }

    /// `(row, col)` position on the keypad.
    pub fn grid(self) -> (usize, usize) {
        let idx = self as usize;
        (idx / 4, idx % 4)
    }

    /// Low and high group frequencies in Hz.
    pub fn frequencies(self) -> (f64, f64) {
        let (row, col) = self.grid();
        (DTMF_FREQUENCIES[row], DTMF_FREQUENCIES[4 + col])
    }

    /// Keypad label: digits, `*`, `#` or `A`-`D`.
    pub fn as_char(self) -> char {
        match self {
            Button::One => '1',
            Button::Two => '2',
            Button::Three => '3',
            Button::A => 'A',
            Button::Four => '4',
            Button::Five => '5',
            Button::Six => '6',
            Button::B => 'B',
            Button::Seven => '7',
            Button::Eight => '8',
            Button::Nine => '9',
            Button::C => 'C',
            Button::Star => '*',
            Button::Zero => '0',
            Button::Pound => '#',
            Button::D => 'D',
        }
    }

    /// Parse a keypad character. Letters are accepted in either case.
    pub fn from_char(c: char) -> Option<Button> {
        let c = c.to_ascii_uppercase();
        Button::ALL.iter().copied().find(|b| b.as_char() == c)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Number of samples covering `duration_ms` at `sample_rate`.
pub fn samples_for(sample_rate: u32, duration_ms: u32) -> usize {
    (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize
}

/// Synthesize the dual tone for `button` as 16-bit PCM.
///
/// Each sine has peak `amplitude`, so the sum peaks at twice that; keep
/// `amplitude` at or below `16383.0` to stay clear of clipping.
pub fn synthesize(button: Button, sample_rate: u32, duration_ms: u32, amplitude: f64) -> Vec<i16> {
    let (low, high) = button.frequencies();
    let fs = f64::from(sample_rate);
    (0..samples_for(sample_rate, duration_ms))
        .map(|i| {
            let t = i as f64 / fs;
            let v = amplitude * (sin(2.0 * PI * low * t) + sin(2.0 * PI * high * t));
            v as i16
        })
        .collect()
}

/// Synthesize `buttons` back to back, each tone followed by `gap_ms` of silence.
pub fn synthesize_sequence(
    buttons: &[Button],
    sample_rate: u32,
    tone_ms: u32,
    gap_ms: u32,
    amplitude: f64,
) -> Vec<i16> {
    let gap = vec![0i16; samples_for(sample_rate, gap_ms)];
    let per_key = samples_for(sample_rate, tone_ms) + gap.len();
    let mut out = Vec::with_capacity(buttons.len() * per_key);
    for &button in buttons {
        out.extend(synthesize(button, sample_rate, tone_ms, amplitude));
        out.extend_from_slice(&gap);
    }
    out
}
