//! Goertzel coefficient example.
//!
//! Prints the quantized coefficient table for a few sample rates next to the
//! frequency each entry targets.

use goertzel_dtmf::coeff::{coeff_table, DTMF_FREQUENCIES};

fn main() {
    println!("=== Goertzel coefficients ===\n");

    for rate in [8000.0, 16000.0, 48000.0] {
        println!("{rate} Hz");
        let table = coeff_table(rate);
        let freqs = DTMF_FREQUENCIES
            .iter()
            .copied()
            .chain(DTMF_FREQUENCIES.iter().map(|f| f * 2.0));
        for (freq, coeff) in freqs.zip(table) {
            println!("  {freq:>6} Hz -> {coeff:>6}");
        }
        println!();
    }
}
