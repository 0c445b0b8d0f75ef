//! Print quantized Goertzel coefficients for the DTMF frequencies and their
//! second harmonics at 8000, 16000, 44000 and 44100 Hz.

use anyhow::{Context, Result};
use goertzel_dtmf::coeff::write_report;
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    dtmf_cli::init_logging();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out).context("failed to write coefficient report")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
