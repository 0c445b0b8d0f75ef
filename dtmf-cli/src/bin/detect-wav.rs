//! Detect DTMF keys in a mono 16-bit WAV file.

use anyhow::Result;
use clap::Parser;
use dtmf_cli::{detect_buttons, init_logging, read_wav_i16, read_wav_info, DEFAULT_FRAME_SIZE};
use goertzel_dtmf::DetectorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Detect DTMF tones in a WAV file")]
struct Args {
    /// Mono 16-bit PCM WAV sampled at 8000, 16000 or 44100 Hz
    input: PathBuf,

    /// Samples handed to the detector per call
    #[arg(long, default_value_t = DEFAULT_FRAME_SIZE)]
    frame_size: usize,
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();
    let name = args.input.display();

    let info = match read_wav_info(&args.input) {
        Ok(info) => info,
        Err(e) => {
            log::debug!("open {name}: {e}");
            eprintln!("{name}: unable to open file");
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("{name}: {info}");

    if !info.is_supported() {
        eprintln!("{name}: unsupported WAV format");
        return Ok(ExitCode::FAILURE);
    }

    let samples = match read_wav_i16(&args.input) {
        Ok(samples) => samples,
        Err(e) => {
            log::debug!("decode {name}: {e}");
            eprintln!("{name}: unable to open file");
            return Ok(ExitCode::FAILURE);
        }
    };
    let buttons = detect_buttons(
        &samples,
        info.sample_rate,
        args.frame_size,
        DetectorConfig::from_env(),
    )?;
    for button in buttons {
        println!("detected '{button}'");
    }
    println!();
    Ok(ExitCode::SUCCESS)
}
