use assert_cmd::Command;
use goertzel_dtmf::tone::synthesize_sequence;
use goertzel_dtmf::Button;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn detects_keys_in_8k_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("digits.wav");
    let keys = [Button::Four, Button::Two, Button::Star, Button::A];
    let pcm = synthesize_sequence(&keys, 8000, 50, 50, 8000.0);
    write_wav(&path, 8000, 1, &pcm);

    let output = Command::cargo_bin("detect-wav")
        .unwrap()
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        format!(
            "{}: {} samples, 8000Hz, 1 channels, 16000 avg bytes per sec",
            path.display(),
            pcm.len()
        )
    );
    assert_eq!(
        &lines[1..],
        &["detected '4'", "detected '2'", "detected '*'", "detected 'A'", ""]
    );
}

#[test]
fn frame_size_flag_is_honoured() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("digits16k.wav");
    let keys = [Button::Nine, Button::Zero];
    let pcm = synthesize_sequence(&keys, 16000, 50, 50, 8000.0);
    write_wav(&path, 16000, 1, &pcm);

    let output = Command::cargo_bin("detect-wav")
        .unwrap()
        .args([path.to_str().unwrap(), "--frame-size", "100"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("detected '9'\ndetected '0'\n"));
}

#[test]
fn stereo_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("stereo.wav");
    write_wav(&path, 8000, 2, &[0i16; 320]);

    let output = Command::cargo_bin("detect-wav")
        .unwrap()
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unsupported WAV format"));
}

#[test]
fn missing_file_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nope.wav");

    let output = Command::cargo_bin("detect-wav")
        .unwrap()
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unable to open file"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    Command::cargo_bin("detect-wav").unwrap().assert().failure();
}

#[test]
fn oversized_frame_size_is_an_error_not_a_panic() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("short.wav");
    write_wav(&path, 8000, 1, &[0i16; 320]);

    let output = Command::cargo_bin("detect-wav")
        .unwrap()
        .args([path.to_str().unwrap(), "--frame-size", &usize::MAX.to_string()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("frame size"));
    assert!(!stderr.contains("panicked"));
}
