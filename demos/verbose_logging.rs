//! Demonstrates enabling verbose logging for the detector.
use goertzel_dtmf::tone::synthesize_sequence;
use goertzel_dtmf::{Button, DtmfDetector};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let pcm = synthesize_sequence(&[Button::Zero], 8000, 50, 50, 8000.0);
    let mut detector = DtmfDetector::new(160, 8000).unwrap();
    let mut found: Vec<Button> = Vec::new();
    for frame in pcm.chunks(160) {
        detector.process(frame, &mut found).unwrap();
    }
}
