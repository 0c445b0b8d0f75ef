//! Synthesize a dialled number and run it back through the detector.

use goertzel_dtmf::tone::synthesize_sequence;
use goertzel_dtmf::{Button, DtmfDetector};

fn main() {
    let number = "5551234#";
    let keys: Vec<Button> = number.chars().filter_map(Button::from_char).collect();
    let sample_rate = 8000;
    let frame_size = 160;

    let pcm = synthesize_sequence(&keys, sample_rate, 60, 60, 6000.0);
    let mut detector = DtmfDetector::new(frame_size, sample_rate).unwrap();
    let mut dialled = String::new();
    for frame in pcm.chunks_exact(frame_size) {
        detector
            .process(frame, &mut |b: Button| dialled.push(b.as_char()))
            .unwrap();
    }

    println!("sent:     {number}");
    println!("detected: {dialled}");
}
