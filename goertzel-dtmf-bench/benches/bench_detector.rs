use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use goertzel_dtmf::detector::{DtmfDetector, SUPPORTED_RATES};
use goertzel_dtmf::tone::synthesize_sequence;
use goertzel_dtmf::Button;

const FRAME: usize = 160;

fn bench_detect(c: &mut Criterion) {
    let mut g = c.benchmark_group("detect");
    for &rate in &SUPPORTED_RATES {
        let mut pcm = synthesize_sequence(&Button::ALL, rate, 50, 50, 8000.0);
        pcm.truncate(pcm.len() - pcm.len() % FRAME);
        g.throughput(Throughput::Elements(pcm.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(rate), &pcm, |b, pcm| {
            b.iter(|| {
                let mut det = DtmfDetector::new(FRAME, rate).unwrap();
                let mut found: Vec<Button> = Vec::new();
                for frame in pcm.chunks(FRAME) {
                    det.process(frame, &mut found).unwrap();
                }
                found
            });
        });
    }
    g.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
