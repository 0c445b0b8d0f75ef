//! Criterion benchmarks for `goertzel-dtmf`; see `benches/`.
