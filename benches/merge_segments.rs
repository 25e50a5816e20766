use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use simhist::constants::{MASK_DISPLACEMENT, MASK_FORCE};
use simhist::time_history::{Channel, Segment, SeriesMerger};
use simhist::Diagnostics;

/// Segment with `nodes` displacement nodes plus force, steps `first..first + len`.
fn segment_bytes(nodes: u32, first: u64, len: u64) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(MASK_DISPLACEMENT | MASK_FORCE).to_le_bytes());
    out.extend_from_slice(&nodes.to_le_bytes());
    out.extend_from_slice(&1e-3f64.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for ts in first..first + len {
        out.extend_from_slice(&ts.to_le_bytes());
        for v in 0..(nodes as usize * 3 + 3) {
            out.extend_from_slice(&(ts as f64 + v as f64).to_le_bytes());
        }
    }
    out
}

/// 20 restarts of 5 000 steps each, every restart overlapping the previous one by 500.
fn overlapping_segments(nodes: u32) -> Vec<Segment> {
    (0..20u64)
        .map(|i| Segment::from_bytes(&segment_bytes(nodes, i * 4_500, 5_000)).unwrap())
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let bytes = segment_bytes(64, 0, 5_000);
    c.bench_function("segment/decode_64_nodes_5000_steps", |b| {
        b.iter(|| black_box(Segment::from_bytes(black_box(&bytes)).unwrap()))
    });
}

fn bench_merge_channel(c: &mut Criterion) {
    let segments = overlapping_segments(8);
    let merger = SeriesMerger::new(Diagnostics::global());

    c.bench_function("merge/force_20_overlapping_segments", |b| {
        b.iter(|| black_box(merger.merge(black_box(&segments), Channel::Force).unwrap()))
    });
}

fn bench_merge_all(c: &mut Criterion) {
    let merger = SeriesMerger::new(Diagnostics::global());

    c.bench_function("merge/all_channels_8_nodes", |b| {
        b.iter_batched(
            || overlapping_segments(8),
            |segments| black_box(merger.merge_all(&segments)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_decode, bench_merge_channel, bench_merge_all
);
criterion_main!(benches);
