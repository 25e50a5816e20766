mod common;

use approx::assert_relative_eq;
use common::{force_segment, segment_bytes};
use simhist::constants::{MASK_DISPLACEMENT, MASK_PRESSURE};
use simhist::query::{check_continuity, detect_missing_steps, filter_by_step, filter_by_time};
use simhist::time_history::{merge, Channel, Quantity, Segment, SeriesMerger};
use simhist::Diagnostics;

fn decode(bytes: Vec<u8>) -> Segment {
    Segment::from_bytes(&bytes).unwrap()
}

#[test]
fn test_restart_overlap_scenario() {
    let first = decode(force_segment((100..=200).step_by(50), 0.01, 1.0));
    let second = decode(force_segment((200..=300).step_by(50), 0.01, 2.0));

    let series = merge(&[first, second], Channel::Force).unwrap();
    assert_eq!(series.ts_ids(), vec![100, 150, 200, 250, 300]);

    let at_200 = series.samples.iter().find(|s| s.ts_id == 200).unwrap();
    assert_eq!(at_200.components.x, 1.0);
    assert!(check_continuity(&series));
}

#[test]
fn test_non_overlapping_merge_is_concatenate_then_sort() {
    let a = decode(force_segment([40, 50, 60], 1.0, 0.0));
    let b = decode(force_segment([10, 20, 30], 1.0, 0.0));
    let c = decode(force_segment([70], 1.0, 0.0));
    let total = a.len() + b.len() + c.len();

    let series = merge(&[a, b, c], Channel::Force).unwrap();
    assert_eq!(series.len(), total);
    assert_eq!(series.ts_ids(), vec![10, 20, 30, 40, 50, 60, 70]);
}

#[test]
fn test_overlapping_merge_keeps_distinct_ts_ids() {
    let a = decode(force_segment([1, 2, 3, 4], 1.0, 1.0));
    let b = decode(force_segment([3, 4, 5], 1.0, 2.0));
    let c = decode(force_segment([4, 5, 6], 1.0, 3.0));

    let report = SeriesMerger::new(Diagnostics::global())
        .merge(&[a, b, c], Channel::Force)
        .unwrap();
    assert_eq!(report.series.len(), 6);
    assert_eq!(report.duplicates_dropped, 4);

    let winners: Vec<f64> = report.series.samples.iter().map(|s| s.components.x).collect();
    assert_eq!(winners, vec![1.0, 1.0, 1.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_merge_is_deterministic() {
    let build = || {
        vec![
            decode(force_segment([5, 9, 1], 1.0, 1.0)),
            decode(force_segment([9, 2], 1.0, 2.0)),
        ]
    };
    assert_eq!(
        merge(&build(), Channel::Force).unwrap(),
        merge(&build(), Channel::Force).unwrap()
    );
}

#[test]
fn test_missing_step_scenario() {
    let segment = decode(force_segment([0, 50, 100, 200, 250], 0.1, 0.0));
    let series = merge(&[segment], Channel::Force).unwrap();

    let missing = detect_missing_steps(&series);
    assert_eq!(missing.nominal_increment, Some(50));
    assert_eq!(missing.count(), 1);
    assert_eq!(missing.iter().collect::<Vec<_>>(), vec![150]);
}

#[test]
fn test_displacement_node_series_and_filters() {
    // node n, step ts: (ts, -n, 2)
    let records: Vec<_> = (0..20u64)
        .map(|ts| {
            let values = (0..3)
                .flat_map(|n| [ts as f64, -(n as f64), 2.0])
                .chain([ts as f64 * 10.0])
                .collect();
            (ts, None, values)
        })
        .collect();
    let segment = decode(segment_bytes(
        MASK_DISPLACEMENT | MASK_PRESSURE,
        3,
        0.25,
        &records,
    ));

    let node = segment.read_node(.., 2, Quantity::Displacement).unwrap();
    assert_eq!(node.len(), 20);
    assert_eq!(node[4].components.y, -2.0);

    let series = merge(&[segment.clone()], Channel::Displacement { node: 2 }).unwrap();

    let window = filter_by_time(&series, Some(1.0), Some(2.0));
    assert_eq!(window.ts_ids(), vec![4, 5, 6, 7, 8]);
    assert_eq!(filter_by_time(&window, Some(1.0), Some(2.0)), window);

    // magnitude recomputed from filtered components matches the unfiltered one
    let start = series.samples.iter().position(|s| s.ts_id == 4).unwrap();
    for (i, sample) in window.samples.iter().enumerate() {
        assert_relative_eq!(
            sample.components.norm(),
            series.samples[start + i].magnitude(),
            epsilon = 1e-12
        );
    }

    let steps = filter_by_step(&series, Some(18), None).unwrap();
    assert_eq!(steps.ts_ids(), vec![18, 19]);
    assert!(filter_by_step(&series, Some(20), None).unwrap_err().is_index_error());

    let pressure = merge(&[segment], Channel::Pressure).unwrap();
    assert_eq!(pressure.columns().column("pressure").unwrap()[3], 30.0);
}

#[test]
fn test_node_out_of_range_is_loud() {
    let segment = decode(segment_bytes(
        MASK_DISPLACEMENT,
        1,
        1.0,
        &[(1, None, vec![0.0, 0.0, 0.0])],
    ));
    let err = segment
        .read_node(.., 1, Quantity::Displacement)
        .unwrap_err();
    assert!(err.is_index_error());
    assert!(merge(&[segment], Channel::Displacement { node: 5 }).is_err());
}
