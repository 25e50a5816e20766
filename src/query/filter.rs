//! Range selection on a series, by time or by position.
use crate::constants::Seconds;
use crate::simhist_errors::SimhistError;
use crate::time_history::TimeHistorySeries;

/// Keep the samples with `start <= time <= end`.
///
/// Both bounds are optional and inclusive. The boundaries are found by binary
/// search, so the series must be time-sorted (as merged series are when
/// continuous): `start_index` is the first sample with `time >= start`,
/// `end_index` the first with `time > end`, and the result is
/// `[start_index, end_index)`. Filtering an already filtered series with the same
/// bounds returns it unchanged.
pub fn filter_by_time(
    series: &TimeHistorySeries,
    start: Option<Seconds>,
    end: Option<Seconds>,
) -> TimeHistorySeries {
    let samples = &series.samples;
    let start_index = start.map_or(0, |t| samples.partition_point(|s| s.time < t));
    let end_index = end.map_or(samples.len(), |t| samples.partition_point(|s| s.time <= t));

    if end_index <= start_index {
        return TimeHistorySeries::empty(series.channel);
    }
    series.slice(start_index, end_index)
}

/// Keep the samples at positions `start_step..=end_step`.
///
/// Missing bounds default to the first and last sample. A bound that does not
/// address a sample is a [`SimhistError::StepOutOfRange`]; `start_step > end_step`
/// selects nothing.
pub fn filter_by_step(
    series: &TimeHistorySeries,
    start_step: Option<usize>,
    end_step: Option<usize>,
) -> Result<TimeHistorySeries, SimhistError> {
    let len = series.len();
    for step in [start_step, end_step].into_iter().flatten() {
        if step >= len {
            return Err(SimhistError::StepOutOfRange { step, len });
        }
    }
    if len == 0 {
        return Ok(TimeHistorySeries::empty(series.channel));
    }

    let start = start_step.unwrap_or(0);
    let end = end_step.unwrap_or(len - 1);
    if start > end {
        return Ok(TimeHistorySeries::empty(series.channel));
    }
    Ok(series.slice(start, end + 1))
}

#[cfg(test)]
mod test_filter {
    use super::*;
    use crate::time_history::{Channel, Sample};
    use nalgebra::Vector3;

    fn series() -> TimeHistorySeries {
        TimeHistorySeries::new(
            Channel::Moment,
            (0..10)
                .map(|i| Sample::new(i * 10, i as f64 * 0.5, Vector3::new(i as f64, 0.0, 1.0)))
                .collect(),
        )
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        let filtered = filter_by_time(&series(), Some(1.0), Some(2.5));
        assert_eq!(filtered.ts_ids(), vec![20, 30, 40, 50]);

        let between = filter_by_time(&series(), Some(0.9), Some(1.1));
        assert_eq!(between.ts_ids(), vec![20]);
    }

    #[test]
    fn test_open_bounds() {
        let s = series();
        assert_eq!(filter_by_time(&s, None, None), s);
        assert_eq!(filter_by_time(&s, Some(4.0), None).ts_ids(), vec![80, 90]);
        assert_eq!(filter_by_time(&s, None, Some(0.0)).ts_ids(), vec![0]);
        assert!(filter_by_time(&s, Some(3.0), Some(1.0)).is_empty());
        assert!(filter_by_time(&s, Some(100.0), None).is_empty());
    }

    #[test]
    fn test_time_filter_is_idempotent() {
        let once = filter_by_time(&series(), Some(0.7), Some(3.2));
        let twice = filter_by_time(&once, Some(0.7), Some(3.2));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_step_filter() {
        let s = series();
        assert_eq!(
            filter_by_step(&s, Some(2), Some(4)).unwrap().ts_ids(),
            vec![20, 30, 40]
        );
        assert_eq!(filter_by_step(&s, Some(8), None).unwrap().len(), 2);
        assert_eq!(filter_by_step(&s, None, None).unwrap(), s);
        assert!(filter_by_step(&s, Some(5), Some(3)).unwrap().is_empty());
        assert_eq!(
            filter_by_step(&s, Some(1), Some(10)).unwrap_err(),
            SimhistError::StepOutOfRange { step: 10, len: 10 }
        );

        let empty = TimeHistorySeries::empty(Channel::Force);
        assert!(filter_by_step(&empty, None, None).unwrap().is_empty());
        assert!(filter_by_step(&empty, Some(0), None).is_err());
    }
}
