//! Continuity checks on merged series.
//!
//! Two independent views:
//! * [`check_continuity`] looks at time only: every consecutive delta must be
//!   strictly positive.
//! * [`detect_missing_steps`] looks at `tsId` only: the most frequent `tsId` delta
//!   is taken as the nominal output increment and the values of the regular grid
//!   `first..=last` that are absent from the series are reported as gap runs.
use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::constants::TsId;
use crate::time_history::TimeHistorySeries;

/// `true` if `time` strictly increases between every pair of consecutive samples.
///
/// Empty and single-sample series are continuous.
pub fn check_continuity(series: &TimeHistorySeries) -> bool {
    series
        .samples
        .iter()
        .tuple_windows()
        .all(|(a, b)| b.time > a.time)
}

/// Positions `i` such that `samples[i].time <= samples[i - 1].time`.
pub fn continuity_breaks(series: &TimeHistorySeries) -> Vec<usize> {
    series
        .samples
        .iter()
        .tuple_windows()
        .enumerate()
        .filter(|(_, (a, b))| b.time <= a.time)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Run of consecutive grid values absent from a series: `first`, `first + inc`, ...
/// up to `last`, `count` values in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepGap {
    pub first: TsId,
    pub last: TsId,
    pub count: u64,
}

impl fmt::Display for StepGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}..={} ({})", self.first, self.last, self.count)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSteps {
    /// Modal positive `tsId` delta; `None` with fewer than two distinct steps.
    pub nominal_increment: Option<TsId>,
    /// Gap runs in increasing order; one entry per hole between two samples.
    pub gaps: Vec<StepGap>,
}

impl MissingSteps {
    /// Total number of absent grid values.
    pub fn count(&self) -> u64 {
        self.gaps.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Every absent grid value, in increasing order. Lazy; a single gap may span
    /// millions of steps.
    pub fn iter(&self) -> impl Iterator<Item = TsId> + '_ {
        let increment = self.nominal_increment.unwrap_or(1) as usize;
        self.gaps
            .iter()
            .flat_map(move |g| (g.first..=g.last).step_by(increment))
    }
}

/// Most frequent positive delta; on a tie the smallest delta wins.
fn modal_increment(ts_ids: &[TsId]) -> Option<TsId> {
    let mut counts: BTreeMap<TsId, usize> = BTreeMap::new();
    for (a, b) in ts_ids.iter().tuple_windows() {
        if b > a {
            *counts.entry(b - a).or_default() += 1;
        }
    }

    let mut best: Option<(TsId, usize)> = None;
    for (delta, n) in counts {
        match best {
            Some((_, best_n)) if n <= best_n => {}
            _ => best = Some((delta, n)),
        }
    }
    best.map(|(delta, _)| delta)
}

/// Report the `tsId`s missing from the regular grid implied by the modal increment.
///
/// Arguments
/// -----------------
/// * `series`: a merged series (`tsId` strictly increasing).
///
/// Return
/// ----------
/// * The nominal increment and the absent grid values grouped in runs, in
///   increasing order. Values of the series lying off the grid are not reported.
///   The cost is linear in the series length, whatever the span of `tsId`s.
pub fn detect_missing_steps(series: &TimeHistorySeries) -> MissingSteps {
    let ts_ids = series.ts_ids();
    let Some(increment) = modal_increment(&ts_ids) else {
        return MissingSteps {
            nominal_increment: None,
            gaps: Vec::new(),
        };
    };

    // grid values are `origin + k * increment`
    let origin = ts_ids[0];
    let gaps = ts_ids
        .iter()
        .tuple_windows()
        .filter(|(a, b)| b > a && **a >= origin)
        .filter_map(|(&a, &b)| {
            let k_first = (a - origin) / increment + 1;
            let k_last = (b - origin - 1) / increment;
            (k_first <= k_last).then(|| StepGap {
                first: origin + k_first * increment,
                last: origin + k_last * increment,
                count: k_last - k_first + 1,
            })
        })
        .collect();

    MissingSteps {
        nominal_increment: Some(increment),
        gaps,
    }
}

/// Both continuity views of one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityReport {
    pub continuous: bool,
    pub breaks: Vec<usize>,
    pub missing: MissingSteps,
}

impl ContinuityReport {
    pub fn from_series(series: &TimeHistorySeries) -> Self {
        let breaks = continuity_breaks(series);
        ContinuityReport {
            continuous: breaks.is_empty(),
            breaks,
            missing: detect_missing_steps(series),
        }
    }
}

impl fmt::Display for ContinuityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "continuous: {}",
            if self.continuous { "yes" } else { "no" }
        )?;
        if !self.breaks.is_empty() {
            writeln!(
                f,
                "non-increasing time at samples: {}",
                self.breaks.iter().join(", ")
            )?;
        }
        match self.missing.nominal_increment {
            Some(inc) => writeln!(f, "nominal increment: {inc}")?,
            None => writeln!(f, "nominal increment: n/a")?,
        }
        if self.missing.is_empty() {
            writeln!(f, "missing steps: none")
        } else {
            writeln!(
                f,
                "missing steps ({}): {}",
                self.missing.count(),
                self.missing.gaps.iter().join(", ")
            )
        }
    }
}
