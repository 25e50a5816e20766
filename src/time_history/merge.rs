//! Restart reconciliation: many segments, one series per channel.
//!
//! Segments are concatenated in discovery order, stably sorted by `tsId`, and the
//! first occurrence of every `tsId` is kept. Earlier-discovered segments therefore
//! win on overlap. The result is deterministic for a given segment order.
//!
//! Continuity of the merged series (strictly increasing time) is checked and
//! reported, never repaired. With `strict_continuity` the violation becomes a
//! [`SimhistError::ContinuityViolation`].
use std::collections::{BTreeMap, BTreeSet};

use crate::diagnostics::Diagnostics;
use crate::params::SimhistParams;
use crate::query::continuity::check_continuity;
use crate::simhist_errors::SimhistError;

use super::{quantity::Channel, segment::Segment, series::TimeHistorySeries};

/// Outcome of merging one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub series: TimeHistorySeries,
    /// Samples discarded because an earlier segment already held their `tsId`.
    pub duplicates_dropped: usize,
    /// Segments that recorded the channel's quantity.
    pub segments_used: usize,
    pub continuous: bool,
}

/// Merges segments into canonical series, reporting through an explicit logger.
#[derive(Debug, Clone, Copy)]
pub struct SeriesMerger<'a> {
    diagnostics: Diagnostics<'a>,
    strict_continuity: bool,
}

impl<'a> SeriesMerger<'a> {
    pub fn new(diagnostics: Diagnostics<'a>) -> Self {
        SeriesMerger {
            diagnostics,
            strict_continuity: false,
        }
    }

    pub fn with_params(diagnostics: Diagnostics<'a>, params: &SimhistParams) -> Self {
        SeriesMerger {
            diagnostics,
            strict_continuity: params.strict_continuity,
        }
    }

    pub fn strict_continuity(mut self, strict: bool) -> Self {
        self.strict_continuity = strict;
        self
    }

    /// Merge `channel` across `segments`, in the given (discovery) order.
    ///
    /// Arguments
    /// -----------------
    /// * `segments`: decoded segments, earliest-discovered first.
    /// * `channel`: the series to build.
    ///
    /// Return
    /// ----------
    /// * A [`MergeReport`]. An empty segment list, or segments none of which record
    ///   the quantity, give an empty series.
    /// * [`SimhistError::NodeOutOfRange`] if a segment recording the quantity declares
    ///   fewer nodes than the channel needs.
    /// * [`SimhistError::ContinuityViolation`] in strict mode when the merged times are
    ///   not strictly increasing.
    pub fn merge(
        &self,
        segments: &[Segment],
        channel: Channel,
    ) -> Result<MergeReport, SimhistError> {
        let quantity = channel.quantity();
        let mut samples = Vec::new();
        let mut segments_used = 0;

        for (i, segment) in segments.iter().enumerate() {
            if !segment.records(quantity) {
                self.diagnostics.debug(format_args!(
                    "segment {} ({}) does not record {quantity}, skipped",
                    i,
                    segment.path().map_or("<memory>", |p| p.as_str())
                ));
                continue;
            }
            samples.extend(segment.read_channel(.., channel)?);
            segments_used += 1;
        }

        let total = samples.len();
        samples.sort_by_key(|s| s.ts_id);
        samples.dedup_by_key(|s| s.ts_id);
        let duplicates_dropped = total - samples.len();

        if duplicates_dropped > 0 {
            self.diagnostics.warn(format_args!(
                "{channel}: {duplicates_dropped} duplicate timesteps dropped, earlier segment kept"
            ));
        }

        let series = TimeHistorySeries::new(channel, samples);
        let continuous = check_continuity(&series);

        if !continuous {
            let message = format!("{channel}: merged times are not strictly increasing");
            if self.strict_continuity {
                return Err(SimhistError::ContinuityViolation(message));
            }
            self.diagnostics.warn(format_args!("{message}"));
        }

        self.diagnostics.info(format_args!(
            "{channel}: {} samples from {segments_used} segments",
            series.len()
        ));

        Ok(MergeReport {
            series,
            duplicates_dropped,
            segments_used,
            continuous,
        })
    }

    /// Merge every channel present in at least one segment.
    ///
    /// Channels are merged independently: a channel that fails (a segment declaring
    /// fewer nodes, a strict continuity violation) is reported with its error and
    /// does not prevent the others from merging.
    pub fn merge_all(
        &self,
        segments: &[Segment],
    ) -> BTreeMap<Channel, Result<MergeReport, SimhistError>> {
        let channels: BTreeSet<Channel> = segments.iter().flat_map(|s| s.channels()).collect();
        channels
            .into_iter()
            .map(|channel| {
                let result = self.merge(segments, channel);
                if let Err(err) = &result {
                    self.diagnostics
                        .warn(format_args!("{channel}: not merged: {err}"));
                }
                (channel, result)
            })
            .collect()
    }
}

/// Merge `channel` with the global logger and the default (non-strict) policy.
pub fn merge(segments: &[Segment], channel: Channel) -> Result<TimeHistorySeries, SimhistError> {
    SeriesMerger::new(Diagnostics::global())
        .merge(segments, channel)
        .map(|report| report.series)
}
