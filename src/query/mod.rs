//! # Series queries
//!
//! Read-only operations on a merged [`TimeHistorySeries`](crate::time_history::TimeHistorySeries):
//!
//! * [`filter_by_time`] / [`filter_by_step`] – inclusive range selection.
//! * [`check_continuity`] / [`detect_missing_steps`] – time and `tsId` consistency.
//! * [`summary_stats`] – per-column order statistics.
pub mod continuity;
pub mod filter;
pub mod stats;

pub use continuity::{
    check_continuity, continuity_breaks, detect_missing_steps, ContinuityReport, MissingSteps,
    StepGap,
};
pub use filter::{filter_by_step, filter_by_time};
pub use stats::{summary_stats, OrderStats, SeriesStats};
