//! # Time-history segments and series
//!
//! Reads the per-node displacement and the aggregate force, moment and pressure
//! records a solver writes to `othd_files/`, one file per run or restart, and
//! reconciles them into one series per [`Channel`].
//!
//! Pipeline
//! -----------------
//! 1. [`Segment::open`] decodes one file (header, then fixed-size records).
//! 2. [`SeriesMerger::merge`] concatenates segments in discovery order, sorts by
//!    `tsId`, keeps the first sample of every duplicated `tsId`.
//! 3. The resulting [`TimeHistorySeries`] is handed to the [`query`](crate::query)
//!    functions or exported through [`TimeHistorySeries::columns`].
//!
//! Modules
//! -----------------
//! * [`segment_header`](crate::time_history::segment_header) – header layout and record geometry.
//! * [`segment`](crate::time_history::segment) – one decoded file, node/range reads.
//! * [`quantity`](crate::time_history::quantity) – quantities and channels.
//! * [`sample`](crate::time_history::sample) – one `(tsId, time, components)` sample.
//! * [`series`](crate::time_history::series) – merged series and column export.
//! * [`merge`](crate::time_history::merge) – restart reconciliation.
pub mod merge;
pub mod quantity;
pub mod sample;
pub mod segment;
pub mod segment_header;
pub mod series;

pub use merge::{merge, MergeReport, SeriesMerger};
pub use quantity::{Channel, Quantity};
pub use sample::Sample;
pub use segment::Segment;
pub use segment_header::SegmentHeader;
pub use series::{NamedColumn, SeriesColumns, SeriesRow, TimeHistorySeries};
