//! Summary statistics over series columns and file sizes.
use std::fmt;

use itertools::Itertools;

use crate::time_history::{Channel, TimeHistorySeries};

/// Order statistics of a set of values.
///
/// The median of an even-sized set is the mean of the two middle values.
///
/// Display
/// -----------------
/// * `format!("{}", stats)` – single line, `n=4, min=1, max=9, mean=4.5, median=4`.
/// * `format!("{:#}", stats)` – one field per line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl OrderStats {
    /// `None` for an empty input.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = values
            .iter()
            .copied()
            .sorted_by(f64::total_cmp)
            .collect::<Vec<_>>();
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Some(OrderStats {
            count: n,
            min: sorted[0],
            max: sorted[n - 1],
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
        })
    }
}

impl fmt::Display for OrderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "count  : {}", self.count)?;
            writeln!(f, "min    : {}", self.min)?;
            writeln!(f, "max    : {}", self.max)?;
            writeln!(f, "mean   : {}", self.mean)?;
            write!(f, "median : {}", self.median)
        } else {
            write!(
                f,
                "n={}, min={}, max={}, mean={}, median={}",
                self.count, self.min, self.max, self.mean, self.median
            )
        }
    }
}

/// Per-column statistics of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub channel: Channel,
    pub samples: usize,
    /// One entry per named column (`dx, dy, dz, magnitude`, ...). Empty for an empty
    /// series.
    pub columns: Vec<(&'static str, OrderStats)>,
}

impl SeriesStats {
    pub fn column(&self, name: &str) -> Option<&OrderStats> {
        self.columns
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, stats)| stats)
    }
}

/// Min, max, mean and median of every component column and of the magnitude.
pub fn summary_stats(series: &TimeHistorySeries) -> SeriesStats {
    let columns = series
        .columns()
        .columns
        .into_iter()
        .filter_map(|column| {
            OrderStats::from_values(&column.values).map(|stats| (column.name, stats))
        })
        .collect();

    SeriesStats {
        channel: series.channel,
        samples: series.len(),
        columns,
    }
}

impl fmt::Display for SeriesStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAME_WIDTH: usize = 10;
        const VALUE_WIDTH: usize = 14;

        writeln!(f, "{} ({} samples)", self.channel, self.samples)?;
        if self.columns.is_empty() {
            return writeln!(f, "(empty series)");
        }

        let border = format!(
            "+{:-<name$}+{}",
            "",
            format!("{:-<value$}+", "", value = VALUE_WIDTH + 1).repeat(4),
            name = NAME_WIDTH + 1
        );
        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<name$}| {:<value$}| {:<value$}| {:<value$}| {:<value$}|",
            "column",
            "min",
            "max",
            "mean",
            "median",
            name = NAME_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        for (name, stats) in &self.columns {
            writeln!(
                f,
                "| {:<name$}| {:<value$.6e}| {:<value$.6e}| {:<value$.6e}| {:<value$.6e}|",
                name,
                stats.min,
                stats.max,
                stats.mean,
                stats.median,
                name = NAME_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}
