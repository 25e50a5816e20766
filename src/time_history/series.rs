//! Merged time-history series and their column export.
use std::io;

use serde::Serialize;

use crate::constants::{Seconds, TsId};
use crate::simhist_errors::SimhistError;

use super::{quantity::Channel, sample::Sample};

/// Samples of one channel keyed by `tsId`.
///
/// Series produced by the merger are sorted by strictly increasing `tsId`; a series
/// keeps no reference to the segments it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeHistorySeries {
    pub channel: Channel,
    pub samples: Vec<Sample>,
}

impl TimeHistorySeries {
    pub fn new(channel: Channel, samples: Vec<Sample>) -> Self {
        TimeHistorySeries { channel, samples }
    }

    pub fn empty(channel: Channel) -> Self {
        Self::new(channel, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Vec<Seconds> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn ts_ids(&self) -> Vec<TsId> {
        self.samples.iter().map(|s| s.ts_id).collect()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Copy of the samples in `[start, end)`, same channel.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::new(self.channel, self.samples[start..end].to_vec())
    }

    /// Column view: `times` plus the named component arrays of the channel's
    /// quantity, index-aligned with the samples.
    pub fn columns(&self) -> SeriesColumns {
        let quantity = self.channel.quantity();
        let names = quantity.column_names();

        let columns = names
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let values = self
                    .samples
                    .iter()
                    .map(|s| match (name, i) {
                        ("magnitude", _) => s.magnitude(),
                        (_, i) => s.components[i],
                    })
                    .collect();
                NamedColumn { name, values }
            })
            .collect();

        SeriesColumns {
            channel: self.channel.to_string(),
            ts_ids: self.ts_ids(),
            times: self.times(),
            columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumn {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Query result handed to reporting and plotting callers.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumns {
    pub channel: String,
    pub ts_ids: Vec<TsId>,
    pub times: Vec<Seconds>,
    pub columns: Vec<NamedColumn>,
}

impl SeriesColumns {
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Write the columns as CSV: `ts_id,time,<component columns>`, one row per sample.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), SimhistError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        let mut header = vec!["ts_id", "time"];
        header.extend(self.column_names());
        wtr.write_record(&header)?;

        for row in self.rows() {
            wtr.serialize(row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Row view of the columns, one [`SeriesRow`] per sample.
    pub fn rows(&self) -> impl Iterator<Item = SeriesRow> + '_ {
        self.ts_ids
            .iter()
            .zip(&self.times)
            .enumerate()
            .map(move |(row, (&ts_id, &time))| SeriesRow {
                ts_id,
                time,
                values: self.columns.iter().map(|c| c.values[row]).collect(),
            })
    }
}

/// One sample of a [`SeriesColumns`], values in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub ts_id: TsId,
    pub time: Seconds,
    pub values: Vec<f64>,
}
