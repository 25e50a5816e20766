//! Reader for one binary time-history segment.
//!
//! A [`Segment`] is the fully decoded content of one `.othd`/`.oisd` file: the
//! validated [`SegmentHeader`], the `tsId` of every record in file order, the
//! absolute time of every record and the flat value payload. Decoding is all or
//! nothing; a file whose body does not hold a whole number of records is rejected
//! with [`SimhistError::TruncatedRead`].
//!
//! The file handle is only held while [`Segment::open`] reads the bytes; the
//! decoded segment is immutable.
use std::ops::RangeBounds;

use camino::{Utf8Path, Utf8PathBuf};
use nalgebra::Vector3;
use nom::{
    multi::count,
    number::complete::{le_f64, le_u64},
    IResult, Parser,
};

use crate::constants::{Seconds, TsId};
use crate::simhist_errors::SimhistError;

use super::{
    quantity::{Channel, Quantity},
    sample::Sample,
    segment_header::SegmentHeader,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    path: Option<Utf8PathBuf>,
    header: SegmentHeader,
    ts_ids: Vec<TsId>,
    times: Vec<Seconds>,
    values: Vec<f64>,
}

/// One decoded record: tsId, optional explicit time, value payload.
type RawRecord = (TsId, Option<Seconds>, Vec<f64>);

fn parse_record(input: &[u8], explicit_time: bool, width: usize) -> IResult<&[u8], RawRecord> {
    let (input, ts_id) = le_u64(input)?;
    let (input, time) = if explicit_time {
        let (input, time) = le_f64(input)?;
        (input, Some(time))
    } else {
        (input, None)
    };
    let (input, values) = count(le_f64, width).parse(input)?;
    Ok((input, (ts_id, time, values)))
}

impl Segment {
    /// Read and decode the segment stored at `path`.
    ///
    /// Return
    /// ----------
    /// * The decoded [`Segment`], remembering `path` as its origin.
    /// * [`SimhistError::IoError`] if the file cannot be read, or any decode error of
    ///   [`Segment::from_bytes`].
    pub fn open(path: &Utf8Path) -> Result<Self, SimhistError> {
        let bytes = std::fs::read(path)?;
        let mut segment = Self::from_bytes(&bytes)?;
        segment.path = Some(path.to_path_buf());
        Ok(segment)
    }

    /// Decode a segment from its raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SimhistError> {
        let (body, header) = SegmentHeader::decode(bytes)?;

        let record_size = header.record_size();
        if body.len() % record_size != 0 {
            return Err(SimhistError::TruncatedRead(format!(
                "segment record {} ({} trailing bytes, record size {})",
                body.len() / record_size,
                body.len() % record_size,
                record_size
            )));
        }

        let n_records = body.len() / record_size;
        let width = header.values_per_record();
        let explicit_time = header.has_explicit_time();

        let mut ts_ids = Vec::with_capacity(n_records);
        let mut times = Vec::with_capacity(n_records);
        let mut values = Vec::with_capacity(n_records * width);

        for chunk in body.chunks_exact(record_size) {
            let (_, (ts_id, time, record_values)) = parse_record(chunk, explicit_time, width)
                .map_err(|e| SimhistError::from_nom(e, "segment record"))?;
            ts_ids.push(ts_id);
            times.push(time.unwrap_or(ts_id as f64 * header.dt));
            values.extend(record_values);
        }

        Ok(Segment {
            path: None,
            header,
            ts_ids,
            times,
            values,
        })
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &SegmentHeader {
        &self.header
    }

    /// Declared number of displacement nodes.
    pub fn node_count(&self) -> usize {
        self.header.node_count as usize
    }

    pub fn dt(&self) -> Seconds {
        self.header.dt
    }

    /// Timestep identifiers, in file order.
    pub fn timesteps(&self) -> &[TsId] {
        &self.ts_ids
    }

    /// Absolute time of every record, in file order.
    pub fn times(&self) -> &[Seconds] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.ts_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts_ids.is_empty()
    }

    pub fn records(&self, quantity: Quantity) -> bool {
        self.header.records(quantity)
    }

    /// Every channel this segment can serve, displacement nodes first.
    pub fn channels(&self) -> Vec<Channel> {
        self.header
            .quantities()
            .into_iter()
            .flat_map(|quantity| {
                (0..self.header.channel_count(quantity)).map(move |node| Channel::new(quantity, node))
            })
            .collect()
    }

    /// Check that `channel` is addressable in this segment.
    fn validate(&self, channel: Channel) -> Result<(), SimhistError> {
        let quantity = channel.quantity();
        if !self.records(quantity) {
            return Err(SimhistError::QuantityNotRecorded(quantity));
        }
        let bound = self.header.channel_count(quantity);
        let node = channel.node_index();
        if node >= bound {
            return Err(SimhistError::NodeOutOfRange {
                node,
                node_count: bound,
            });
        }
        Ok(())
    }

    /// Read the samples of `channel` whose `tsId` lies in `ts_range`, in file order.
    ///
    /// Arguments
    /// -----------------
    /// * `ts_range`: any range of timestep identifiers (`..` for all records).
    /// * `channel`: the series to extract.
    ///
    /// Return
    /// ----------
    /// * The samples, time derived as `tsId * dt` unless the segment stores explicit
    ///   times.
    /// * [`SimhistError::QuantityNotRecorded`] if the segment lacks the quantity.
    /// * [`SimhistError::NodeOutOfRange`] if the node index is not below the declared
    ///   node count (aggregate quantities have the single node `0`).
    pub fn read_channel<R: RangeBounds<TsId>>(
        &self,
        ts_range: R,
        channel: Channel,
    ) -> Result<Vec<Sample>, SimhistError> {
        self.validate(channel)?;

        let quantity = channel.quantity();
        let width = self.header.values_per_record();
        let components = quantity.component_count();
        let start = self
            .header
            .block_offset(quantity)
            .ok_or(SimhistError::QuantityNotRecorded(quantity))?
            + channel.node_index() * components;

        let samples = self
            .ts_ids
            .iter()
            .zip(&self.times)
            .enumerate()
            .filter(|(_, (ts_id, _))| ts_range.contains(*ts_id))
            .map(|(i, (&ts_id, &time))| {
                let offset = i * width + start;
                let v = &self.values[offset..offset + components];
                let vector = match components {
                    1 => Vector3::new(v[0], 0.0, 0.0),
                    _ => Vector3::new(v[0], v[1], v[2]),
                };
                Sample::new(ts_id, time, vector)
            })
            .collect();

        Ok(samples)
    }

    /// Read `quantity` for node `node_id` over `ts_range`.
    ///
    /// Aggregate quantities only accept `node_id == 0`.
    pub fn read_node<R: RangeBounds<TsId>>(
        &self,
        ts_range: R,
        node_id: usize,
        quantity: Quantity,
    ) -> Result<Vec<Sample>, SimhistError> {
        if !quantity.is_node_indexed() && node_id != 0 {
            return Err(SimhistError::NodeOutOfRange {
                node: node_id,
                node_count: 1,
            });
        }
        self.read_channel(ts_range, Channel::new(quantity, node_id))
    }
}
