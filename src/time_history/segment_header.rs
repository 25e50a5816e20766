//! Fixed 24-byte header of a time-history segment.
//!
//! ```text
//! offset 0  : u32 quantity mask  bit0 displacement, bit1 force, bit2 moment, bit3 pressure
//! offset 4  : u32 node_count     displacement nodes per record (0 without displacement)
//! offset 8  : f64 dt             time increment, time = tsId * dt
//! offset 16 : u32 flags          bit0: explicit f64 time stored in each record
//! offset 20 : u32 reserved
//! ```
//!
//! The header fixes the size of every record that follows:
//!
//! ```text
//! u64 tsId | [f64 time] | displacement block | force | moment | pressure
//! ```
use std::fmt;

use nom::{
    number::complete::{le_f64, le_u32},
    IResult,
};

use crate::constants::{FLAG_EXPLICIT_TIME, MASK_ALL, MASK_DISPLACEMENT};
use crate::simhist_errors::SimhistError;

use super::quantity::Quantity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHeader {
    pub quantity_mask: u32,
    pub node_count: u32,
    pub dt: f64,
    pub flags: u32,
}

impl SegmentHeader {
    /// Raw field parse, no validation.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, quantity_mask) = le_u32(input)?;
        let (input, node_count) = le_u32(input)?;
        let (input, dt) = le_f64(input)?;
        let (input, flags) = le_u32(input)?;
        let (input, _reserved) = le_u32(input)?;
        Ok((
            input,
            SegmentHeader {
                quantity_mask,
                node_count,
                dt,
                flags,
            },
        ))
    }

    /// Parse and validate the header at the start of a segment.
    ///
    /// Validation rules
    /// -----------------
    /// * the quantity mask is non-zero and only uses known bits,
    /// * the displacement bit is set if and only if `node_count > 0`,
    /// * `dt` is finite.
    pub fn decode(input: &[u8]) -> Result<(&[u8], Self), SimhistError> {
        let (rest, header) =
            Self::parse(input).map_err(|e| SimhistError::from_nom(e, "segment header"))?;

        if header.quantity_mask == 0 || header.quantity_mask & !MASK_ALL != 0 {
            return Err(SimhistError::InvalidFormat(format!(
                "invalid quantity mask {:#06b}",
                header.quantity_mask
            )));
        }
        let has_displacement = header.quantity_mask & MASK_DISPLACEMENT != 0;
        if has_displacement != (header.node_count > 0) {
            return Err(SimhistError::InvalidFormat(format!(
                "displacement flag {} inconsistent with node count {}",
                has_displacement, header.node_count
            )));
        }
        if !header.dt.is_finite() {
            return Err(SimhistError::InvalidFormat(format!(
                "non-finite time increment {}",
                header.dt
            )));
        }

        Ok((rest, header))
    }

    pub fn records(&self, quantity: Quantity) -> bool {
        self.quantity_mask & quantity.mask_bit() != 0
    }

    pub fn has_explicit_time(&self) -> bool {
        self.flags & FLAG_EXPLICIT_TIME != 0
    }

    /// Recorded quantities, in record order.
    pub fn quantities(&self) -> Vec<Quantity> {
        Quantity::ALL
            .into_iter()
            .filter(|q| self.records(*q))
            .collect()
    }

    /// Number of addressable series of `quantity` (nodes for displacement, 1 for
    /// aggregates, 0 if not recorded).
    pub fn channel_count(&self, quantity: Quantity) -> usize {
        if !self.records(quantity) {
            0
        } else if quantity.is_node_indexed() {
            self.node_count as usize
        } else {
            1
        }
    }

    /// Number of `f64` values a record stores for `quantity`.
    fn block_width(&self, quantity: Quantity) -> usize {
        self.channel_count(quantity) * quantity.component_count()
    }

    /// Offset, in `f64` values from the start of the value payload, of the block
    /// holding `quantity`. `None` if the quantity is not recorded.
    pub fn block_offset(&self, quantity: Quantity) -> Option<usize> {
        if !self.records(quantity) {
            return None;
        }
        Some(
            Quantity::ALL
                .iter()
                .take_while(|q| **q != quantity)
                .map(|q| self.block_width(*q))
                .sum(),
        )
    }

    /// Number of `f64` values in the payload of one record.
    pub fn values_per_record(&self) -> usize {
        Quantity::ALL.iter().map(|q| self.block_width(*q)).sum()
    }

    /// Size in bytes of one record, `tsId` and optional time included.
    pub fn record_size(&self) -> usize {
        let time = if self.has_explicit_time() { 8 } else { 0 };
        8 + time + 8 * self.values_per_record()
    }
}

impl fmt::Display for SegmentHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 40;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );
        let quantities = self
            .quantities()
            .iter()
            .map(|q| q.name())
            .collect::<Vec<_>>()
            .join(", ");
        let time_source = if self.has_explicit_time() {
            "explicit per record".to_string()
        } else {
            format!("tsId * {}", self.dt)
        };

        writeln!(f, "{border}")?;
        for (label, value) in [
            ("Quantities", quantities),
            ("Nodes", self.node_count.to_string()),
            ("dt", self.dt.to_string()),
            ("Time", time_source),
            ("Record size", format!("{} bytes", self.record_size())),
        ] {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                label,
                value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}
