//! Recorded quantities and the channels that address one series.
//!
//! A segment records any subset of four quantities:
//!
//! | Quantity       | Indexed by | Stored values | Column names                  |
//! |----------------|------------|---------------|-------------------------------|
//! | displacement   | node       | 3 per node    | `dx, dy, dz, magnitude`       |
//! | force          | –          | 3             | `tx, ty, tz, magnitude`       |
//! | moment         | –          | 3             | `mx, my, mz, magnitude`       |
//! | pressure       | –          | 1             | `pressure`                    |
//!
//! A [`Channel`] picks one series out of a segment: one displacement node, or
//! one aggregate quantity.
use std::{fmt, str::FromStr};

use crate::constants::{MASK_DISPLACEMENT, MASK_FORCE, MASK_MOMENT, MASK_PRESSURE};
use crate::simhist_errors::SimhistError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantity {
    Displacement,
    Force,
    Moment,
    Pressure,
}

impl Quantity {
    /// Every quantity, in on-disk record order.
    pub const ALL: [Quantity; 4] = [
        Quantity::Displacement,
        Quantity::Force,
        Quantity::Moment,
        Quantity::Pressure,
    ];

    /// Bit of the segment header quantity mask.
    pub fn mask_bit(&self) -> u32 {
        match self {
            Quantity::Displacement => MASK_DISPLACEMENT,
            Quantity::Force => MASK_FORCE,
            Quantity::Moment => MASK_MOMENT,
            Quantity::Pressure => MASK_PRESSURE,
        }
    }

    /// Number of stored values per node (displacement) or per timestep (aggregates).
    pub fn component_count(&self) -> usize {
        match self {
            Quantity::Pressure => 1,
            _ => 3,
        }
    }

    pub fn is_node_indexed(&self) -> bool {
        matches!(self, Quantity::Displacement)
    }

    /// Names of the columns exposed to callers, magnitude included.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            Quantity::Displacement => &["dx", "dy", "dz", "magnitude"],
            Quantity::Force => &["tx", "ty", "tz", "magnitude"],
            Quantity::Moment => &["mx", "my", "mz", "magnitude"],
            Quantity::Pressure => &["pressure"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Displacement => "displacement",
            Quantity::Force => "force",
            Quantity::Moment => "moment",
            Quantity::Pressure => "pressure",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = SimhistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "displacement" | "disp" => Ok(Quantity::Displacement),
            "force" => Ok(Quantity::Force),
            "moment" => Ok(Quantity::Moment),
            "pressure" => Ok(Quantity::Pressure),
            other => Err(SimhistError::InvalidParameter(format!(
                "unknown quantity: {other}"
            ))),
        }
    }
}

/// One series inside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Displacement { node: usize },
    Force,
    Moment,
    Pressure,
}

impl Channel {
    /// Channel of `quantity`; `node` is only kept for displacement.
    pub fn new(quantity: Quantity, node: usize) -> Self {
        match quantity {
            Quantity::Displacement => Channel::Displacement { node },
            Quantity::Force => Channel::Force,
            Quantity::Moment => Channel::Moment,
            Quantity::Pressure => Channel::Pressure,
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            Channel::Displacement { .. } => Quantity::Displacement,
            Channel::Force => Quantity::Force,
            Channel::Moment => Quantity::Moment,
            Channel::Pressure => Quantity::Pressure,
        }
    }

    /// Node index inside the quantity block (0 for aggregate quantities).
    pub fn node_index(&self) -> usize {
        match self {
            Channel::Displacement { node } => *node,
            _ => 0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Displacement { node } => write!(f, "displacement:{node}"),
            other => write!(f, "{}", other.quantity()),
        }
    }
}

impl FromStr for Channel {
    type Err = SimhistError;

    /// Accepts `force`, `moment`, `pressure`, `displacement:<node>` or `node:<node>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((prefix, node)) => {
                if !matches!(
                    prefix.to_ascii_lowercase().as_str(),
                    "displacement" | "disp" | "node"
                ) {
                    return Err(SimhistError::InvalidParameter(format!(
                        "only displacement channels take a node index: {s}"
                    )));
                }
                let node = node.trim().parse::<usize>().map_err(|_| {
                    SimhistError::InvalidParameter(format!("invalid node index in {s:?}"))
                })?;
                Ok(Channel::Displacement { node })
            }
            None => {
                let quantity = Quantity::from_str(s)?;
                if quantity.is_node_indexed() {
                    return Err(SimhistError::InvalidParameter(
                        "displacement channels need a node index (displacement:<node>)".into(),
                    ));
                }
                Ok(Channel::new(quantity, 0))
            }
        }
    }
}
