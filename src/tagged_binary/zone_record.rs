//! Zone records of a tagged container.
//!
//! After the header, the container holds zone records opened by the float
//! marker [`ZONE_MARKER`] (`299.0`). Each record starts with the zone name (code
//! point string) followed by a signed 32-bit topology code. Zones are found by
//! stepping through the remaining stream one 4-byte word at a time.
//!
//! Only the name and the topology are decoded. The geometry fields that follow
//! (I/J/K extents, node and element counts) are not read; [`Zone::dimensions`]
//! reports them as [`ZoneDimensions::NotDecoded`] rather than guessing.
use std::fmt;

use nom::{
    number::complete::{le_i32, le_u32},
    IResult,
};

use crate::constants::{UNNAMED_ZONE, ZONE_MARKER};
use crate::simhist_errors::SimhistError;

use super::code_point_string::code_point_string;

/// Topology of a zone, from the record's type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Ordered,
    FeLineSeg,
    FeTriangle,
    FeQuadrilateral,
    FeTetrahedron,
    FeBrick,
    Unknown(i32),
}

impl ZoneKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ZoneKind::Ordered,
            1 => ZoneKind::FeLineSeg,
            2 => ZoneKind::FeTriangle,
            3 => ZoneKind::FeQuadrilateral,
            4 => ZoneKind::FeTetrahedron,
            5 => ZoneKind::FeBrick,
            other => ZoneKind::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ZoneKind::Ordered => 0,
            ZoneKind::FeLineSeg => 1,
            ZoneKind::FeTriangle => 2,
            ZoneKind::FeQuadrilateral => 3,
            ZoneKind::FeTetrahedron => 4,
            ZoneKind::FeBrick => 5,
            ZoneKind::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Ordered => write!(f, "ORDERED"),
            ZoneKind::FeLineSeg => write!(f, "FELINESEG"),
            ZoneKind::FeTriangle => write!(f, "FETRIANGLE"),
            ZoneKind::FeQuadrilateral => write!(f, "FEQUADRILATERAL"),
            ZoneKind::FeTetrahedron => write!(f, "FETETRAHEDRON"),
            ZoneKind::FeBrick => write!(f, "FEBRICK"),
            ZoneKind::Unknown(code) => write!(f, "Unknown({code})"),
        }
    }
}

/// Geometry extents of a zone. The decoder never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneDimensions {
    NotDecoded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub kind: ZoneKind,
}

impl Zone {
    /// Parse a zone record body (the bytes right after the marker).
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, name) = code_point_string(input)?;
        let (input, code) = le_i32(input)?;
        let name = if name.is_empty() {
            UNNAMED_ZONE.to_string()
        } else {
            name
        };
        Ok((
            input,
            Zone {
                name,
                kind: ZoneKind::from_code(code),
            },
        ))
    }

    pub fn dimensions(&self) -> ZoneDimensions {
        ZoneDimensions::NotDecoded
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Enumerate the zone records found in `input`, at most `max_zones` of them.
///
/// Arguments
/// -----------------
/// * `input`: bytes following the container header.
/// * `max_zones`: upper bound on the number of zones returned.
///
/// Return
/// ----------
/// * The zones in stream order. The scan stops at the cap or when fewer than four
///   bytes remain.
/// * [`SimhistError::TruncatedRead`] if a marker is found but its record runs past
///   the end of the stream; zones decoded before it are discarded.
pub fn scan_zones(input: &[u8], max_zones: usize) -> Result<Vec<Zone>, SimhistError> {
    let marker_bits = ZONE_MARKER.to_bits();
    let mut zones = Vec::new();
    let mut rest = input;

    while zones.len() < max_zones {
        let Ok((next, word)) = le_u32::<_, nom::error::Error<&[u8]>>(rest) else {
            break;
        };
        rest = next;
        if word != marker_bits {
            continue;
        }
        let (next, zone) =
            Zone::parse(rest).map_err(|e| SimhistError::from_nom(e, "zone record"))?;
        rest = next;
        zones.push(zone);
    }

    Ok(zones)
}
