//! # Tagged binary container decoder
//!
//! Decoder for the self-describing container used for full-field snapshots
//! (`binary/<problem>.<tsId>.<ext>` files of a case). It answers "which variables
//! and which zones does this snapshot hold" without touching the field data.
//!
//! Layout (little-endian)
//! -----------------
//! ```text
//! offset 0 : 8 bytes   magic, starts with "#!TDV"
//! offset 8 : 8 bytes   version (ignored)
//! then     : title      u32 code points, 0-terminated
//! then     : u32        variable count n
//! then     : n names    u32 code points, 0-terminated
//! then     : zones      f32 299.0 marker, name, i32 topology code
//! ```
//!
//! Contracts
//! -----------------
//! * [`decode_header`] – title and ordered variables.
//! * [`decode_zones`] – ordered zones, at most `max_zones`.
//! * [`decode_container`] – both at once, as a [`FieldSnapshot`].
//! * [`read_snapshot`] – the same from a file path; the file is read fully and closed
//!   before decoding.
//!
//! All decoders are pure over the bytes they are given. A failed decode returns an
//! error and nothing else: there are no partially filled variable or zone lists.
//! No checksum is verified.
//!
//! Modules
//! -----------------
//! * [`code_point_string`](crate::tagged_binary::code_point_string) – 4-byte-per-character strings (ASCII only).
//! * [`container_header`](crate::tagged_binary::container_header) – magic, title, variable table.
//! * [`zone_record`](crate::tagged_binary::zone_record) – zone marker scan and topology table.
use std::fmt;

use camino::Utf8Path;

use crate::simhist_errors::SimhistError;

pub mod code_point_string;
pub mod container_header;
pub mod zone_record;

pub use container_header::{ContainerHeader, Variable};
pub use zone_record::{Zone, ZoneDimensions, ZoneKind};

/// Header and zones of one field-snapshot container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub header: ContainerHeader,
    pub zones: Vec<Zone>,
}

/// Decode the title and the ordered variable table of a container.
///
/// Arguments
/// -----------------
/// * `bytes`: the container from offset 0.
///
/// Return
/// ----------
/// * The [`ContainerHeader`], or [`SimhistError::BadMagic`] /
///   [`SimhistError::TruncatedRead`].
pub fn decode_header(bytes: &[u8]) -> Result<ContainerHeader, SimhistError> {
    ContainerHeader::decode(bytes).map(|(_, header)| header)
}

/// Decode the zone records of a container, at most `max_zones` of them.
///
/// The header is decoded first to locate the zone section, so header errors are
/// reported here too.
pub fn decode_zones(bytes: &[u8], max_zones: usize) -> Result<Vec<Zone>, SimhistError> {
    let (rest, _) = ContainerHeader::decode(bytes)?;
    zone_record::scan_zones(rest, max_zones)
}

/// Decode header and zones in one pass.
pub fn decode_container(bytes: &[u8], max_zones: usize) -> Result<FieldSnapshot, SimhistError> {
    let (rest, header) = ContainerHeader::decode(bytes)?;
    let zones = zone_record::scan_zones(rest, max_zones)?;
    Ok(FieldSnapshot { header, zones })
}

/// Read a container file and decode it.
pub fn read_snapshot(path: &Utf8Path, max_zones: usize) -> Result<FieldSnapshot, SimhistError> {
    let bytes = std::fs::read(path)?;
    decode_container(&bytes, max_zones)
}

impl fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if self.zones.is_empty() {
            return writeln!(f, "(no zones)");
        }
        for (i, zone) in self.zones.iter().enumerate() {
            writeln!(f, "zone {i}: {zone}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_tagged_binary {
    use super::*;
    use crate::test_fixtures::ContainerBuilder;

    #[test]
    fn test_field_quadrilateral_scenario() {
        let bytes = ContainerBuilder::new("RESULTS")
            .variables(&["X", "Y"])
            .zone("FIELD", 3)
            .build();

        let header = decode_header(&bytes).unwrap();
        assert_eq!(header.variable_names(), vec!["X", "Y"]);

        let zones = decode_zones(&bytes, 10).unwrap();
        assert_eq!(
            zones,
            vec![Zone {
                name: "FIELD".to_string(),
                kind: ZoneKind::FeQuadrilateral
            }]
        );
    }

    #[test]
    fn test_zone_cap_is_configurable() {
        let mut builder = ContainerBuilder::new("MANY").variables(&["X"]);
        for i in 0..12 {
            builder = builder.zone(&format!("Z{i}"), 0);
        }
        let bytes = builder.build();

        assert_eq!(decode_zones(&bytes, 10).unwrap().len(), 10);
        assert_eq!(decode_container(&bytes, 12).unwrap().zones.len(), 12);
        assert_eq!(decode_container(&bytes, 100).unwrap().zones.len(), 12);
    }

    #[test]
    fn test_bad_magic_propagates_to_zone_decode() {
        let bytes = ContainerBuilder::new("T")
            .magic(*b"GARBAGE!")
            .zone("FIELD", 3)
            .build();
        let err = decode_zones(&bytes, 10).unwrap_err();
        assert!(err.is_format_error());
        assert!(matches!(err, SimhistError::BadMagic(_)));
    }

    #[test]
    fn test_display_lists_zones() {
        let bytes = ContainerBuilder::new("T")
            .variables(&["X"])
            .zone("INLET", 0)
            .build();
        let snapshot = decode_container(&bytes, 10).unwrap();
        let text = snapshot.to_string();
        assert!(text.contains("zone 0: INLET (ORDERED)"));
    }
}
