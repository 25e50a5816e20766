//! # Constants and type definitions for simhist
//!
//! This module centralizes the **format constants** of the two binary layouts the
//! crate decodes and the **type aliases** shared across the time-history layer.
//!
//! ## Overview
//!
//! - Tagged container constants (magic prefix, field widths, zone marker)
//! - Time-history segment constants (header size, quantity mask bits)
//! - Core type aliases (`TsId`, `Seconds`)
//! - Case directory conventions (default sub-directory names and suffixes)

// -------------------------------------------------------------------------------------------------
// Tagged binary container
// -------------------------------------------------------------------------------------------------

/// Literal prefix every tagged container magic must start with.
pub const CONTAINER_MAGIC_PREFIX: &[u8] = b"#!TDV";

/// Width in bytes of the magic field at offset 0.
pub const CONTAINER_MAGIC_LEN: usize = 8;

/// Width in bytes of the (uninterpreted) version field following the magic.
pub const CONTAINER_VERSION_LEN: usize = 8;

/// Float value opening every zone record.
pub const ZONE_MARKER: f32 = 299.0;

/// Default bound on the number of zones enumerated per container.
pub const DEFAULT_MAX_ZONES: usize = 10;

/// Name given to a zone whose encoded name is empty.
pub const UNNAMED_ZONE: &str = "Unnamed";

/// Largest code point kept by the 4-byte-per-character string decoder.
pub const MAX_ASCII_CODE_POINT: u32 = 127;

// -------------------------------------------------------------------------------------------------
// Time-history segments
// -------------------------------------------------------------------------------------------------

/// Size in bytes of the fixed segment header.
pub const SEGMENT_HEADER_LEN: usize = 24;

/// Quantity mask bit: per-node displacement triples.
pub const MASK_DISPLACEMENT: u32 = 1 << 0;
/// Quantity mask bit: aggregate force triple.
pub const MASK_FORCE: u32 = 1 << 1;
/// Quantity mask bit: aggregate moment triple.
pub const MASK_MOMENT: u32 = 1 << 2;
/// Quantity mask bit: aggregate pressure scalar.
pub const MASK_PRESSURE: u32 = 1 << 3;
/// Union of every known quantity bit.
pub const MASK_ALL: u32 = MASK_DISPLACEMENT | MASK_FORCE | MASK_MOMENT | MASK_PRESSURE;

/// Segment flag bit: each record stores an explicit `f64` time after its `tsId`.
pub const FLAG_EXPLICIT_TIME: u32 = 1 << 0;

// -------------------------------------------------------------------------------------------------
// Case directory conventions
// -------------------------------------------------------------------------------------------------

/// Default sub-directory holding field-snapshot containers.
pub const DEFAULT_SNAPSHOT_DIR: &str = "binary";

/// Default sub-directory holding time-history segments.
pub const DEFAULT_SEGMENT_DIR: &str = "othd_files";

/// Default time-history segment suffixes.
pub const DEFAULT_SEGMENT_EXTENSIONS: [&str; 2] = ["othd", "oisd"];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Integer timestep identifier, not necessarily contiguous.
pub type TsId = u64;

/// Simulation time in seconds.
pub type Seconds = f64;
