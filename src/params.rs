//! # Reader and merge parameters
//!
//! [`SimhistParams`] groups the few knobs the decoders and the case loader
//! expose: the zone enumeration cap, the case directory conventions, and the
//! continuity policy applied after a merge. Build it with
//! [`SimhistParams::builder`], which validates every value.
//!
//! ```rust
//! use simhist::params::SimhistParams;
//!
//! let params = SimhistParams::builder()
//!     .max_zones(32)
//!     .strict_continuity(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.max_zones, 32);
//! ```
use crate::constants::{
    DEFAULT_MAX_ZONES, DEFAULT_SEGMENT_DIR, DEFAULT_SEGMENT_EXTENSIONS, DEFAULT_SNAPSHOT_DIR,
};
use crate::simhist_errors::SimhistError;

/// Configuration shared by the decoders, the merger and the case loader.
///
/// Fields
/// -----------------
/// * `max_zones` – Upper bound on zones enumerated per field-snapshot container.
/// * `snapshot_dir` – Case sub-directory holding `<problem>.<tsId>.<ext>` containers.
/// * `segment_dir` – Case sub-directory holding time-history segments.
/// * `segment_extensions` – File suffixes (without dot) recognized as segments.
/// * `strict_continuity` – When `true`, a merged series whose times are not strictly
///   increasing is returned as [`SimhistError::ContinuityViolation`] instead of
///   being only reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SimhistParams {
    pub max_zones: usize,
    pub snapshot_dir: String,
    pub segment_dir: String,
    pub segment_extensions: Vec<String>,
    pub strict_continuity: bool,
}

impl SimhistParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SimhistParamsBuilder`] initialized with the defaults.
    pub fn builder() -> SimhistParamsBuilder {
        SimhistParamsBuilder::new()
    }

    /// `true` if `extension` (without dot) names a time-history segment.
    pub fn is_segment_extension(&self, extension: &str) -> bool {
        self.segment_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

impl Default for SimhistParams {
    fn default() -> Self {
        SimhistParams {
            max_zones: DEFAULT_MAX_ZONES,
            snapshot_dir: DEFAULT_SNAPSHOT_DIR.to_string(),
            segment_dir: DEFAULT_SEGMENT_DIR.to_string(),
            segment_extensions: DEFAULT_SEGMENT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            strict_continuity: false,
        }
    }
}

/// Builder for [`SimhistParams`], with validation.
#[derive(Debug, Clone)]
pub struct SimhistParamsBuilder {
    params: SimhistParams,
}

impl Default for SimhistParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimhistParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: SimhistParams::default(),
        }
    }

    pub fn max_zones(mut self, v: usize) -> Self {
        self.params.max_zones = v;
        self
    }

    pub fn snapshot_dir(mut self, v: impl Into<String>) -> Self {
        self.params.snapshot_dir = v.into();
        self
    }

    pub fn segment_dir(mut self, v: impl Into<String>) -> Self {
        self.params.segment_dir = v.into();
        self
    }

    pub fn segment_extensions<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.segment_extensions = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn strict_continuity(mut self, v: bool) -> Self {
        self.params.strict_continuity = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_zones ≥ 1`.
    /// * `snapshot_dir` and `segment_dir` are non-empty.
    /// * `segment_extensions` is non-empty and no extension is empty or starts with a dot.
    ///
    /// Return
    /// ----------
    /// * `Ok(SimhistParams)` or [`SimhistError::InvalidParameter`] naming the first
    ///   rule that failed.
    pub fn build(self) -> Result<SimhistParams, SimhistError> {
        let p = &self.params;

        if p.max_zones == 0 {
            return Err(SimhistError::InvalidParameter(
                "max_zones must be >= 1".into(),
            ));
        }
        if p.snapshot_dir.is_empty() || p.segment_dir.is_empty() {
            return Err(SimhistError::InvalidParameter(
                "case sub-directories must be non-empty".into(),
            ));
        }
        if p.segment_extensions.is_empty() {
            return Err(SimhistError::InvalidParameter(
                "at least one segment extension is required".into(),
            ));
        }
        if let Some(bad) = p
            .segment_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(SimhistError::InvalidParameter(format!(
                "segment extension must be non-empty and given without a dot: {bad:?}"
            )));
        }

        Ok(self.params)
    }
}

#[cfg(test)]
mod test_params {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SimhistParams::default();
        assert_eq!(params.max_zones, 10);
        assert_eq!(params.snapshot_dir, "binary");
        assert_eq!(params.segment_dir, "othd_files");
        assert!(params.is_segment_extension("othd"));
        assert!(params.is_segment_extension("OISD"));
        assert!(!params.is_segment_extension("plt"));
        assert!(!params.strict_continuity);
    }

    #[test]
    fn test_builder_rejects_zero_zones() {
        let err = SimhistParams::builder().max_zones(0).build().unwrap_err();
        assert_eq!(
            err,
            SimhistError::InvalidParameter("max_zones must be >= 1".into())
        );
    }

    #[test]
    fn test_builder_rejects_dotted_extension() {
        let err = SimhistParams::builder()
            .segment_extensions([".othd"])
            .build()
            .unwrap_err();
        assert!(matches!(err, SimhistError::InvalidParameter(_)));
    }
}
