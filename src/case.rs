//! # Case directory locator
//!
//! A case is a directory laid out as
//!
//! ```text
//! <case>/binary/<problem>.<tsId>.<ext>     field-snapshot containers
//! <case>/othd_files/*.othd | *.oisd        time-history segments
//! ```
//!
//! (sub-directory names and segment suffixes come from [`SimhistParams`]).
//! [`Case`] only resolves and orders these files and then hands them to the
//! decoders; it never writes anything back.
//!
//! Files are decoded independently: a corrupt segment or snapshot is recorded and
//! skipped while the healthy ones are still evaluated. The first failure remains
//! available to the caller through [`SegmentLoad::first_error`].
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::constants::TsId;
use crate::diagnostics::Diagnostics;
use crate::params::SimhistParams;
use crate::query::OrderStats;
use crate::simhist_errors::SimhistError;
use crate::tagged_binary::{self, FieldSnapshot};
use crate::time_history::Segment;

const SNAPSHOT_FILE_PATTERN: &str = r"^(?P<problem>.+)\.(?P<ts>\d+)\.(?P<ext>[A-Za-z0-9_]+)$";

/// A `<problem>.<tsId>.<ext>` field-snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    pub path: Utf8PathBuf,
    pub problem: String,
    pub ts_id: TsId,
    pub extension: String,
}

impl SnapshotFile {
    /// Parse the file name of `path`; `None` if it does not follow the convention.
    pub fn from_path(path: &Utf8Path, pattern: &Regex) -> Option<Self> {
        let captures = pattern.captures(path.file_name()?)?;
        Some(SnapshotFile {
            path: path.to_path_buf(),
            problem: captures["problem"].to_string(),
            ts_id: captures["ts"].parse().ok()?,
            extension: captures["ext"].to_string(),
        })
    }
}

pub fn snapshot_file_pattern() -> Result<Regex, SimhistError> {
    Regex::new(SNAPSHOT_FILE_PATTERN).map_err(|e| SimhistError::InvalidParameter(e.to_string()))
}

/// Segments decoded from a case, healthy ones and failures side by side.
#[derive(Debug, Default)]
pub struct SegmentLoad {
    /// Successfully decoded segments, in discovery order.
    pub segments: Vec<Segment>,
    pub failures: Vec<(Utf8PathBuf, SimhistError)>,
}

impl SegmentLoad {
    pub fn first_error(&self) -> Option<&SimhistError> {
        self.failures.first().map(|(_, err)| err)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All segments, or the first failure if any file could not be decoded.
    pub fn into_result(self) -> Result<Vec<Segment>, SimhistError> {
        match self.failures.into_iter().next() {
            Some((_, err)) => Err(err),
            None => Ok(self.segments),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    root: Utf8PathBuf,
    params: SimhistParams,
    snapshots: Vec<SnapshotFile>,
    segment_paths: Vec<Utf8PathBuf>,
}

/// Regular files of `dir` (symlinks followed), sorted by name. A missing directory
/// is empty.
fn list_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SimhistError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = Utf8PathBuf::from_path_buf(entry?.path()).map_err(|p| {
            SimhistError::Utf8PathError(format!("non UTF-8 file name: {}", p.display()))
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl Case {
    /// Resolve the snapshot and segment files of the case rooted at `dir`.
    ///
    /// Arguments
    /// -----------------
    /// * `dir`: the case directory; it must exist.
    /// * `params`: directory names and segment suffixes.
    ///
    /// Return
    /// ----------
    /// * A [`Case`] with snapshots ordered by `tsId` and segments ordered by file name.
    ///   Missing sub-directories give empty lists; files not following the naming
    ///   convention are ignored.
    pub fn open(dir: &Utf8Path, params: SimhistParams) -> Result<Self, SimhistError> {
        if !dir.is_dir() {
            return Err(SimhistError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("case directory not found: {dir}"),
            )));
        }

        let pattern = snapshot_file_pattern()?;
        let snapshots = list_files(&dir.join(&params.snapshot_dir))?
            .iter()
            .filter_map(|path| SnapshotFile::from_path(path, &pattern))
            .collect();

        let segment_paths = list_files(&dir.join(&params.segment_dir))?
            .into_iter()
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| params.is_segment_extension(ext))
            })
            .collect();

        Ok(Self::from_parts(dir, params, snapshots, segment_paths))
    }

    /// Build a case from already resolved files; segments keep the given order.
    pub fn from_parts(
        root: &Utf8Path,
        params: SimhistParams,
        mut snapshots: Vec<SnapshotFile>,
        segment_paths: Vec<Utf8PathBuf>,
    ) -> Self {
        snapshots.sort_by(|a, b| a.ts_id.cmp(&b.ts_id).then_with(|| a.path.cmp(&b.path)));
        Case {
            root: root.to_path_buf(),
            params,
            snapshots,
            segment_paths,
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn params(&self) -> &SimhistParams {
        &self.params
    }

    pub fn snapshots(&self) -> &[SnapshotFile] {
        &self.snapshots
    }

    pub fn segment_paths(&self) -> &[Utf8PathBuf] {
        &self.segment_paths
    }

    /// Decode every segment, keeping the healthy ones and recording the failures.
    pub fn load_segments(&self, diagnostics: Diagnostics<'_>) -> SegmentLoad {
        let mut load = SegmentLoad::default();
        for path in &self.segment_paths {
            match Segment::open(path) {
                Ok(segment) => {
                    diagnostics.debug(format_args!(
                        "{path}: {} records, {} nodes",
                        segment.len(),
                        segment.node_count()
                    ));
                    load.segments.push(segment);
                }
                Err(err) => {
                    diagnostics.warn(format_args!("{path}: skipped, {err}"));
                    load.failures.push((path.clone(), err));
                }
            }
        }
        diagnostics.info(format_args!(
            "{}: {} of {} segments decoded",
            self.root,
            load.segments.len(),
            self.segment_paths.len()
        ));
        load
    }

    /// Decode the header and zones of every snapshot, one result per file.
    pub fn describe_snapshots(
        &self,
        diagnostics: Diagnostics<'_>,
    ) -> Vec<(&SnapshotFile, Result<FieldSnapshot, SimhistError>)> {
        self.snapshots
            .iter()
            .map(|file| {
                let result = tagged_binary::read_snapshot(&file.path, self.params.max_zones);
                match &result {
                    Ok(snapshot) => diagnostics.debug(format_args!(
                        "{}: {} variables, {} zones",
                        file.path,
                        snapshot.header.variables.len(),
                        snapshot.zones.len()
                    )),
                    Err(err) => diagnostics.warn(format_args!("{}: {err}", file.path)),
                }
                (file, result)
            })
            .collect()
    }

    /// Order statistics of the snapshot file sizes, in bytes. `None` without snapshots.
    pub fn file_size_stats(&self) -> Result<Option<OrderStats>, SimhistError> {
        let sizes = self
            .snapshots
            .iter()
            .map(|file| Ok(fs::metadata(&file.path)?.len() as f64))
            .collect::<Result<Vec<_>, SimhistError>>()?;
        Ok(OrderStats::from_values(&sizes))
    }
}

#[cfg(test)]
mod test_case {
    use super::*;

    #[test]
    fn test_snapshot_file_names() {
        let pattern = snapshot_file_pattern().unwrap();
        let file = SnapshotFile::from_path(Utf8Path::new("binary/wing.v2.1500.plt"), &pattern)
            .unwrap();
        assert_eq!(file.problem, "wing.v2");
        assert_eq!(file.ts_id, 1500);
        assert_eq!(file.extension, "plt");

        assert!(SnapshotFile::from_path(Utf8Path::new("binary/wing.plt"), &pattern).is_none());
        assert!(SnapshotFile::from_path(Utf8Path::new("binary/wing.x1.plt"), &pattern).is_none());
    }

    #[test]
    fn test_from_parts_orders_snapshots() {
        let pattern = snapshot_file_pattern().unwrap();
        let snapshots = ["p.300.plt", "p.20.plt", "p.100.plt"]
            .iter()
            .filter_map(|name| SnapshotFile::from_path(Utf8Path::new(name), &pattern))
            .collect();
        let case = Case::from_parts(
            Utf8Path::new("case"),
            SimhistParams::default(),
            snapshots,
            vec![Utf8PathBuf::from("b.othd"), Utf8PathBuf::from("a.othd")],
        );
        let ts: Vec<_> = case.snapshots().iter().map(|s| s.ts_id).collect();
        assert_eq!(ts, vec![20, 100, 300]);
        assert_eq!(case.segment_paths()[0], "b.othd");
    }

    #[test]
    fn test_first_error() {
        let mut load = SegmentLoad::default();
        assert!(load.first_error().is_none());
        load.failures.push((
            Utf8PathBuf::from("x.othd"),
            SimhistError::TruncatedRead("segment header".into()),
        ));
        load.failures
            .push((Utf8PathBuf::from("y.othd"), SimhistError::BadMagic("?".into())));
        assert_eq!(
            load.first_error(),
            Some(&SimhistError::TruncatedRead("segment header".into()))
        );
        assert!(!load.is_complete());
        assert!(load.into_result().is_err());
    }
}
