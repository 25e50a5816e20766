#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use simhist::constants::{FLAG_EXPLICIT_TIME, MASK_FORCE, ZONE_MARKER};
use tempfile::TempDir;

fn push_code_points(out: &mut Vec<u8>, text: &str) {
    for c in text.chars() {
        out.extend_from_slice(&(c as u32).to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());
}

/// Tagged container bytes: `#!TDV112` magic, title, variables, zones.
pub fn container_bytes(title: &str, variables: &[&str], zones: &[(&str, i32)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"#!TDV112");
    out.extend_from_slice(&[0u8; 8]);
    push_code_points(&mut out, title);
    out.extend_from_slice(&(variables.len() as u32).to_le_bytes());
    for name in variables {
        push_code_points(&mut out, name);
    }
    for (name, code) in zones {
        out.extend_from_slice(&ZONE_MARKER.to_le_bytes());
        push_code_points(&mut out, name);
        out.extend_from_slice(&code.to_le_bytes());
    }
    out
}

/// Segment bytes; each record is `(tsId, optional time, values)`.
pub fn segment_bytes(
    mask: u32,
    node_count: u32,
    dt: f64,
    records: &[(u64, Option<f64>, Vec<f64>)],
) -> Vec<u8> {
    let explicit = records.iter().any(|(_, t, _)| t.is_some());
    let flags = if explicit { FLAG_EXPLICIT_TIME } else { 0 };

    let mut out = Vec::new();
    out.extend_from_slice(&mask.to_le_bytes());
    out.extend_from_slice(&node_count.to_le_bytes());
    out.extend_from_slice(&dt.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for (ts_id, time, values) in records {
        out.extend_from_slice(&ts_id.to_le_bytes());
        if explicit {
            out.extend_from_slice(&time.unwrap_or(*ts_id as f64 * dt).to_le_bytes());
        }
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    out
}

/// Force-only segment: x component = `value`, y = tsId, z = 0.
pub fn force_segment(ts_ids: impl IntoIterator<Item = u64>, dt: f64, value: f64) -> Vec<u8> {
    let records: Vec<_> = ts_ids
        .into_iter()
        .map(|ts| (ts, None, vec![value, ts as f64, 0.0]))
        .collect();
    segment_bytes(MASK_FORCE, 0, dt, &records)
}

/// Temporary case directory.
pub struct CaseDir {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl CaseDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        CaseDir { dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `bytes` to `<root>/<sub>/<name>` and return the path.
    pub fn write(&self, sub: &str, name: &str, bytes: &[u8]) -> Utf8PathBuf {
        let dir = self.root.join(sub);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}
