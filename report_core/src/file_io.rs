//! # File I/O Module
//!
//! Reading project snapshots and report configuration, and writing finished
//! reports to disk.
//!
//! - **Atomic writes**: output goes to `<path>.tmp`, is synced, then renamed
//! - **Version validation**: snapshots carry a schema version that must be
//!   compatible with [`SCHEMA_VERSION`]
//!
//! ## Snapshot Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "project": { "_id": "665f...", "name": "Clinic", "location": "Atar", ... },
//!   "materials": [ { "name": "Cement", "unit": "kg", ... } ]
//! }
//! ```
//!
//! `project` may be `null`, which the generator reports as not found.
//!
//! ## Example
//!
//! ```rust,no_run
//! use report_core::file_io::{load_snapshot, save_report};
//! use std::path::Path;
//!
//! let snapshot = load_snapshot(Path::new("clinic.json"))?;
//! println!("{} materials", snapshot.materials.len());
//! save_report(b"%PDF-1.7 ...", Path::new("clinic.pdf"))?;
//! # Ok::<(), report_core::errors::ReportError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assembler::ReportConfig;
use crate::errors::{ReportError, ReportResult};
use crate::materials::Material;
use crate::project::Project;

/// Current snapshot schema version.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A project and its materials as exported by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub version: String,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl ProjectSnapshot {
    pub fn new(project: Option<Project>, materials: Vec<Material>) -> Self {
        ProjectSnapshot {
            version: SCHEMA_VERSION.to_string(),
            project,
            materials,
        }
    }
}

fn read_to_string(path: &Path) -> ReportResult<String> {
    let mut file = File::open(path).map_err(|e| ReportError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ReportError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load a snapshot and check its schema version.
pub fn load_snapshot(path: &Path) -> ReportResult<ProjectSnapshot> {
    let contents = read_to_string(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_str(&contents).map_err(|e| ReportError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&snapshot.version)?;
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON (atomically).
pub fn save_snapshot(snapshot: &ProjectSnapshot, path: &Path) -> ReportResult<()> {
    let json = serde_json::to_vec_pretty(snapshot)?;
    write_atomic(&json, path)
}

/// Load a JSON report configuration; missing fields take their defaults.
pub fn load_config(path: &Path) -> ReportResult<ReportConfig> {
    let contents = read_to_string(path)?;
    let config: ReportConfig = serde_json::from_str(&contents).map_err(|e| ReportError::SerializationError {
        reason: format!("Invalid config in {}: {}", path.display(), e),
    })?;
    config.validate()?;
    Ok(config)
}

/// Write report bytes to `path` without ever leaving a partial file there.
pub fn save_report(bytes: &[u8], path: &Path) -> ReportResult<()> {
    write_atomic(bytes, path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic(bytes: &[u8], path: &Path) -> ReportResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| ReportError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(bytes)
        .map_err(|e| ReportError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| ReportError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ReportError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Check a snapshot version against [`SCHEMA_VERSION`].
///
/// Major versions must match; while on 0.x a newer minor is rejected too.
pub fn validate_version(file_version: &str) -> ReportResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.trim().parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || ReportError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}
