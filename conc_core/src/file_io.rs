//! # File I/O Module
//!
//! Study files and chart outputs:
//! - **Atomic saves**: write to `.tmp`, sync, rename so an interrupted
//!   write never leaves a truncated file behind
//! - **Version validation**: studies from a newer schema are rejected
//!
//! ## File Format
//!
//! Studies are saved as `.ccs` files containing pretty-printed JSON.
//! Each chart run writes `<stem>.pdf`, plus `<stem>.json` (sweep data) and
//! `<stem>.typ` (chart source) when asked.
//!
//! ## Example
//!
//! ```rust,no_run
//! use conc_core::file_io::{save_study, load_study};
//! use conc_core::study::Study;
//! use std::path::Path;
//!
//! let study = Study::template("Engineer", "25-001", "Slab");
//! save_study(&study, Path::new("slab.ccs")).unwrap();
//! let loaded = load_study(Path::new("slab.ccs")).unwrap();
//! assert_eq!(loaded.charts.len(), 2);
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chart::{self, ChartSpec};
use crate::errors::{CalcError, CalcResult};
use crate::study::{Study, SCHEMA_VERSION};
use crate::sweep::SweepResult;

/// Write bytes to `path` via a sibling `.tmp` file and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// `slab.ccs` -> `slab.ccs.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a study with atomic write semantics.
///
/// # Example
///
/// ```rust,no_run
/// use conc_core::file_io::save_study;
/// use conc_core::study::Study;
/// use std::path::Path;
///
/// let study = Study::new("Engineer", "25-001", "Slab");
/// save_study(&study, Path::new("slab.ccs"))?;
/// # Ok::<(), conc_core::errors::CalcError>(())
/// ```
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(study).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), charts = study.charts.len(), "study saved");
    Ok(())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::MissingField)` - No `meta.version` in the file
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    // Version first, so a newer file reports a mismatch rather than a parse error
    let header: VersionHeader =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    let version = header
        .meta
        .and_then(|meta| meta.version)
        .ok_or_else(|| CalcError::missing_field("meta.version"))?;
    validate_version(&version)?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid study in {}: {}", path.display(), e),
    })
}

#[derive(Deserialize)]
struct VersionHeader {
    meta: Option<VersionOnly>,
}

#[derive(Deserialize)]
struct VersionOnly {
    version: Option<String>,
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the major version is 0, a file with a
/// newer minor version is rejected.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.trim().parse().ok()).collect() };
    let file_parts = parse(file_version).filter(|p| !p.is_empty()).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 {
        let file_minor = file_parts.get(1).copied().unwrap_or(0);
        let current_minor = current_parts.get(1).copied().unwrap_or(0);
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}

// ============================================================================
// Chart outputs
// ============================================================================

/// Extra files written next to each chart PDF
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Write `<stem>.json` with the sweep points
    pub json: bool,
    /// Write `<stem>.typ` with the chart source
    pub typst: bool,
}

/// Render a sweep result and write its files into `out_dir`.
///
/// Creates `out_dir` when missing and returns the written paths, PDF first.
pub fn write_chart_outputs(
    result: &SweepResult,
    out_dir: &Path,
    stem: &str,
    options: OutputOptions,
) -> CalcResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| {
        CalcError::file_error("create directory", out_dir.display().to_string(), e.to_string())
    })?;

    let spec = ChartSpec::from_sweep(result);
    let source = chart::to_typst(&spec)?;
    let pdf = crate::pdf::compile_typst(source.clone())?;

    let mut written = Vec::new();

    let pdf_path = out_dir.join(format!("{}.pdf", stem));
    write_atomic(&pdf_path, &pdf)?;
    written.push(pdf_path);

    if options.json {
        let json = serde_json::to_string_pretty(result).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        let json_path = out_dir.join(format!("{}.json", stem));
        write_atomic(&json_path, json.as_bytes())?;
        written.push(json_path);
    }

    if options.typst {
        let typ_path = out_dir.join(format!("{}.typ", stem));
        write_atomic(&typ_path, source.as_bytes())?;
        written.push(typ_path);
    }

    for path in &written {
        info!(path = %path.display(), points = result.point_count(), "wrote chart output");
    }
    Ok(written)
}
