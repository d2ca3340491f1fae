//! # File I/O Module
//!
//! Loads the JSON documents a takeoff runs on:
//! - **Catalog**: versioned parts list (`CatalogFile`)
//! - **Building input**: one [`BuildingInput`], or a job of several rooms
//!   (a JSON array, or an object with a `rooms` array)
//! - **Settings**: [`EstimateSettings`]; missing fields keep their defaults
//!
//! Nothing is written back; estimates are recomputed from their inputs.
//!
//! ## Catalog Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "published": "2025-03-01T00:00:00Z",
//!   "parts": [
//!     { "part_number": "GEL1TJEBWH", "description": "J Trim 16'", "units": "PKG",
//!       "pack_pieces": 10, "length_ft": 16.0, "color": "NUFORM WHITE", "category": "J" }
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::file_io::{load_building_input, load_catalog};
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("catalog.json"))?;
//! let input = load_building_input(Path::new("shop.json"))?;
//! println!("{} parts, {} ft perimeter", catalog.len(), input.perimeter_ft());
//! # Ok::<(), takeoff_core::errors::CalcError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calculations::BuildingInput;
use crate::catalog::{Catalog, Part};
use crate::errors::{CalcError, CalcResult};
use crate::settings::EstimateSettings;

/// Current catalog schema version
pub const CATALOG_SCHEMA_VERSION: &str = "0.1.0";

/// On-disk catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Schema version for compatibility checking
    pub version: String,
    /// Price list publication date
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    pub parts: Vec<Part>,
}

impl CatalogFile {
    /// Check the version and build the in-memory catalog.
    pub fn into_catalog(self) -> CalcResult<Catalog> {
        validate_version(&self.version)?;
        Ok(Catalog::new(self.parts).with_published(self.published))
    }
}

/// Read and parse a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a parts catalog.
///
/// # Returns
///
/// * `Ok(Catalog)` - Successfully loaded catalog
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_catalog(path: &Path) -> CalcResult<Catalog> {
    let file: CatalogFile = read_json(path)?;
    let catalog = file.into_catalog()?;
    tracing::info!(path = %path.display(), parts = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Load a building input. The input is not validated here; the estimate
/// validates it before calculating.
pub fn load_building_input(path: &Path) -> CalcResult<BuildingInput> {
    read_json(path)
}

/// Building input document for a job
#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    Rooms { rooms: Vec<BuildingInput> },
    List(Vec<BuildingInput>),
    Single(Box<BuildingInput>),
}

/// Load the rooms of a job. A file holding a single building input is a
/// one-room job.
pub fn load_job(path: &Path) -> CalcResult<Vec<BuildingInput>> {
    let rooms = match read_json::<JobFile>(path)? {
        JobFile::Rooms { rooms } | JobFile::List(rooms) => rooms,
        JobFile::Single(input) => vec![*input],
    };
    tracing::debug!(path = %path.display(), rooms = rooms.len(), "job loaded");
    Ok(rooms)
}

/// Load estimate settings.
pub fn load_settings(path: &Path) -> CalcResult<EstimateSettings> {
    read_json(path)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    // Parse semver-style versions
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = CATALOG_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: CATALOG_SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}
