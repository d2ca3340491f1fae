//! # Parts Catalog
//!
//! The catalog is the only external data the takeoff consumes. The engine
//! talks to it through the [`CatalogResolver`] trait so tests and callers can
//! inject any read-only source; [`Catalog`] is the in-memory implementation
//! loaded from JSON (see [`crate::file_io::load_catalog`]).
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::catalog::{Catalog, CatalogResolver, Part, PartCategory};
//!
//! let catalog = Catalog::new(vec![Part {
//!     part_number: "GEL1TJEBWH".to_string(),
//!     description: "RELINE J Trim 16'".to_string(),
//!     units: "PKG".to_string(),
//!     pack_pieces: 10,
//!     length_ft: 16.0,
//!     color: "NUFORM WHITE".to_string(),
//!     category: PartCategory::J,
//!     series: None,
//!     price: Some(142.50),
//! }]);
//!
//! let part = catalog.find_by_category_and_length("nuform white", PartCategory::J, 16.0);
//! assert_eq!(part.unwrap().part_number, "GEL1TJEBWH");
//! ```

pub mod color;

pub use color::{panel_sku, NuformColor, PanelSeries};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Catalog grouping used to match parts to material buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartCategory {
    Panel,
    J,
    H,
    F,
    CornerInside,
    CornerOutside,
    DripEdge,
    Cove,
    CrownBaseBase,
    CrownBaseCap,
    Hardware,
}

impl PartCategory {
    /// Category label used in catalogs and exported BOMs
    pub fn label(&self) -> &'static str {
        match self {
            PartCategory::Panel => "Panel",
            PartCategory::J => "J",
            PartCategory::H => "H",
            PartCategory::F => "F",
            PartCategory::CornerInside => "CornerInside",
            PartCategory::CornerOutside => "CornerOutside",
            PartCategory::DripEdge => "DripEdge",
            PartCategory::Cove => "Cove",
            PartCategory::CrownBaseBase => "CrownBaseBase",
            PartCategory::CrownBaseCap => "CrownBaseCap",
            PartCategory::Hardware => "Hardware",
        }
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One purchasable catalog record.
///
/// `pack_pieces` is the packaging metadata the BOM assembler divides by: the
/// number of sticks in a trim package, or pieces per hardware box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub part_number: String,
    pub description: String,
    /// Selling unit (e.g. "PCS", "PKG", "BOX")
    pub units: String,
    /// Pieces per package (1 for loose panels)
    pub pack_pieces: u32,
    /// Stick/panel length in feet (0 for hardware)
    pub length_ft: f64,
    /// Catalog color name (e.g. "BRIGHT WHITE")
    pub color: String,
    pub category: PartCategory,
    /// Panel series code, for panel parts
    #[serde(default)]
    pub series: Option<String>,
    /// List price per unit; not used by the takeoff itself
    #[serde(default)]
    pub price: Option<f64>,
}

impl Part {
    fn color_is(&self, color: &str) -> bool {
        self.color.trim().eq_ignore_ascii_case(color.trim())
    }
}

/// Read-only parts lookup consumed by the BOM assembler.
pub trait CatalogResolver {
    /// Part of the given color and category whose length is closest to
    /// `length_ft`. Callers check the returned length themselves.
    fn find_by_category_and_length(&self, color: &str, category: PartCategory, length_ft: f64) -> Option<&Part>;

    /// Panel of the given series and color: exact length if stocked, else the
    /// next longer length, else the closest.
    fn find_panel(&self, series: PanelSeries, color: &str, length_ft: f64) -> Option<&Part>;

    /// Hardware part by part number.
    fn get_hardware(&self, code: &str) -> CalcResult<&Part>;
}

/// In-memory catalog keyed by part number (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parts: Vec<Part>,
    index: HashMap<String, usize>,
    published: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Build a catalog. A repeated part number replaces the earlier record.
    pub fn new(parts: Vec<Part>) -> Self {
        let mut catalog = Catalog::default();
        for part in parts {
            catalog.insert(part);
        }
        catalog
    }

    /// Attach the price-list publication date.
    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }

    fn insert(&mut self, part: Part) {
        let key = part.part_number.trim().to_uppercase();
        match self.index.get(&key) {
            Some(&i) => self.parts[i] = part,
            None => {
                self.index.insert(key, self.parts.len());
                self.parts.push(part);
            }
        }
    }

    /// All parts in load order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// When the price list was published, if known
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published
    }

    /// Look up any part by number
    pub fn get(&self, part_number: &str) -> Option<&Part> {
        self.index
            .get(&part_number.trim().to_uppercase())
            .map(|&i| &self.parts[i])
    }
}

impl CatalogResolver for Catalog {
    fn find_by_category_and_length(&self, color: &str, category: PartCategory, length_ft: f64) -> Option<&Part> {
        self.parts
            .iter()
            .filter(|p| p.category == category && p.color_is(color))
            .min_by(|a, b| {
                let da = (a.length_ft - length_ft).abs();
                let db = (b.length_ft - length_ft).abs();
                da.total_cmp(&db)
            })
    }

    fn find_panel(&self, series: PanelSeries, color: &str, length_ft: f64) -> Option<&Part> {
        let mut candidates: Vec<&Part> = self
            .parts
            .iter()
            .filter(|p| {
                p.category == PartCategory::Panel
                    && p.color_is(color)
                    && p
                        .series
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(series.code()))
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }
        candidates.sort_by(|a, b| a.length_ft.total_cmp(&b.length_ft));

        if let Some(exact) = candidates.iter().copied().find(|p| (p.length_ft - length_ft).abs() < 0.01) {
            return Some(exact);
        }
        if let Some(longer) = candidates.iter().copied().find(|p| p.length_ft >= length_ft) {
            return Some(longer);
        }
        candidates
            .into_iter()
            .min_by(|a, b| (a.length_ft - length_ft).abs().total_cmp(&(b.length_ft - length_ft).abs()))
    }

    fn get_hardware(&self, code: &str) -> CalcResult<&Part> {
        self.get(code)
            .ok_or_else(|| CalcError::part_not_found(format!("hardware {}", code)))
    }
}
