//! # Trim Packaging Policy
//!
//! Trim ships in packages of 12 ft or 16 ft sticks. Longer panels need longer
//! trim, so 16 ft is the default whenever any panel in the area exceeds 12 ft.
//!
//! ## Rules
//!
//! 1. No panel over 12 ft: 12 ft sticks.
//! 2. Inside/outside corners next to panels over 12 ft: always 16 ft. A
//!    corner cannot be spliced.
//! 3. Any other trim next to panels over 12 ft: 16 ft, unless a 16 ft
//!    package would be more than [`DOWNGRADE_16FT_WASTE_ABOVE`] waste and a
//!    12 ft package wastes no more than the 16 ft one.
//!
//! Waste is the unused share of whole packages:
//! `(packs·pieces·len − lf) / (packs·pieces·len)`.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::packaging::{decide_stick_length, StickLength, TrimKind};
//!
//! let per_pack = |_len: u32| TrimKind::J.pieces_per_package();
//!
//! // 50 lf of J next to 16 ft panels: one 16 ft pack would waste 69%
//! assert_eq!(decide_stick_length(TrimKind::J, true, 50.0, per_pack), StickLength::Twelve);
//! assert_eq!(decide_stick_length(TrimKind::J, true, 300.0, per_pack), StickLength::Sixteen);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::PartCategory;

/// 16 ft waste above which a non-corner trim may drop to 12 ft sticks
pub const DOWNGRADE_16FT_WASTE_ABOVE: f64 = 0.60;

/// Trim profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrimKind {
    J,
    H,
    /// F / transition trim
    F,
    InsideCorner,
    OutsideCorner,
    DripEdge,
    Cove,
    CrownBaseBase,
    CrownBaseCap,
}

impl TrimKind {
    /// Sticks per package
    pub fn pieces_per_package(&self) -> u32 {
        match self {
            TrimKind::J => 10,
            TrimKind::H => 5,
            TrimKind::F => 10,
            TrimKind::InsideCorner => 5,
            TrimKind::OutsideCorner => 5,
            TrimKind::DripEdge => 10,
            TrimKind::Cove => 10,
            TrimKind::CrownBaseBase => 10,
            TrimKind::CrownBaseCap => 10,
        }
    }

    /// Catalog category stocking this profile
    pub fn category(&self) -> PartCategory {
        match self {
            TrimKind::J => PartCategory::J,
            TrimKind::H => PartCategory::H,
            TrimKind::F => PartCategory::F,
            TrimKind::InsideCorner => PartCategory::CornerInside,
            TrimKind::OutsideCorner => PartCategory::CornerOutside,
            TrimKind::DripEdge => PartCategory::DripEdge,
            TrimKind::Cove => PartCategory::Cove,
            TrimKind::CrownBaseBase => PartCategory::CrownBaseBase,
            TrimKind::CrownBaseCap => PartCategory::CrownBaseCap,
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, TrimKind::InsideCorner | TrimKind::OutsideCorner)
    }
}

/// Shipped trim stick length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickLength {
    Twelve,
    Sixteen,
}

impl StickLength {
    pub fn feet(&self) -> u32 {
        match self {
            StickLength::Twelve => 12,
            StickLength::Sixteen => 16,
        }
    }
}

/// Whole packages needed to cover `required_lf`
pub fn packs_needed(required_lf: f64, pieces_per_pack: u32, stick_ft: f64) -> u32 {
    let capacity = f64::from(pieces_per_pack) * stick_ft;
    if required_lf <= 0.0 || capacity <= 0.0 {
        return 0;
    }
    (required_lf / capacity).ceil() as u32
}

/// Unused fraction of the packages covering `required_lf`; 0 when no
/// package is needed.
pub fn waste_fraction(required_lf: f64, pieces_per_pack: u32, stick_ft: f64) -> f64 {
    let packs = packs_needed(required_lf, pieces_per_pack, stick_ft);
    if packs == 0 {
        return 0.0;
    }
    let provided = f64::from(packs) * f64::from(pieces_per_pack) * stick_ft;
    (provided - required_lf) / provided
}

/// Pick 12 ft or 16 ft sticks for a trim bucket.
///
/// `pieces_per_pack` maps a stick length in feet to the package size, so a
/// catalog that packs 12 ft and 16 ft differently can be honored.
pub fn decide_stick_length<F>(
    kind: TrimKind,
    any_panel_over_12ft: bool,
    required_lf: f64,
    pieces_per_pack: F,
) -> StickLength
where
    F: Fn(u32) -> u32,
{
    if !any_panel_over_12ft {
        return StickLength::Twelve;
    }
    if kind.is_corner() {
        return StickLength::Sixteen;
    }

    let waste16 = waste_fraction(required_lf, pieces_per_pack(16), 16.0);
    let waste12 = waste_fraction(required_lf, pieces_per_pack(12), 12.0);

    let decision = if waste16 > DOWNGRADE_16FT_WASTE_ABOVE && waste12 <= waste16 {
        StickLength::Twelve
    } else {
        StickLength::Sixteen
    };

    tracing::debug!(?kind, required_lf, waste12, waste16, stick = decision.feet(), "trim stick length");
    decision
}
