//! # Trim Linear-Footage Aggregator
//!
//! Collects the linear feet of every trim profile needed, keyed by
//! `(TrimKind, NuformColor)`. Wall trim takes the wall panel color, ceiling
//! trim (transition and ceiling H) takes the ceiling panel color.
//!
//! ## J-trim
//!
//! J runs along the wall perimeter and around every opening. When ceiling
//! panels are included without a transition trim, J also finishes the
//! ceiling edge, so two more perimeters are added. Openings are never
//! multiplied.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::BuildingInput;
//! use takeoff_core::calculations::trim::{aggregate_trims, TrimKey};
//! use takeoff_core::calculations::packaging::TrimKind;
//! use takeoff_core::catalog::NuformColor;
//!
//! let room = BuildingInput::room(10.0, 10.0, 10.0);
//! let takeoff = aggregate_trims(&room, None);
//!
//! let j = TrimKey::new(TrimKind::J, NuformColor::NuformWhite);
//! assert_eq!(takeoff.wall.get(&j), Some(&40.0));
//! // four inside corners, 10 ft each
//! let ic = TrimKey::new(TrimKind::InsideCorner, NuformColor::NuformWhite);
//! assert_eq!(takeoff.wall.get(&ic), Some(&40.0));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::building::{BuildMode, BuildingInput, CeilingTransition};
use crate::calculations::ceiling::CeilingLayout;
use crate::calculations::packaging::TrimKind;
use crate::catalog::NuformColor;

/// Bucket key: one trim profile in one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrimKey {
    pub kind: TrimKind,
    pub color: NuformColor,
}

impl TrimKey {
    pub fn new(kind: TrimKind, color: NuformColor) -> Self {
        TrimKey { kind, color }
    }
}

/// Trim LF per bucket, split into wall and ceiling contexts.
///
/// Buckets are never created with zero or negative footage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimTakeoff {
    pub wall: BTreeMap<TrimKey, f64>,
    pub ceiling: BTreeMap<TrimKey, f64>,
}

impl TrimTakeoff {
    fn add(bucket: &mut BTreeMap<TrimKey, f64>, kind: TrimKind, color: NuformColor, lf: f64) {
        if lf <= 0.0 || !lf.is_finite() {
            return;
        }
        *bucket.entry(TrimKey::new(kind, color)).or_insert(0.0) += lf;
    }

    /// Total wall trim LF
    pub fn wall_lf(&self) -> f64 {
        self.wall.values().sum()
    }

    /// Total ceiling trim LF
    pub fn ceiling_lf(&self) -> f64 {
        self.ceiling.values().sum()
    }

    /// LF of one kind across colors, both contexts
    pub fn total_for(&self, kind: TrimKind) -> f64 {
        self.wall
            .iter()
            .chain(self.ceiling.iter())
            .filter(|(key, _)| key.kind == kind)
            .map(|(_, lf)| lf)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.wall.is_empty() && self.ceiling.is_empty()
    }

    /// Add another takeoff's footage bucket by bucket.
    pub fn merge(&mut self, other: &TrimTakeoff) {
        for (key, lf) in &other.wall {
            TrimTakeoff::add(&mut self.wall, key.kind, key.color, *lf);
        }
        for (key, lf) in &other.ceiling {
            TrimTakeoff::add(&mut self.ceiling, key.kind, key.color, *lf);
        }
    }
}

/// J-trim summary and transition footage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimCalcResult {
    /// multiplier × perimeter + butt-opening perimeters; 0 when J is off
    pub j_trim_lf: f64,
    /// Transition trim LF; 0 without a transition
    pub ceiling_trim_lf: f64,
    pub ceiling_transition: Option<CeilingTransition>,
}

/// Four inside corners for a real room, none for a single wall.
pub fn compute_inside_corners(input: &BuildingInput) -> u32 {
    match input.mode {
        BuildMode::Room if input.length_ft > 1.0 && input.width_ft > 1.0 => 4,
        _ => 0,
    }
}

/// J also finishes the ceiling edge when ceiling panels meet the wall
/// without a transition profile.
fn j_runs_along_ceiling(input: &BuildingInput) -> bool {
    input.include_ceiling_panels && input.trims.ceiling_transition.is_none()
}

/// Summary trim figures for the estimate result.
pub fn calculate(input: &BuildingInput) -> TrimCalcResult {
    let perimeter = input.perimeter_ft();

    let j_trim_lf = if input.trims.j_trim_enabled {
        let multiplier = if j_runs_along_ceiling(input) { 3.0 } else { 1.0 };
        multiplier * perimeter + input.butt_openings_perimeter_lf()
    } else {
        0.0
    };

    let ceiling_trim_lf = match input.trims.ceiling_transition {
        Some(_) => perimeter,
        None => 0.0,
    };

    TrimCalcResult {
        j_trim_lf,
        ceiling_trim_lf,
        ceiling_transition: input.trims.ceiling_transition,
    }
}

/// Build every trim bucket for the input.
///
/// `ceiling_layout` contributes the ceiling H-trim between panel rows.
pub fn aggregate_trims(input: &BuildingInput, ceiling_layout: Option<&CeilingLayout>) -> TrimTakeoff {
    let mut takeoff = TrimTakeoff::default();
    let wall_color = input.wall_panel.color;
    let ceiling_color = input.ceiling_panel.color;
    let perimeter = input.perimeter_ft();
    let wrapped = input.wrapped_openings_perimeter_lf();

    if input.trims.j_trim_enabled {
        let mut j = perimeter + input.butt_openings_perimeter_lf() + wrapped;
        if j_runs_along_ceiling(input) {
            j += 2.0 * perimeter;
        }
        TrimTakeoff::add(&mut takeoff.wall, TrimKind::J, wall_color, j);
    }

    TrimTakeoff::add(&mut takeoff.wall, TrimKind::OutsideCorner, wall_color, wrapped);

    let inside = f64::from(compute_inside_corners(input)) * input.height_ft;
    TrimTakeoff::add(&mut takeoff.wall, TrimKind::InsideCorner, wall_color, inside);

    match input.trims.ceiling_transition {
        Some(CeilingTransition::Cove) => {
            TrimTakeoff::add(&mut takeoff.ceiling, TrimKind::Cove, ceiling_color, perimeter);
        }
        Some(CeilingTransition::CrownBase) => {
            TrimTakeoff::add(&mut takeoff.ceiling, TrimKind::CrownBaseBase, ceiling_color, perimeter);
            TrimTakeoff::add(&mut takeoff.ceiling, TrimKind::CrownBaseCap, ceiling_color, perimeter);
        }
        Some(CeilingTransition::FTrim) => {
            TrimTakeoff::add(&mut takeoff.ceiling, TrimKind::F, ceiling_color, perimeter);
        }
        None => {}
    }

    if let Some(layout) = ceiling_layout {
        TrimTakeoff::add(&mut takeoff.ceiling, TrimKind::H, ceiling_color, layout.h_trim_lf);
    }

    takeoff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::building::{CeilingPanelSpec, Opening, OpeningTreatment};
    use crate::calculations::ceiling::layout_ceiling;
    use crate::calculations::CeilingOrientation;

    fn key(kind: TrimKind) -> TrimKey {
        TrimKey::new(kind, NuformColor::NuformWhite)
    }

    #[test]
    fn test_inside_corners_by_mode_and_width() {
        assert_eq!(compute_inside_corners(&BuildingInput::room(10.0, 10.0, 8.0)), 4);
        assert_eq!(compute_inside_corners(&BuildingInput::room(10.0, 1.0, 8.0)), 0);
        assert_eq!(compute_inside_corners(&BuildingInput::wall(10.0, 8.0)), 0);

        let mut wide_wall = BuildingInput::wall(10.0, 8.0);
        wide_wall.width_ft = 10.0;
        assert_eq!(compute_inside_corners(&wide_wall), 0);
    }

    #[test]
    fn test_j_summary_triples_with_ceiling_and_no_transition() {
        let room = BuildingInput::room(10.0, 10.0, 10.0).with_ceiling(CeilingPanelSpec::default());
        let result = calculate(&room);
        assert_eq!(result.j_trim_lf, 120.0);
        assert_eq!(result.ceiling_trim_lf, 0.0);
        assert_eq!(result.ceiling_transition, None);
    }

    #[test]
    fn test_transition_keeps_single_j_perimeter() {
        let room = BuildingInput::room(10.0, 10.0, 10.0)
            .with_ceiling(CeilingPanelSpec::default())
            .with_transition(Some(CeilingTransition::Cove));
        let result = calculate(&room);
        assert_eq!(result.j_trim_lf, 40.0);
        assert_eq!(result.ceiling_trim_lf, 40.0);
        assert_eq!(result.ceiling_transition, Some(CeilingTransition::Cove));
    }

    #[test]
    fn test_j_summary_counts_butt_openings_only() {
        let butt = BuildingInput::wall(20.0, 10.0)
            .with_ceiling(CeilingPanelSpec::default())
            .with_opening(Opening::new(5.0, 10.0, 1, OpeningTreatment::Butt));
        assert_eq!(calculate(&butt).j_trim_lf, 90.0);

        let wrapped = BuildingInput::wall(20.0, 10.0)
            .with_ceiling(CeilingPanelSpec::default())
            .with_opening(Opening::new(5.0, 10.0, 1, OpeningTreatment::Wrapped));
        assert_eq!(calculate(&wrapped).j_trim_lf, 60.0);
    }

    #[test]
    fn test_j_disabled_gives_no_j() {
        let mut room = BuildingInput::room(10.0, 10.0, 10.0);
        room.trims.j_trim_enabled = false;
        assert_eq!(calculate(&room).j_trim_lf, 0.0);
        assert!(!aggregate_trims(&room, None).wall.contains_key(&key(TrimKind::J)));
    }

    #[test]
    fn test_j_bucket_includes_wrapped_openings_unmultiplied() {
        let room = BuildingInput::room(10.0, 10.0, 10.0)
            .with_ceiling(CeilingPanelSpec::default())
            .with_opening(Opening::new(3.0, 7.0, 1, OpeningTreatment::Butt))
            .with_opening(Opening::new(8.0, 8.0, 1, OpeningTreatment::Wrapped));
        let takeoff = aggregate_trims(&room, None);
        // 3 × 40 perimeter + 20 butt + 32 wrapped
        assert_eq!(takeoff.wall[&key(TrimKind::J)], 172.0);
        assert_eq!(takeoff.wall[&key(TrimKind::OutsideCorner)], 32.0);
    }

    #[test]
    fn test_no_wrapped_openings_means_no_outside_corner() {
        let takeoff = aggregate_trims(&BuildingInput::room(10.0, 10.0, 10.0), None);
        assert!(!takeoff.wall.contains_key(&key(TrimKind::OutsideCorner)));
        assert!(takeoff.wall.values().all(|lf| *lf > 0.0));
    }

    #[test]
    fn test_transition_buckets_use_ceiling_color() {
        let ceiling = CeilingPanelSpec {
            color: NuformColor::BrightWhite,
            ..CeilingPanelSpec::default()
        };
        let room = BuildingInput::room(12.0, 8.0, 10.0)
            .with_ceiling(ceiling)
            .with_transition(Some(CeilingTransition::CrownBase));
        let takeoff = aggregate_trims(&room, None);

        let base = TrimKey::new(TrimKind::CrownBaseBase, NuformColor::BrightWhite);
        let cap = TrimKey::new(TrimKind::CrownBaseCap, NuformColor::BrightWhite);
        assert_eq!(takeoff.ceiling[&base], 40.0);
        assert_eq!(takeoff.ceiling[&cap], 40.0);
        assert_eq!(takeoff.wall[&key(TrimKind::J)], 40.0);

        let f = BuildingInput::room(12.0, 8.0, 10.0).with_transition(Some(CeilingTransition::FTrim));
        assert_eq!(aggregate_trims(&f, None).ceiling[&key(TrimKind::F)], 40.0);
    }

    #[test]
    fn test_ceiling_h_trim_from_layout() {
        let room = BuildingInput::room(30.0, 12.0, 10.0)
            .with_ceiling(CeilingPanelSpec::default())
            .with_transition(Some(CeilingTransition::Cove));
        let layout = layout_ceiling(30.0, 12.0, 12.0, CeilingOrientation::Lengthwise, None).unwrap();
        let takeoff = aggregate_trims(&room, Some(&layout));
        assert_eq!(takeoff.ceiling[&key(TrimKind::H)], layout.h_trim_lf);
        assert_eq!(takeoff.ceiling_lf(), 84.0 + layout.h_trim_lf);
        assert_eq!(takeoff.total_for(TrimKind::Cove), 84.0);
    }

    #[test]
    fn test_single_row_ceiling_adds_no_h_bucket() {
        let room = BuildingInput::room(17.0, 14.0, 10.0).with_ceiling(CeilingPanelSpec::default());
        let layout = layout_ceiling(17.0, 14.0, 12.0, CeilingOrientation::Lengthwise, None).unwrap();
        let takeoff = aggregate_trims(&room, Some(&layout));
        assert!(takeoff.ceiling.is_empty());
        assert!(!takeoff.is_empty());
    }

    #[test]
    fn test_merge_adds_per_bucket() {
        let cove = BuildingInput::room(10.0, 10.0, 10.0).with_transition(Some(CeilingTransition::Cove));
        let mut takeoff = aggregate_trims(&cove, None);
        takeoff.merge(&aggregate_trims(&BuildingInput::room(12.0, 8.0, 8.0), None));

        assert_eq!(takeoff.wall[&key(TrimKind::J)], 80.0);
        assert_eq!(takeoff.wall[&key(TrimKind::InsideCorner)], 72.0);
        assert_eq!(takeoff.ceiling[&key(TrimKind::Cove)], 40.0);
        assert_eq!(takeoff.wall.len(), 2);
    }
}
