//! # Ceiling Layout Optimizer
//!
//! Chooses how many rows of ceiling panels to run and the shipping length of
//! each panel, picking from the even standard lengths 10-20 ft so that offcut
//! waste is as small as possible.
//!
//! ## Orientations
//!
//! - **Lengthwise**: panels run along the building length (the span) and the
//!   width (the cross dimension) sets panels per row. Rows are tried from
//!   `ceil(span/20)` to `ceil(span/10)`; each candidate ships the shortest
//!   standard length covering `span/rows`, and the pair with the least waste
//!   `rows × ship − span` wins. Ties go to the longer length (fewer seams).
//!   Every joint between rows needs a run of H-trim across the room.
//! - **Widthwise**: one row across the width, so no H-trim. Widths above
//!   20 ft ship a custom length `ceil(width)` up to 25 ft; wider rooms fall
//!   back to the lengthwise layout.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::ceiling::layout_ceiling;
//! use takeoff_core::calculations::CeilingOrientation;
//!
//! let layout = layout_ceiling(40.0, 14.0, 12.0, CeilingOrientation::Lengthwise, None).unwrap();
//! assert_eq!(layout.rows, 2);
//! assert_eq!(layout.ship_length_ft, 20.0);
//! assert_eq!(layout.panels_per_row, 14);
//! assert_eq!(layout.h_trim_lf, 14.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::building::{dimension, panel_width_ft, CeilingOrientation, MIN_COVERAGE_WIDTH_FT};
use crate::errors::{CalcError, CalcResult};

/// Standard shipping lengths (ft), shortest first
pub const STANDARD_LENGTHS_FT: [f64; 6] = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

/// Longest standard panel
pub const MAX_STANDARD_LENGTH_FT: f64 = 20.0;

/// Shortest standard panel
pub const MIN_STANDARD_LENGTH_FT: f64 = 10.0;

/// Widest room a single widthwise row can span with a custom cut
pub const MAX_CUSTOM_LENGTH_FT: f64 = 25.0;

/// Resolved ceiling layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingLayout {
    /// Orientation actually used (a wide widthwise ceiling falls back to lengthwise)
    pub orientation: CeilingOrientation,
    pub rows: u32,
    pub panels_per_row: u32,
    /// Length of each shipped panel (ft)
    pub ship_length_ft: f64,
    /// `panels_per_row × rows`, before contingency
    pub total_panels: u32,
    /// H-trim between rows (lf)
    pub h_trim_lf: f64,
    /// Ship length is a bespoke cut, not a standard length
    pub custom_length: bool,
}

/// Shortest standard length ≥ `ft`, capped at 20.
fn round_up_to_standard(ft: f64) -> f64 {
    STANDARD_LENGTHS_FT
        .iter()
        .copied()
        .find(|&len| ft <= len)
        .unwrap_or(MAX_STANDARD_LENGTH_FT)
}

fn panels_across(run_ft: f64, panel_width_in: f64) -> u32 {
    (run_ft / panel_width_ft(panel_width_in)).ceil() as u32
}

/// A user-preferred ship length is usable when it is a standard even length
/// and each row still spans `needed_ft`.
fn override_is_usable(length_ft: f64, needed_ft: f64) -> bool {
    length_ft.fract() == 0.0
        && (length_ft as u32) % 2 == 0
        && (MIN_STANDARD_LENGTH_FT..=MAX_STANDARD_LENGTH_FT).contains(&length_ft)
        && length_ft >= needed_ft
}

/// Lengthwise layout: rows/length pair with the least waste over `span`.
fn lengthwise(length_ft: f64, width_ft: f64, panel_width_in: f64) -> CalcResult<CeilingLayout> {
    let span = length_ft;
    let cross = width_ft;

    let min_rows = ((span / MAX_STANDARD_LENGTH_FT).ceil() as u32).max(1);
    let max_rows = ((span / MIN_STANDARD_LENGTH_FT).ceil() as u32).max(min_rows);

    let mut best_rows = min_rows;
    let mut best_ship = MAX_STANDARD_LENGTH_FT;
    let mut best_waste = f64::MAX;

    for rows in min_rows..=max_rows {
        let ship = round_up_to_standard(span / f64::from(rows));
        let waste = f64::from(rows) * ship - span;
        let better = waste < best_waste || ((waste - best_waste).abs() < 1e-9 && ship > best_ship);
        if better {
            best_rows = rows;
            best_ship = ship;
            best_waste = waste;
        }
    }

    let panels_per_row = panels_across(cross, panel_width_in);
    let total_panels = panels_per_row.checked_mul(best_rows).ok_or_else(|| {
        CalcError::invalid_input(
            "length_ft",
            length_ft.to_string(),
            "Ceiling needs more panels than can be counted",
        )
    })?;

    Ok(CeilingLayout {
        orientation: CeilingOrientation::Lengthwise,
        rows: best_rows,
        panels_per_row,
        ship_length_ft: best_ship,
        total_panels,
        h_trim_lf: f64::from(best_rows.saturating_sub(1)) * cross,
        custom_length: false,
    })
}

/// Widthwise layout: a single row across the width.
fn widthwise(length_ft: f64, width_ft: f64, panel_width_in: f64) -> CalcResult<CeilingLayout> {
    if width_ft > MAX_CUSTOM_LENGTH_FT {
        return lengthwise(length_ft, width_ft, panel_width_in);
    }

    let custom_length = width_ft > MAX_STANDARD_LENGTH_FT;
    let ship_length_ft = if custom_length {
        width_ft.ceil()
    } else {
        round_up_to_standard(width_ft)
    };

    let panels_per_row = panels_across(length_ft, panel_width_in);
    Ok(CeilingLayout {
        orientation: CeilingOrientation::Widthwise,
        rows: 1,
        panels_per_row,
        ship_length_ft,
        total_panels: panels_per_row,
        h_trim_lf: 0.0,
        custom_length,
    })
}

/// Lay out a ceiling of `length_ft × width_ft`.
///
/// `preferred_length_ft` replaces the computed ship length only when it is an
/// even standard length that still spans what each row must cover.
///
/// # Errors
///
/// `CalcError::InvalidInput` for a non-positive or oversized dimension, or a
/// panel narrower than 6".
pub fn layout_ceiling(
    length_ft: f64,
    width_ft: f64,
    panel_width_in: f64,
    orientation: CeilingOrientation,
    preferred_length_ft: Option<f64>,
) -> CalcResult<CeilingLayout> {
    dimension("length_ft", length_ft, "Ceiling length")?;
    dimension("width_ft", width_ft, "Ceiling width")?;
    if !panel_width_in.is_finite() || panel_width_ft(panel_width_in) < MIN_COVERAGE_WIDTH_FT {
        return Err(CalcError::invalid_input(
            "panel_width_in",
            panel_width_in.to_string(),
            "Ceiling panel must be at least 6 in wide",
        ));
    }

    let mut layout = match orientation {
        CeilingOrientation::Lengthwise => lengthwise(length_ft, width_ft, panel_width_in)?,
        CeilingOrientation::Widthwise => widthwise(length_ft, width_ft, panel_width_in)?,
    };

    if let Some(preferred) = preferred_length_ft {
        let span = match layout.orientation {
            CeilingOrientation::Lengthwise => length_ft,
            CeilingOrientation::Widthwise => width_ft,
        };
        let needed = span / f64::from(layout.rows);
        if override_is_usable(preferred, needed) {
            layout.ship_length_ft = preferred;
            layout.custom_length = false;
        } else {
            tracing::debug!(preferred, needed, "ceiling length preference ignored");
        }
    }

    tracing::debug!(
        orientation = ?layout.orientation,
        rows = layout.rows,
        panels_per_row = layout.panels_per_row,
        ship_length_ft = layout.ship_length_ft,
        "ceiling layout"
    );

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::building::MAX_DIMENSION_FT;

    fn lw(length: f64, width: f64) -> CeilingLayout {
        layout_ceiling(length, width, 12.0, CeilingOrientation::Lengthwise, None).unwrap()
    }

    fn ww(length: f64, width: f64) -> CeilingLayout {
        layout_ceiling(length, width, 12.0, CeilingOrientation::Widthwise, None).unwrap()
    }

    #[test]
    fn test_round_up_to_standard() {
        assert_eq!(round_up_to_standard(4.0), 10.0);
        assert_eq!(round_up_to_standard(10.0), 10.0);
        assert_eq!(round_up_to_standard(10.1), 12.0);
        assert_eq!(round_up_to_standard(17.0), 18.0);
        assert_eq!(round_up_to_standard(20.0), 20.0);
        assert_eq!(round_up_to_standard(23.0), 20.0);
    }

    #[test]
    fn test_lengthwise_single_row_fixture() {
        // 17 x 14: one 18 ft row (1 ft waste) beats two 10 ft rows (3 ft)
        let layout = lw(17.0, 14.0);
        assert_eq!(layout.orientation, CeilingOrientation::Lengthwise);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.ship_length_ft, 18.0);
        assert_eq!(layout.panels_per_row, 14);
        assert_eq!(layout.total_panels, 14);
        assert_eq!(layout.h_trim_lf, 0.0);
    }

    #[test]
    fn test_lengthwise_multi_row_minimizes_waste() {
        // 30 ft: 2 x 16 wastes 2, 3 x 10 wastes 0
        let layout = lw(30.0, 12.0);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.ship_length_ft, 10.0);
        assert_eq!(layout.total_panels, 36);
        assert_eq!(layout.h_trim_lf, 24.0);
    }

    #[test]
    fn test_lengthwise_tie_prefers_longer_panels() {
        // 40 ft: 2 x 20 and 4 x 10 both waste 0
        let layout = lw(40.0, 10.0);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.ship_length_ft, 20.0);

        // 60 ft: 3 x 20, 5 x 12 and 6 x 10 all waste 0
        let layout = lw(60.0, 10.0);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.ship_length_ft, 20.0);
        assert_eq!(layout.h_trim_lf, 20.0);
    }

    #[test]
    fn test_lengthwise_short_span_uses_shortest_length() {
        let layout = lw(8.0, 8.0);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.ship_length_ft, 10.0);
        assert_eq!(layout.panels_per_row, 8);
    }

    #[test]
    fn test_square_room_same_count_both_orientations() {
        let a = lw(14.0, 14.0);
        let b = ww(14.0, 14.0);
        assert_eq!(a.ship_length_ft, 14.0);
        assert_eq!(b.ship_length_ft, 14.0);
        assert_eq!(a.total_panels, b.total_panels);
    }

    #[test]
    fn test_widthwise_standard_length_branch() {
        let layout = ww(30.0, 15.0);
        assert_eq!(layout.orientation, CeilingOrientation::Widthwise);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.ship_length_ft, 16.0);
        assert_eq!(layout.panels_per_row, 30);
        assert_eq!(layout.h_trim_lf, 0.0);
        assert!(!layout.custom_length);
    }

    #[test]
    fn test_widthwise_width_exactly_20_is_standard() {
        let layout = ww(30.0, 20.0);
        assert_eq!(layout.ship_length_ft, 20.0);
        assert!(!layout.custom_length);
    }

    #[test]
    fn test_widthwise_custom_cut_above_20() {
        let layout = ww(30.0, 20.5);
        assert_eq!(layout.ship_length_ft, 21.0);
        assert!(layout.custom_length);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.h_trim_lf, 0.0);
    }

    #[test]
    fn test_widthwise_width_exactly_25_is_custom() {
        let layout = ww(30.0, 25.0);
        assert_eq!(layout.orientation, CeilingOrientation::Widthwise);
        assert_eq!(layout.ship_length_ft, 25.0);
        assert!(layout.custom_length);
    }

    #[test]
    fn test_widthwise_above_25_falls_back_to_lengthwise() {
        let layout = ww(40.0, 25.5);
        assert_eq!(layout, lw(40.0, 25.5));
        assert_eq!(layout.orientation, CeilingOrientation::Lengthwise);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.panels_per_row, 26);
        assert_eq!(layout.h_trim_lf, 25.5);
    }

    #[test]
    fn test_panels_per_row_uses_panel_width() {
        let layout = layout_ceiling(30.0, 15.0, 18.0, CeilingOrientation::Widthwise, None).unwrap();
        assert_eq!(layout.panels_per_row, 20);
    }

    #[test]
    fn test_preferred_length_rules() {
        let pick = |pref: f64| {
            layout_ceiling(30.0, 15.0, 12.0, CeilingOrientation::Widthwise, Some(pref))
                .unwrap()
                .ship_length_ft
        };
        assert_eq!(pick(18.0), 18.0);
        assert_eq!(pick(20.0), 20.0);
        // shorter than the width, odd, fractional, out of range
        assert_eq!(pick(14.0), 16.0);
        assert_eq!(pick(17.0), 16.0);
        assert_eq!(pick(16.5), 16.0);
        assert_eq!(pick(22.0), 16.0);

        // custom-cut widths can never take a standard preference
        let custom = layout_ceiling(30.0, 22.0, 12.0, CeilingOrientation::Widthwise, Some(20.0)).unwrap();
        assert_eq!(custom.ship_length_ft, 22.0);
        assert!(custom.custom_length);

        // lengthwise: must cover span / rows
        let lengthwise = layout_ceiling(30.0, 12.0, 12.0, CeilingOrientation::Lengthwise, Some(12.0)).unwrap();
        assert_eq!(lengthwise.rows, 3);
        assert_eq!(lengthwise.ship_length_ft, 12.0);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(layout_ceiling(0.0, 10.0, 12.0, CeilingOrientation::Lengthwise, None).is_err());
        assert!(layout_ceiling(10.0, 10.0, 0.0, CeilingOrientation::Widthwise, None).is_err());
    }

    #[test]
    fn test_oversized_ceiling_is_invalid_not_a_panic() {
        let err = layout_ceiling(1e6, 1e5, 12.0, CeilingOrientation::Lengthwise, None).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "length_ft"));
        assert!(layout_ceiling(10.0, 10.0, 0.001, CeilingOrientation::Lengthwise, None).is_err());
    }

    #[test]
    fn test_largest_ceiling_fits() {
        // 10,000 ft span: 500 rows of 20 ft, 20,000 six-inch panels per row
        let layout = layout_ceiling(MAX_DIMENSION_FT, MAX_DIMENSION_FT, 6.0, CeilingOrientation::Lengthwise, None).unwrap();
        assert_eq!(layout.rows, 500);
        assert_eq!(layout.panels_per_row, 20_000);
        assert_eq!(layout.total_panels, 10_000_000);
    }
}
