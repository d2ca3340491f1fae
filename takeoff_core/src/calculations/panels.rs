//! # Panel Count Calculator
//!
//! Converts a net area (walls) or a layout count (ceilings) into the number of
//! panels to order. Quantities are inflated by the contingency percent, then
//! rounded with a two-tier rule:
//!
//! - up to 150 panels: next even number (panels ship in pairs)
//! - above 150: next multiple of 5
//!
//! The overage shown to the user is always measured against the base count,
//! so it includes both the contingency and the rounding bump.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::panels::{compute_base_panels, apply_contingency_and_round};
//!
//! // 10 x 10 room, 10 ft walls, 12" panels
//! let base = compute_base_panels(400.0, 1.0, 10.0);
//! assert_eq!(base, 40);
//! assert_eq!(apply_contingency_and_round(base, 5.0), 42);
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::EstimateSettings;

/// Largest inflated quantity that is rounded to an even count
pub const EVEN_ROUNDING_LIMIT: f64 = 150.0;

/// Panel quantities for walls or a ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelCalcResult {
    /// Panels before contingency and rounding
    pub base_panels: u32,
    /// Contingency percent that was applied
    pub extra_percent_applied: f64,
    /// Panels to order
    pub rounded_panels: u32,
    /// (rounded - base) / base × 100
    pub overage_percent_rounded: f64,
    /// Overage is above the configured warning threshold
    pub warn_exceeds_configured: bool,
    /// The applied percent differs from the configured default
    pub manual_extra_override: bool,
}

/// `ceil(net_area / (coverage_width × panel_height))`; zero when nothing is
/// left to cover.
pub fn compute_base_panels(net_area_sf: f64, coverage_width_ft: f64, panel_height_ft: f64) -> u32 {
    let panels = (net_area_sf / (coverage_width_ft * panel_height_ft)).ceil();
    if panels.is_finite() && panels > 0.0 {
        panels as u32
    } else {
        0
    }
}

/// Two-tier rounding of an inflated quantity.
pub fn round_panels(qty: f64) -> u32 {
    if qty <= 0.0 {
        return 0;
    }
    if qty <= EVEN_ROUNDING_LIMIT {
        ((qty / 2.0).ceil() * 2.0) as u32
    } else {
        ((qty / 5.0).ceil() * 5.0) as u32
    }
}

/// Inflate `base` by `extra_percent` and round.
pub fn apply_contingency_and_round(base: u32, extra_percent: f64) -> u32 {
    round_panels(f64::from(base) * (1.0 + extra_percent / 100.0))
}

/// Overage of `rounded` over `base` in percent; 0 when base is 0.
pub fn overage_percent(base: u32, rounded: u32) -> f64 {
    if base == 0 {
        return 0.0;
    }
    (f64::from(rounded) - f64::from(base)) / f64::from(base) * 100.0
}

/// Full panel result for a base count.
///
/// `extra_override` is the input's contingency override, if any. The manual
/// flag compares the applied value to the default with plain inequality, so
/// explicitly entering the default is not flagged.
pub fn calculate(base_panels: u32, extra_override: Option<f64>, settings: &EstimateSettings) -> PanelCalcResult {
    let extra_percent = extra_override.unwrap_or(settings.default_extra_percent);
    let rounded_panels = apply_contingency_and_round(base_panels, extra_percent);
    let overage_percent_rounded = overage_percent(base_panels, rounded_panels);

    PanelCalcResult {
        base_panels,
        extra_percent_applied: extra_percent,
        rounded_panels,
        overage_percent_rounded,
        warn_exceeds_configured: overage_percent_rounded > settings.warn_when_rounded_exceeds_percent,
        manual_extra_override: extra_percent != settings.default_extra_percent,
    }
}
