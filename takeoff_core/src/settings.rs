//! # Estimate Settings
//!
//! Tunable constants for a takeoff: contingency defaults, the overage warning
//! threshold, screw spacing, and the hardware part codes looked up in the
//! catalog. Settings serialize as JSON; any field missing from a settings file
//! keeps its default.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::settings::EstimateSettings;
//!
//! let settings: EstimateSettings =
//!     serde_json::from_str(r#"{ "default_extra_percent": 8.0 }"#).unwrap();
//! assert_eq!(settings.default_extra_percent, 8.0);
//! assert_eq!(settings.warn_when_rounded_exceeds_percent, 7.5);
//! ```

use serde::{Deserialize, Serialize};

/// Contingency applied when the input carries no override
pub const DEFAULT_EXTRA_PERCENT: f64 = 5.0;

/// Overage (rounded vs base) above which the result is flagged
pub const WARN_WHEN_ROUNDED_EXCEEDS_PERCENT: f64 = 7.5;

/// Global takeoff settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Contingency percent used when `BuildingInput::extra_percent` is `None`
    pub default_extra_percent: f64,

    /// Warn when the rounded panel overage exceeds this percent
    pub warn_when_rounded_exceeds_percent: f64,

    /// Screws per box
    pub screws_per_box: u32,

    /// One wall screw every N feet of panel/trim
    pub wall_screw_spacing_ft: f64,

    /// One ceiling screw every N feet of panel/trim
    pub ceiling_screw_spacing_ft: f64,

    /// Max difference between requested and catalog length (ft)
    pub length_tolerance_ft: f64,

    /// Catalog codes for hardware lines
    pub hardware_codes: HardwareCodes,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            default_extra_percent: DEFAULT_EXTRA_PERCENT,
            warn_when_rounded_exceeds_percent: WARN_WHEN_ROUNDED_EXCEEDS_PERCENT,
            screws_per_box: 500,
            wall_screw_spacing_ft: 2.0,
            ceiling_screw_spacing_ft: 1.5,
            length_tolerance_ft: 0.01,
            hardware_codes: HardwareCodes::default(),
        }
    }
}

/// Catalog part numbers for hardware items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareCodes {
    pub wall_screws: String,
    pub ceiling_screws: String,
    pub plugs: String,
    pub spacers: String,
    pub expansion_tool: String,
}

impl Default for HardwareCodes {
    fn default() -> Self {
        HardwareCodes {
            wall_screws: "SCREWBOX-WALL".to_string(),
            ceiling_screws: "SCREWBOX-CEILING".to_string(),
            plugs: "PLUGS".to_string(),
            spacers: "SPACERS".to_string(),
            expansion_tool: "EXPANSIONTOOL".to_string(),
        }
    }
}

/// Parse a user-typed extras percent.
///
/// Accepts surrounding whitespace and an optional trailing `%`. Text that does
/// not parse to a finite, non-negative number yields `last_good`, or
/// [`DEFAULT_EXTRA_PERCENT`] when there is no previous value.
///
/// ```rust
/// use takeoff_core::settings::parse_extra_percent;
///
/// assert_eq!(parse_extra_percent(" 7.5 % ", None), 7.5);
/// assert_eq!(parse_extra_percent("abc", Some(10.0)), 10.0);
/// assert_eq!(parse_extra_percent("", None), 5.0);
/// ```
pub fn parse_extra_percent(text: &str, last_good: Option<f64>) -> f64 {
    let fallback = last_good.unwrap_or(DEFAULT_EXTRA_PERCENT);
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => fallback,
    }
}
