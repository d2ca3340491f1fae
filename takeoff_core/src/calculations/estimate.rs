//! # Estimate Calculation
//!
//! Runs the quantity pipeline for one [`BuildingInput`]: validate, count wall
//! panels, lay out the ceiling, total the trim.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::{estimate, BuildingInput};
//! use takeoff_core::settings::EstimateSettings;
//!
//! let room = BuildingInput::room(10.0, 10.0, 10.0);
//! let result = estimate::calculate(&room, &EstimateSettings::default()).unwrap();
//!
//! assert_eq!(result.panels.base_panels, 40);
//! assert_eq!(result.panels.rounded_panels, 42);
//! assert_eq!(result.inside_corners, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::building::BuildingInput;
use crate::calculations::ceiling::{layout_ceiling, CeilingLayout};
use crate::calculations::panels::{self, compute_base_panels, PanelCalcResult};
use crate::calculations::trim::{self, TrimCalcResult};
use crate::errors::CalcResult;
use crate::settings::EstimateSettings;

/// Ceiling layout and the panel count derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingPanelResult {
    pub layout: CeilingLayout,
    pub panels: PanelCalcResult,
}

/// Quantities for one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcEstimateResult {
    /// Wall panels
    pub panels: PanelCalcResult,
    pub trims: TrimCalcResult,
    pub inside_corners: u32,
    /// Present when ceiling panels are included
    pub ceiling: Option<CeilingPanelResult>,
}

impl CalcEstimateResult {
    /// Wall plus ceiling panels to order
    pub fn total_rounded_panels(&self) -> u32 {
        self.panels
            .rounded_panels
            .saturating_add(self.ceiling.as_ref().map_or(0, |c| c.panels.rounded_panels))
    }
}

/// Compute panel, ceiling and trim quantities.
///
/// # Errors
///
/// `CalcError::InvalidInput` when the geometry is invalid; nothing is
/// computed in that case.
pub fn calculate(input: &BuildingInput, settings: &EstimateSettings) -> CalcResult<CalcEstimateResult> {
    input.validate()?;

    let base = compute_base_panels(
        input.net_wall_area_sf(),
        input.panel_coverage_width_ft,
        input.height_ft,
    );
    let wall_panels = panels::calculate(base, input.extra_percent, settings);

    let ceiling = if input.include_ceiling_panels {
        let spec = &input.ceiling_panel;
        let layout = layout_ceiling(
            input.length_ft,
            input.width_ft,
            spec.width_in,
            spec.orientation,
            spec.length_ft,
        )?;
        let panels = panels::calculate(layout.total_panels, input.extra_percent, settings);
        Some(CeilingPanelResult { layout, panels })
    } else {
        None
    };

    let result = CalcEstimateResult {
        panels: wall_panels,
        trims: trim::calculate(input),
        inside_corners: trim::compute_inside_corners(input),
        ceiling,
    };

    tracing::debug!(
        net_area_sf = input.net_wall_area_sf(),
        coverage_ft = input.panel_coverage_width_ft,
        wall_panels = result.panels.rounded_panels,
        total_panels = result.total_rounded_panels(),
        "estimate calculated"
    );

    Ok(result)
}
