//! # Hardware Quantities
//!
//! Screws, plugs, spacers and expansion tools, derived from panel counts and
//! the linear footage the screws have to fasten.
//!
//! | Item            | Rule                                              |
//! |-----------------|---------------------------------------------------|
//! | Plugs, spacers  | `max(1, ceil((total − 100) / 50))`, 0 without panels |
//! | Expansion tools | 1 up to 250 panels, 2 above                       |
//! | Screw boxes     | `ceil((run_lf / spacing) / screws_per_box)`       |
//!
//! `total` is wall plus ceiling panels to order. For a job the rules run once
//! on the totals of every room that selects the item, not per room.

use serde::{Deserialize, Serialize};

use crate::calculations::{BuildingInput, CalcEstimateResult, HardwareSelections, TrimTakeoff};
use crate::settings::EstimateSettings;

/// Panel count up to which one expansion tool is enough
pub const ONE_TOOL_MAX_PANELS: u32 = 250;

/// Screws needed for a run and the boxes that cover them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrewCount {
    pub screws: u32,
    pub boxes: u32,
    pub screws_per_box: u32,
}

impl ScrewCount {
    /// Screws provided beyond those required
    pub fn overage(&self) -> u32 {
        self.boxes
            .saturating_mul(self.screws_per_box)
            .saturating_sub(self.screws)
    }
}

/// Hardware quantities before catalog resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareTakeoff {
    pub wall_screws: ScrewCount,
    pub ceiling_screws: ScrewCount,
    pub plugs: u32,
    pub spacers: u32,
    pub expansion_tools: u32,
}

/// What the hardware rules are evaluated on.
///
/// Each figure only counts rooms that select the matching item;
/// `selections` is the union over those rooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareBasis {
    pub selections: HardwareSelections,
    /// Wall panel LF plus wall trim LF
    pub wall_screw_lf: f64,
    /// Ceiling panel LF plus ceiling trim LF
    pub ceiling_screw_lf: f64,
    pub plug_panels: u32,
    pub spacer_panels: u32,
    pub tool_panels: u32,
}

impl Default for HardwareBasis {
    fn default() -> Self {
        HardwareBasis {
            selections: HardwareSelections::none(),
            wall_screw_lf: 0.0,
            ceiling_screw_lf: 0.0,
            plug_panels: 0,
            spacer_panels: 0,
            tool_panels: 0,
        }
    }
}

impl HardwareBasis {
    /// Basis for one room.
    ///
    /// Panel LF is rounded panels × panel (or ceiling ship) length; trim LF is
    /// the required footage of that context's trim buckets.
    pub fn for_room(input: &BuildingInput, calc: &CalcEstimateResult, trims: &TrimTakeoff) -> Self {
        let selected = input.hardware;
        let total = calc.total_rounded_panels();
        let panels_if = |on: bool| if on { total } else { 0 };

        let wall_panel_lf = f64::from(calc.panels.rounded_panels) * input.wall_panel.length_ft;
        let ceiling_panel_lf = calc
            .ceiling
            .as_ref()
            .map_or(0.0, |c| f64::from(c.panels.rounded_panels) * c.layout.ship_length_ft);

        HardwareBasis {
            selections: selected,
            wall_screw_lf: if selected.wall_screws { wall_panel_lf + trims.wall_lf() } else { 0.0 },
            ceiling_screw_lf: if selected.ceiling_screws {
                ceiling_panel_lf + trims.ceiling_lf()
            } else {
                0.0
            },
            plug_panels: panels_if(selected.plugs),
            spacer_panels: panels_if(selected.spacers),
            tool_panels: panels_if(selected.expansion_tool),
        }
    }

    /// Add another room's basis.
    pub fn merge(&mut self, other: &HardwareBasis) {
        let (a, b) = (&mut self.selections, other.selections);
        a.wall_screws |= b.wall_screws;
        a.ceiling_screws |= b.ceiling_screws;
        a.plugs |= b.plugs;
        a.spacers |= b.spacers;
        a.expansion_tool |= b.expansion_tool;

        self.wall_screw_lf += other.wall_screw_lf;
        self.ceiling_screw_lf += other.ceiling_screw_lf;
        self.plug_panels = self.plug_panels.saturating_add(other.plug_panels);
        self.spacer_panels = self.spacer_panels.saturating_add(other.spacer_panels);
        self.tool_panels = self.tool_panels.saturating_add(other.tool_panels);
    }
}

/// Plug (or spacer) packs for `total_panels`.
pub fn plug_spacer_packs(total_panels: u32) -> u32 {
    if total_panels == 0 {
        return 0;
    }
    let packs = ((f64::from(total_panels) - 100.0) / 50.0).ceil();
    packs.max(1.0) as u32
}

/// Expansion tools for `total_panels`. One is always needed on site, even
/// when no panel is counted.
pub fn expansion_tools(total_panels: u32) -> u32 {
    if total_panels <= ONE_TOOL_MAX_PANELS {
        1
    } else {
        2
    }
}

/// One screw every `spacing_ft` along `run_lf`, boxed by `screws_per_box`.
pub fn screw_boxes(run_lf: f64, spacing_ft: f64, screws_per_box: u32) -> ScrewCount {
    if run_lf <= 0.0 || spacing_ft <= 0.0 || screws_per_box == 0 {
        return ScrewCount {
            screws_per_box,
            ..ScrewCount::default()
        };
    }
    let screws = (run_lf / spacing_ft).ceil() as u32;
    ScrewCount {
        screws,
        boxes: screws.div_ceil(screws_per_box),
        screws_per_box,
    }
}

/// Hardware for a room or a whole job, honoring the hardware selections.
pub fn compute_hardware(basis: &HardwareBasis, settings: &EstimateSettings) -> HardwareTakeoff {
    let selected = basis.selections;
    let mut hardware = HardwareTakeoff::default();

    if selected.wall_screws {
        hardware.wall_screws = screw_boxes(
            basis.wall_screw_lf,
            settings.wall_screw_spacing_ft,
            settings.screws_per_box,
        );
    }
    if selected.ceiling_screws {
        hardware.ceiling_screws = screw_boxes(
            basis.ceiling_screw_lf,
            settings.ceiling_screw_spacing_ft,
            settings.screws_per_box,
        );
    }
    if selected.plugs {
        hardware.plugs = plug_spacer_packs(basis.plug_panels);
    }
    if selected.spacers {
        hardware.spacers = plug_spacer_packs(basis.spacer_panels);
    }
    if selected.expansion_tool {
        hardware.expansion_tools = expansion_tools(basis.tool_panels);
    }

    hardware
}
