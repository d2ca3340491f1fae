//! # Material Demand
//!
//! What a BOM is assembled from: panel counts per product, trim footage per
//! bucket, and the hardware basis. A demand is built per room and merged
//! across rooms, so a job packages its trim and applies its hardware rules
//! once on the combined figures.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::bom::demand::MaterialDemand;
//! use takeoff_core::calculations::{estimate, BuildingInput};
//! use takeoff_core::settings::EstimateSettings;
//!
//! let room = BuildingInput::room(10.0, 10.0, 10.0);
//! let calc = estimate::calculate(&room, &EstimateSettings::default()).unwrap();
//!
//! let mut job = MaterialDemand::for_room(&room, &calc);
//! job.merge(&MaterialDemand::for_room(&room, &calc));
//!
//! assert_eq!(job.wall_panels[0].quantity, 84);
//! assert_eq!(job.trims.wall_lf(), 160.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::bom::hardware::HardwareBasis;
use crate::calculations::trim::aggregate_trims;
use crate::calculations::{BuildingInput, CalcEstimateResult, TrimTakeoff};
use crate::catalog::{NuformColor, PanelSeries};

/// Panels of one product to order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDemand {
    pub series: PanelSeries,
    pub color: NuformColor,
    /// Ship length (ft)
    pub length_ft: f64,
    pub width_in: f64,
    /// Rounded panels to order
    pub quantity: u32,
    /// Panels before contingency and rounding
    pub base: u32,
}

impl PanelDemand {
    fn same_product(&self, other: &PanelDemand) -> bool {
        self.series == other.series && self.color == other.color && (self.length_ft - other.length_ft).abs() < 1e-9
    }
}

/// Combined material needs of one or more rooms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDemand {
    pub wall_panels: Vec<PanelDemand>,
    pub ceiling_panels: Vec<PanelDemand>,
    pub trims: TrimTakeoff,
    /// Some wall panel is longer than 12 ft
    pub wall_panels_over_12ft: bool,
    /// Some ceiling ships longer than 12 ft
    pub ceiling_panels_over_12ft: bool,
    pub hardware: HardwareBasis,
}

fn push_panels(list: &mut Vec<PanelDemand>, demand: PanelDemand) {
    if demand.quantity == 0 {
        return;
    }
    match list.iter_mut().find(|d| d.same_product(&demand)) {
        Some(existing) => {
            existing.quantity = existing.quantity.saturating_add(demand.quantity);
            existing.base = existing.base.saturating_add(demand.base);
        }
        None => list.push(demand),
    }
}

impl MaterialDemand {
    /// Demand of a single calculated room.
    pub fn for_room(input: &BuildingInput, calc: &CalcEstimateResult) -> Self {
        let ceiling_layout = calc.ceiling.as_ref().map(|c| &c.layout);
        let trims = aggregate_trims(input, ceiling_layout);
        let hardware = HardwareBasis::for_room(input, calc, &trims);

        let mut demand = MaterialDemand {
            trims,
            wall_panels_over_12ft: input.wall_panels_over_12ft(),
            ceiling_panels_over_12ft: ceiling_layout.is_some_and(|layout| layout.ship_length_ft > 12.0),
            hardware,
            ..MaterialDemand::default()
        };

        let wall = &input.wall_panel;
        push_panels(
            &mut demand.wall_panels,
            PanelDemand {
                series: wall.series,
                color: wall.color,
                length_ft: wall.length_ft,
                width_in: wall.width_in,
                quantity: calc.panels.rounded_panels,
                base: calc.panels.base_panels,
            },
        );

        if let Some(ceiling) = &calc.ceiling {
            let spec = &input.ceiling_panel;
            push_panels(
                &mut demand.ceiling_panels,
                PanelDemand {
                    series: spec.series,
                    color: spec.color,
                    length_ft: ceiling.layout.ship_length_ft,
                    width_in: spec.width_in,
                    quantity: ceiling.panels.rounded_panels,
                    base: ceiling.layout.total_panels,
                },
            );
        }

        demand
    }

    /// Fold another room into this demand.
    ///
    /// Panels of the same series, color and length share one entry; trim
    /// buckets add up per context.
    pub fn merge(&mut self, other: &MaterialDemand) {
        for panels in &other.wall_panels {
            push_panels(&mut self.wall_panels, panels.clone());
        }
        for panels in &other.ceiling_panels {
            push_panels(&mut self.ceiling_panels, panels.clone());
        }
        self.trims.merge(&other.trims);
        self.wall_panels_over_12ft |= other.wall_panels_over_12ft;
        self.ceiling_panels_over_12ft |= other.ceiling_panels_over_12ft;
        self.hardware.merge(&other.hardware);
    }
}
