//! # Takeoff Pipeline
//!
//! One call from building input to quantities and BOM: [`run_estimate`] for a
//! single room, [`run_job`] for several rooms ordered together. A job keeps
//! each room's quantities but builds one BOM, so panels of the same product
//! share a line, trim is packaged on the combined footage, and hardware rules
//! see the job totals.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::BuildingInput;
//! use takeoff_core::catalog::Catalog;
//! use takeoff_core::settings::EstimateSettings;
//! use takeoff_core::takeoff::run_estimate;
//!
//! let input = BuildingInput::room(24.0, 16.0, 10.0);
//! let estimate = run_estimate(&input, &Catalog::default(), &EstimateSettings::default()).unwrap();
//!
//! assert_eq!(estimate.calc.panels.base_panels, 80);
//! assert!(estimate.bom.missing);
//! ```

use serde::{Deserialize, Serialize};

use crate::bom::demand::MaterialDemand;
use crate::bom::{assemble_bom, build_bom, Bom};
use crate::calculations::{estimate, BuildingInput, CalcEstimateResult};
use crate::catalog::CatalogResolver;
use crate::errors::{CalcError, CalcResult};
use crate::settings::EstimateSettings;

/// Quantities and BOM for one building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub calc: CalcEstimateResult,
    pub bom: Bom,
}

/// Calculate quantities, then assemble the BOM against `catalog`.
///
/// # Errors
///
/// Only input validation fails; catalog misses are reported in
/// `bom.missing`.
pub fn run_estimate<R>(input: &BuildingInput, catalog: &R, settings: &EstimateSettings) -> CalcResult<Estimate>
where
    R: CatalogResolver + ?Sized,
{
    let calc = estimate::calculate(input, settings)?;
    let bom = build_bom(input, &calc, catalog, settings);
    if bom.missing {
        tracing::warn!("estimate has parts missing from the catalog");
    }
    Ok(Estimate { calc, bom })
}

/// Quantities per room and one BOM for the job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEstimate {
    /// One result per input room, in input order
    pub rooms: Vec<CalcEstimateResult>,
    pub bom: Bom,
}

impl JobEstimate {
    /// Wall plus ceiling panels to order across all rooms
    pub fn total_rounded_panels(&self) -> u32 {
        self.rooms
            .iter()
            .fold(0u32, |sum, room| sum.saturating_add(room.total_rounded_panels()))
    }
}

/// Calculate every room, then assemble a single BOM from their combined
/// demand.
///
/// # Errors
///
/// `CalcError::InvalidInput` when `rooms` is empty or any room is invalid;
/// the field is prefixed with the room index (`rooms[1].width_ft`).
pub fn run_job<R>(rooms: &[BuildingInput], catalog: &R, settings: &EstimateSettings) -> CalcResult<JobEstimate>
where
    R: CatalogResolver + ?Sized,
{
    if rooms.is_empty() {
        return Err(CalcError::invalid_input("rooms", "[]", "A job needs at least one room"));
    }

    let mut results = Vec::with_capacity(rooms.len());
    let mut demand = MaterialDemand::default();
    for (i, input) in rooms.iter().enumerate() {
        let calc = estimate::calculate(input, settings).map_err(|e| match e {
            CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
                field: format!("rooms[{}].{}", i, field),
                value,
                reason,
            },
            other => other,
        })?;
        demand.merge(&MaterialDemand::for_room(input, &calc));
        results.push(calc);
    }

    let bom = assemble_bom(&demand, catalog, settings);
    if bom.missing {
        tracing::warn!(rooms = rooms.len(), "job has parts missing from the catalog");
    }
    tracing::info!(rooms = rooms.len(), lines = bom.lines.len(), "job estimated");

    Ok(JobEstimate { rooms: results, bom })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CeilingPanelSpec, CeilingTransition, PanelSpec};
    use crate::catalog::fixtures::full_catalog;
    use crate::catalog::PartCategory;

    #[test]
    fn test_run_estimate_end_to_end() {
        let input = BuildingInput::room(17.0, 14.0, 10.0).with_ceiling(CeilingPanelSpec::default());
        let estimate = run_estimate(&input, &full_catalog(), &EstimateSettings::default()).unwrap();

        assert!(!estimate.bom.missing);
        let ceiling = estimate.calc.ceiling.as_ref().unwrap();
        let ceiling_line = estimate
            .bom
            .lines
            .iter()
            .find(|l| l.part_number == format!("PNL-R3-{}-WH", ceiling.layout.ship_length_ft))
            .unwrap();
        assert_eq!(ceiling_line.quantity, f64::from(ceiling.panels.rounded_panels));
        assert!(estimate.bom.total_price() > 0.0);
    }

    #[test]
    fn test_run_estimate_rejects_invalid_input() {
        let input = BuildingInput::room(24.0, 16.0, -1.0);
        let err = run_estimate(&input, &full_catalog(), &EstimateSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    fn golden_room() -> BuildingInput {
        BuildingInput::room(17.0, 14.0, 16.0)
            .with_wall_panel(PanelSpec {
                length_ft: 16.0,
                ..PanelSpec::default()
            })
            .with_ceiling(CeilingPanelSpec::default())
    }

    fn quantity(bom: &Bom, part_number: &str) -> f64 {
        bom.lines
            .iter()
            .filter(|l| l.part_number == part_number)
            .map(|l| l.quantity)
            .sum()
    }

    #[test]
    fn test_single_room_job_matches_estimate() {
        let catalog = full_catalog();
        let settings = EstimateSettings::default();
        let input = golden_room().with_transition(Some(CeilingTransition::Cove));

        let single = run_estimate(&input, &catalog, &settings).unwrap();
        let job = run_job(std::slice::from_ref(&input), &catalog, &settings).unwrap();
        assert_eq!(job.rooms, vec![single.calc]);
        assert_eq!(job.bom, single.bom);
    }

    #[test]
    fn test_two_room_job_combines_lines() {
        let catalog = full_catalog();
        let settings = EstimateSettings::default();
        let rooms = [BuildingInput::room(10.0, 10.0, 10.0), BuildingInput::room(10.0, 10.0, 10.0)];

        let job = run_job(&rooms, &catalog, &settings).unwrap();
        assert!(!job.bom.missing);
        assert_eq!(job.rooms.len(), 2);
        assert_eq!(job.total_rounded_panels(), 84);

        let panels: Vec<_> = job.bom.lines_in(PartCategory::Panel).collect();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].quantity, 84.0);
        assert_eq!(panels[0].overage, 4.0);

        // 80 lf of J still fits one pack of 10 × 12 ft
        assert_eq!(quantity(&job.bom, "TRM-J-12-WH"), 1.0);
        // plugs and spacers: 84 panels is one pack each, not one per room
        assert_eq!(quantity(&job.bom, "PLUGS"), 1.0);
        assert_eq!(quantity(&job.bom, "SPACERS"), 1.0);
        assert_eq!(quantity(&job.bom, "EXPANSIONTOOL"), 1.0);
        // 2 × 584 lf / 2 ft = 584 screws
        assert_eq!(quantity(&job.bom, "SCREWBOX-WALL"), 2.0);

        // each room alone would also order a pack
        let per_room = run_estimate(&rooms[0], &catalog, &settings).unwrap();
        assert_eq!(quantity(&per_room.bom, "PLUGS"), 1.0);
    }

    #[test]
    fn test_job_merges_ceiling_panels_per_ship_length() {
        let job = run_job(&[golden_room(), golden_room()], &full_catalog(), &EstimateSettings::default()).unwrap();
        assert_eq!(quantity(&job.bom, "PNL-R3-18-WH"), 32.0);
        assert_eq!(quantity(&job.bom, "PNL-R3-16-WH"), 132.0);
        // 164 panels → ceil(64 / 50) = 2 packs
        assert_eq!(quantity(&job.bom, "PLUGS"), 2.0);
        assert_eq!(job.bom.lines_in(PartCategory::Panel).count(), 2);
    }

    #[test]
    fn test_job_errors_name_the_room() {
        let rooms = [BuildingInput::room(10.0, 10.0, 10.0), BuildingInput::room(10.0, 0.0, 10.0)];
        let err = run_job(&rooms, &full_catalog(), &EstimateSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "rooms[1].width_ft"));

        let err = run_job(&[], &full_catalog(), &EstimateSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "rooms"));
    }

    #[test]
    fn test_estimate_serializes() {
        let input = BuildingInput::room(12.0, 12.0, 8.0);
        let estimate = run_estimate(&input, &full_catalog(), &EstimateSettings::default()).unwrap();
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["calc"]["panels"]["base_panels"], 48);
        assert_eq!(json["bom"]["missing"], false);
    }
}
