//! # Quantity Calculations
//!
//! Every quantity in a takeoff comes from this module. The pieces follow the
//! same pattern:
//!
//! - `*Input` / `*Spec` - input parameters (JSON-serializable)
//! - `*Result` / `*Layout` - calculation results (JSON-serializable)
//! - pure functions with no I/O and no catalog access
//!
//! ## Available Calculations
//!
//! - [`building`] - Building geometry, openings and product choices
//! - [`panels`] - Wall/ceiling panel counts with contingency and rounding
//! - [`ceiling`] - Ceiling layout optimizer (rows × ship length)
//! - [`trim`] - Trim linear footage per profile and color
//! - [`packaging`] - 12 ft vs 16 ft trim stick policy
//! - [`estimate`] - The whole pipeline for one building

pub mod building;
pub mod ceiling;
pub mod estimate;
pub mod packaging;
pub mod panels;
pub mod trim;

// Re-export commonly used types
pub use building::{
    BuildMode, BuildingInput, CeilingOrientation, CeilingPanelSpec, CeilingTransition, HardwareSelections, Opening,
    OpeningKind, OpeningTreatment, PanelSpec, TrimSelections,
};
pub use ceiling::CeilingLayout;
pub use estimate::{CalcEstimateResult, CeilingPanelResult};
pub use packaging::{StickLength, TrimKind};
pub use panels::PanelCalcResult;
pub use trim::{TrimCalcResult, TrimKey, TrimTakeoff};
