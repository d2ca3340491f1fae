//! # takeoff_core - PVC Liner Panel Takeoff Engine
//!
//! `takeoff_core` turns the geometry of a building (or a single wall) into the
//! material list needed to line it with PVC panels: wall and ceiling panels,
//! trim packages, and fastening hardware, resolved against a parts catalog.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected Catalog**: Lookups go through [`catalog::CatalogResolver`]
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculations::{BuildingInput, Opening, OpeningTreatment};
//! use takeoff_core::catalog::Catalog;
//! use takeoff_core::settings::EstimateSettings;
//! use takeoff_core::run_estimate;
//!
//! let input = BuildingInput::room(30.0, 20.0, 12.0)
//!     .with_opening(Opening::new(10.0, 10.0, 1, OpeningTreatment::Butt));
//!
//! let estimate = run_estimate(&input, &Catalog::default(), &EstimateSettings::default()).unwrap();
//! // (100 ft × 12 ft − 100 sf) / 12 sf per panel
//! assert_eq!(estimate.calc.panels.base_panels, 92);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Panel, ceiling, trim and packaging calculations
//! - [`catalog`] - Parts, colors, and the catalog resolver
//! - [`bom`] - BOM assembly, hardware rules, quantity adjustments
//! - [`takeoff`] - Calculation + BOM in one call, per room or per job
//! - [`settings`] - Contingency, warning and hardware settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading catalogs, inputs and settings

pub mod bom;
pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod settings;
pub mod takeoff;

// Re-export commonly used types at crate root for convenience
pub use bom::{assemble_bom, build_bom, Bom, BomLineItem};
pub use calculations::{BuildingInput, CalcEstimateResult};
pub use catalog::{Catalog, CatalogResolver, Part, PartCategory};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_building_input, load_catalog, load_job, load_settings};
pub use settings::EstimateSettings;
pub use takeoff::{run_estimate, run_job, Estimate, JobEstimate};
