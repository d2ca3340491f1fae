//! # Building Input
//!
//! Geometry and product choices for one estimate. A `BuildingInput` is either
//! a four-wall room or a single wall; a wall is modeled as a degenerate room
//! of width 1 whose perimeter is just its length.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "mode": "ROOM",
//!   "length_ft": 30.0,
//!   "width_ft": 20.0,
//!   "height_ft": 12.0,
//!   "openings": [
//!     { "kind": "garage", "width_ft": 10.0, "height_ft": 10.0, "count": 1, "treatment": "WRAPPED" },
//!     { "kind": "man", "width_ft": 3.0, "height_ft": 7.0, "count": 2, "treatment": "BUTT" }
//!   ],
//!   "panel_coverage_width_ft": 1.0,
//!   "extra_percent": null,
//!   "trims": { "j_trim_enabled": true, "ceiling_transition": "cove" },
//!   "include_ceiling_panels": true,
//!   "ceiling_panel": { "series": "R3", "width_in": 12.0, "length_ft": null, "color": "BRIGHT WHITE", "orientation": "Lengthwise" },
//!   "wall_panel": { "series": "R3", "width_in": 12.0, "length_ft": 12.0, "color": "NUFORM WHITE" },
//!   "hardware": { "wall_screws": true, "ceiling_screws": true, "plugs": true, "spacers": true, "expansion_tool": true }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{NuformColor, PanelSeries};
use crate::errors::{CalcError, CalcResult};

/// Largest length, width, height or panel length accepted (ft)
pub const MAX_DIMENSION_FT: f64 = 10_000.0;

/// Narrowest panel coverage accepted (ft)
pub const MIN_COVERAGE_WIDTH_FT: f64 = 0.5;

/// Largest contingency accepted (%)
pub const MAX_EXTRA_PERCENT: f64 = 100.0;

/// Room (four walls) or a single wall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildMode {
    #[default]
    #[serde(rename = "ROOM")]
    Room,
    #[serde(rename = "WALL")]
    Wall,
}

/// How an opening's edge is finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningTreatment {
    /// Trim wrapped around the jamb; needs outside-corner trim and keeps its
    /// panel area.
    #[serde(rename = "WRAPPED")]
    Wrapped,
    /// Panel cut flush to the frame; the opening area is not clad.
    #[default]
    #[serde(rename = "BUTT")]
    Butt,
}

/// Opening type. Only used for labeling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Garage,
    #[serde(rename = "man")]
    ManDoor,
    Window,
    #[default]
    Custom,
}

/// A door, window, or other cutout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    #[serde(default)]
    pub kind: OpeningKind,
    pub width_ft: f64,
    pub height_ft: f64,
    pub count: u32,
    #[serde(default)]
    pub treatment: OpeningTreatment,
}

impl Opening {
    pub fn new(width_ft: f64, height_ft: f64, count: u32, treatment: OpeningTreatment) -> Self {
        Opening {
            kind: OpeningKind::Custom,
            width_ft,
            height_ft,
            count,
            treatment,
        }
    }

    pub fn with_kind(mut self, kind: OpeningKind) -> Self {
        self.kind = kind;
        self
    }

    /// Total area of all `count` openings (sf)
    pub fn area_sf(&self) -> f64 {
        self.width_ft * self.height_ft * f64::from(self.count)
    }

    /// Total perimeter of all `count` openings (lf)
    pub fn perimeter_lf(&self) -> f64 {
        2.0 * (self.width_ft + self.height_ft) * f64::from(self.count)
    }
}

/// Trim style bridging the wall and ceiling panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingTransition {
    Cove,
    CrownBase,
    FTrim,
}

impl CeilingTransition {
    pub const ALL: [CeilingTransition; 3] = [
        CeilingTransition::Cove,
        CeilingTransition::CrownBase,
        CeilingTransition::FTrim,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CeilingTransition::Cove => "cove",
            CeilingTransition::CrownBase => "crown-base",
            CeilingTransition::FTrim => "f-trim",
        }
    }

    /// Parse a style name; `"none"` and blank text mean no transition trim.
    pub fn parse(s: &str) -> CalcResult<Option<Self>> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "" | "none" => Ok(None),
            "cove" => Ok(Some(CeilingTransition::Cove)),
            "crown-base" | "crownbase" => Ok(Some(CeilingTransition::CrownBase)),
            "f-trim" | "ftrim" => Ok(Some(CeilingTransition::FTrim)),
            _ => Err(CalcError::invalid_input(
                "ceiling_transition",
                s,
                "Expected cove, crown-base, f-trim or none",
            )),
        }
    }
}

impl std::fmt::Display for CeilingTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trim choices for the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimSelections {
    #[serde(default = "default_true")]
    pub j_trim_enabled: bool,
    #[serde(default)]
    pub ceiling_transition: Option<CeilingTransition>,
}

impl Default for TrimSelections {
    fn default() -> Self {
        TrimSelections {
            j_trim_enabled: true,
            ceiling_transition: None,
        }
    }
}

/// Direction ceiling panels run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CeilingOrientation {
    /// Panels run along the building length
    #[default]
    Lengthwise,
    /// Panels run across the building width, one row when possible
    Widthwise,
}

/// Selected wall panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub series: PanelSeries,
    /// 12 or 18
    pub width_in: f64,
    /// Shipped panel length (8.5, 10, 12 ... 20)
    pub length_ft: f64,
    pub color: NuformColor,
}

impl Default for PanelSpec {
    fn default() -> Self {
        PanelSpec {
            series: PanelSeries::R3,
            width_in: 12.0,
            length_ft: 12.0,
            color: NuformColor::NuformWhite,
        }
    }
}

/// Selected ceiling panel. The ship length is chosen by the layout optimizer;
/// `length_ft` is only a user preference it may honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingPanelSpec {
    pub series: PanelSeries,
    pub width_in: f64,
    #[serde(default)]
    pub length_ft: Option<f64>,
    pub color: NuformColor,
    #[serde(default)]
    pub orientation: CeilingOrientation,
}

impl Default for CeilingPanelSpec {
    fn default() -> Self {
        CeilingPanelSpec {
            series: PanelSeries::R3,
            width_in: 12.0,
            length_ft: None,
            color: NuformColor::NuformWhite,
            orientation: CeilingOrientation::Lengthwise,
        }
    }
}

/// Hardware lines to include in the BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareSelections {
    pub wall_screws: bool,
    pub ceiling_screws: bool,
    pub plugs: bool,
    pub spacers: bool,
    pub expansion_tool: bool,
}

impl Default for HardwareSelections {
    fn default() -> Self {
        HardwareSelections {
            wall_screws: true,
            ceiling_screws: true,
            plugs: true,
            spacers: true,
            expansion_tool: true,
        }
    }
}

impl HardwareSelections {
    pub fn none() -> Self {
        HardwareSelections {
            wall_screws: false,
            ceiling_screws: false,
            plugs: false,
            spacers: false,
            expansion_tool: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Coverage width in feet of a panel `width_in` inches wide (12" → 1.0, 18" → 1.5)
pub fn panel_width_ft(width_in: f64) -> f64 {
    width_in / 12.0
}

/// One estimate's geometry and product choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInput {
    #[serde(default)]
    pub mode: BuildMode,

    pub length_ft: f64,

    /// Room width; 1 for a single wall
    pub width_ft: f64,

    pub height_ft: f64,

    #[serde(default)]
    pub openings: Vec<Opening>,

    /// Effective wall panel coverage width (ft)
    pub panel_coverage_width_ft: f64,

    /// Contingency override; `None` uses the configured default
    #[serde(default)]
    pub extra_percent: Option<f64>,

    #[serde(default)]
    pub trims: TrimSelections,

    #[serde(default)]
    pub include_ceiling_panels: bool,

    #[serde(default)]
    pub ceiling_panel: CeilingPanelSpec,

    #[serde(default)]
    pub wall_panel: PanelSpec,

    #[serde(default)]
    pub hardware: HardwareSelections,
}

impl BuildingInput {
    /// A four-wall room with default panel, trim and hardware choices.
    pub fn room(length_ft: f64, width_ft: f64, height_ft: f64) -> Self {
        let wall_panel = PanelSpec::default();
        BuildingInput {
            mode: BuildMode::Room,
            length_ft,
            width_ft,
            height_ft,
            openings: Vec::new(),
            panel_coverage_width_ft: panel_width_ft(wall_panel.width_in),
            extra_percent: None,
            trims: TrimSelections::default(),
            include_ceiling_panels: false,
            ceiling_panel: CeilingPanelSpec::default(),
            wall_panel,
            hardware: HardwareSelections::default(),
        }
    }

    /// A single wall `length_ft` long.
    pub fn wall(length_ft: f64, height_ft: f64) -> Self {
        BuildingInput {
            mode: BuildMode::Wall,
            ..BuildingInput::room(length_ft, 1.0, height_ft)
        }
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    /// Set the wall panel and derive the coverage width from its width.
    pub fn with_wall_panel(mut self, panel: PanelSpec) -> Self {
        self.panel_coverage_width_ft = panel_width_ft(panel.width_in);
        self.wall_panel = panel;
        self
    }

    /// Include ceiling panels of the given kind.
    pub fn with_ceiling(mut self, panel: CeilingPanelSpec) -> Self {
        self.include_ceiling_panels = true;
        self.ceiling_panel = panel;
        self
    }

    pub fn with_transition(mut self, transition: Option<CeilingTransition>) -> Self {
        self.trims.ceiling_transition = transition;
        self
    }

    pub fn with_extra_percent(mut self, extra_percent: f64) -> Self {
        self.extra_percent = Some(extra_percent);
        self
    }

    /// Validate input parameters.
    ///
    /// Dimensions are capped at [`MAX_DIMENSION_FT`] and coverage at
    /// [`MIN_COVERAGE_WIDTH_FT`] so every panel count fits in a `u32`.
    pub fn validate(&self) -> CalcResult<()> {
        dimension("length_ft", self.length_ft, "Length")?;
        dimension("width_ft", self.width_ft, "Width")?;
        dimension("height_ft", self.height_ft, "Height")?;
        positive(
            "panel_coverage_width_ft",
            self.panel_coverage_width_ft,
            "Panel coverage width must be positive",
        )?;
        if self.panel_coverage_width_ft < MIN_COVERAGE_WIDTH_FT {
            return Err(CalcError::invalid_input(
                "panel_coverage_width_ft",
                self.panel_coverage_width_ft.to_string(),
                format!("Panel coverage width must be at least {} ft", MIN_COVERAGE_WIDTH_FT),
            ));
        }

        for (i, op) in self.openings.iter().enumerate() {
            if !op.width_ft.is_finite() || op.width_ft < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("openings[{}].width_ft", i),
                    op.width_ft.to_string(),
                    "Opening width cannot be negative",
                ));
            }
            if !op.height_ft.is_finite() || op.height_ft < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("openings[{}].height_ft", i),
                    op.height_ft.to_string(),
                    "Opening height cannot be negative",
                ));
            }
        }

        if let Some(extra) = self.extra_percent {
            if !extra.is_finite() || !(0.0..=MAX_EXTRA_PERCENT).contains(&extra) {
                return Err(CalcError::invalid_input(
                    "extra_percent",
                    extra.to_string(),
                    format!("Extras percent must be between 0 and {}", MAX_EXTRA_PERCENT),
                ));
            }
        }

        dimension("wall_panel.length_ft", self.wall_panel.length_ft, "Wall panel length")?;

        if self.include_ceiling_panels {
            positive(
                "ceiling_panel.width_in",
                self.ceiling_panel.width_in,
                "Ceiling panel width must be positive",
            )?;
            if panel_width_ft(self.ceiling_panel.width_in) < MIN_COVERAGE_WIDTH_FT {
                return Err(CalcError::invalid_input(
                    "ceiling_panel.width_in",
                    self.ceiling_panel.width_in.to_string(),
                    format!("Ceiling panel width must be at least {} in", MIN_COVERAGE_WIDTH_FT * 12.0),
                ));
            }
        }

        Ok(())
    }

    /// Wall run in feet: full perimeter for a room, the length for a wall.
    pub fn perimeter_ft(&self) -> f64 {
        match self.mode {
            BuildMode::Room => 2.0 * (self.length_ft + self.width_ft),
            BuildMode::Wall => self.length_ft,
        }
    }

    /// Perimeter × height
    pub fn gross_wall_area_sf(&self) -> f64 {
        self.perimeter_ft() * self.height_ft
    }

    /// Area of butt-cut openings. Wrapped openings are still clad.
    pub fn butt_openings_area_sf(&self) -> f64 {
        self.openings_of(OpeningTreatment::Butt).map(Opening::area_sf).sum()
    }

    /// Wall area to be covered by panels
    pub fn net_wall_area_sf(&self) -> f64 {
        self.gross_wall_area_sf() - self.butt_openings_area_sf()
    }

    pub fn butt_openings_perimeter_lf(&self) -> f64 {
        self.openings_of(OpeningTreatment::Butt).map(Opening::perimeter_lf).sum()
    }

    pub fn wrapped_openings_perimeter_lf(&self) -> f64 {
        self.openings_of(OpeningTreatment::Wrapped).map(Opening::perimeter_lf).sum()
    }

    fn openings_of(&self, treatment: OpeningTreatment) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |op| op.treatment == treatment)
    }

    /// Whether any wall panel is longer than 12 ft
    pub fn wall_panels_over_12ft(&self) -> bool {
        self.wall_panel.length_ft > 12.0
    }
}

fn positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Positive, finite, and no larger than [`MAX_DIMENSION_FT`].
pub(crate) fn dimension(field: &str, value: f64, label: &str) -> CalcResult<()> {
    positive(field, value, &format!("{} must be positive", label))?;
    if value > MAX_DIMENSION_FT {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must not exceed {} ft", label, MAX_DIMENSION_FT),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_perimeter_and_area() {
        let room = BuildingInput::room(30.0, 20.0, 12.0);
        assert_eq!(room.perimeter_ft(), 100.0);
        assert_eq!(room.gross_wall_area_sf(), 1200.0);
    }

    #[test]
    fn test_wall_is_degenerate_room() {
        let wall = BuildingInput::wall(20.0, 10.0);
        assert_eq!(wall.mode, BuildMode::Wall);
        assert_eq!(wall.width_ft, 1.0);
        assert_eq!(wall.perimeter_ft(), 20.0);
    }

    #[test]
    fn test_only_butt_openings_reduce_net_area() {
        let room = BuildingInput::room(10.0, 10.0, 10.0)
            .with_opening(Opening::new(3.0, 7.0, 2, OpeningTreatment::Butt))
            .with_opening(Opening::new(10.0, 8.0, 1, OpeningTreatment::Wrapped));
        assert_eq!(room.butt_openings_area_sf(), 42.0);
        assert_eq!(room.net_wall_area_sf(), 400.0 - 42.0);
        assert_eq!(room.butt_openings_perimeter_lf(), 40.0);
        assert_eq!(room.wrapped_openings_perimeter_lf(), 36.0);
    }

    #[test]
    fn test_coverage_width_derived_from_panel_width() {
        let room = BuildingInput::room(10.0, 10.0, 10.0).with_wall_panel(PanelSpec {
            series: PanelSeries::Pro18,
            width_in: 18.0,
            length_ft: 14.0,
            color: NuformColor::BrightWhite,
        });
        assert_eq!(room.panel_coverage_width_ft, 1.5);
        assert!(room.wall_panels_over_12ft());
    }

    #[test]
    fn test_validation_rejects_bad_geometry() {
        assert!(BuildingInput::room(10.0, 10.0, 10.0).validate().is_ok());

        let err = BuildingInput::room(0.0, 10.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "length_ft"));

        assert!(BuildingInput::room(10.0, -1.0, 10.0).validate().is_err());
        assert!(BuildingInput::room(10.0, 10.0, f64::NAN).validate().is_err());

        let mut zero_cover = BuildingInput::room(10.0, 10.0, 10.0);
        zero_cover.panel_coverage_width_ft = 0.0;
        assert!(zero_cover.validate().is_err());

        let bad_opening = BuildingInput::room(10.0, 10.0, 10.0)
            .with_opening(Opening::new(-3.0, 7.0, 1, OpeningTreatment::Butt));
        let err = bad_opening.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "openings[0].width_ft"));

        assert!(BuildingInput::room(10.0, 10.0, 10.0)
            .with_extra_percent(-1.0)
            .validate()
            .is_err());

        let mut bad_ceiling = BuildingInput::room(10.0, 10.0, 10.0).with_ceiling(CeilingPanelSpec::default());
        bad_ceiling.ceiling_panel.width_in = 0.0;
        assert!(bad_ceiling.validate().is_err());
    }

    #[test]
    fn test_validation_caps_sizes() {
        let err = BuildingInput::room(1e6, 1e5, 10.0).validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "length_ft"));

        assert!(BuildingInput::room(MAX_DIMENSION_FT, MAX_DIMENSION_FT, 20.0).validate().is_ok());
        assert!(BuildingInput::room(10.0, 10.0, MAX_DIMENSION_FT + 1.0).validate().is_err());

        let mut narrow = BuildingInput::room(10.0, 10.0, 10.0);
        narrow.panel_coverage_width_ft = 0.01;
        let err = narrow.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "panel_coverage_width_ft"));

        let mut thin_ceiling = BuildingInput::room(10.0, 10.0, 10.0).with_ceiling(CeilingPanelSpec::default());
        thin_ceiling.ceiling_panel.width_in = 1.0;
        assert!(thin_ceiling.validate().is_err());

        assert!(BuildingInput::room(10.0, 10.0, 10.0)
            .with_extra_percent(MAX_EXTRA_PERCENT)
            .validate()
            .is_ok());
        assert!(BuildingInput::room(10.0, 10.0, 10.0)
            .with_extra_percent(1e9)
            .validate()
            .is_err());
    }

    #[test]
    fn test_transition_parsing() {
        assert_eq!(CeilingTransition::parse("none").unwrap(), None);
        assert_eq!(CeilingTransition::parse("").unwrap(), None);
        assert_eq!(CeilingTransition::parse("Crown_Base").unwrap(), Some(CeilingTransition::CrownBase));
        assert_eq!(CeilingTransition::parse("f-trim").unwrap(), Some(CeilingTransition::FTrim));
        assert!(CeilingTransition::parse("crown").is_err());
        for style in CeilingTransition::ALL {
            assert_eq!(CeilingTransition::parse(style.code()).unwrap(), Some(style));
        }
    }

    #[test]
    fn test_building_input_json() {
        let json = r#"{
            "mode": "WALL",
            "length_ft": 20.0,
            "width_ft": 1.0,
            "height_ft": 10.0,
            "openings": [
                { "width_ft": 5.0, "height_ft": 10.0, "count": 1, "treatment": "WRAPPED" }
            ],
            "panel_coverage_width_ft": 1.0,
            "trims": { "ceiling_transition": "crown-base" }
        }"#;
        let input: BuildingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.mode, BuildMode::Wall);
        assert_eq!(input.openings[0].kind, OpeningKind::Custom);
        assert_eq!(input.openings[0].treatment, OpeningTreatment::Wrapped);
        assert!(input.trims.j_trim_enabled);
        assert_eq!(input.trims.ceiling_transition, Some(CeilingTransition::CrownBase));
        assert!(!input.include_ceiling_panels);
        assert!(input.hardware.plugs);
    }
}
