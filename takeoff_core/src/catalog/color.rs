//! Panel and trim colors, and panel series.
//!
//! Colors are the second key of every trim bucket; wall and ceiling trim
//! can be ordered in different colors. Colors read from JSON go through
//! [`NuformColor::from_str_flexible`], so `"Grey"` or `"bright-white"` load.

use serde::{Deserialize, Deserializer, Serialize};

/// Colors offered for liner panels and trims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NuformColor {
    #[serde(rename = "BRIGHT WHITE")]
    BrightWhite,
    #[default]
    #[serde(rename = "NUFORM WHITE")]
    NuformWhite,
    #[serde(rename = "BLACK")]
    Black,
    #[serde(rename = "GRAY")]
    Gray,
    #[serde(rename = "TAN")]
    Tan,
}

impl NuformColor {
    /// All colors for UI selection
    pub const ALL: [NuformColor; 5] = [
        NuformColor::BrightWhite,
        NuformColor::NuformWhite,
        NuformColor::Black,
        NuformColor::Gray,
        NuformColor::Tan,
    ];

    /// Colors tried, in order, when the preferred color has no part.
    pub const FALLBACKS: [NuformColor; 2] = [NuformColor::BrightWhite, NuformColor::NuformWhite];

    /// Color name as written in the parts catalog
    pub fn catalog_name(&self) -> &'static str {
        match self {
            NuformColor::BrightWhite => "BRIGHT WHITE",
            NuformColor::NuformWhite => "NUFORM WHITE",
            NuformColor::Black => "BLACK",
            NuformColor::Gray => "GRAY",
            NuformColor::Tan => "TAN",
        }
    }

    /// Two-letter suffix used in part numbers (e.g. `GEL2PLCAWH`)
    pub(crate) fn sku_suffix(&self) -> &'static str {
        match self {
            NuformColor::BrightWhite => "BW",
            NuformColor::NuformWhite => "WH",
            NuformColor::Black => "BK",
            NuformColor::Gray => "GA",
            NuformColor::Tan => "TN",
        }
    }

    /// Parse loosely typed color text.
    ///
    /// Case, repeated whitespace, `-` and `_` are ignored. Blank or unknown
    /// text maps to Nuform White, the stock color.
    pub fn from_str_flexible(s: &str) -> Self {
        let key = s
            .trim()
            .to_uppercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match key.as_str() {
            "BRIGHT WHITE" | "BW" => NuformColor::BrightWhite,
            "NUFORM WHITE" | "WH" => NuformColor::NuformWhite,
            "BLACK" | "BK" => NuformColor::Black,
            "GRAY" | "GREY" | "GA" => NuformColor::Gray,
            "TAN" | "TN" => NuformColor::Tan,
            _ => NuformColor::NuformWhite,
        }
    }
}

impl<'de> Deserialize<'de> for NuformColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(NuformColor::from_str_flexible(&text))
    }
}

impl std::fmt::Display for NuformColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.catalog_name())
    }
}

/// Panel product lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelSeries {
    /// RELINE R3, 12"
    #[default]
    R3,
    /// RELINE Mono
    Mono,
    /// RELINE PRO, 18"
    Pro18,
}

impl PanelSeries {
    pub const ALL: [PanelSeries; 3] = [PanelSeries::R3, PanelSeries::Mono, PanelSeries::Pro18];

    /// Series code stored on catalog panel parts
    pub fn code(&self) -> &'static str {
        match self {
            PanelSeries::R3 => "R3",
            PanelSeries::Mono => "Mono",
            PanelSeries::Pro18 => "Pro18",
        }
    }
}

impl std::fmt::Display for PanelSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Manufacturer part number of a standard panel: `GEL2PL` (12") or `GELPRO`
/// (18"), a length letter B-G for 10-20 ft, `A`, then the color suffix.
///
/// `None` for lengths without a letter, such as custom cuts.
///
/// ```rust
/// use takeoff_core::catalog::{panel_sku, NuformColor};
///
/// assert_eq!(panel_sku(12.0, 16.0, NuformColor::NuformWhite).as_deref(), Some("GEL2PLEAWH"));
/// assert_eq!(panel_sku(12.0, 22.0, NuformColor::NuformWhite), None);
/// ```
pub fn panel_sku(width_in: f64, length_ft: f64, color: NuformColor) -> Option<String> {
    if length_ft.fract() != 0.0 {
        return None;
    }
    let letter = match length_ft as u32 {
        10 => 'B',
        12 => 'C',
        14 => 'D',
        16 => 'E',
        18 => 'F',
        20 => 'G',
        _ => return None,
    };
    let prefix = if width_in == 18.0 { "GELPRO" } else { "GEL2PL" };
    Some(format!("{}{}A{}", prefix, letter, color.sku_suffix()))
}
