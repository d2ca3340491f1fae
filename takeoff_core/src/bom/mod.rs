//! # BOM Assembler
//!
//! Turns calculated quantities into orderable catalog lines:
//!
//! 1. Wall panels, then ceiling panels
//! 2. Wall trim packs, then ceiling trim packs (stick length per
//!    [`crate::calculations::packaging`])
//! 3. Hardware
//!
//! Parts are resolved through a [`CatalogResolver`]. Panels and trim buckets
//! first look for their own color, then BRIGHT WHITE, then NUFORM WHITE, and
//! only accept a part within the configured length tolerance; a longer or
//! shorter length is never swapped in. Anything that cannot be resolved is
//! logged, skipped, and reported through [`Bom::missing`]; the rest of the
//! BOM is still built.
//!
//! [`build_bom`] covers one room. A job merges each room's
//! [`demand::MaterialDemand`] and calls [`assemble_bom`] once.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::bom::build_bom;
//! use takeoff_core::calculations::{estimate, BuildingInput};
//! use takeoff_core::catalog::Catalog;
//! use takeoff_core::settings::EstimateSettings;
//!
//! let input = BuildingInput::room(10.0, 10.0, 10.0);
//! let settings = EstimateSettings::default();
//! let calc = estimate::calculate(&input, &settings).unwrap();
//!
//! // nothing stocked: every line is reported missing
//! let bom = build_bom(&input, &calc, &Catalog::default(), &settings);
//! assert!(bom.lines.is_empty());
//! assert!(bom.missing);
//! ```

pub mod adjust;
pub mod demand;
pub mod hardware;

use serde::{Deserialize, Serialize};

use crate::calculations::packaging::{decide_stick_length, packs_needed};
use crate::calculations::trim::TrimKey;
use crate::calculations::{BuildingInput, CalcEstimateResult};
use crate::catalog::{panel_sku, CatalogResolver, NuformColor, Part, PartCategory, PanelSeries};
use crate::settings::EstimateSettings;

use demand::{MaterialDemand, PanelDemand};
use hardware::{compute_hardware, ScrewCount};

/// One orderable line.
///
/// `overage` is provided minus required in the line's native units: panels
/// for panel lines, linear feet for trim, pieces for screws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLineItem {
    pub part_number: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: PartCategory,
    pub overage: f64,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl BomLineItem {
    fn from_part(part: &Part, quantity: f64, overage: f64) -> Self {
        BomLineItem {
            part_number: part.part_number.clone(),
            name: part.description.clone(),
            quantity,
            unit: part.units.clone(),
            category: part.category,
            overage,
            unit_price: part.price,
        }
    }

    /// quantity × unit price, if priced
    pub fn extended_price(&self) -> Option<f64> {
        self.unit_price.map(|price| price * self.quantity)
    }
}

/// Sum of extended prices; unpriced lines are ignored.
pub fn bom_total_price(lines: &[BomLineItem]) -> f64 {
    lines.iter().filter_map(BomLineItem::extended_price).sum()
}

/// Assembled bill of materials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    pub lines: Vec<BomLineItem>,
    /// At least one bucket or hardware item had no catalog match
    pub missing: bool,
}

impl Bom {
    pub fn total_price(&self) -> f64 {
        bom_total_price(&self.lines)
    }

    pub fn lines_in(&self, category: PartCategory) -> impl Iterator<Item = &BomLineItem> {
        self.lines.iter().filter(move |line| line.category == category)
    }
}

/// Preferred color, then the white fallbacks, without repeats
fn color_chain(preferred: NuformColor) -> impl Iterator<Item = NuformColor> {
    std::iter::once(preferred).chain(NuformColor::FALLBACKS.into_iter().filter(move |c| *c != preferred))
}

struct BomBuilder<'a, R: CatalogResolver + ?Sized> {
    catalog: &'a R,
    settings: &'a EstimateSettings,
    bom: Bom,
}

impl<'a, R: CatalogResolver + ?Sized> BomBuilder<'a, R> {
    fn resolve_panel(&self, series: PanelSeries, color: NuformColor, length_ft: f64) -> Option<&'a Part> {
        let catalog: &'a R = self.catalog;
        let tolerance = self.settings.length_tolerance_ft;
        color_chain(color).find_map(|c| {
            catalog
                .find_panel(series, c.catalog_name(), length_ft)
                .filter(|part| (part.length_ft - length_ft).abs() <= tolerance)
        })
    }

    fn resolve_trim(&self, category: PartCategory, color: NuformColor, length_ft: f64) -> Option<&'a Part> {
        let catalog: &'a R = self.catalog;
        let tolerance = self.settings.length_tolerance_ft;
        color_chain(color).find_map(|c| {
            catalog
                .find_by_category_and_length(c.catalog_name(), category, length_ft)
                .filter(|part| part.category == category && (part.length_ft - length_ft).abs() <= tolerance)
        })
    }

    fn add_panels(&mut self, panels: &PanelDemand) {
        if panels.quantity == 0 {
            return;
        }
        match self.resolve_panel(panels.series, panels.color, panels.length_ft) {
            Some(part) => {
                let overage = f64::from(panels.quantity) - f64::from(panels.base);
                self.bom
                    .lines
                    .push(BomLineItem::from_part(part, f64::from(panels.quantity), overage));
            }
            None => {
                let expected_sku = panel_sku(panels.width_in, panels.length_ft, panels.color);
                tracing::warn!(
                    series = %panels.series,
                    color = %panels.color,
                    length_ft = panels.length_ft,
                    expected_sku = expected_sku.as_deref().unwrap_or("-"),
                    "no catalog panel for selection"
                );
                self.bom.missing = true;
            }
        }
    }

    fn add_trim(&mut self, key: TrimKey, required_lf: f64, any_panel_over_12ft: bool) {
        let stick = decide_stick_length(key.kind, any_panel_over_12ft, required_lf, |_| {
            key.kind.pieces_per_package()
        });
        let stick_ft = f64::from(stick.feet());

        let Some(part) = self.resolve_trim(key.kind.category(), key.color, stick_ft) else {
            tracing::warn!(
                kind = ?key.kind,
                color = %key.color,
                length_ft = stick_ft,
                "no catalog part for trim bucket"
            );
            self.bom.missing = true;
            return;
        };

        let pack_pieces = part.pack_pieces.max(1);
        let packs = packs_needed(required_lf, pack_pieces, stick_ft);
        let provided_lf = f64::from(packs) * f64::from(pack_pieces) * stick_ft;
        self.bom
            .lines
            .push(BomLineItem::from_part(part, f64::from(packs), provided_lf - required_lf));
    }

    fn add_hardware(&mut self, code: &str, quantity: u32, overage: u32) {
        if quantity == 0 {
            return;
        }
        let catalog: &'a R = self.catalog;
        match catalog.get_hardware(code) {
            Ok(part) => self
                .bom
                .lines
                .push(BomLineItem::from_part(part, f64::from(quantity), f64::from(overage))),
            Err(err) => {
                tracing::warn!(code, error = %err, "hardware part missing from catalog");
                self.bom.missing = true;
            }
        }
    }

    fn add_screws(&mut self, code: &str, count: ScrewCount) {
        self.add_hardware(code, count.boxes, count.overage());
    }
}

/// Build the BOM for one calculated room.
///
/// Never fails: catalog misses set [`Bom::missing`] and are logged.
pub fn build_bom<R>(input: &BuildingInput, calc: &CalcEstimateResult, catalog: &R, settings: &EstimateSettings) -> Bom
where
    R: CatalogResolver + ?Sized,
{
    assemble_bom(&MaterialDemand::for_room(input, calc), catalog, settings)
}

/// Build the BOM for the material demand of one or more rooms.
///
/// Trim is packaged and hardware rules are applied on the combined figures.
pub fn assemble_bom<R>(demand: &MaterialDemand, catalog: &R, settings: &EstimateSettings) -> Bom
where
    R: CatalogResolver + ?Sized,
{
    let mut builder = BomBuilder {
        catalog,
        settings,
        bom: Bom::default(),
    };

    for panels in demand.wall_panels.iter().chain(&demand.ceiling_panels) {
        builder.add_panels(panels);
    }

    for (key, lf) in &demand.trims.wall {
        builder.add_trim(*key, *lf, demand.wall_panels_over_12ft);
    }
    for (key, lf) in &demand.trims.ceiling {
        builder.add_trim(*key, *lf, demand.ceiling_panels_over_12ft);
    }

    let hw = compute_hardware(&demand.hardware, settings);
    let codes = &settings.hardware_codes;
    builder.add_screws(&codes.wall_screws, hw.wall_screws);
    builder.add_screws(&codes.ceiling_screws, hw.ceiling_screws);
    builder.add_hardware(&codes.plugs, hw.plugs, 0);
    builder.add_hardware(&codes.spacers, hw.spacers, 0);
    builder.add_hardware(&codes.expansion_tool, hw.expansion_tools, 0);

    let bom = builder.bom;
    tracing::debug!(lines = bom.lines.len(), missing = bom.missing, "bom assembled");
    bom
}
