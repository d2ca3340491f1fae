//! # Quantity Adjustments
//!
//! Estimators nudge suggested BOM quantities by hand: `"+3"`, `"-1.5"`,
//! `"5%"`, `"-12.5%"`. Changes are in the same units as the suggested
//! quantity (panels, packs, boxes); a percent is taken of the suggested
//! quantity. Text that does not parse is no change.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::bom::adjust::{AdjustedQuantity, QuantityChange};
//!
//! let row = AdjustedQuantity::new(42.0, 40.0).with_change(QuantityChange::parse("+3"));
//! assert_eq!(row.final_quantity(), 45.0);
//! assert_eq!(row.overage_units(), 5.0);
//! assert_eq!(row.overage_percent(), 12.5);
//! ```

use serde::{Deserialize, Serialize};

/// A user edit to a suggested quantity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum QuantityChange {
    #[default]
    None,
    /// Absolute change in the row's units
    Units(f64),
    /// Percent of the suggested quantity
    Percent(f64),
}

impl QuantityChange {
    /// Parse change text. Blank or malformed text is `None`.
    pub fn parse(text: &str) -> Self {
        let s = text.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        let (number, percent) = match s.strip_suffix('%') {
            Some(rest) => (rest.trim(), true),
            None => (s, false),
        };

        match number.parse::<f64>() {
            Ok(value) if value.is_finite() && percent => QuantityChange::Percent(value),
            Ok(value) if value.is_finite() => QuantityChange::Units(value),
            _ => QuantityChange::None,
        }
    }

    /// Change in units for a row whose suggested quantity is `suggested`
    pub fn delta(&self, suggested: f64) -> f64 {
        match *self {
            QuantityChange::None => 0.0,
            QuantityChange::Units(units) => units,
            QuantityChange::Percent(_) if suggested == 0.0 => 0.0,
            QuantityChange::Percent(pct) => pct / 100.0 * suggested,
        }
    }
}

/// A BOM quantity with its base (before contingency, waste and rounding) and
/// the user's change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedQuantity {
    pub suggested: f64,
    pub base: f64,
    #[serde(default)]
    pub change: QuantityChange,
}

impl AdjustedQuantity {
    pub fn new(suggested: f64, base: f64) -> Self {
        AdjustedQuantity {
            suggested,
            base,
            change: QuantityChange::None,
        }
    }

    pub fn with_change(mut self, change: QuantityChange) -> Self {
        self.change = change;
        self
    }

    /// Suggested quantity plus the change
    pub fn final_quantity(&self) -> f64 {
        self.suggested + self.change.delta(self.suggested)
    }

    /// Overage over base: the built-in (suggested − base) plus the change
    pub fn overage_units(&self) -> f64 {
        self.final_quantity() - self.base
    }

    /// Overage as a percent of base; 0 when base is 0
    pub fn overage_percent(&self) -> f64 {
        if self.base <= 0.0 {
            return 0.0;
        }
        self.overage_units() / self.base * 100.0
    }
}
