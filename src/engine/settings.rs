//! Shared inventory constants.
//!
//! The capacity ceiling and the low-stock threshold are read from exactly one
//! place so the status badge and the reorder list can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity ceiling used for the fill percentage
pub const DEFAULT_CAPACITY: u64 = 1000;

/// Products below this quantity are flagged for reorder
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Error raised when settings violate their invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Capacity must be strictly positive
    ZeroCapacity,
    /// A zero threshold would flag empty products as out of stock while the
    /// reorder list (`quantity < threshold`) stays empty
    ZeroThreshold,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroCapacity => write!(f, "inventory capacity must be greater than zero"),
            SettingsError::ZeroThreshold => write!(f, "low stock threshold must be greater than zero"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Capacity and low-stock threshold
///
/// Only constructible through [`InventorySettings::new`] (or deserialization,
/// which goes through the same check), so `capacity` and
/// `low_stock_threshold` are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInventorySettings")]
pub struct InventorySettings {
    capacity: u64,
    low_stock_threshold: u32,
}

#[derive(Deserialize)]
struct RawInventorySettings {
    #[serde(default = "default_capacity")]
    capacity: u64,
    #[serde(default = "default_low_stock_threshold")]
    low_stock_threshold: u32,
}

fn default_capacity() -> u64 {
    DEFAULT_CAPACITY
}

fn default_low_stock_threshold() -> u32 {
    LOW_STOCK_THRESHOLD
}

impl TryFrom<RawInventorySettings> for InventorySettings {
    type Error = SettingsError;

    fn try_from(raw: RawInventorySettings) -> Result<Self, Self::Error> {
        InventorySettings::new(raw.capacity, raw.low_stock_threshold)
    }
}

impl InventorySettings {
    /// # Errors
    ///
    /// Returns `SettingsError::ZeroCapacity` if `capacity` is zero and
    /// `SettingsError::ZeroThreshold` if `low_stock_threshold` is zero.
    pub fn new(capacity: u64, low_stock_threshold: u32) -> Result<Self, SettingsError> {
        if capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        if low_stock_threshold == 0 {
            return Err(SettingsError::ZeroThreshold);
        }
        Ok(Self {
            capacity,
            low_stock_threshold,
        })
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_constants() {
        let settings = InventorySettings::default();
        assert_eq!(settings.capacity(), 1000);
        assert_eq!(settings.low_stock_threshold(), 5);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(InventorySettings::new(0, 5), Err(SettingsError::ZeroCapacity));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert_eq!(InventorySettings::new(1000, 0), Err(SettingsError::ZeroThreshold));
        let result: Result<InventorySettings, _> = serde_json::from_str(r#"{"low_stock_threshold": 0}"#);
        assert!(result.unwrap_err().to_string().contains("threshold"));
    }

    #[test]
    fn test_smallest_threshold_keeps_status_and_reorder_list_in_step() {
        let settings = InventorySettings::new(1000, 1).unwrap();
        let products = vec![
            crate::test_helpers::product(1, "Mleko", "3.50", 0),
            crate::test_helpers::product(2, "Ser", "12.00", 1),
        ];
        let flagged: Vec<&str> = products
            .iter()
            .filter(|p| settings.classify(p).needs_reorder())
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Mleko"]);
        assert_eq!(settings.low_stock_list(&products), flagged);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let settings: InventorySettings = serde_json::from_str(r#"{"capacity": 250}"#).unwrap();
        assert_eq!(settings.capacity(), 250);
        assert_eq!(settings.low_stock_threshold(), LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn test_deserialize_rejects_zero_capacity() {
        let result: Result<InventorySettings, _> = serde_json::from_str(r#"{"capacity": 0}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }
}
