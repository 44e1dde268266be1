//! Ledger configuration

use serde::Deserialize;

/// Tunables for a [`Ledger`](crate::ledger::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Decimals of the settled asset, used when rendering human units.
    pub unit_decimals: u32,
    /// Re-check `total_held == sum(balances)` after every committed mutation.
    pub audit_on_commit: bool,
    /// Initial capacity of the pending event buffer.
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            unit_decimals: 18,
            audit_on_commit: cfg!(debug_assertions),
            event_capacity: 1024,
        }
    }
}

impl LedgerConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
