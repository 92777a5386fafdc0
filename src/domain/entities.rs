use serde::{Deserialize, Serialize};

/// Identifier for items as they appear in the reference tables.
pub type ItemName = String;
/// Identifier for ports; every port belongs to exactly one region.
pub type PortName = String;
/// Identifier for regions; regions without tradeable ports never show up in
/// the travel matrix.
pub type RegionName = String;

/// A two-port round trip: buy an item at each end, sell it at the other.
///
/// Routes are ephemeral; only the full materialized set is ever written to
/// disk, and the field names double as the cache CSV header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub port1_name: PortName,
    pub port1_item: ItemName,
    pub port1_profit: f64,
    pub port2_name: PortName,
    pub port2_item: ItemName,
    pub port2_profit: f64,
    /// One-way travel time between the two regions, in months.
    pub range: u32,
    /// Round-trip profit normalized by round-trip travel time.
    pub profit_per_month: f64,
}

impl TradeRoute {
    /// True if either leg of the round trip is at `port`.
    pub fn touches(&self, port: &str) -> bool {
        self.port1_name == port || self.port2_name == port
    }
}
