//! Immutable reference tables: who sells what where, and how far apart
//! everything is. Loaded once at startup, read-only afterwards.

use std::collections::HashMap;

use super::entities::{ItemName, PortName, RegionName};
use crate::util::fuzzy;

/// Typed lookup maps built from the four reference CSVs.
///
/// Absent entries mean different things per table: a missing buy price is a
/// normal "not available" condition, a missing travel entry means the two
/// regions are not connected, while a missing port-to-region mapping or
/// item-value entry indicates broken reference data (callers treat those as
/// fatal).
#[derive(Clone, Debug, Default)]
pub struct ReferenceData {
    region_of_port: HashMap<PortName, RegionName>,
    prices: HashMap<PortName, HashMap<ItemName, f64>>,
    items_by_port: HashMap<PortName, Vec<ItemName>>,
    ports_by_region: HashMap<RegionName, Vec<PortName>>,
    travel_months: HashMap<RegionName, HashMap<RegionName, u32>>,
    value_by_item: HashMap<ItemName, HashMap<RegionName, f64>>,
}

impl ReferenceData {
    pub fn new(
        port_regions: Vec<(RegionName, PortName)>,
        listings: Vec<(ItemName, PortName, f64)>,
        travel: Vec<(RegionName, RegionName, u32)>,
        values: Vec<(ItemName, RegionName, f64)>,
    ) -> Self {
        let mut region_of_port = HashMap::new();
        let mut ports_by_region: HashMap<RegionName, Vec<PortName>> = HashMap::new();
        for (region, port) in port_regions {
            ports_by_region
                .entry(region.clone())
                .or_default()
                .push(port.clone());
            region_of_port.insert(port, region);
        }
        for ports in ports_by_region.values_mut() {
            ports.sort();
        }

        let mut prices: HashMap<PortName, HashMap<ItemName, f64>> = HashMap::new();
        for (item, port, price) in listings {
            prices.entry(port).or_default().insert(item, price);
        }
        // Sorted item lists keep enumeration output deterministic.
        let items_by_port = prices
            .iter()
            .map(|(port, items)| {
                let mut names: Vec<ItemName> = items.keys().cloned().collect();
                names.sort();
                (port.clone(), names)
            })
            .collect();

        let mut travel_months: HashMap<RegionName, HashMap<RegionName, u32>> = HashMap::new();
        for (region_a, region_b, months) in travel {
            travel_months
                .entry(region_a.clone())
                .or_default()
                .insert(region_b.clone(), months);
            travel_months
                .entry(region_b)
                .or_default()
                .insert(region_a, months);
        }

        let mut value_by_item: HashMap<ItemName, HashMap<RegionName, f64>> = HashMap::new();
        for (item, region, value) in values {
            value_by_item.entry(item).or_default().insert(region, value);
        }

        Self {
            region_of_port,
            prices,
            items_by_port,
            ports_by_region,
            travel_months,
            value_by_item,
        }
    }

    /// Region a port belongs to; `None` means the port-to-region table is
    /// incomplete.
    pub fn region_of(&self, port: &str) -> Option<&RegionName> {
        self.region_of_port.get(port)
    }

    /// Buy price of an item at a port; `None` means not available there.
    pub fn buy_price(&self, item: &str, port: &str) -> Option<f64> {
        self.prices.get(port).and_then(|items| items.get(item)).copied()
    }

    /// Whether an item can be bought at a port.
    pub fn sells_item(&self, item: &str, port: &str) -> bool {
        self.buy_price(item, port).is_some()
    }

    /// All items sold at a port, alphabetical. Empty for unknown ports.
    pub fn items_at(&self, port: &str) -> &[ItemName] {
        self.items_by_port
            .get(port)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All ports of a region, alphabetical. Empty for unknown regions.
    pub fn ports_in(&self, region: &str) -> &[PortName] {
        self.ports_by_region
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// One-way travel time in months; `None` means the regions are not
    /// connected by the travel matrix.
    pub fn travel_months(&self, region_a: &str, region_b: &str) -> Option<u32> {
        self.travel_months
            .get(region_a)
            .and_then(|row| row.get(region_b))
            .copied()
    }

    /// Base sale value of an item in a region. The value table is expected to
    /// cover every (item, region) pair that can legitimately occur, so
    /// callers treat `None` as fatal.
    pub fn base_value(&self, item: &str, region: &str) -> Option<f64> {
        self.value_by_item
            .get(item)
            .and_then(|row| row.get(region))
            .copied()
    }

    /// Every port with at least one price listing, sorted and deduplicated.
    pub fn trading_ports(&self) -> Vec<PortName> {
        let mut ports: Vec<PortName> = self.items_by_port.keys().cloned().collect();
        ports.sort();
        ports
    }

    /// Best-guess port for user-typed input: exact names win, anything else
    /// maps to the closest known trading port. There is deliberately no
    /// "no match" outcome.
    pub fn resolve_port_name(&self, input: &str) -> PortName {
        if self.items_by_port.contains_key(input) {
            return input.to_string();
        }
        fuzzy::closest_match(input, self.items_by_port.keys().map(String::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> ReferenceData {
        ReferenceData::new(
            vec![
                ("Netherlands".into(), "Amsterdam".into()),
                ("West Africa".into(), "St. George".into()),
                ("West Africa".into(), "Abidjan".into()),
            ],
            vec![
                ("Glass Ball".into(), "Amsterdam".into(), 495.0),
                ("Gin".into(), "Amsterdam".into(), 540.0),
                ("Cotton".into(), "St. George".into(), 120.0),
            ],
            vec![
                ("Netherlands".into(), "West Africa".into(), 2),
                ("West Africa".into(), "West Africa".into(), 1),
            ],
            vec![("Glass Ball".into(), "West Africa".into(), 2750.0)],
        )
    }

    #[test]
    fn travel_matrix_is_symmetric() {
        let data = fixture();
        assert_eq!(data.travel_months("Netherlands", "West Africa"), Some(2));
        assert_eq!(data.travel_months("West Africa", "Netherlands"), Some(2));
        assert_eq!(data.travel_months("Netherlands", "Oceania"), None);
    }

    #[test]
    fn items_and_ports_are_sorted() {
        let data = fixture();
        assert_eq!(data.items_at("Amsterdam"), ["Gin", "Glass Ball"]);
        assert_eq!(data.ports_in("West Africa"), ["Abidjan", "St. George"]);
        assert!(data.items_at("Atlantis").is_empty());
    }

    #[test]
    fn trading_ports_skip_ports_without_listings() {
        let data = fixture();
        // Abidjan is mapped to a region but sells nothing.
        assert_eq!(data.trading_ports(), ["Amsterdam", "St. George"]);
    }

    #[test]
    fn resolve_port_name_prefers_exact_match() {
        let data = fixture();
        assert_eq!(data.resolve_port_name("Amsterdam"), "Amsterdam");
    }

    #[test]
    fn resolve_port_name_guesses_on_typos() {
        let data = fixture();
        assert_eq!(data.resolve_port_name("amsterdm"), "Amsterdam");
        assert_eq!(data.resolve_port_name("st george"), "St. George");
    }
}
