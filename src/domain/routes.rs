//! Route enumeration over port pairs, global materialization and selection.

use std::cmp::Ordering;

use rayon::prelude::*;

use super::entities::{ItemName, TradeRoute};
use super::profit::{transfer_profit, ProfitError};
use super::reference_data::ReferenceData;

/// All round trips between one unordered pair of ports whose total profit
/// clears `profit_threshold`.
///
/// The pair is canonicalized alphabetically first, so both call orders
/// produce identically-labeled routes. A pair whose regions are not connected
/// by the travel matrix yields no routes rather than an error.
pub fn enumerate_pair(
    data: &ReferenceData,
    port_a: &str,
    port_b: &str,
    profit_threshold: f64,
) -> Result<Vec<TradeRoute>, ProfitError> {
    let (port1, port2) = if port_a <= port_b {
        (port_a, port_b)
    } else {
        (port_b, port_a)
    };

    let region1 = data.region_of(port1).ok_or_else(|| ProfitError::UnknownPort {
        port: port1.to_string(),
    })?;
    let region2 = data.region_of(port2).ok_or_else(|| ProfitError::UnknownPort {
        port: port2.to_string(),
    })?;
    let Some(range) = data.travel_months(region1, region2) else {
        return Ok(Vec::new());
    };

    let outbound = one_way_profits(data, port1, port2)?;
    let inbound = one_way_profits(data, port2, port1)?;

    let mut routes = Vec::new();
    for (item1, profit1) in &outbound {
        for (item2, profit2) in &inbound {
            let total = profit1 + profit2;
            if total <= profit_threshold {
                continue;
            }
            // Round-trip profit over round-trip time: the one-way range is
            // incurred once per leg.
            let profit_per_month = total / (2 * range) as f64;
            routes.push(TradeRoute {
                port1_name: port1.to_string(),
                port1_item: item1.clone(),
                port1_profit: *profit1,
                port2_name: port2.to_string(),
                port2_item: item2.clone(),
                port2_profit: *profit2,
                range,
                profit_per_month,
            });
        }
    }
    Ok(routes)
}

/// One-way profit for every item sold at `source`. Items that cannot make the
/// transfer are recorded as no-route and left out; each item is computed
/// exactly once.
fn one_way_profits(
    data: &ReferenceData,
    source: &str,
    destination: &str,
) -> Result<Vec<(ItemName, f64)>, ProfitError> {
    let mut profits = Vec::new();
    for item in data.items_at(source) {
        match transfer_profit(data, item, source, destination) {
            Ok(profit) => profits.push((item.clone(), profit)),
            Err(err) if err.is_recoverable() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(profits)
}

/// Enumerate every unordered pair of trading ports and concatenate the
/// results.
///
/// Pair evaluations are independent of each other, so they fan out across the
/// rayon pool; ordering between pairs does not matter because everything is
/// re-sorted downstream.
pub fn materialize(
    data: &ReferenceData,
    profit_threshold: f64,
) -> Result<Vec<TradeRoute>, ProfitError> {
    let ports = data.trading_ports();
    let mut pairs = Vec::new();
    for i in 0..ports.len() {
        for j in (i + 1)..ports.len() {
            pairs.push((ports[i].as_str(), ports[j].as_str()));
        }
    }

    let per_pair = pairs
        .par_iter()
        .map(|(port1, port2)| enumerate_pair(data, port1, port2, profit_threshold))
        .collect::<Result<Vec<_>, ProfitError>>()?;

    Ok(per_pair.into_iter().flatten().collect())
}

/// Filter and rank the materialized set.
///
/// `limit` is a selection pool size, deliberately larger than any display
/// count so the grouping pass still has slack after deduplication.
pub fn select(
    routes: &[TradeRoute],
    limit: usize,
    specific_port: Option<&str>,
    short_range_only: bool,
) -> Vec<TradeRoute> {
    let mut picked: Vec<TradeRoute> = routes
        .iter()
        .filter(|route| specific_port.map_or(true, |port| route.touches(port)))
        .filter(|route| !short_range_only || route.range == 1)
        .cloned()
        .collect();

    picked.sort_by(|a, b| {
        b.profit_per_month
            .partial_cmp(&a.profit_per_month)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.port1_name.cmp(&b.port1_name))
            .then_with(|| a.port2_name.cmp(&b.port2_name))
    });
    picked.truncate(limit);
    picked
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
                ("Gulf of Mexico".into(), "Veracruz".into()),
            ],
            vec![
                ("Glass Ball".into(), "Amsterdam".into(), 495.0),
                ("Gin".into(), "Amsterdam".into(), 540.0),
                ("Linen".into(), "Amsterdam".into(), 300.0),
                ("Linen".into(), "St. George".into(), 280.0),
                ("Cotton".into(), "St. George".into(), 120.0),
                ("Cotton".into(), "Abidjan".into(), 110.0),
                ("Ivory".into(), "Abidjan".into(), 1200.0),
                ("Coconut".into(), "Veracruz".into(), 50.0),
            ],
            vec![
                ("Netherlands".into(), "West Africa".into(), 2),
                ("Netherlands".into(), "Netherlands".into(), 1),
                ("West Africa".into(), "West Africa".into(), 1),
            ],
            vec![
                ("Glass Ball".into(), "Netherlands".into(), 500.0),
                ("Glass Ball".into(), "West Africa".into(), 2750.0),
                ("Gin".into(), "Netherlands".into(), 600.0),
                ("Gin".into(), "West Africa".into(), 1000.0),
                ("Linen".into(), "Netherlands".into(), 400.0),
                ("Linen".into(), "West Africa".into(), 1000.0),
                ("Cotton".into(), "Netherlands".into(), 800.0),
                ("Cotton".into(), "West Africa".into(), 200.0),
                ("Ivory".into(), "Netherlands".into(), 4000.0),
                ("Ivory".into(), "West Africa".into(), 1500.0),
            ],
        )
    }

    fn route(port1: &str, port2: &str, ppm: f64, range: u32) -> TradeRoute {
        TradeRoute {
            port1_name: port1.into(),
            port1_item: "Gin".into(),
            port1_profit: 0.0,
            port2_name: port2.into(),
            port2_item: "Cotton".into(),
            port2_profit: 0.0,
            range,
            profit_per_month: ppm,
        }
    }

    #[test]
    fn pair_enumeration_is_order_independent() {
        let data = fixture();
        let forward = enumerate_pair(&data, "Amsterdam", "St. George", 0.0).unwrap();
        let backward = enumerate_pair(&data, "St. George", "Amsterdam", 0.0).unwrap();
        assert!(!forward.is_empty());
        assert_eq!(forward, backward);
    }

    #[test]
    fn pair_enumeration_computes_profit_per_month() {
        let data = fixture();
        let routes = enumerate_pair(&data, "Amsterdam", "St. George", 0.0).unwrap();
        // Unprofitable combinations (Linen both ways) are dropped.
        assert_eq!(routes.len(), 5);

        let best = routes
            .iter()
            .find(|r| r.port1_item == "Glass Ball" && r.port2_item == "Cotton")
            .unwrap();
        // 2255 outbound + 680 inbound over a 2-month range, counted per leg.
        assert_eq!(best.port1_profit, 2255.0);
        assert_eq!(best.port2_profit, 680.0);
        assert_eq!(best.range, 2);
        assert_eq!(best.profit_per_month, 2935.0 / 4.0);
    }

    #[test]
    fn threshold_drops_breakeven_combinations() {
        let data = fixture();
        let routes = enumerate_pair(&data, "Amsterdam", "St. George", 1200.0).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.port1_item == "Glass Ball"));
    }

    #[test]
    fn disconnected_regions_yield_no_routes_even_with_negative_threshold() {
        let data = fixture();
        let routes = enumerate_pair(&data, "Amsterdam", "Veracruz", -10000.0).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn materialize_covers_every_connected_pair() {
        let data = fixture();
        let all = materialize(&data, 0.0).unwrap();
        // Abidjan/Amsterdam: 6, Abidjan/St. George: 4, Amsterdam/St. George: 5;
        // every Veracruz pair is unconnected.
        assert_eq!(all.len(), 15);
        assert!(!all.iter().any(|r| r.touches("Veracruz")));
    }

    #[test]
    fn select_breaks_profit_ties_by_port_names() {
        let routes = vec![
            route("Nantes", "Porto", 125.0, 1),
            route("Lisbon", "Porto", 125.0, 1),
            route("Lisbon", "Nantes", 125.0, 1),
        ];
        let picked = select(&routes, 10, None, false);
        assert_eq!(picked[0].port1_name, "Lisbon");
        assert_eq!(picked[0].port2_name, "Nantes");
        assert_eq!(picked[1].port1_name, "Lisbon");
        assert_eq!(picked[1].port2_name, "Porto");
        assert_eq!(picked[2].port1_name, "Nantes");
    }

    #[test]
    fn select_sorts_by_profit_descending_and_truncates() {
        let routes = vec![
            route("A", "B", 10.0, 1),
            route("C", "D", 30.0, 1),
            route("E", "F", 20.0, 1),
        ];
        let picked = select(&routes, 2, None, false);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].profit_per_month, 30.0);
        assert_eq!(picked[1].profit_per_month, 20.0);
    }

    #[test]
    fn select_filters_by_port_and_range() {
        let routes = vec![
            route("A", "B", 10.0, 1),
            route("B", "C", 30.0, 2),
            route("C", "D", 20.0, 1),
        ];
        let touching_b = select(&routes, 10, Some("B"), false);
        assert_eq!(touching_b.len(), 2);
        assert!(touching_b.iter().all(|r| r.touches("B")));

        let short_touching_b = select(&routes, 10, Some("B"), true);
        assert_eq!(short_touching_b.len(), 1);
        assert_eq!(short_touching_b[0].port1_name, "A");
    }
}
