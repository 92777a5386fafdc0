//! Turning a ranked route pool into a short, diverse display list.
//!
//! Many port pairs produce the exact same item pair and profit figure; those
//! ports are interchangeable for the trade, so they merge into one group. A
//! greedy pass then keeps the list from spotlighting the same few ports over
//! and over.

use std::collections::{BTreeSet, HashMap, HashSet};

use ordered_float::OrderedFloat;

use super::entities::{ItemName, TradeRoute};

/// Interchangeable port pairs trading the same two items for the same
/// profit-per-month, merged into one display row.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteGroup {
    /// "/"-joined sorted port names of the first leg.
    pub port1_names: String,
    pub port1_item: ItemName,
    /// "/"-joined sorted port names of the second leg.
    pub port2_names: String,
    pub port2_item: ItemName,
    pub range: u32,
    pub profit_per_month: f64,
}

impl RouteGroup {
    /// One prompt line: ports and item per leg, rounded profit, and the range
    /// only when it is out of the ordinary.
    pub fn display_line(&self) -> String {
        let profit = (self.profit_per_month * 10.0).round() / 10.0;
        let range_info = if self.range > 1 {
            format!(" [range={}]", self.range)
        } else {
            String::new()
        };
        format!(
            "{} ({}), {} ({}), {:.1}{}",
            self.port1_names, self.port1_item, self.port2_names, self.port2_item, profit, range_info
        )
    }

    fn ports(&self) -> impl Iterator<Item = &str> {
        self.port1_names.split('/').chain(self.port2_names.split('/'))
    }
}

/// Order the two legs by item name so symmetric routes compare and group
/// identically regardless of enumeration order. Idempotent.
pub fn canonicalize(mut route: TradeRoute) -> TradeRoute {
    if route.port1_item > route.port2_item {
        std::mem::swap(&mut route.port1_name, &mut route.port2_name);
        std::mem::swap(&mut route.port1_item, &mut route.port2_item);
        std::mem::swap(&mut route.port1_profit, &mut route.port2_profit);
    }
    route
}

/// Group canonicalized routes by `(item1, item2, profit_per_month)`, merging
/// the port names of each leg, then rank groups by profit-per-month
/// descending. Input order is kept as the tiebreak.
pub fn group_routes(routes: &[TradeRoute]) -> Vec<RouteGroup> {
    type Key = (ItemName, ItemName, OrderedFloat<f64>);

    struct Bucket {
        port1: BTreeSet<String>,
        port2: BTreeSet<String>,
        range: u32,
    }

    let mut buckets: HashMap<Key, Bucket> = HashMap::new();
    let mut first_seen: Vec<Key> = Vec::new();
    for route in routes {
        let route = canonicalize(route.clone());
        let key = (
            route.port1_item.clone(),
            route.port2_item.clone(),
            OrderedFloat(route.profit_per_month),
        );
        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            first_seen.push(key);
            Bucket {
                port1: BTreeSet::new(),
                port2: BTreeSet::new(),
                range: route.range,
            }
        });
        bucket.port1.insert(route.port1_name);
        bucket.port2.insert(route.port2_name);
    }

    let mut groups: Vec<RouteGroup> = first_seen
        .into_iter()
        .filter_map(|key| {
            let bucket = buckets.remove(&key)?;
            let (port1_item, port2_item, profit) = key;
            Some(RouteGroup {
                port1_names: join_ports(&bucket.port1),
                port1_item,
                port2_names: join_ports(&bucket.port2),
                port2_item,
                range: bucket.range,
                profit_per_month: profit.into_inner(),
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        b.profit_per_month
            .partial_cmp(&a.profit_per_month)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

fn join_ports(ports: &BTreeSet<String>) -> String {
    ports.iter().map(String::as_str).collect::<Vec<_>>().join("/")
}

/// Greedy top-down pass over ranked groups. A group is skipped only when
/// every port on both of its legs already appeared in an emitted group;
/// emission stops after `display_count` groups.
pub fn diversify(groups: Vec<RouteGroup>, display_count: usize) -> Vec<RouteGroup> {
    let mut shown_ports: HashSet<String> = HashSet::new();
    let mut picked = Vec::new();
    for group in groups {
        if picked.len() >= display_count {
            break;
        }
        if group.ports().all(|port| shown_ports.contains(port)) {
            continue;
        }
        shown_ports.extend(group.ports().map(str::to_string));
        picked.push(group);
    }
    picked
}
