//! Per-item transfer profit: buy at one port, sell at another.

use thiserror::Error;

use super::entities::{ItemName, PortName, RegionName};
use super::reference_data::ReferenceData;

/// Sale value drops 10% when any other port of the destination region also
/// sells the item.
const REGIONAL_SUPPLY_FACTOR: f64 = 0.9;
/// Sale value drops 80% when the item is sold at the destination port itself.
const LOCAL_SUPPLY_FACTOR: f64 = 0.2;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProfitError {
    /// The item cannot be bought at the source port. Callers treat this as
    /// "no route via this item", never as a reason to abort.
    #[error("item '{item}' is not available at port '{port}'")]
    NotAvailable { item: ItemName, port: PortName },
    /// The port-to-region table is expected to cover every port.
    #[error("port '{port}' is missing from the port-to-region table")]
    UnknownPort { port: PortName },
    /// The value table is expected to cover every (item, region) pair.
    #[error("no base value for item '{item}' in region '{region}'")]
    MissingValue { item: ItemName, region: RegionName },
}

impl ProfitError {
    /// Recoverable errors mean "skip this item"; everything else indicates a
    /// reference-data integrity problem and aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProfitError::NotAvailable { .. })
    }
}

/// Profit from buying `item` at `source_port` and selling it at
/// `destination_port`. Considers only the transfer itself, not travel time;
/// the result may be negative.
pub fn transfer_profit(
    data: &ReferenceData,
    item: &str,
    source_port: &str,
    destination_port: &str,
) -> Result<f64, ProfitError> {
    let buying_price =
        data.buy_price(item, source_port)
            .ok_or_else(|| ProfitError::NotAvailable {
                item: item.to_string(),
                port: source_port.to_string(),
            })?;

    let destination_region =
        data.region_of(destination_port)
            .ok_or_else(|| ProfitError::UnknownPort {
                port: destination_port.to_string(),
            })?;

    let base_value =
        data.base_value(item, destination_region)
            .ok_or_else(|| ProfitError::MissingValue {
                item: item.to_string(),
                region: destination_region.clone(),
            })?;

    // The two supply conditions can hold at once; the regional one wins.
    let sold_at_other_port = data
        .ports_in(destination_region)
        .iter()
        .any(|port| port != destination_port && data.sells_item(item, port));
    let sale_value = if sold_at_other_port {
        base_value * REGIONAL_SUPPLY_FACTOR
    } else if data.sells_item(item, destination_port) {
        base_value * LOCAL_SUPPLY_FACTOR
    } else {
        base_value
    };

    Ok(sale_value - buying_price)
}
