//! Domain logic for route profitability lives here.

pub mod entities;
pub mod grouping;
pub mod profit;
pub mod reference_data;
pub mod routes;

pub use entities::{ItemName, PortName, RegionName, TradeRoute};
pub use profit::ProfitError;
pub use reference_data::ReferenceData;
