//! Loading the four reference CSVs into the typed data store.
//!
//! Two of the tables are plain row-per-record files, the other two are wide
//! tables with one column per region. All four live in the data directory and
//! are read exactly once at startup; any shape problem is fatal and names the
//! offending file.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ReferenceData;

pub const PORTS_BY_REGION_FILE: &str = "PORTS_BY_REGION.csv";
pub const ITEMS_BY_PORT_FILE: &str = "ITEMS_BY_PORT.csv";
pub const REGION_TRAVEL_MATRIX_FILE: &str = "REGION_TRAVEL_MATRIX.csv";
pub const ITEM_VALUE_BY_REGION_FILE: &str = "ITEM_VALUE_BY_REGION.csv";

#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("failed to read {file}: {source}")]
    Io { file: String, source: io::Error },
    #[error("failed to parse {file}: {source}")]
    Csv { file: String, source: csv::Error },
    #[error("{file}: {message}")]
    Shape { file: String, message: String },
}

/// Columns `Region,Port`.
#[derive(Debug, Deserialize)]
struct PortRegionRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Port")]
    port: String,
}

/// Columns `Item,Port Name,Price`.
#[derive(Debug, Deserialize)]
struct PriceListingRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Port Name")]
    port: String,
    #[serde(rename = "Price")]
    price: f64,
}

/// Read all four reference tables from `dir` and build the data store.
pub fn load_reference_data(dir: &Path) -> Result<ReferenceData, DataFileError> {
    let port_regions = parse_port_regions(PORTS_BY_REGION_FILE, open(dir, PORTS_BY_REGION_FILE)?)?;
    let listings = parse_price_listings(ITEMS_BY_PORT_FILE, open(dir, ITEMS_BY_PORT_FILE)?)?;
    let travel = parse_wide_table::<u32, _>(
        REGION_TRAVEL_MATRIX_FILE,
        open(dir, REGION_TRAVEL_MATRIX_FILE)?,
    )?;
    let values = parse_wide_table::<f64, _>(
        ITEM_VALUE_BY_REGION_FILE,
        open(dir, ITEM_VALUE_BY_REGION_FILE)?,
    )?;
    Ok(ReferenceData::new(port_regions, listings, travel, values))
}

fn open(dir: &Path, file: &str) -> Result<File, DataFileError> {
    File::open(dir.join(file)).map_err(|source| DataFileError::Io {
        file: file.to_string(),
        source,
    })
}

fn parse_port_regions(
    file: &str,
    reader: impl Read,
) -> Result<Vec<(String, String)>, DataFileError> {
    let mut rows = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize() {
        let row: PortRegionRow = record.map_err(|source| DataFileError::Csv {
            file: file.to_string(),
            source,
        })?;
        rows.push((row.region, row.port));
    }
    Ok(rows)
}

fn parse_price_listings(
    file: &str,
    reader: impl Read,
) -> Result<Vec<(String, String, f64)>, DataFileError> {
    let mut rows = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize() {
        let row: PriceListingRow = record.map_err(|source| DataFileError::Csv {
            file: file.to_string(),
            source,
        })?;
        rows.push((row.item, row.port, row.price));
    }
    Ok(rows)
}

/// Parse a wide table: the first column keys the row, the remaining headers
/// key the columns, every cell is numeric. Yields one (row, column, value)
/// triple per cell.
fn parse_wide_table<T: FromStr, R: Read>(
    file: &str,
    reader: R,
) -> Result<Vec<(String, String, T)>, DataFileError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| DataFileError::Csv {
            file: file.to_string(),
            source,
        })?
        .clone();
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    if columns.is_empty() {
        return Err(DataFileError::Shape {
            file: file.to_string(),
            message: "expected at least one value column after the key column".to_string(),
        });
    }

    let mut cells = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| DataFileError::Csv {
            file: file.to_string(),
            source,
        })?;
        let row_key = record.get(0).unwrap_or_default().to_string();
        if record.len() != columns.len() + 1 {
            return Err(DataFileError::Shape {
                file: file.to_string(),
                message: format!(
                    "row '{row_key}' has {} cells, expected {}",
                    record.len(),
                    columns.len() + 1
                ),
            });
        }
        for (column, raw) in columns.iter().zip(record.iter().skip(1)) {
            let value = raw.trim().parse::<T>().map_err(|_| DataFileError::Shape {
                file: file.to_string(),
                message: format!("non-numeric entry '{raw}' at row '{row_key}', column '{column}'"),
            })?;
            cells.push((row_key.clone(), column.clone(), value));
        }
    }
    Ok(cells)
}
