//! Compressed on-disk cache of the materialized global route set.
//!
//! Two operations only: load the artifact if it exists, or publish a freshly
//! computed set. The artifact is never validated against the reference data;
//! deleting the file is the one supported way to force a recomputation.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::domain::TradeRoute;

pub const CACHE_FILE_NAME: &str = "global_trade_routes.csv.gz";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cache row is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// Load the cached route set, or `None` when no artifact exists yet.
pub fn load_if_present(path: &Path) -> Result<Option<Vec<TradeRoute>>, CacheError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(GzDecoder::new(file));
    let mut routes = Vec::new();
    for row in reader.deserialize() {
        routes.push(row?);
    }
    Ok(Some(routes))
}

/// Publish a computed route set atomically: rows go to a sibling temp file
/// which is renamed into place, so an interrupted run can never leave a
/// half-written artifact at the final path. The temp file is removed on every
/// failure path.
pub fn publish(path: &Path, routes: &[TradeRoute]) -> Result<(), CacheError> {
    let temp_path = temp_sibling(path);
    let result = write_rows(&temp_path, routes)
        .and_then(|()| fs::rename(&temp_path, path).map_err(CacheError::from));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_rows(path: &Path, routes: &[TradeRoute]) -> Result<(), CacheError> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(GzEncoder::new(file, Compression::default()));
    for route in routes {
        writer.serialize(route)?;
    }
    writer.flush()?;
    let encoder = writer.into_inner().map_err(|err| {
        CacheError::Io(io::Error::new(io::ErrorKind::Other, err.error().to_string()))
    })?;
    encoder.finish()?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_routes() -> Vec<TradeRoute> {
        vec![
            TradeRoute {
                port1_name: "Amsterdam".into(),
                port1_item: "Glass Ball".into(),
                port1_profit: 2255.0,
                port2_name: "St. George".into(),
                port2_item: "Cotton".into(),
                port2_profit: 680.0,
                range: 2,
                profit_per_month: 733.75,
            },
            TradeRoute {
                port1_name: "Zanzibar".into(),
                port1_item: "Emerald".into(),
                port1_profit: 4235.0,
                port2_name: "Zhangzhou".into(),
                port2_item: "Celadon".into(),
                port2_profit: 3740.0,
                range: 2,
                profit_per_month: 1993.75,
            },
        ]
    }

    #[test]
    fn publish_then_load_round_trips_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        let routes = sample_routes();

        publish(&path, &routes).unwrap();
        let loaded = load_if_present(&path).unwrap().unwrap();
        assert_eq!(loaded, routes);
    }

    #[test]
    fn publish_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);

        publish(&path, &sample_routes()).unwrap();
        assert!(path.exists());
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn missing_artifact_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        assert!(load_if_present(&path).unwrap().is_none());
    }

    #[test]
    fn a_materialized_set_survives_the_cache_unchanged() {
        use crate::domain::{routes, ReferenceData};

        let data = ReferenceData::new(
            vec![
                ("Netherlands".into(), "Amsterdam".into()),
                ("West Africa".into(), "St. George".into()),
            ],
            vec![
                ("Glass Ball".into(), "Amsterdam".into(), 495.0),
                ("Cotton".into(), "St. George".into(), 120.0),
            ],
            vec![("Netherlands".into(), "West Africa".into(), 2)],
            vec![
                ("Glass Ball".into(), "Netherlands".into(), 500.0),
                ("Glass Ball".into(), "West Africa".into(), 2750.0),
                ("Cotton".into(), "Netherlands".into(), 800.0),
                ("Cotton".into(), "West Africa".into(), 200.0),
            ],
        );
        let computed = routes::materialize(&data, 0.0).unwrap();
        assert!(!computed.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        publish(&path, &computed).unwrap();
        let reloaded = load_if_present(&path).unwrap().unwrap();
        assert_eq!(reloaded, computed);
    }

    #[test]
    fn an_empty_set_round_trips_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);

        publish(&path, &[]).unwrap();
        let loaded = load_if_present(&path).unwrap().unwrap();
        assert!(loaded.is_empty());
    }
}
