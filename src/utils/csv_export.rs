use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::models::map_collection::MapCollection;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvError(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::CsvError(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Serialize)]
struct PlaceRow<'a> {
    title: &'a str,
    description: &'a str,
    latitude: f64,
    longitude: f64,
}

/// Writes one row per place, in map order, with a header line.
pub fn write_places_csv<W: Write>(collection: &MapCollection, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    for place in collection.places() {
        writer.serialize(PlaceRow {
            title: place.title(),
            description: place.description(),
            latitude: place.latitude(),
            longitude: place.longitude(),
        })?;
    }
    if collection.places().is_empty() {
        writer.write_record(["title", "description", "latitude", "longitude"])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_places_csv(collection: &MapCollection, path: &Path) -> Result<(), ExportError> {
    let _timing = logging::start_timing("export_places_csv", OperationCategory::Export);

    let file = File::create(path)?;
    write_places_csv(collection, file)?;

    info!(path = %path.display(), places = collection.place_count(), "exported map");
    Ok(())
}
