use crate::error::Result;
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RangeRecord {
    start: u64,
    stop: u64,
}

/// Reads inclusive position ranges from a csv file with `start` and `stop`
/// header columns. Returns the starts and stops as parallel vectors.
pub fn read_ranges(path: &Path) -> Result<(Vec<u64>, Vec<u64>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut starts = Vec::new();
    let mut stops = Vec::new();
    for record in reader.deserialize() {
        let record: RangeRecord = record?;
        starts.push(record.start);
        stops.push(record.stop);
    }
    debug!("Read {} ranges from {:?}", starts.len(), path);
    Ok((starts, stops))
}
