use super::domain::RawReadings;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Batch loader for probe exports with `ph,temperature,turbidity` columns.
pub struct ReadingsImporter;

impl ReadingsImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawReadings>, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawReadings>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut readings = Vec::new();

        for record in csv_reader.deserialize::<ReadingRow>() {
            let row = record?;
            readings.push(RawReadings::new(row.ph, row.temperature, row.turbidity));
        }

        Ok(readings)
    }
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    #[serde(alias = "pH", alias = "PH", alias = "Ph")]
    ph: f64,
    #[serde(alias = "Temperature", alias = "temp")]
    temperature: f64,
    #[serde(alias = "Turbidity", alias = "turb")]
    turbidity: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to open readings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse readings CSV: {0}")]
    Csv(#[from] csv::Error),
}
