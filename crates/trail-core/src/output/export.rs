//! CSV Export
//!
//! Writes a finished run as `<output_dir>/<seed>.csv`: the parameter names,
//! their values, then one row per tick with the food layout alongside.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use trail_events::{RunParameters, RunRecord, TickRecord};

/// Output error type
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes run records as CSV files named by seed
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, seed: u64) -> PathBuf {
        self.output_dir.join(format!("{seed}.csv"))
    }

    /// Write `record` to its seed-named file, returning the path written
    pub fn export(&self, record: &RunRecord) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(record.parameters.seed);

        let mut writer = BufWriter::new(File::create(&path)?);
        write_csv(record, &mut writer)?;
        writer.flush()?;

        info!(path = %path.display(), rows = record.series.len(), "wrote run export");
        Ok(path)
    }
}

/// Render `record` as CSV into any writer
///
/// Food cells take two extra columns on the first rows. Food cells beyond the
/// last tick get rows of their own with the tick columns left empty.
pub fn write_csv<W: Write>(record: &RunRecord, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", RunParameters::COLUMNS.join(","))?;
    writeln!(writer, "{}", record.parameters.values().join(","))?;

    let rows = record.series.len().max(record.food_cells.len());
    for i in 0..rows {
        match record.series.get(i) {
            Some(tick) => write!(writer, "{}", tick_columns(tick))?,
            None => write!(writer, ",,")?,
        }
        if let Some((q, r)) = record.food_cells.get(i) {
            write!(writer, ",{q},{r}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn tick_columns(record: &TickRecord) -> String {
    let probability = record
        .homing_probability
        .map(|p| format!("{p:.6}"))
        .unwrap_or_default();
    format!("{},{},{}", record.tick, probability, record.homing_count)
}
