//! Feature CSV output and the run manifest.
//!
//! The output schema is configuration-dependent — the measure columns present
//! are whatever the engine was built with — so every run also records a JSON
//! manifest describing the schema next to the data.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::FeatureRow;
use crate::Result;

use super::PipelineConfig;

// ============================================================================
// FeatureWriter
// ============================================================================

/// Owns the output CSV stream: header first, then one record per success.
///
/// Opened once per run, written sequentially, flushed at run end regardless
/// of how many networks failed.
pub struct FeatureWriter<W: Write> {
    writer: csv::Writer<W>,
    prefixes: Vec<&'static str>,
    wrote_header: bool,
}

impl<W: Write> FeatureWriter<W> {
    /// Wrap an output stream for the given measure prefixes.
    pub fn new(inner: W, prefixes: Vec<&'static str>) -> FeatureWriter<W> {
        FeatureWriter {
            writer: csv::Writer::from_writer(inner),
            prefixes,
            wrote_header: false,
        }
    }

    /// Write the header row. Idempotent; `write_row` calls it lazily.
    pub fn write_header(&mut self) -> Result<()> {
        if !self.wrote_header {
            self.writer.write_record(FeatureRow::header(&self.prefixes))?;
            self.wrote_header = true;
        }
        Ok(())
    }

    /// Write one complete feature record.
    pub fn write_row(&mut self, row: &FeatureRow) -> Result<()> {
        self.write_header()?;
        debug_assert_eq!(
            row.summaries.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            self.prefixes,
            "feature row does not match writer schema"
        );
        self.writer.write_record(row.csv_record())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying stream, flushing buffered rows.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::Error::Io(std::io::Error::other(e.to_string())))
    }
}

// ============================================================================
// RunManifest
// ============================================================================

/// Schema sidecar for one feature run.
///
/// Downstream consumers read this instead of guessing which measure columns a
/// given output file carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub generated_at: DateTime<Utc>,
    /// Measure column prefixes, in output order.
    pub measures: Vec<String>,
    pub max_edges: usize,
    pub limit: usize,
    pub use_weights: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idleness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finite_dimension: Option<f64>,
}

impl RunManifest {
    pub fn new(prefixes: &[&'static str], config: &PipelineConfig) -> RunManifest {
        RunManifest {
            generated_at: Utc::now(),
            measures: prefixes.iter().map(|p| p.to_string()).collect(),
            max_edges: config.max_edges,
            limit: config.limit,
            use_weights: config.use_weights,
            idleness: None,
            finite_dimension: None,
        }
    }

    /// Attach the curvature parameters the run was configured with.
    pub fn with_parameters(mut self, idleness: f64, finite_dimension: f64) -> RunManifest {
        self.idleness = Some(idleness);
        self.finite_dimension = Some(finite_dimension);
        self
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
