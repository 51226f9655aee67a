//! High-level pipeline API for DROID report to Rosetta manifest generation.
//!
//! This module combines all steps: loading the mapping, the schema and
//! the DROID report, filtering, row assembly, and rendering.
//!
//! # Example
//!
//! ```rust,ignore
//! use rosetta_csv::{generate_manifest, ManifestInputs};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let output = generate_manifest(&ManifestInputs::new(
//!         "droid.csv",
//!         "rosetta_schema.json",
//!         "mapping.cfg",
//!     ))?;
//!
//!     print!("{}", output.csv);
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::MappingConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_detail, log_info, log_success, log_warning};
use crate::models::{OutputRow, SectionKey};
use crate::parser::{filter_records, read_droid_report, InputRecord};
use crate::schema::RosettaSchema;

use super::assembler::assemble;
use super::writer::render_manifest;

/// Paths of the three inputs.
#[derive(Debug, Clone)]
pub struct ManifestInputs {
    /// DROID report.
    pub csv: PathBuf,
    /// Rosetta JSON table schema.
    pub schema: PathBuf,
    /// INI mapping configuration.
    pub config: PathBuf,
}

impl ManifestInputs {
    pub fn new(
        csv: impl AsRef<Path>,
        schema: impl AsRef<Path>,
        config: impl AsRef<Path>,
    ) -> Self {
        Self {
            csv: csv.as_ref().to_path_buf(),
            schema: schema.as_ref().to_path_buf(),
            config: config.as_ref().to_path_buf(),
        }
    }
}

/// Counts gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManifestStats {
    /// Data rows in the DROID report.
    pub input_records: usize,
    /// Records left after filtering.
    pub filtered_records: usize,
    pub ie_rows: usize,
    pub representation_rows: usize,
    pub file_rows: usize,
}

impl ManifestStats {
    fn count_rows(&mut self, rows: &[OutputRow]) {
        for row in rows {
            match SectionKey::parse(row.key()) {
                SectionKey::Ie => self.ie_rows += 1,
                SectionKey::Representation => self.representation_rows += 1,
                SectionKey::File => self.file_rows += 1,
                SectionKey::Other(_) => {}
            }
        }
    }
}

/// Rendered manifest plus run statistics.
#[derive(Debug, Clone)]
pub struct ManifestOutput {
    pub csv: String,
    pub stats: ManifestStats,
}

/// Load all three inputs and generate the manifest.
pub fn generate_manifest(inputs: &ManifestInputs) -> PipelineResult<ManifestOutput> {
    log_info(format!("Reading mapping: {}", inputs.config.display()));
    let config = MappingConfig::from_file(&inputs.config)?;

    log_info(format!("Reading schema: {}", inputs.schema.display()));
    let schema = RosettaSchema::from_file(&inputs.schema)?;
    log_success(format!("Schema has {} columns", schema.len()));

    log_info(format!("Reading DROID report: {}", inputs.csv.display()));
    let parsed = read_droid_report(&inputs.csv)?;
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.records.len()));

    generate_from_parts(parsed.records, &schema, &config)
}

/// Generate the manifest from inputs that are already loaded.
pub fn generate_from_parts(
    records: Vec<InputRecord>,
    schema: &RosettaSchema,
    config: &MappingConfig,
) -> PipelineResult<ManifestOutput> {
    let mut stats = ManifestStats {
        input_records: records.len(),
        ..ManifestStats::default()
    };

    let filtered = filter_records(records, config.app.include_archives);
    log_info(format!(
        "Filtered out {} folders and {} other records",
        filtered.folders_removed, filtered.others_removed
    ));
    if filtered.records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    stats.filtered_records = filtered.records.len();

    if config.app.include_archives {
        log_warning("Archive path derivation is experimental; check File Original Path values");
    }

    log_info("Section layout:");
    for section in &config.sections {
        log_detail(format!("{} -> {}", section.key, section.fields.join(", ")), 1);
    }

    let archive_name = filtered.archive_name.as_deref().unwrap_or("");
    let rows = assemble(&filtered.records, schema, config, archive_name)?;
    stats.count_rows(&rows);

    let csv = render_manifest(schema, config.sip_title(), &rows);
    log_success(format!(
        "Generated {} IE, {} REPRESENTATION and {} FILE rows",
        stats.ie_rows, stats.representation_rows, stats.file_rows
    ));

    Ok(ManifestOutput { csv, stats })
}
