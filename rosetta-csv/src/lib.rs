//! # rosetta-csv - Rosetta ingest manifests from DROID reports
//!
//! rosetta-csv turns a DROID file-inventory report into the CSV manifest
//! Rosetta's CSV deposit loader expects, driven by a JSON table schema
//! and an INI mapping configuration.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ DROID CSV   │────▶│   Parser    │────▶│  Transform  │────▶│  Manifest   │
//! │ (ISO/UTF8)  │     │  (filters)  │     │ (resolvers) │     │   (CSV)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                            ▲                   ▲
//!                     schema JSON          mapping INI
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rosetta_csv::{generate_manifest, ManifestInputs};
//!
//! let output = generate_manifest(&ManifestInputs::new("droid.csv", "schema.json", "mapping.cfg"))?;
//! print!("{}", output.csv);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`logs`] - stderr progress logging
//! - [`models`] - Sections, schema fields and output rows
//! - [`parser`] - CSV decoding and DROID filtering
//! - [`config`] - INI mapping configuration
//! - [`schema`] - Rosetta table schema
//! - [`transform`] - Resolvers, assembly, rendering and pipeline

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Inputs
pub mod config;
pub mod parser;
pub mod schema;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, CsvError, PipelineError, PipelineResult, SchemaError, TransformError,
    TransformResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{OutputRow, SchemaField, SectionDefinition, SectionKey};

// =============================================================================
// Re-exports - Inputs
// =============================================================================

pub use config::{AppSettings, FieldMap, IniDocument, MappingConfig};
pub use parser::{
    decode_content, detect_encoding, filter_records, folder_names, folder_paths,
    read_csv_file, read_droid_report, InputRecord, ParseResult,
};
pub use schema::RosettaSchema;

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    generate_from_parts, generate_manifest, ManifestInputs, ManifestOutput, ManifestStats,
};
