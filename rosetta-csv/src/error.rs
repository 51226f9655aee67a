//! Error types for the Rosetta CSV generator.
//!
//! Each stage of the pipeline owns its error type:
//!
//! - [`CsvError`] - reading the DROID report
//! - [`SchemaError`] - reading the Rosetta table schema
//! - [`ConfigError`] - reading the INI mapping configuration
//! - [`TransformError`] - mapping records onto manifest rows
//! - [`PipelineError`] - top-level orchestration
//!
//! Conversion into [`PipelineError`] is automatic via `From`, so `?`
//! works across stage boundaries. Every error is fatal: the inputs are
//! local files and nothing here is worth retrying.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a delimited input file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes could not be decoded to text.
    #[error("Failed to decode file: {0}")]
    Encoding(String),

    /// The csv reader rejected the content.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// No header row.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// A data row carries fewer fields than the header.
    #[error("Line {line}: expected {expected} fields but found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A column the DROID filters depend on is absent from the header.
    #[error("Required column missing from header: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors while reading the Rosetta table schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Failed to read file.
    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON, or a document without a usable `fields` list.
    #[error("Malformed schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// Columns 0 and 1 are reserved for the object type and SIP title.
    #[error("Schema declares {0} field(s); at least 2 are required")]
    TooFewFields(usize),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading or interpreting the mapping configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error in the INI document.
    #[error("Config line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A mandatory option is missing.
    #[error("Missing option '{key}' in [{group}]")]
    MissingOption { group: String, key: String },

    /// A section listed in CSVSECTIONS has no field list.
    #[error("Section '{0}' is listed in CSVSECTIONS but has no field list in [rosetta csv fields]")]
    MissingSectionFields(String),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while mapping DROID records onto manifest rows.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A mapping names a column the record does not have.
    #[error("Line {line}: mapped column '{column}' not found in DROID record")]
    MissingColumn { column: String, line: usize },

    /// The section's field does not sit where the schema expects it.
    #[error(
        "Section {section}: field '{field}' does not match schema column {position} ('{expected}')"
    )]
    LayoutMismatch {
        section: String,
        field: String,
        position: usize,
        expected: String,
    },

    /// The section's fields run past the last schema column.
    #[error("Section {section}: field '{field}' falls beyond the {width} schema columns")]
    SchemaExhausted {
        section: String,
        field: String,
        width: usize,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::generate_manifest`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// DROID report error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Schema error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Nothing left to ingest once folders and container entries are gone.
    #[error(
        "Listing empty after filtering; check the includezips setting or the contents of the DROID report"
    )]
    EmptyInput,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::ShortRow {
            line: 7,
            expected: 18,
            found: 3,
        };
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("Line 7"));

        let config_err = ConfigError::MissingSectionFields("FILE".into());
        let pipeline_err: PipelineError = config_err.into();
        assert!(pipeline_err.to_string().contains("FILE"));
    }

    #[test]
    fn test_empty_input_names_filter_setting() {
        let msg = PipelineError::EmptyInput.to_string();
        assert!(msg.contains("includezips"));
    }

    #[test]
    fn test_layout_mismatch_format() {
        let err = TransformError::LayoutMismatch {
            section: "FILE".into(),
            field: "MD5".into(),
            position: 6,
            expected: "File Original Path".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'MD5'"));
        assert!(msg.contains("column 6"));
        assert!(msg.contains("File Original Path"));
    }
}
