//! Rosetta table schema.
//!
//! The schema is a JSON Table Schema document. Only the order and names
//! of `fields` matter here; descriptions, types and constraints are
//! accepted and ignored.
//!
//! ```json
//! {
//!     "title": "Rosetta CSV Validation Schema",
//!     "fields": [
//!         { "name": "Object Type" },
//!         { "name": "SIP Title" },
//!         { "name": "Title(DC)" }
//!     ]
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};
use crate::models::SchemaField;

/// Columns 0 and 1: object type and SIP title.
pub const RESERVED_COLUMNS: usize = 2;

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Deserialize)]
struct FieldDescriptor {
    name: String,
}

/// Output column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RosettaSchema {
    fields: Vec<SchemaField>,
}

impl RosettaSchema {
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let doc: SchemaDocument = serde_json::from_str(json)?;
        Self::from_names(doc.fields.into_iter().map(|f| f.name))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_names<I, S>(names: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<SchemaField> = names
            .into_iter()
            .enumerate()
            .map(|(position, name)| SchemaField {
                name: name.into(),
                position,
            })
            .collect();

        if fields.len() < RESERVED_COLUMNS {
            return Err(SchemaError::TooFewFields(fields.len()));
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(|f| f.name.as_str())
    }

    /// Field names quoted and comma-joined, without a newline.
    pub fn header(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("\"{}\"", f.name))
            .collect::<Vec<_>>()
            .join(",")
    }
}
