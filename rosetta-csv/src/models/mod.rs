//! Domain models shared across the generator.
//!
//! - [`SectionKey`] - which kind of manifest row a section produces
//! - [`SectionDefinition`] - a section and its ordered field names
//! - [`SchemaField`] - one output column of the Rosetta schema
//! - [`OutputRow`] - one manifest row, one cell per schema column

use std::fmt;

// =============================================================================
// Sections
// =============================================================================

/// Key identifying a manifest section.
///
/// Rosetta knows IE, REPRESENTATION and FILE rows. Any other key a
/// configuration declares is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKey {
    /// Intellectual Entity.
    Ie,
    /// A rendition of the IE's content.
    Representation,
    /// A single file of a representation.
    File,
    /// Anything else named in `CSVSECTIONS`.
    Other(String),
}

impl SectionKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "IE" => SectionKey::Ie,
            "REPRESENTATION" => SectionKey::Representation,
            "FILE" => SectionKey::File,
            other => SectionKey::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Ie => "IE",
            SectionKey::Representation => "REPRESENTATION",
            SectionKey::File => "FILE",
            SectionKey::Other(key) => key,
        }
    }

    /// IE and REPRESENTATION rows collapse to a single pair in single-IE mode.
    pub fn is_unit_level(&self) -> bool {
        matches!(self, SectionKey::Ie | SectionKey::Representation)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section and the fields it fills, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDefinition {
    pub key: SectionKey,
    pub fields: Vec<String>,
}

impl SectionDefinition {
    pub fn new(key: SectionKey, fields: Vec<String>) -> Self {
        Self { key, fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Schema & Rows
// =============================================================================

/// One output column.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub position: usize,
}

/// One manifest row. Cells hold raw values; the writer quotes them.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub cells: Vec<String>,
}

impl OutputRow {
    /// A row of `width` empty cells with `key` in the first cell.
    pub fn blank(width: usize, key: &str) -> Self {
        let mut cells = vec![String::new(); width];
        if let Some(first) = cells.first_mut() {
            *first = key.to_string();
        }
        Self { cells }
    }

    /// The section key stored in cell 0.
    pub fn key(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_round_trips_text() {
        assert_eq!(SectionKey::parse("IE"), SectionKey::Ie);
        assert_eq!(SectionKey::parse("FILE").as_str(), "FILE");
        let other = SectionKey::parse("SIP");
        assert_eq!(other, SectionKey::Other("SIP".into()));
        assert_eq!(other.to_string(), "SIP");
    }

    #[test]
    fn test_unit_level_sections() {
        assert!(SectionKey::Ie.is_unit_level());
        assert!(SectionKey::Representation.is_unit_level());
        assert!(!SectionKey::File.is_unit_level());
        // Keys are case-sensitive, as in CSVSECTIONS.
        assert!(!SectionKey::parse("ie").is_unit_level());
    }

    #[test]
    fn test_blank_row() {
        let row = OutputRow::blank(4, "FILE");
        assert_eq!(row.width(), 4);
        assert_eq!(row.key(), "FILE");
        assert!(row.cells[1..].iter().all(String::is_empty));
    }
}
