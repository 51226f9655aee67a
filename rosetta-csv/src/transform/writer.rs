//! Manifest rendering.
//!
//! Every cell is written double-quoted, rows end with `\n`, and the
//! second header column is relabelled for Rosetta's loader.

use crate::models::OutputRow;
use crate::schema::RosettaSchema;

/// Key of the summary row that follows the header.
pub const SIP_KEY: &str = "SIP";

const HEADER_PREFIX: &str = "\"Object Type\",\"SIP Title\"";
const HEADER_PREFIX_RENAMED: &str = "\"Object Type\",\"Title (DC)\"";

/// Quote one cell, doubling embedded quotes.
pub fn quote_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// One row as a CSV line, newline excluded.
pub fn render_row(row: &OutputRow) -> String {
    row.cells
        .iter()
        .map(|c| quote_cell(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// The SIP summary row for a schema of `width` columns.
pub fn sip_row(width: usize, sip_title: &str) -> OutputRow {
    let mut row = OutputRow::blank(width, SIP_KEY);
    if let Some(cell) = row.cells.get_mut(1) {
        *cell = sip_title.to_string();
    }
    row
}

/// Render the full manifest: header, SIP row, then `rows`.
pub fn render_manifest(schema: &RosettaSchema, sip_title: &str, rows: &[OutputRow]) -> String {
    let mut out = String::new();

    out.push_str(&schema.header());
    out.push('\n');

    out.push_str(&render_row(&sip_row(schema.len(), sip_title)));
    out.push('\n');

    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }

    out.replace(HEADER_PREFIX, HEADER_PREFIX_RENAMED)
}
