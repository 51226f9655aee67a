//! CSV reading with encoding detection.
//!
//! Turns a comma-delimited, double-quoted file into [`InputRecord`]s keyed
//! by header name. DROID-specific filtering lives in [`droid`].

pub mod droid;

pub use droid::{
    filter_records, folder_names, folder_paths, remove_container_contents, remove_folders,
    split_archive_contents, uri_path, uri_scheme, ArchiveSplit, FilteredInput,
};

use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{CsvError, CsvResult, TransformError};

/// Columns the DROID filters and path derivation read directly.
pub const DROID_COLUMNS: [&str; 4] = ["URI", "FILE_PATH", "NAME", "TYPE"];

/// One data row of the input, keyed by header name.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    /// 1-based line in the source file where the row starts.
    line: usize,
    fields: HashMap<String, String>,
}

impl InputRecord {
    pub fn new(line: usize, fields: HashMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<K, V>(line: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { line, fields }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Like [`get`](Self::get) but a missing column is an error.
    pub fn require(&self, column: &str) -> Result<&str, TransformError> {
        self.get(column).ok_or_else(|| TransformError::MissingColumn {
            column: column.to_string(),
            line: self.line,
        })
    }

    /// Value of a column, or `""` when absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// The record as a JSON object (keys sorted).
    pub fn to_json(&self) -> Value {
        let obj: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(obj)
    }
}

/// Result of reading a file, with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data rows, header excluded.
    pub records: Vec<InputRecord>,
    /// Encoding the bytes were decoded with.
    pub encoding: String,
    /// Header row, verbatim.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes using the specified encoding
pub fn decode_with(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        // windows-1252 agrees with Latin-1 on every printable byte
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.to_string(),
            // Fallback: UTF-8 with lossy conversion
            None => String::from_utf8_lossy(bytes).to_string(),
        },
    }
}

/// Decode bytes to text, returning the text and the encoding used.
///
/// Valid UTF-8 (with or without BOM) is taken as is; anything else goes
/// through chardet.
pub fn decode_content(bytes: &[u8]) -> CsvResult<(String, String)> {
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Ok((text.to_string(), "utf-8".to_string()));
    }

    let encoding = detect_encoding(bytes);
    if encoding.is_empty() {
        return Err(CsvError::Encoding(
            "not UTF-8 and no other encoding could be detected".to_string(),
        ));
    }
    Ok((decode_with(bytes, &encoding), encoding))
}

/// Parse CSV text into records.
///
/// The first row is the header. A row shorter than the header is an
/// error; extra trailing fields are ignored.
pub fn parse_csv_str(content: &str) -> CsvResult<(Vec<String>, Vec<InputRecord>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);

        if row.len() < headers.len() {
            return Err(CsvError::ShortRow {
                line,
                expected: headers.len(),
                found: row.len(),
            });
        }

        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(InputRecord::new(line, fields));
    }

    Ok((headers, records))
}

/// Parse CSV bytes, detecting the encoding first.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParseResult> {
    let (content, encoding) = decode_content(bytes)?;
    let (headers, records) = parse_csv_str(&content)?;
    Ok(ParseResult {
        records,
        encoding,
        headers,
    })
}

/// Read and parse a CSV file.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

/// Read a DROID report, checking that the columns used downstream exist.
pub fn read_droid_report<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let result = read_csv_file(path)?;
    check_droid_headers(&result.headers)?;
    Ok(result)
}

/// Fail on the first DROID column missing from `headers`.
pub fn check_droid_headers(headers: &[String]) -> CsvResult<()> {
    match DROID_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        Some(missing) => Err(CsvError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let (headers, rows) = parse_csv_str(csv).unwrap();

        assert_eq!(headers, vec!["name", "age"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Alice"));
        assert_eq!(rows[1].get("age"), Some("25"));
    }

    #[test]
    fn test_quoted_commas_and_doubled_quotes() {
        let csv = "\"NAME\",\"FILE_PATH\"\n\"a \"\"b\"\".doc\",\"Z:\\E1\\Arts, Culture\\a.doc\"";
        let (_, rows) = parse_csv_str(csv).unwrap();

        assert_eq!(rows[0].get("NAME"), Some("a \"b\".doc"));
        assert_eq!(rows[0].get("FILE_PATH"), Some("Z:\\E1\\Arts, Culture\\a.doc"));
    }

    #[test]
    fn test_unquoted_empty_values() {
        let csv = "\"a\",\"b\",\"c\"\n\"1\",,\"3\"";
        let (_, rows) = parse_csv_str(csv).unwrap();

        assert_eq!(rows[0].get("b"), Some(""));
        assert_eq!(rows[0].get("c"), Some("3"));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let csv = "a,b,c\n1,2,3\n4,5";
        let err = parse_csv_str(csv).unwrap_err();
        match err {
            CsvError::ShortRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "a,b\n1,2,3,4";
        let (_, rows) = parse_csv_str(csv).unwrap();

        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), Some("2"));
        assert_eq!(rows[0].to_json().as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input_has_no_headers() {
        assert!(matches!(parse_csv_str(""), Err(CsvError::NoHeaders)));
    }

    #[test]
    fn test_record_line_numbers() {
        let csv = "a\nx\ny";
        let (_, rows) = parse_csv_str(csv).unwrap();
        assert_eq!(rows[0].line(), 2);
        assert_eq!(rows[1].line(), 3);
    }

    #[test]
    fn test_require_reports_line() {
        let record = InputRecord::from_pairs(9, [("NAME", "x.doc")]);
        let err = record.require("MD5_HASH").unwrap_err();
        assert!(err.to_string().contains("Line 9"));
        assert!(err.to_string().contains("MD5_HASH"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFID,NAME\n1,a.doc";
        let result = parse_bytes(bytes).unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.headers[0], "ID");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_with(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_currency_and_fraction_signs() {
        // 0xA4 and 0xBD differ between ISO-8859-1 and ISO-8859-15
        let decoded = decode_with(&[0x41, 0xA4, 0xBD], "iso-8859-1");
        assert_eq!(decoded, "A¤½");
        assert_eq!(decode_with(&[0xA4], "latin1"), "¤");
    }

    #[test]
    fn test_droid_headers_checked() {
        let headers: Vec<String> = ["ID", "URI", "FILE_PATH", "NAME"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = check_droid_headers(&headers).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(ref c) if c == "TYPE"));
    }
}
