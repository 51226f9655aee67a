//! INI documents with Python `configparser` semantics.
//!
//! Mapping files in the wild are written for `RawConfigParser`, so this
//! reader matches its defaults: option names are case-insensitive,
//! `=` and `:` both delimit, values are raw (no escapes), `#` and `;`
//! start full-line comments, and indented lines continue a value.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

static GROUP_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<name>.+)\]$").expect("group header regex"));

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<key>.*?)\s*(?P<delim>[=:])\s*(?P<value>.*)$").expect("option line regex")
});

/// Option names are compared case-insensitively.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// One `[group]` and its options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniGroup {
    pub name: String,
    entries: HashMap<String, String>,
}

impl IniGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// All options, keys already normalized.
    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

/// A parsed INI document, groups in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    groups: Vec<IniGroup>,
}

impl IniDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> ConfigResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut doc = IniDocument::default();
        // (option key, indent of its line) while a value may still continue
        let mut open_option: Option<(String, usize)> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                open_option = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();

            if let Some((key, opt_indent)) = &open_option {
                if indent > *opt_indent {
                    let group = doc.groups.last_mut().ok_or_else(|| {
                        parse_error(line_no, "continuation line outside any group")
                    })?;
                    if let Some(value) = group.entries.get_mut(key) {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(caps) = GROUP_HEADER.captures(trimmed) {
                let name = &caps["name"];
                if doc.group(name).is_some() {
                    return Err(parse_error(line_no, format!("duplicate group [{}]", name)));
                }
                doc.groups.push(IniGroup::new(name));
                open_option = None;
                continue;
            }

            let group = doc.groups.last_mut().ok_or_else(|| {
                parse_error(line_no, "option found before any [group] header")
            })?;

            let caps = OPTION_LINE.captures(trimmed).ok_or_else(|| {
                parse_error(line_no, format!("expected 'key = value', found '{}'", trimmed))
            })?;

            let key = normalize_key(&caps["key"]);
            if key.is_empty() {
                return Err(parse_error(line_no, "option without a name"));
            }
            if group.entries.contains_key(&key) {
                return Err(parse_error(
                    line_no,
                    format!("duplicate option '{}' in [{}]", key, group.name),
                ));
            }

            group.entries.insert(key.clone(), caps["value"].trim().to_string());
            open_option = Some((key, indent));
        }

        Ok(doc)
    }

    /// Group names are case-sensitive.
    pub fn group(&self, name: &str) -> Option<&IniGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.group(group).and_then(|g| g.get(key))
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_options() {
        let doc = IniDocument::parse(
            "[rosetta mapping]\n#comment\nSIP title = Getty CSV Ingest\nTitle(DC)=NAME\n\n[static values]\nUsage Type: VIEW\n",
        )
        .unwrap();

        assert!(doc.group("rosetta mapping").is_some());
        assert!(doc.group("static values").is_some());
        assert_eq!(doc.get("rosetta mapping", "SIP Title"), Some("Getty CSV Ingest"));
        assert_eq!(doc.get("rosetta mapping", "title(dc)"), Some("NAME"));
        assert_eq!(doc.get("static values", "Usage Type"), Some("VIEW"));
        assert_eq!(doc.get("Static Values", "Usage Type"), None);
    }

    #[test]
    fn test_backslashes_are_raw() {
        let doc =
            IniDocument::parse("[path values]\npathmask=Z:\\distilled\\Mahara Okeroa - E1\\\n")
                .unwrap();
        assert_eq!(
            doc.get("path values", "pathmask"),
            Some("Z:\\distilled\\Mahara Okeroa - E1\\")
        );
    }

    #[test]
    fn test_value_split_at_first_delimiter() {
        let doc = IniDocument::parse("[g]\nurl = file:/C:/a=b\n").unwrap();
        assert_eq!(doc.get("g", "url"), Some("file:/C:/a=b"));
    }

    #[test]
    fn test_continuation_lines() {
        let doc = IniDocument::parse("[g]\nFILE = a,\n    b\nnext = 1\n").unwrap();
        assert_eq!(doc.get("g", "FILE"), Some("a,\nb"));
        assert_eq!(doc.get("g", "next"), Some("1"));
    }

    #[test]
    fn test_semicolon_comments_and_bom() {
        let doc = IniDocument::parse("\u{feff}; leading\n[g]\n; inside\nk=v\n").unwrap();
        assert_eq!(doc.get("g", "k"), Some("v"));
    }

    #[test]
    fn test_option_before_group_fails() {
        let err = IniDocument::parse("k = v\n[g]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_line_without_delimiter_fails() {
        let err = IniDocument::parse("[g]\njust words\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_option_fails() {
        let err = IniDocument::parse("[g]\nMD5=a\nmd5=b\n").unwrap_err();
        assert!(err.to_string().contains("duplicate option 'md5'"));
    }

    #[test]
    fn test_duplicate_group_fails() {
        let err = IniDocument::parse("[g]\n[g]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_unicode_values() {
        let doc = IniDocument::parse("[static values]\nPreservation Type=♙♘ ā, ē\n").unwrap();
        assert_eq!(doc.get("static values", "preservation type"), Some("♙♘ ā, ē"));
    }
}
