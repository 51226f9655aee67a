//! Mapping configuration.
//!
//! The INI file is read once into a [`MappingConfig`]; nothing downstream
//! looks up group or option names again.
//!
//! | Group                       | Options                                  |
//! |-----------------------------|------------------------------------------|
//! | `application configuration` | `includezips`, `singleIE`, `ziptitle`    |
//! | `rosetta mapping`           | output field → DROID column (or title)   |
//! | `static values`             | output field → literal                   |
//! | `droid mapping`             | output field → DROID column (paths)      |
//! | `path values`               | `pathmask`                               |
//! | `rosetta csv fields`        | `CSVSECTIONS` and one list per section   |

pub mod ini;
pub mod sections;

pub use ini::{IniDocument, IniGroup};
pub use sections::read_sections;

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigResult;
use crate::models::SectionDefinition;

pub const APP_GROUP: &str = "application configuration";
pub const ROSETTA_MAPPING_GROUP: &str = "rosetta mapping";
pub const STATIC_VALUES_GROUP: &str = "static values";
pub const DROID_MAPPING_GROUP: &str = "droid mapping";
pub const PATH_VALUES_GROUP: &str = "path values";

/// Title of the SIP row when the mapping does not set one.
pub const DEFAULT_SIP_TITLE: &str = "CSV Load";

/// Field name → configured value, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: HashMap<String, String>,
}

impl FieldMap {
    fn from_group(ini: &IniDocument, group: &str) -> Self {
        Self {
            entries: ini
                .group(group)
                .map(|g| g.entries().clone())
                .unwrap_or_default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(&ini::normalize_key(field)).map(String::as_str)
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.entries.insert(ini::normalize_key(field), value.into());
    }
}

/// `[application configuration]` flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    /// Keep archive entries as records (`includezips`).
    pub include_archives: bool,
    /// Collapse everything into one IE (`singleIE`).
    pub single_ie: bool,
    /// IE title used with both modes on (`ziptitle`).
    pub archive_title: Option<String>,
}

/// Typed mapping configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingConfig {
    pub app: AppSettings,
    pub rosetta_mapping: FieldMap,
    pub static_values: FieldMap,
    pub droid_mapping: FieldMap,
    pub path_mask: Option<String>,
    pub sip_title: Option<String>,
    pub sections: Vec<SectionDefinition>,
}

/// Only a case-insensitive `true` counts as true.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl MappingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        Self::from_ini(&IniDocument::from_file(path)?)
    }

    pub fn parse(text: &str) -> ConfigResult<Self> {
        Self::from_ini(&IniDocument::parse(text)?)
    }

    pub fn from_ini(ini: &IniDocument) -> ConfigResult<Self> {
        let app = AppSettings {
            include_archives: ini.get(APP_GROUP, "includezips").is_some_and(parse_flag),
            single_ie: ini.get(APP_GROUP, "singleIE").is_some_and(parse_flag),
            archive_title: ini.get(APP_GROUP, "ziptitle").map(str::to_string),
        };

        Ok(Self {
            app,
            rosetta_mapping: FieldMap::from_group(ini, ROSETTA_MAPPING_GROUP),
            static_values: FieldMap::from_group(ini, STATIC_VALUES_GROUP),
            droid_mapping: FieldMap::from_group(ini, DROID_MAPPING_GROUP),
            path_mask: ini.get(PATH_VALUES_GROUP, "pathmask").map(str::to_string),
            sip_title: ini.get(ROSETTA_MAPPING_GROUP, "SIP Title").map(str::to_string),
            sections: read_sections(ini)?,
        })
    }

    /// Title for the SIP summary row.
    pub fn sip_title(&self) -> &str {
        self.sip_title.as_deref().unwrap_or(DEFAULT_SIP_TITLE)
    }
}
