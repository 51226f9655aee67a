//! Section layout from `[rosetta csv fields]`.

use super::ini::IniDocument;
use crate::error::{ConfigError, ConfigResult};
use crate::models::{SectionDefinition, SectionKey};

pub const SECTIONS_GROUP: &str = "rosetta csv fields";
pub const SECTIONS_KEY: &str = "CSVSECTIONS";

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the ordered section definitions.
///
/// Every key listed in `CSVSECTIONS` must have its own field list.
pub fn read_sections(ini: &IniDocument) -> ConfigResult<Vec<SectionDefinition>> {
    let listed = ini
        .get(SECTIONS_GROUP, SECTIONS_KEY)
        .ok_or_else(|| ConfigError::MissingOption {
            group: SECTIONS_GROUP.to_string(),
            key: SECTIONS_KEY.to_string(),
        })?;

    split_list(listed)
        .into_iter()
        .map(|key| {
            let fields = ini
                .get(SECTIONS_GROUP, &key)
                .ok_or_else(|| ConfigError::MissingSectionFields(key.clone()))?;
            Ok(SectionDefinition::new(SectionKey::parse(&key), split_list(fields)))
        })
        .collect()
}
