//! Field resolution.
//!
//! Each manifest cell is filled by the first [`Resolver`] in
//! [`RESOLUTION_ORDER`] that matches its field; unmatched fields are
//! blank.

use crate::config::MappingConfig;
use crate::error::TransformResult;
use crate::parser::{uri_path, InputRecord};

/// Fields holding the IE title.
pub const TITLE_FIELDS: [&str; 2] = ["Title", "Title(DC)"];

/// Fields holding an ingest-relative directory.
pub const PATH_FIELDS: [&str; 2] = ["File Location", "File Original Path"];

/// Read-only inputs shared by every resolution in one assembly pass.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub config: &'a MappingConfig,
    /// Name of the archive the records were found in (archive mode).
    pub archive_name: &'a str,
}

impl<'a> FieldContext<'a> {
    pub fn new(config: &'a MappingConfig, archive_name: &'a str) -> Self {
        Self {
            config,
            archive_name,
        }
    }
}

/// A source a field value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// `[rosetta mapping]`: a DROID column, or the title rules.
    Direct,
    /// `[static values]`: a literal.
    Static,
    /// `[droid mapping]` with a path mask: derived directories.
    DerivedPath,
}

/// First match wins.
pub const RESOLUTION_ORDER: [Resolver; 3] =
    [Resolver::Direct, Resolver::Static, Resolver::DerivedPath];

impl Resolver {
    /// `Ok(None)` means this source has nothing for `field`.
    pub fn resolve(
        &self,
        field: &str,
        record: &InputRecord,
        ctx: &FieldContext<'_>,
    ) -> TransformResult<Option<String>> {
        match self {
            Resolver::Direct => resolve_direct(field, record, ctx),
            Resolver::Static => Ok(ctx.config.static_values.get(field).map(str::to_string)),
            Resolver::DerivedPath => resolve_derived(field, record, ctx),
        }
    }
}

/// Resolve one field, falling back to an empty value.
pub fn resolve_field(
    field: &str,
    record: &InputRecord,
    ctx: &FieldContext<'_>,
) -> TransformResult<String> {
    for resolver in RESOLUTION_ORDER {
        if let Some(value) = resolver.resolve(field, record, ctx)? {
            return Ok(value);
        }
    }
    Ok(String::new())
}

fn resolve_direct(
    field: &str,
    record: &InputRecord,
    ctx: &FieldContext<'_>,
) -> TransformResult<Option<String>> {
    let Some(source) = ctx.config.rosetta_mapping.get(field) else {
        return Ok(None);
    };

    if TITLE_FIELDS.contains(&field) {
        let app = &ctx.config.app;
        if app.include_archives && app.single_ie {
            let title = app
                .archive_title
                .clone()
                .unwrap_or_else(|| ctx.archive_name.to_string());
            return Ok(Some(title));
        }
        // One IE for the whole ingest: the mapping is the title itself.
        if app.single_ie {
            return Ok(Some(source.to_string()));
        }
    }

    Ok(Some(record.require(source)?.to_string()))
}

fn resolve_derived(
    field: &str,
    record: &InputRecord,
    ctx: &FieldContext<'_>,
) -> TransformResult<Option<String>> {
    let Some(source) = ctx.config.droid_mapping.get(field) else {
        return Ok(None);
    };
    let Some(mask) = ctx.config.path_mask.as_deref() else {
        return Ok(None);
    };

    if PATH_FIELDS.contains(&field) {
        let path = if ctx.config.app.include_archives {
            archive_ingest_path(record.require("URI")?, mask)
        } else {
            ingest_path(record.require("FILE_PATH")?, record.require("NAME")?, mask)
        };
        return Ok(Some(path));
    }

    Ok(Some(record.require(source)?.to_string()))
}

/// Directory of an on-disk file relative to the path mask, `/`-separated.
///
/// Without a name the path is cut after its last `\`.
pub fn ingest_path(file_path: &str, name: &str, mask: &str) -> String {
    let file_path = file_path.trim();
    let name = name.trim();

    let directory = if name.is_empty() {
        match file_path.rfind('\\') {
            Some(idx) => file_path[..=idx].to_string(),
            None => String::new(),
        }
    } else {
        match file_path.strip_suffix(name) {
            Some(dir) => dir.to_string(),
            None => file_path.replace(name, ""),
        }
    };

    directory
        .replacen(mask, "", 1)
        .replace('\\', "/")
        .trim()
        .to_string()
}

/// Directory of an archive entry, taken from its URI path.
///
/// The first path segment (drive or host) and the entry name are dropped.
pub fn archive_ingest_path(uri: &str, mask: &str) -> String {
    let segments: Vec<&str> = uri_path(uri).split('/').collect();
    let inner = if segments.len() > 2 {
        segments[1..segments.len() - 1].join("/")
    } else {
        String::new()
    };

    format!("{}/", inner.replace(mask, "").replace('\\', "/"))
}
