//! Row assembly.
//!
//! Walks the records and the configured sections, producing one
//! [`OutputRow`] per (record, section) pair. Each section fills a run of
//! schema columns starting where the previous section stopped, so the
//! section field lists must follow the schema order exactly.
//!
//! In single-IE mode the IE and REPRESENTATION rows are built from the
//! first record only; later records emit FILE rows whose columns start
//! after the captured IE/REPRESENTATION runs.

use crate::config::MappingConfig;
use crate::error::{TransformError, TransformResult};
use crate::models::{OutputRow, SectionDefinition, SectionKey};
use crate::parser::InputRecord;
use crate::schema::{RosettaSchema, RESERVED_COLUMNS};

use super::resolver::{resolve_field, FieldContext};

/// First schema column a section may fill.
pub const FIRST_MAPPED_COLUMN: usize = RESERVED_COLUMNS;

/// Progress of the single-IE collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPhase {
    #[default]
    AwaitingFirstUnit,
    UnitCaptured,
}

/// Per-pass assembly state. Never shared between passes.
#[derive(Debug, Clone, Default)]
pub struct AssemblyState {
    single_ie: bool,
    phase: UnitPhase,
    ie_len: Option<usize>,
    rep_len: Option<usize>,
}

impl AssemblyState {
    pub fn new(single_ie: bool) -> Self {
        Self {
            single_ie,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> UnitPhase {
        self.phase
    }

    /// Whether `key` produces a row for the current record.
    pub fn emits(&self, key: &SectionKey) -> bool {
        !self.single_ie || !key.is_unit_level() || self.phase == UnitPhase::AwaitingFirstUnit
    }

    /// Note a section that was just emitted.
    pub fn record_section(&mut self, section: &SectionDefinition) {
        if !self.single_ie || self.phase == UnitPhase::UnitCaptured {
            return;
        }
        match section.key {
            SectionKey::Ie => self.ie_len = Some(section.len()),
            SectionKey::Representation => self.rep_len = Some(section.len()),
            _ => {}
        }
        if self.ie_len.is_some() && self.rep_len.is_some() {
            self.phase = UnitPhase::UnitCaptured;
        }
    }

    /// Column where the first emitted section of a record starts.
    pub fn cursor_start(&self) -> usize {
        match self.phase {
            UnitPhase::UnitCaptured => {
                FIRST_MAPPED_COLUMN + self.ie_len.unwrap_or(0) + self.rep_len.unwrap_or(0)
            }
            UnitPhase::AwaitingFirstUnit => FIRST_MAPPED_COLUMN,
        }
    }
}

/// Fill one section's run of columns, advancing `cursor` past it.
pub fn build_row(
    section: &SectionDefinition,
    record: &InputRecord,
    schema: &RosettaSchema,
    ctx: &FieldContext<'_>,
    cursor: &mut usize,
) -> TransformResult<OutputRow> {
    let mut row = OutputRow::blank(schema.len(), section.key.as_str());

    for field in &section.fields {
        let expected = schema
            .name_at(*cursor)
            .ok_or_else(|| TransformError::SchemaExhausted {
                section: section.key.to_string(),
                field: field.clone(),
                width: schema.len(),
            })?;
        if expected != field {
            return Err(TransformError::LayoutMismatch {
                section: section.key.to_string(),
                field: field.clone(),
                position: *cursor,
                expected: expected.to_string(),
            });
        }

        row.cells[*cursor] = resolve_field(field, record, ctx)?;
        *cursor += 1;
    }

    Ok(row)
}

/// Assemble every manifest row, SIP row excluded.
pub fn assemble(
    records: &[InputRecord],
    schema: &RosettaSchema,
    config: &MappingConfig,
    archive_name: &str,
) -> TransformResult<Vec<OutputRow>> {
    let ctx = FieldContext::new(config, archive_name);
    let mut state = AssemblyState::new(config.app.single_ie);
    let mut rows = Vec::with_capacity(records.len() * config.sections.len());

    for record in records {
        let mut cursor = state.cursor_start();
        for section in &config.sections {
            if !state.emits(&section.key) {
                continue;
            }
            rows.push(build_row(section, record, schema, &ctx, &mut cursor)?);
            state.record_section(section);
        }
    }

    Ok(rows)
}
