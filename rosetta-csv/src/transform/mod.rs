//! Transformation module.
//!
//! This module turns filtered DROID records into a Rosetta manifest:
//! - Resolver: per-field value sources
//! - Assembler: sections to rows, single-IE collapse
//! - Writer: quoting and manifest layout
//! - Pipeline: end-to-end generation

pub mod assembler;
pub mod pipeline;
pub mod resolver;
pub mod writer;

pub use assembler::{assemble, AssemblyState, UnitPhase, FIRST_MAPPED_COLUMN};
pub use pipeline::*;
pub use resolver::{
    archive_ingest_path, ingest_path, resolve_field, FieldContext, Resolver, RESOLUTION_ORDER,
};
pub use writer::{quote_cell, render_manifest, render_row, sip_row};
