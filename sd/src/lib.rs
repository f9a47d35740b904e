//! Surat Desa - letter template engine for village administration
//!
//! Turns an administrative record (one of twenty letter and certificate
//! families, each with its own embedded persons and fields) into a flat
//! variable dictionary, substitutes it into an administrator-authored HTML
//! template, and drives the result to a printer.
//!
//! # Core Concepts
//!
//! - **Flat Dictionary**: Every template variable is one dot-namespaced key
//! - **Exhaustive Dispatch**: Each letter family has its own mapper
//! - **Visible Gaps**: Preview flags unresolved tokens, final leaves them as written
//! - **Pure Until Print**: Nothing before the print surface touches I/O
//!
//! # Modules
//!
//! - [`domain`] - Records, persons, tags, dictionaries
//! - [`mapping`] - Flattening, common context, dispatch and the variable registry
//! - [`render`] - Token substitution
//! - [`store`] - Template stores and the template loader chain
//! - [`service`] - The document boundary used by the UI
//! - [`print`] - Print surfaces and the print materializer
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod locale;
pub mod mapping;
pub mod print;
pub mod render;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use domain::{
    Amount, DocumentKind, DocumentTypeTag, GenericRecord, LetterRecord, PersonField, PersonReference, SettingsSnapshot,
    Template, VariableDictionary, VariableValue,
};
pub use error::DocumentError;
pub use mapping::{
    VariableCategory, VariableDefinition, build_common, catalog, definitions_for, flatten, map_variables,
};
pub use print::{PrintLayout, PrintMaterializer, PrintSurface, SpoolOpener, SurfaceOpener};
pub use render::{RenderMode, RenderedDocument, Renderer, render, unresolved_tokens};
pub use service::{DocumentService, PreviewState};
pub use store::{MemoryTemplateStore, TemplateLoader, TemplateStore};
