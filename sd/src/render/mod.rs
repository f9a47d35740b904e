//! Template rendering
//!
//! Flat `{{key}}` substitution only: no loops, conditionals, filters or
//! nested property access. Every key a template can use is a plain entry in
//! the [`VariableDictionary`](crate::domain::VariableDictionary).

mod mode;
mod renderer;

pub use mode::RenderMode;
pub use renderer::{
    RenderedDocument, Renderer, TOKEN_PATTERN, escape_html, missing_placeholder, render, unresolved_tokens,
};
