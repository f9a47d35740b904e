//! Template storage
//!
//! The engine only needs two questions answered: which template is the
//! default for a document type, and which templates exist. Persistence
//! lives elsewhere; [`MemoryTemplateStore`] and [`TemplateLoader`] are the
//! adapters this crate ships.
//!
//! Template loading chain for [`TemplateLoader`]:
//! 1. `.suratdesa/templates/{tag}.html` (user override)
//! 2. `{templates-dir}/{tag}.html` (configured directory)
//! 3. Embedded defaults compiled into the binary

pub mod embedded;
mod loader;
mod memory;

pub use loader::{TemplateLoader, TemplateOrigin, TemplateSource};
pub use memory::MemoryTemplateStore;

use crate::domain::{DocumentTypeTag, Template};
use crate::error::DocumentError;

/// Read access to administrator-authored templates
pub trait TemplateStore {
    /// The default template for a tag, if one is registered
    fn default_for(&self, tag: &DocumentTypeTag) -> Result<Option<Template>, DocumentError>;

    /// Every template the store knows about
    fn list(&self) -> Result<Vec<Template>, DocumentError>;
}

impl<S: TemplateStore + ?Sized> TemplateStore for &S {
    fn default_for(&self, tag: &DocumentTypeTag) -> Result<Option<Template>, DocumentError> {
        (**self).default_for(tag)
    }

    fn list(&self) -> Result<Vec<Template>, DocumentError> {
        (**self).list()
    }
}
