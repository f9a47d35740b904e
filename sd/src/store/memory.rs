//! In-memory template store

use tracing::{debug, info};

use super::TemplateStore;
use crate::domain::{DocumentTypeTag, Template};
use crate::error::DocumentError;

/// Templates held in memory, at most one default per tag
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: Vec<Template>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template. A new default demotes the previous default for the tag.
    pub fn insert(&mut self, template: Template) {
        debug!(tag = %template.document_type_tag, is_default = template.is_default, "MemoryTemplateStore::insert: called");
        if template.is_default {
            for existing in self
                .templates
                .iter_mut()
                .filter(|t| t.is_default && t.document_type_tag == template.document_type_tag)
            {
                info!(tag = %existing.document_type_tag, "Demoting previous default template");
                existing.is_default = false;
            }
        }
        self.templates.push(template);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, template: Template) -> Self {
        self.insert(template);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn default_for(&self, tag: &DocumentTypeTag) -> Result<Option<Template>, DocumentError> {
        debug!(%tag, "MemoryTemplateStore::default_for: called");
        Ok(self
            .templates
            .iter()
            .find(|t| t.is_default && &t.document_type_tag == tag)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Template>, DocumentError> {
        Ok(self.templates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentKind;

    #[test]
    fn test_default_lookup() {
        let store = MemoryTemplateStore::new()
            .with(Template::new(DocumentKind::PengantarSkck, "draft"))
            .with(Template::new(DocumentKind::PengantarSkck, "resmi").as_default());

        let tag = DocumentTypeTag::Known(DocumentKind::PengantarSkck);
        assert_eq!(store.default_for(&tag).unwrap().unwrap().markup, "resmi");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_new_default_demotes_previous() {
        let store = MemoryTemplateStore::new()
            .with(Template::new(DocumentKind::KeteranganUsaha, "lama").as_default())
            .with(Template::new(DocumentKind::KeteranganDomisili, "domisili").as_default())
            .with(Template::new(DocumentKind::KeteranganUsaha, "baru").as_default());

        let usaha = DocumentTypeTag::Known(DocumentKind::KeteranganUsaha);
        assert_eq!(store.default_for(&usaha).unwrap().unwrap().markup, "baru");

        let defaults: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .filter(|t| t.is_default && t.document_type_tag == usaha)
            .collect();
        assert_eq!(defaults.len(), 1);

        let domisili = DocumentTypeTag::Known(DocumentKind::KeteranganDomisili);
        assert!(store.default_for(&domisili).unwrap().is_some());
    }

    #[test]
    fn test_no_default_registered() {
        let store = MemoryTemplateStore::new().with(Template::new("surat-lain", "x"));
        assert!(store.default_for(&DocumentTypeTag::parse("surat-lain")).unwrap().is_none());
    }
}
