//! Administrator-authored templates

use serde::{Deserialize, Serialize};

use super::kind::DocumentTypeTag;

/// An HTML template registered for a document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub document_type_tag: DocumentTypeTag,
    pub markup: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Template {
    pub fn new(tag: impl Into<DocumentTypeTag>, markup: impl Into<String>) -> Self {
        Self {
            document_type_tag: tag.into(),
            markup: markup.into(),
            is_default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}
