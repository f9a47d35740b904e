//! Document service: the boundary the letter UI talks to
//!
//! Fetches the default template for a letter type, maps the record, renders,
//! and turns every failure on the way into a [`DocumentError`].

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{DocumentTypeTag, LetterRecord, SettingsSnapshot, VariableDictionary};
use crate::error::DocumentError;
use crate::mapping::map_variables;
use crate::print::{PrintMaterializer, SurfaceOpener};
use crate::render::{RenderMode, RenderedDocument, Renderer};
use crate::store::TemplateStore;

/// What the preview area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Preview-mode markup
    Rendered(String),
    /// No default template exists for the letter type
    MissingTemplate(String),
    /// Anything else went wrong; never shown alongside partial output
    Error(String),
}

impl PreviewState {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Renders and prints letters against a template store
pub struct DocumentService<S> {
    store: S,
    settings: Option<SettingsSnapshot>,
    clock: Box<dyn Clock>,
    renderer: Renderer,
}

impl<S: TemplateStore> DocumentService<S> {
    pub fn new(store: S) -> Result<Self, DocumentError> {
        debug!("DocumentService::new: called");
        Ok(Self {
            store,
            settings: None,
            clock: Box::new(SystemClock),
            renderer: Renderer::new()?,
        })
    }

    pub fn with_settings(mut self, settings: SettingsSnapshot) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The full dictionary for a record
    pub fn dictionary(&self, tag: &DocumentTypeTag, record: &LetterRecord) -> VariableDictionary {
        map_variables(tag, record, self.settings.as_ref(), self.clock.as_ref())
    }

    fn template_markup(&self, tag: &DocumentTypeTag) -> Result<String, DocumentError> {
        debug!(%tag, "DocumentService::template_markup: called");
        match self.store.default_for(tag) {
            Ok(Some(template)) => Ok(template.markup),
            Ok(None) => {
                debug!(%tag, "DocumentService::template_markup: no default template");
                Err(DocumentError::MissingTemplate { tag: tag.to_string() })
            }
            Err(e) => Err(DocumentError::render_failure(e)),
        }
    }

    /// Render `record` into the default template for `tag`
    pub fn render(
        &self,
        tag: &DocumentTypeTag,
        record: &LetterRecord,
        mode: RenderMode,
    ) -> Result<RenderedDocument, DocumentError> {
        debug!(%tag, %mode, "DocumentService::render: called");
        let markup = self.template_markup(tag)?;
        Ok(self.render_markup(&markup, tag, record, mode))
    }

    /// Render `record` into caller-supplied markup, bypassing the store
    pub fn render_markup(
        &self,
        markup: &str,
        tag: &DocumentTypeTag,
        record: &LetterRecord,
        mode: RenderMode,
    ) -> RenderedDocument {
        let dict = self.dictionary(tag, record);
        self.renderer.render_document(markup, &dict, mode)
    }

    /// Decode a JSON record, then render it
    pub fn render_json(
        &self,
        tag: &DocumentTypeTag,
        record: Value,
        mode: RenderMode,
    ) -> Result<RenderedDocument, DocumentError> {
        debug!(%tag, %mode, "DocumentService::render_json: called");
        let markup = self.template_markup(tag)?;
        let record = LetterRecord::from_json(tag, record).map_err(DocumentError::render_failure)?;
        Ok(self.render_markup(&markup, tag, &record, mode))
    }

    /// Preview for the letter UI. Failures become an error state.
    pub fn preview(&self, tag: &DocumentTypeTag, record: Value) -> PreviewState {
        debug!(%tag, "DocumentService::preview: called");
        match self.render_json(tag, record, RenderMode::Preview) {
            Ok(doc) => PreviewState::Rendered(doc.markup),
            Err(e @ DocumentError::MissingTemplate { .. }) => {
                info!(%tag, "Preview unavailable: no default template");
                PreviewState::MissingTemplate(e.to_string())
            }
            Err(e) => {
                warn!(%tag, error = %e, "Preview failed");
                PreviewState::Error(e.to_string())
            }
        }
    }

    /// Render in final mode and print.
    ///
    /// Leftover tokens stop the job with `UnresolvedVariables` unless
    /// `allow_unresolved` is set. Returns the document that was printed.
    pub async fn print<O: SurfaceOpener>(
        &self,
        tag: &DocumentTypeTag,
        record: &LetterRecord,
        materializer: &PrintMaterializer<O>,
        allow_unresolved: bool,
    ) -> Result<RenderedDocument, DocumentError> {
        debug!(%tag, %allow_unresolved, "DocumentService::print: called");
        let doc = self.render(tag, record, RenderMode::Final)?;
        self.print_document(doc, materializer, allow_unresolved).await
    }

    /// Print an already rendered final document
    pub async fn print_document<O: SurfaceOpener>(
        &self,
        doc: RenderedDocument,
        materializer: &PrintMaterializer<O>,
        allow_unresolved: bool,
    ) -> Result<RenderedDocument, DocumentError> {
        if doc.mode != RenderMode::Final {
            return Err(DocumentError::render_failure("only final-mode documents can be printed"));
        }
        if !doc.is_complete() {
            if !allow_unresolved {
                return Err(DocumentError::UnresolvedVariables {
                    tokens: doc.unresolved,
                });
            }
            warn!(count = doc.unresolved.len(), "Printing with unresolved variables");
        }

        materializer.print(&doc.markup).await?;
        Ok(doc)
    }
}
