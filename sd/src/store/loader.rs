//! Template Loader
//!
//! Loads letter templates from files or falls back to embedded defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::TemplateStore;
use super::embedded;
use crate::domain::{DocumentTypeTag, Template};
use crate::error::DocumentError;

/// Where a loaded template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// `.suratdesa/templates/` under the working root
    User(PathBuf),
    /// The configured templates directory
    Directory(PathBuf),
    /// Compiled into the binary
    Embedded,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(path) => write!(f, "user ({})", path.display()),
            Self::Directory(path) => write!(f, "directory ({})", path.display()),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// Template markup together with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub tag: DocumentTypeTag,
    pub markup: String,
    pub origin: TemplateOrigin,
}

impl TemplateSource {
    pub fn into_template(self) -> Template {
        Template::new(self.tag, self.markup).as_default()
    }
}

/// Resolves the default template per tag through a directory chain
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    /// User override directory (e.g., `.suratdesa/templates/`)
    user_dir: Option<PathBuf>,
    /// Configured templates directory
    templates_dir: Option<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader rooted at `root`, with an optional configured directory
    pub fn new(root: impl AsRef<Path>, templates_dir: Option<PathBuf>) -> Self {
        let root = root.as_ref();
        debug!(?root, ?templates_dir, "TemplateLoader::new: called");
        let user_dir = root.join(".suratdesa").join("templates");

        let user_dir = if user_dir.is_dir() {
            debug!(?user_dir, "TemplateLoader::new: user override directory found");
            Some(user_dir)
        } else {
            debug!("TemplateLoader::new: no user override directory");
            None
        };

        let templates_dir = templates_dir.filter(|dir| {
            let exists = dir.is_dir();
            debug!(?dir, %exists, "TemplateLoader::new: checking templates directory");
            exists
        });

        Self {
            user_dir,
            templates_dir,
        }
    }

    /// Create a loader that only uses embedded templates (for testing)
    pub fn embedded_only() -> Self {
        debug!("TemplateLoader::embedded_only: called");
        Self::default()
    }

    fn directories(&self) -> Vec<(PathBuf, fn(PathBuf) -> TemplateOrigin)> {
        let mut dirs: Vec<(PathBuf, fn(PathBuf) -> TemplateOrigin)> = Vec::new();
        if let Some(dir) = &self.user_dir {
            dirs.push((dir.clone(), TemplateOrigin::User));
        }
        if let Some(dir) = &self.templates_dir {
            dirs.push((dir.clone(), TemplateOrigin::Directory));
        }
        dirs
    }

    /// Load the template for a tag
    ///
    /// Checks in order:
    /// 1. User override: `.suratdesa/templates/{tag}.html`
    /// 2. Configured directory: `{templates-dir}/{tag}.html`
    /// 3. Embedded fallback
    pub fn load(&self, tag: &DocumentTypeTag) -> Result<Option<TemplateSource>, DocumentError> {
        debug!(%tag, "TemplateLoader::load: called");
        for (dir, origin) in self.directories() {
            let path = dir.join(format!("{}.html", tag.as_str()));
            if path.is_file() {
                debug!(?path, "TemplateLoader::load: found on disk");
                let markup = std::fs::read_to_string(&path)?;
                return Ok(Some(TemplateSource {
                    tag: tag.clone(),
                    markup,
                    origin: origin(path),
                }));
            }
            debug!(?path, "TemplateLoader::load: not found");
        }

        debug!("TemplateLoader::load: trying embedded fallback");
        if let Some(markup) = embedded::get_embedded(tag.as_str()) {
            debug!(%tag, "TemplateLoader::load: found in embedded");
            return Ok(Some(TemplateSource {
                tag: tag.clone(),
                markup: markup.to_string(),
                origin: TemplateOrigin::Embedded,
            }));
        }

        debug!(%tag, "TemplateLoader::load: not found anywhere");
        Ok(None)
    }

    /// Every template reachable through the chain, one per tag, first hit wins
    pub fn sources(&self) -> Result<Vec<TemplateSource>, DocumentError> {
        debug!("TemplateLoader::sources: called");
        let mut found: BTreeMap<String, TemplateSource> = BTreeMap::new();

        for (dir, origin) in self.directories() {
            let pattern = format!("{}/*.html", dir.display());
            let paths = glob::glob(&pattern).map_err(|e| DocumentError::Io(std::io::Error::other(e)))?;
            for entry in paths {
                let path = entry.map_err(|e| e.into_error())?;
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if found.contains_key(stem) {
                    debug!(?path, "TemplateLoader::sources: shadowed by earlier directory");
                    continue;
                }
                let markup = std::fs::read_to_string(&path)?;
                found.insert(
                    stem.to_string(),
                    TemplateSource {
                        tag: DocumentTypeTag::parse(stem),
                        markup,
                        origin: origin(path.clone()),
                    },
                );
            }
        }

        for kind in embedded::EMBEDDED_KINDS {
            if !found.contains_key(kind.tag())
                && let Some(markup) = embedded::get_embedded(kind.tag())
            {
                found.insert(
                    kind.tag().to_string(),
                    TemplateSource {
                        tag: DocumentTypeTag::Known(kind),
                        markup: markup.to_string(),
                        origin: TemplateOrigin::Embedded,
                    },
                );
            }
        }

        info!(count = found.len(), "Resolved templates through loader chain");
        Ok(found.into_values().collect())
    }
}

impl TemplateStore for TemplateLoader {
    fn default_for(&self, tag: &DocumentTypeTag) -> Result<Option<Template>, DocumentError> {
        Ok(self.load(tag)?.map(TemplateSource::into_template))
    }

    fn list(&self) -> Result<Vec<Template>, DocumentError> {
        Ok(self
            .sources()?
            .into_iter()
            .map(TemplateSource::into_template)
            .collect())
    }
}
