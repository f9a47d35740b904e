//! Print surfaces and the guard that closes them

use async_trait::async_trait;
use tracing::debug;

use crate::error::DocumentError;

/// A fresh rendering context a single letter is printed from
#[async_trait]
pub trait PrintSurface: Send {
    /// Add the print stylesheet to the document head
    async fn inject_stylesheet(&mut self, css: &str) -> Result<(), DocumentError>;

    /// Write the final markup into the document body, verbatim
    async fn write_body(&mut self, markup: &str) -> Result<(), DocumentError>;

    /// Issue the print command
    async fn print(&mut self) -> Result<(), DocumentError>;

    /// Release the surface. Called exactly once, including on cancellation.
    fn close(&mut self);
}

/// Creates print surfaces. An error means the environment refused one.
pub trait SurfaceOpener: Send + Sync {
    type Surface: PrintSurface;

    fn open(&self) -> Result<Self::Surface, DocumentError>;
}

/// Owns an open surface and closes it when dropped
pub struct SurfaceGuard<S: PrintSurface> {
    surface: Option<S>,
}

impl<S: PrintSurface> SurfaceGuard<S> {
    pub fn new(surface: S) -> Self {
        Self { surface: Some(surface) }
    }

    pub fn surface(&mut self) -> Result<&mut S, DocumentError> {
        self.surface.as_mut().ok_or_else(|| DocumentError::PrintFailed {
            message: "print surface already closed".to_string(),
        })
    }

    /// Close now rather than at drop
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            debug!("SurfaceGuard::release: closing print surface");
            surface.close();
        }
    }
}

impl<S: PrintSurface> Drop for SurfaceGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
