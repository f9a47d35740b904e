//! Print materialization
//!
//! Final markup is printed through a fresh surface per job: stylesheet in,
//! body in, a short settle delay, the print command, then the surface is
//! closed whatever happened.

mod layout;
mod materializer;
mod spool;
mod surface;

pub use layout::{DEFAULT_MARGIN, DEFAULT_PAGE_SIZE, DEFAULT_SETTLE_DELAY, PrintLayout};
pub use materializer::PrintMaterializer;
pub use spool::{SpoolOpener, SpoolSurface, standalone_document};
pub use surface::{PrintSurface, SurfaceGuard, SurfaceOpener};
