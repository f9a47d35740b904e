//! Embedded templates
//!
//! These are compiled into the binary from the .html files at build time.

use tracing::debug;

use crate::domain::DocumentKind;

/// Surat pengantar SKCK
pub const PENGANTAR_SKCK: &str = include_str!("../../templates/surat-pengantar-skck.html");

/// Surat keterangan domisili
pub const KETERANGAN_DOMISILI: &str = include_str!("../../templates/surat-keterangan-domisili.html");

/// Surat keterangan usaha
pub const KETERANGAN_USAHA: &str = include_str!("../../templates/surat-keterangan-usaha.html");

/// Surat keterangan kematian
pub const KETERANGAN_KEMATIAN: &str = include_str!("../../templates/surat-keterangan-kematian.html");

/// Families with a template compiled in
pub const EMBEDDED_KINDS: [DocumentKind; 4] = [
    DocumentKind::PengantarSkck,
    DocumentKind::KeteranganDomisili,
    DocumentKind::KeteranganUsaha,
    DocumentKind::KeteranganKematian,
];

/// Get the embedded template for a tag
pub fn get_embedded(tag: &str) -> Option<&'static str> {
    debug!(%tag, "get_embedded: called");
    match DocumentKind::from_tag(tag) {
        Some(DocumentKind::PengantarSkck) => Some(PENGANTAR_SKCK),
        Some(DocumentKind::KeteranganDomisili) => Some(KETERANGAN_DOMISILI),
        Some(DocumentKind::KeteranganUsaha) => Some(KETERANGAN_USAHA),
        Some(DocumentKind::KeteranganKematian) => Some(KETERANGAN_KEMATIAN),
        _ => {
            debug!(%tag, "get_embedded: no match found");
            None
        }
    }
}
