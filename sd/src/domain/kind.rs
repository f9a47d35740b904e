//! Document type tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of letter families the office issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    PengantarSkck,
    KeteranganDomisili,
    KeteranganUsaha,
    KeteranganTidakMampu,
    KeteranganPenghasilan,
    KeteranganKelahiran,
    KeteranganKematian,
    KeteranganAhliWaris,
    PengantarNikah,
    KeteranganPindah,
    IzinKeramaian,
    KeteranganKepemilikanTanah,
    KeteranganBelumMenikah,
    KeteranganJandaDuda,
    KeteranganBedaNama,
    KeteranganKehilangan,
    KeteranganOrangTua,
    KeteranganPenduduk,
    Rekomendasi,
    KeteranganUmum,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 20] = [
        Self::PengantarSkck,
        Self::KeteranganDomisili,
        Self::KeteranganUsaha,
        Self::KeteranganTidakMampu,
        Self::KeteranganPenghasilan,
        Self::KeteranganKelahiran,
        Self::KeteranganKematian,
        Self::KeteranganAhliWaris,
        Self::PengantarNikah,
        Self::KeteranganPindah,
        Self::IzinKeramaian,
        Self::KeteranganKepemilikanTanah,
        Self::KeteranganBelumMenikah,
        Self::KeteranganJandaDuda,
        Self::KeteranganBedaNama,
        Self::KeteranganKehilangan,
        Self::KeteranganOrangTua,
        Self::KeteranganPenduduk,
        Self::Rekomendasi,
        Self::KeteranganUmum,
    ];

    /// Wire tag, e.g. `surat-pengantar-skck`
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PengantarSkck => "surat-pengantar-skck",
            Self::KeteranganDomisili => "surat-keterangan-domisili",
            Self::KeteranganUsaha => "surat-keterangan-usaha",
            Self::KeteranganTidakMampu => "surat-keterangan-tidak-mampu",
            Self::KeteranganPenghasilan => "surat-keterangan-penghasilan",
            Self::KeteranganKelahiran => "surat-keterangan-kelahiran",
            Self::KeteranganKematian => "surat-keterangan-kematian",
            Self::KeteranganAhliWaris => "surat-keterangan-ahli-waris",
            Self::PengantarNikah => "surat-pengantar-nikah",
            Self::KeteranganPindah => "surat-keterangan-pindah",
            Self::IzinKeramaian => "surat-izin-keramaian",
            Self::KeteranganKepemilikanTanah => "surat-keterangan-kepemilikan-tanah",
            Self::KeteranganBelumMenikah => "surat-keterangan-belum-menikah",
            Self::KeteranganJandaDuda => "surat-keterangan-janda-duda",
            Self::KeteranganBedaNama => "surat-keterangan-beda-nama",
            Self::KeteranganKehilangan => "surat-keterangan-kehilangan",
            Self::KeteranganOrangTua => "surat-keterangan-orang-tua",
            Self::KeteranganPenduduk => "surat-keterangan-penduduk",
            Self::Rekomendasi => "surat-rekomendasi",
            Self::KeteranganUmum => "surat-keterangan-umum",
        }
    }

    /// Letter title as printed on the document
    pub fn title(&self) -> &'static str {
        match self {
            Self::PengantarSkck => "Surat Pengantar SKCK",
            Self::KeteranganDomisili => "Surat Keterangan Domisili",
            Self::KeteranganUsaha => "Surat Keterangan Usaha",
            Self::KeteranganTidakMampu => "Surat Keterangan Tidak Mampu",
            Self::KeteranganPenghasilan => "Surat Keterangan Penghasilan",
            Self::KeteranganKelahiran => "Surat Keterangan Kelahiran",
            Self::KeteranganKematian => "Surat Keterangan Kematian",
            Self::KeteranganAhliWaris => "Surat Keterangan Ahli Waris",
            Self::PengantarNikah => "Surat Pengantar Nikah",
            Self::KeteranganPindah => "Surat Keterangan Pindah",
            Self::IzinKeramaian => "Surat Izin Keramaian",
            Self::KeteranganKepemilikanTanah => "Surat Keterangan Kepemilikan Tanah",
            Self::KeteranganBelumMenikah => "Surat Keterangan Belum Menikah",
            Self::KeteranganJandaDuda => "Surat Keterangan Janda/Duda",
            Self::KeteranganBedaNama => "Surat Keterangan Beda Nama",
            Self::KeteranganKehilangan => "Surat Keterangan Kehilangan",
            Self::KeteranganOrangTua => "Surat Keterangan Orang Tua",
            Self::KeteranganPenduduk => "Surat Keterangan Penduduk",
            Self::Rekomendasi => "Surat Rekomendasi",
            Self::KeteranganUmum => "Surat Keterangan Umum",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A document type tag as received from callers.
///
/// Parsing never fails: tags outside the known set are kept as `Other` and
/// take the generic mapping path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentTypeTag {
    Known(DocumentKind),
    Other(String),
}

impl DocumentTypeTag {
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        match DocumentKind::from_tag(tag) {
            Some(kind) => Self::Known(kind),
            None => Self::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.tag(),
            Self::Other(tag) => tag,
        }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Other(_) => None,
        }
    }
}

impl From<DocumentKind> for DocumentTypeTag {
    fn from(kind: DocumentKind) -> Self {
        Self::Known(kind)
    }
}

impl From<&str> for DocumentTypeTag {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for DocumentTypeTag {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<DocumentTypeTag> for String {
    fn from(tag: DocumentTypeTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for DocumentTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
