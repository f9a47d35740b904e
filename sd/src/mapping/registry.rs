//! Variable registry: the documented catalog of every key a template may use
//!
//! Person namespaces are generated from [`PersonField::ALL`] and the common
//! block from [`COMMON_FIELDS`], the same tables the mappers read. The
//! per-family field lists below are checked against the dispatcher by the
//! `sd check` command and by the registry agreement tests.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::COMMON_FIELDS;
use crate::domain::{DocumentKind, DocumentTypeTag, PersonField};

/// Grouping shown in the template authoring UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    /// Village identity and letter date
    Identity,
    /// The applicant (`pemohon.*`)
    Applicant,
    /// Everything specific to the letter family
    Document,
}

impl VariableCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Some(Self::Identity),
            "applicant" => Some(Self::Applicant),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

impl fmt::Display for VariableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Applicant => "applicant",
            Self::Document => "document",
        };
        f.write_str(s)
    }
}

/// One documented template variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub name: String,
    pub label: String,
    pub category: VariableCategory,
    pub description: String,
}

impl VariableDefinition {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        category: VariableCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            category,
            description: description.into(),
        }
    }

    /// The token an author inserts, e.g. `{{pemohon.nik}}`
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.name)
    }

    /// Insert this variable's token into markup at a byte offset.
    ///
    /// Offsets past the end append; offsets inside a multi-byte character
    /// move back to the previous character boundary.
    pub fn insert_into(&self, markup: &str, at: usize) -> String {
        let mut at = at.min(markup.len());
        while !markup.is_char_boundary(at) {
            at -= 1;
        }

        let token = self.token();
        let mut out = String::with_capacity(markup.len() + token.len());
        out.push_str(&markup[..at]);
        out.push_str(&token);
        out.push_str(&markup[at..]);
        out
    }
}

/// A person embedded in a letter family, under a fixed namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonSlot {
    pub prefix: &'static str,
    pub label: &'static str,
}

/// A family-specific scalar key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDoc {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn slot(prefix: &'static str, label: &'static str) -> PersonSlot {
    PersonSlot { prefix, label }
}

const fn field(name: &'static str, label: &'static str, description: &'static str) -> FieldDoc {
    FieldDoc {
        name,
        label,
        description,
    }
}

pub const PEMOHON: PersonSlot = slot("pemohon", "Pemohon");
const PASANGAN: PersonSlot = slot("pasangan", "Pasangan");
const AYAH: PersonSlot = slot("ayah", "Ayah");
const IBU: PersonSlot = slot("ibu", "Ibu");
const BAYI: PersonSlot = slot("bayi", "Bayi");
const PELAPOR: PersonSlot = slot("pelapor", "Pelapor");
const SAKSI1: PersonSlot = slot("saksi1", "Saksi 1");
const SAKSI2: PersonSlot = slot("saksi2", "Saksi 2");
const YANG_MENINGGAL: PersonSlot = slot("yangMeninggal", "Yang Meninggal");
const PEWARIS: PersonSlot = slot("pewaris", "Pewaris");

const NOMOR_SURAT: FieldDoc = field("nomorSurat", "Nomor Surat", "Nomor registrasi surat");
const KEPERLUAN: FieldDoc = field("keperluan", "Keperluan", "Keperluan pembuatan surat");

/// What a letter family contributes beyond the common and applicant blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSpec {
    pub kind: DocumentKind,
    /// Whether a typed mapper exists; untyped families use the scalar fallback
    pub typed: bool,
    pub persons: Vec<PersonSlot>,
    pub fields: Vec<FieldDoc>,
}

/// Documented persons and fields for a letter family
pub fn document_spec(kind: DocumentKind) -> DocumentSpec {
    let (persons, fields): (Vec<PersonSlot>, Vec<FieldDoc>) = match kind {
        DocumentKind::PengantarSkck => (
            vec![],
            vec![field("tujuanPembuatan", "Tujuan Pembuatan", "Tujuan pembuatan SKCK")],
        ),
        DocumentKind::KeteranganDomisili => (
            vec![],
            vec![
                field("alamatDomisili", "Alamat Domisili", "Alamat tempat tinggal saat ini"),
                field("jumlahTahunDomisili", "Lama Domisili", "Lama tinggal dalam tahun"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganUsaha => (
            vec![],
            vec![
                field("namaUsaha", "Nama Usaha", "Nama usaha pemohon"),
                field("jenisUsaha", "Jenis Usaha", "Bidang atau jenis usaha"),
                field("alamatUsaha", "Alamat Usaha", "Lokasi tempat usaha"),
                field("mulaiUsaha", "Mulai Usaha", "Tanggal usaha mulai berjalan"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganTidakMampu => (
            vec![],
            vec![
                field("penghasilanPerBulan", "Penghasilan per Bulan", "Penghasilan bulanan dalam rupiah"),
                field("jumlahTanggungan", "Jumlah Tanggungan", "Jumlah anggota keluarga yang ditanggung"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganPenghasilan => (
            vec![],
            vec![
                field("penghasilanPerBulan", "Penghasilan per Bulan", "Penghasilan bulanan dalam rupiah"),
                field("sumberPenghasilan", "Sumber Penghasilan", "Asal penghasilan"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganKelahiran => (
            vec![BAYI, AYAH, IBU, PELAPOR],
            vec![
                field("waktuKelahiran", "Waktu Kelahiran", "Hari, tanggal dan jam kelahiran"),
                field("tempatKelahiran", "Tempat Kelahiran", "Tempat bayi dilahirkan"),
                field("anakKe", "Anak Ke", "Urutan kelahiran"),
                field("beratBayi", "Berat Bayi", "Berat lahir dalam gram"),
                field("panjangBayi", "Panjang Bayi", "Panjang lahir dalam sentimeter"),
                field("hubunganPelapor", "Hubungan Pelapor", "Hubungan pelapor dengan bayi"),
            ],
        ),
        DocumentKind::KeteranganKematian => (
            vec![YANG_MENINGGAL, PELAPOR],
            vec![
                field("waktuKematian", "Waktu Kematian", "Hari, tanggal dan jam kematian"),
                field("tanggalKematian", "Tanggal Kematian", "Tanggal kematian saja"),
                field("tempatKematian", "Tempat Kematian", "Tempat meninggal"),
                field("penyebabKematian", "Penyebab Kematian", "Sebab kematian"),
                field("hubunganPelapor", "Hubungan Pelapor", "Hubungan pelapor dengan almarhum"),
            ],
        ),
        DocumentKind::KeteranganAhliWaris => (
            vec![PEWARIS, SAKSI1, SAKSI2],
            vec![
                field("tanggalWafatPewaris", "Tanggal Wafat Pewaris", "Tanggal pewaris meninggal"),
                field("jumlahAhliWaris", "Jumlah Ahli Waris", "Banyaknya ahli waris"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::PengantarNikah => (
            vec![PASANGAN, AYAH, IBU],
            vec![
                field("statusPemohon", "Status Pemohon", "Status perkawinan pemohon sebelum akad"),
                field("tanggalAkad", "Tanggal Akad", "Rencana tanggal akad nikah"),
                field("tempatAkad", "Tempat Akad", "Rencana tempat akad nikah"),
            ],
        ),
        DocumentKind::KeteranganPindah => (
            vec![],
            vec![
                field("alamatTujuan", "Alamat Tujuan", "Alamat tujuan pindah"),
                field("desaTujuan", "Desa Tujuan", "Desa/kelurahan tujuan"),
                field("kecamatanTujuan", "Kecamatan Tujuan", "Kecamatan tujuan"),
                field("kabupatenTujuan", "Kabupaten Tujuan", "Kabupaten/kota tujuan"),
                field("provinsiTujuan", "Provinsi Tujuan", "Provinsi tujuan"),
                field("alasanPindah", "Alasan Pindah", "Alasan kepindahan"),
                field("jumlahPengikut", "Jumlah Pengikut", "Anggota keluarga yang ikut pindah"),
                field("tanggalPindah", "Tanggal Pindah", "Tanggal rencana pindah"),
            ],
        ),
        DocumentKind::IzinKeramaian => (
            vec![],
            vec![
                field("namaAcara", "Nama Acara", "Nama kegiatan"),
                field("waktuAcara", "Waktu Acara", "Hari, tanggal dan jam acara"),
                field("tempatAcara", "Tempat Acara", "Lokasi acara"),
                field("jumlahUndangan", "Jumlah Undangan", "Perkiraan jumlah tamu"),
                field("jenisHiburan", "Jenis Hiburan", "Hiburan yang ditampilkan"),
            ],
        ),
        DocumentKind::KeteranganKepemilikanTanah => (
            vec![SAKSI1, SAKSI2],
            vec![
                field("luasTanah", "Luas Tanah", "Luas tanah dalam meter persegi"),
                field("lokasiTanah", "Lokasi Tanah", "Letak bidang tanah"),
                field("nomorPersil", "Nomor Persil", "Nomor persil/kohir"),
                field("asalUsulTanah", "Asal Usul Tanah", "Riwayat perolehan tanah"),
                field("batasUtara", "Batas Utara", "Batas sebelah utara"),
                field("batasTimur", "Batas Timur", "Batas sebelah timur"),
                field("batasSelatan", "Batas Selatan", "Batas sebelah selatan"),
                field("batasBarat", "Batas Barat", "Batas sebelah barat"),
            ],
        ),
        DocumentKind::KeteranganBelumMenikah => (vec![], vec![KEPERLUAN]),
        DocumentKind::KeteranganJandaDuda => (
            vec![PASANGAN],
            vec![
                field("statusJandaDuda", "Status", "Janda atau duda"),
                field("sebabStatus", "Sebab", "Cerai hidup atau cerai mati"),
                field("tanggalKejadian", "Tanggal Kejadian", "Tanggal perceraian atau wafatnya pasangan"),
            ],
        ),
        DocumentKind::KeteranganBedaNama => (
            vec![],
            vec![
                field("namaDokumenPertama", "Nama pada Dokumen Pertama", "Nama sebagaimana tertulis"),
                field("dokumenPertama", "Dokumen Pertama", "Jenis dokumen pertama"),
                field("namaDokumenKedua", "Nama pada Dokumen Kedua", "Nama sebagaimana tertulis"),
                field("dokumenKedua", "Dokumen Kedua", "Jenis dokumen kedua"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganKehilangan => (
            vec![],
            vec![
                field("barangHilang", "Barang Hilang", "Barang atau dokumen yang hilang"),
                field("tempatKehilangan", "Tempat Kehilangan", "Perkiraan lokasi hilang"),
                field("tanggalKehilangan", "Tanggal Kehilangan", "Tanggal kejadian"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganOrangTua => (vec![AYAH, IBU], vec![KEPERLUAN]),
        DocumentKind::KeteranganPenduduk => (vec![], vec![KEPERLUAN]),
        DocumentKind::Rekomendasi => (
            vec![],
            vec![
                field("perihal", "Perihal", "Hal yang direkomendasikan"),
                field("instansiTujuan", "Instansi Tujuan", "Instansi penerima rekomendasi"),
                KEPERLUAN,
            ],
        ),
        DocumentKind::KeteranganUmum => {
            return DocumentSpec {
                kind,
                typed: false,
                persons: vec![],
                fields: vec![],
            };
        }
    };

    let mut all_fields = Vec::with_capacity(fields.len() + 1);
    all_fields.push(NOMOR_SURAT);
    all_fields.extend(fields);

    DocumentSpec {
        kind,
        typed: true,
        persons,
        fields: all_fields,
    }
}

/// The village identity block every letter carries
pub fn common_definitions() -> Vec<VariableDefinition> {
    COMMON_FIELDS
        .iter()
        .map(|f| VariableDefinition::new(f.key, f.label, VariableCategory::Identity, f.description))
        .collect()
}

/// The 18 keys of one person namespace
pub fn person_definitions(slot: PersonSlot) -> Vec<VariableDefinition> {
    let category = if slot == PEMOHON {
        VariableCategory::Applicant
    } else {
        VariableCategory::Document
    };

    PersonField::ALL
        .iter()
        .map(|f| {
            VariableDefinition::new(
                format!("{}.{}", slot.prefix, f.key()),
                format!("{} {}", f.label(), slot.label),
                category,
                format!("{} dari {}", f.label(), slot.label.to_lowercase()),
            )
        })
        .collect()
}

/// Every variable available to a template for `tag`.
///
/// Untyped tags only document the common and applicant blocks: the rest
/// depends on whichever scalar fields the record carries.
pub fn definitions_for(tag: &DocumentTypeTag) -> Vec<VariableDefinition> {
    debug!(%tag, "definitions_for: called");
    let mut defs = common_definitions();
    defs.extend(person_definitions(PEMOHON));

    let Some(kind) = tag.kind() else {
        debug!(%tag, "definitions_for: untyped tag");
        return defs;
    };

    let spec = document_spec(kind);
    for slot in &spec.persons {
        defs.extend(person_definitions(*slot));
    }
    defs.extend(
        spec.fields
            .iter()
            .map(|f| VariableDefinition::new(f.name, f.label, VariableCategory::Document, f.description)),
    );
    defs
}

/// Every known family with its documented variables
pub fn catalog() -> Vec<DocumentSpec> {
    DocumentKind::ALL.into_iter().map(document_spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn def(name: &str) -> VariableDefinition {
        VariableDefinition::new(name, name, VariableCategory::Document, "")
    }

    #[test]
    fn test_token() {
        assert_eq!(def("pemohon.nik").token(), "{{pemohon.nik}}");
    }

    #[test]
    fn test_insert_into() {
        let d = def("namaDesa");
        assert_eq!(d.insert_into("Desa  ini", 5), "Desa {{namaDesa}} ini");
        assert_eq!(d.insert_into("akhir", 99), "akhir{{namaDesa}}");
        assert_eq!(d.insert_into("", 0), "{{namaDesa}}");
    }

    #[test]
    fn test_insert_into_respects_char_boundaries() {
        let d = def("x");
        // 'é' is two bytes; offset 2 lands inside it
        assert_eq!(d.insert_into("aé", 2), "a{{x}}é");
    }

    #[test]
    fn test_definitions_are_unique_per_tag() {
        for kind in DocumentKind::ALL {
            let defs = definitions_for(&DocumentTypeTag::Known(kind));
            let names: HashSet<_> = defs.iter().map(|d| d.name.as_str()).collect();
            assert_eq!(names.len(), defs.len(), "duplicate definition for {}", kind);
        }
    }

    #[test]
    fn test_categories() {
        let defs = definitions_for(&DocumentTypeTag::Known(DocumentKind::PengantarNikah));
        let category = |name: &str| defs.iter().find(|d| d.name == name).map(|d| d.category);

        assert_eq!(category("namaDesa"), Some(VariableCategory::Identity));
        assert_eq!(category("pemohon.namaLengkap"), Some(VariableCategory::Applicant));
        assert_eq!(category("pasangan.namaLengkap"), Some(VariableCategory::Document));
        assert_eq!(category("tanggalAkad"), Some(VariableCategory::Document));
        assert_eq!(category("nomorSurat"), Some(VariableCategory::Document));
    }

    #[test]
    fn test_untyped_tag_has_common_and_applicant_only() {
        let defs = definitions_for(&DocumentTypeTag::parse("surat-lain"));
        assert_eq!(defs.len(), COMMON_FIELDS.len() + PersonField::ALL.len());
        assert!(!document_spec(DocumentKind::KeteranganUmum).typed);
    }

    #[test]
    fn test_catalog_covers_every_kind() {
        assert_eq!(catalog().len(), DocumentKind::ALL.len());
    }

    #[test]
    fn test_category_parse_and_serde() {
        assert_eq!(VariableCategory::parse("Applicant"), Some(VariableCategory::Applicant));
        assert_eq!(VariableCategory::parse("other"), None);
        assert_eq!(serde_json::to_string(&VariableCategory::Identity).unwrap(), "\"identity\"");
    }
}
