//! Common context shared by every letter type

use chrono::Datelike;
use tracing::debug;

use crate::clock::Clock;
use crate::domain::{SettingsSnapshot, VariableDictionary};
use crate::locale;

/// Where a common value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonSource {
    /// Settings key of the same name, with a fallback when absent
    Setting { default: &'static str },
    /// Today's date in long form
    LetterDate,
    /// Today's four-digit year
    LetterYear,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonField {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub source: CommonSource,
}

pub const COMMON_FIELDS: [CommonField; 10] = [
    CommonField {
        key: "namaDesa",
        label: "Nama Desa",
        description: "Nama desa penerbit surat",
        source: CommonSource::Setting { default: "Desa" },
    },
    CommonField {
        key: "alamatDesa",
        label: "Alamat Kantor Desa",
        description: "Alamat kantor desa untuk kop surat",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "kecamatan",
        label: "Kecamatan",
        description: "Kecamatan tempat desa berada",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "kabupaten",
        label: "Kabupaten",
        description: "Kabupaten/kota tempat desa berada",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "provinsi",
        label: "Provinsi",
        description: "Provinsi tempat desa berada",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "tanggalSurat",
        label: "Tanggal Surat",
        description: "Tanggal pembuatan surat, mis. 17 Agustus 2025",
        source: CommonSource::LetterDate,
    },
    CommonField {
        key: "tahunSurat",
        label: "Tahun Surat",
        description: "Tahun pembuatan surat (4 digit)",
        source: CommonSource::LetterYear,
    },
    CommonField {
        key: "namaKepala",
        label: "Nama Kepala Desa",
        description: "Nama pejabat penandatangan surat",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "nipKepala",
        label: "NIP Kepala Desa",
        description: "NIP pejabat penandatangan surat",
        source: CommonSource::Setting { default: "" },
    },
    CommonField {
        key: "jabatanKepala",
        label: "Jabatan Penandatangan",
        description: "Jabatan pejabat penandatangan surat",
        source: CommonSource::Setting { default: "Kepala Desa" },
    },
];

/// Build the base dictionary every letter starts from. Never fails: absent
/// settings fall back to their defaults.
pub fn build_common(settings: Option<&SettingsSnapshot>, clock: &dyn Clock) -> VariableDictionary {
    debug!(has_settings = settings.is_some(), "build_common: called");
    let today = clock.today();

    let mut dict = VariableDictionary::new();
    for field in &COMMON_FIELDS {
        match field.source {
            CommonSource::Setting { default } => {
                let value = settings.and_then(|s| s.get(field.key)).unwrap_or(default);
                dict.insert(field.key, value);
            }
            CommonSource::LetterDate => dict.insert(field.key, locale::long_date(today)),
            CommonSource::LetterYear => dict.insert(field.key, format!("{:04}", today.year())),
        }
    }
    dict
}
