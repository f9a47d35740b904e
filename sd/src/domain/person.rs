//! Person references embedded in letter records

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::de::lenient_string;
use crate::locale;

/// A resident as referenced from a letter (applicant, parent, witness, ...)
///
/// Every field is optional: the records layer resolves references but does
/// not guarantee that the civil registry data is complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonReference {
    #[serde(deserialize_with = "lenient_string")]
    pub nik: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nama_lengkap: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_lahir: Option<String>,
    /// Stored as written by the records layer; formatted on flattening
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_lahir: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub jenis_kelamin: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub agama: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status_perkawinan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub pekerjaan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub pendidikan_terakhir: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alamat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub rt: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub rw: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub dusun: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub desa_kelurahan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kecamatan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kabupaten_kota: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub provinsi: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kode_pos: Option<String>,
}

/// The fields a person contributes to a namespace, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Nik,
    NamaLengkap,
    TempatLahir,
    TanggalLahir,
    JenisKelamin,
    Agama,
    StatusPerkawinan,
    Pekerjaan,
    PendidikanTerakhir,
    Alamat,
    Rt,
    Rw,
    Dusun,
    DesaKelurahan,
    Kecamatan,
    KabupatenKota,
    Provinsi,
    KodePos,
}

impl PersonField {
    pub const ALL: [PersonField; 18] = [
        Self::Nik,
        Self::NamaLengkap,
        Self::TempatLahir,
        Self::TanggalLahir,
        Self::JenisKelamin,
        Self::Agama,
        Self::StatusPerkawinan,
        Self::Pekerjaan,
        Self::PendidikanTerakhir,
        Self::Alamat,
        Self::Rt,
        Self::Rw,
        Self::Dusun,
        Self::DesaKelurahan,
        Self::Kecamatan,
        Self::KabupatenKota,
        Self::Provinsi,
        Self::KodePos,
    ];

    /// Key suffix inside a namespace, e.g. `namaLengkap`
    pub fn key(&self) -> &'static str {
        match self {
            Self::Nik => "nik",
            Self::NamaLengkap => "namaLengkap",
            Self::TempatLahir => "tempatLahir",
            Self::TanggalLahir => "tanggalLahir",
            Self::JenisKelamin => "jenisKelamin",
            Self::Agama => "agama",
            Self::StatusPerkawinan => "statusPerkawinan",
            Self::Pekerjaan => "pekerjaan",
            Self::PendidikanTerakhir => "pendidikanTerakhir",
            Self::Alamat => "alamat",
            Self::Rt => "rt",
            Self::Rw => "rw",
            Self::Dusun => "dusun",
            Self::DesaKelurahan => "desaKelurahan",
            Self::Kecamatan => "kecamatan",
            Self::KabupatenKota => "kabupatenKota",
            Self::Provinsi => "provinsi",
            Self::KodePos => "kodePos",
        }
    }

    /// Label shown in the authoring UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nik => "NIK",
            Self::NamaLengkap => "Nama Lengkap",
            Self::TempatLahir => "Tempat Lahir",
            Self::TanggalLahir => "Tanggal Lahir",
            Self::JenisKelamin => "Jenis Kelamin",
            Self::Agama => "Agama",
            Self::StatusPerkawinan => "Status Perkawinan",
            Self::Pekerjaan => "Pekerjaan",
            Self::PendidikanTerakhir => "Pendidikan Terakhir",
            Self::Alamat => "Alamat",
            Self::Rt => "RT",
            Self::Rw => "RW",
            Self::Dusun => "Dusun",
            Self::DesaKelurahan => "Desa/Kelurahan",
            Self::Kecamatan => "Kecamatan",
            Self::KabupatenKota => "Kabupaten/Kota",
            Self::Provinsi => "Provinsi",
            Self::KodePos => "Kode Pos",
        }
    }
}

impl PersonReference {
    /// Raw stored value of a field
    pub fn value(&self, field: PersonField) -> Option<&str> {
        let value = match field {
            PersonField::Nik => &self.nik,
            PersonField::NamaLengkap => &self.nama_lengkap,
            PersonField::TempatLahir => &self.tempat_lahir,
            PersonField::TanggalLahir => &self.tanggal_lahir,
            PersonField::JenisKelamin => &self.jenis_kelamin,
            PersonField::Agama => &self.agama,
            PersonField::StatusPerkawinan => &self.status_perkawinan,
            PersonField::Pekerjaan => &self.pekerjaan,
            PersonField::PendidikanTerakhir => &self.pendidikan_terakhir,
            PersonField::Alamat => &self.alamat,
            PersonField::Rt => &self.rt,
            PersonField::Rw => &self.rw,
            PersonField::Dusun => &self.dusun,
            PersonField::DesaKelurahan => &self.desa_kelurahan,
            PersonField::Kecamatan => &self.kecamatan,
            PersonField::KabupatenKota => &self.kabupaten_kota,
            PersonField::Provinsi => &self.provinsi,
            PersonField::KodePos => &self.kode_pos,
        };
        value.as_deref()
    }

    /// Display value of a field; missing data is an empty string
    pub fn display(&self, field: PersonField) -> String {
        match (field, self.value(field)) {
            (_, None) => String::new(),
            (PersonField::TanggalLahir, Some(raw)) => {
                debug!(%raw, "PersonReference::display: formatting birth date");
                locale::long_date_from_str(raw)
            }
            (_, Some(raw)) => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_field_keys_unique() {
        let mut keys: Vec<_> = PersonField::ALL.iter().map(|f| f.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), PersonField::ALL.len());
    }

    #[test]
    fn test_decode_lenient_person() {
        let person: PersonReference = serde_json::from_value(json!({
            "nik": 3201010101890001u64,
            "namaLengkap": "Budi Santoso",
            "tanggalLahir": "1989-01-28",
            "rt": 3,
            "agama": null,
            "extra": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(person.nik.as_deref(), Some("3201010101890001"));
        assert_eq!(person.rt.as_deref(), Some("3"));
        assert_eq!(person.agama, None);
        assert_eq!(person.display(PersonField::TanggalLahir), "28 Januari 1989");
        assert_eq!(person.display(PersonField::Agama), "");
    }

    #[test]
    fn test_display_passes_plain_fields_through() {
        let person = PersonReference {
            alamat: Some("Jl. Melati No. 4".to_string()),
            ..Default::default()
        };
        assert_eq!(person.display(PersonField::Alamat), "Jl. Melati No. 4");
    }
}
