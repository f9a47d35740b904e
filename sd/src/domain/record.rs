//! Letter records
//!
//! One struct per letter family with a typed mapper, plus [`GenericRecord`]
//! for families that only need their scalar fields copied through. Records
//! arrive as JSON from the records layer with every person reference already
//! resolved; nothing here performs lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::de::{lenient_amount, lenient_person, lenient_string};
use super::kind::{DocumentKind, DocumentTypeTag};
use super::person::PersonReference;
use super::value::{Amount, VariableValue};
use crate::error::DocumentError;

/// Wire names under which the applicant reference may arrive
pub const APPLICANT_KEYS: [&str; 2] = ["pemohonNIK", "pemohon"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PengantarSkck {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tujuan_pembuatan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganDomisili {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alamat_domisili: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub jumlah_tahun_domisili: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganUsaha {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nama_usaha: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub jenis_usaha: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alamat_usaha: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub mulai_usaha: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganTidakMampu {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub penghasilan_per_bulan: Option<Amount>,
    #[serde(deserialize_with = "lenient_amount")]
    pub jumlah_tanggungan: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganPenghasilan {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub penghasilan_per_bulan: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub sumber_penghasilan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganKelahiran {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub bayi: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ayah: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ibu: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub pelapor: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub waktu_kelahiran: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_kelahiran: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub anak_ke: Option<Amount>,
    /// Grams
    #[serde(deserialize_with = "lenient_amount")]
    pub berat_bayi: Option<Amount>,
    /// Centimetres
    #[serde(deserialize_with = "lenient_amount")]
    pub panjang_bayi: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub hubungan_pelapor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganKematian {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub yang_meninggal: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub pelapor: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub waktu_kematian: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_kematian: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub penyebab_kematian: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub hubungan_pelapor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganAhliWaris {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub pewaris: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub saksi1: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub saksi2: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_wafat_pewaris: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub jumlah_ahli_waris: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PengantarNikah {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub pasangan: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ayah: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ibu: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status_pemohon: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_akad: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_akad: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganPindah {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alamat_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub desa_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kecamatan_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub kabupaten_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub provinsi_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub alasan_pindah: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub jumlah_pengikut: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_pindah: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IzinKeramaian {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nama_acara: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub waktu_acara: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_acara: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub jumlah_undangan: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub jenis_hiburan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganKepemilikanTanah {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub saksi1: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub saksi2: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    /// Square metres
    #[serde(deserialize_with = "lenient_amount")]
    pub luas_tanah: Option<Amount>,
    #[serde(deserialize_with = "lenient_string")]
    pub lokasi_tanah: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_persil: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub asal_usul_tanah: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub batas_utara: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub batas_timur: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub batas_selatan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub batas_barat: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganBelumMenikah {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganJandaDuda {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub pasangan: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status_janda_duda: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub sebab_status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_kejadian: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganBedaNama {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nama_dokumen_pertama: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub dokumen_pertama: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nama_dokumen_kedua: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub dokumen_kedua: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganKehilangan {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub barang_hilang: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tempat_kehilangan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tanggal_kehilangan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganOrangTua {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ayah: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_person")]
    pub ibu: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeteranganPenduduk {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rekomendasi {
    #[serde(rename = "pemohonNIK", alias = "pemohon", deserialize_with = "lenient_person")]
    pub pemohon: Option<PersonReference>,
    #[serde(deserialize_with = "lenient_string")]
    pub nomor_surat: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub perihal: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub instansi_tujuan: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keperluan: Option<String>,
}

/// A record handled only through its top-level scalar fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericRecord {
    pub applicant: Option<PersonReference>,
    pub fields: Map<String, Value>,
}

impl GenericRecord {
    /// Build from a JSON object, picking out the applicant reference if present
    pub fn from_object(fields: Map<String, Value>) -> Result<Self, DocumentError> {
        debug!(field_count = fields.len(), "GenericRecord::from_object: called");
        let applicant = APPLICANT_KEYS
            .iter()
            .find_map(|key| fields.get(*key).filter(|v| v.is_object()))
            .map(|v| serde_json::from_value::<PersonReference>(v.clone()))
            .transpose()
            .map_err(|e| DocumentError::InvalidRecord(format!("applicant: {}", e)))?;

        Ok(Self { applicant, fields })
    }

    /// Build from scalar pairs, for callers that hold no JSON
    pub fn from_scalars<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            applicant: None,
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn with_applicant(mut self, applicant: PersonReference) -> Self {
        self.applicant = Some(applicant);
        self
    }

    /// Top-level string/number/boolean fields; objects, arrays and nulls skipped
    pub fn scalar_fields(&self) -> Vec<(String, VariableValue)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| VariableValue::from_json(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

/// A letter record of any family
#[derive(Debug, Clone, PartialEq)]
pub enum LetterRecord {
    PengantarSkck(PengantarSkck),
    KeteranganDomisili(KeteranganDomisili),
    KeteranganUsaha(KeteranganUsaha),
    KeteranganTidakMampu(KeteranganTidakMampu),
    KeteranganPenghasilan(KeteranganPenghasilan),
    KeteranganKelahiran(KeteranganKelahiran),
    KeteranganKematian(KeteranganKematian),
    KeteranganAhliWaris(KeteranganAhliWaris),
    PengantarNikah(PengantarNikah),
    KeteranganPindah(KeteranganPindah),
    IzinKeramaian(IzinKeramaian),
    KeteranganKepemilikanTanah(KeteranganKepemilikanTanah),
    KeteranganBelumMenikah(KeteranganBelumMenikah),
    KeteranganJandaDuda(KeteranganJandaDuda),
    KeteranganBedaNama(KeteranganBedaNama),
    KeteranganKehilangan(KeteranganKehilangan),
    KeteranganOrangTua(KeteranganOrangTua),
    KeteranganPenduduk(KeteranganPenduduk),
    Rekomendasi(Rekomendasi),
    Generic(GenericRecord),
}

fn decode<T: serde::de::DeserializeOwned>(tag: &DocumentTypeTag, value: Value) -> Result<T, DocumentError> {
    serde_json::from_value(value).map_err(|e| DocumentError::InvalidRecord(format!("{}: {}", tag, e)))
}

impl LetterRecord {
    /// Decode a record as the shape the tag calls for.
    ///
    /// Tags without a typed shape (unknown tags and `surat-keterangan-umum`)
    /// decode into [`GenericRecord`].
    pub fn from_json(tag: &DocumentTypeTag, value: Value) -> Result<Self, DocumentError> {
        debug!(%tag, "LetterRecord::from_json: called");
        if !value.is_object() {
            return Err(DocumentError::InvalidRecord(format!("{}: record must be a JSON object", tag)));
        }

        let kind = match tag {
            DocumentTypeTag::Known(kind) => *kind,
            DocumentTypeTag::Other(_) => {
                debug!(%tag, "LetterRecord::from_json: unknown tag, decoding generic record");
                return Self::generic(value);
            }
        };

        let record = match kind {
            DocumentKind::PengantarSkck => Self::PengantarSkck(decode(tag, value)?),
            DocumentKind::KeteranganDomisili => Self::KeteranganDomisili(decode(tag, value)?),
            DocumentKind::KeteranganUsaha => Self::KeteranganUsaha(decode(tag, value)?),
            DocumentKind::KeteranganTidakMampu => Self::KeteranganTidakMampu(decode(tag, value)?),
            DocumentKind::KeteranganPenghasilan => Self::KeteranganPenghasilan(decode(tag, value)?),
            DocumentKind::KeteranganKelahiran => Self::KeteranganKelahiran(decode(tag, value)?),
            DocumentKind::KeteranganKematian => Self::KeteranganKematian(decode(tag, value)?),
            DocumentKind::KeteranganAhliWaris => Self::KeteranganAhliWaris(decode(tag, value)?),
            DocumentKind::PengantarNikah => Self::PengantarNikah(decode(tag, value)?),
            DocumentKind::KeteranganPindah => Self::KeteranganPindah(decode(tag, value)?),
            DocumentKind::IzinKeramaian => Self::IzinKeramaian(decode(tag, value)?),
            DocumentKind::KeteranganKepemilikanTanah => Self::KeteranganKepemilikanTanah(decode(tag, value)?),
            DocumentKind::KeteranganBelumMenikah => Self::KeteranganBelumMenikah(decode(tag, value)?),
            DocumentKind::KeteranganJandaDuda => Self::KeteranganJandaDuda(decode(tag, value)?),
            DocumentKind::KeteranganBedaNama => Self::KeteranganBedaNama(decode(tag, value)?),
            DocumentKind::KeteranganKehilangan => Self::KeteranganKehilangan(decode(tag, value)?),
            DocumentKind::KeteranganOrangTua => Self::KeteranganOrangTua(decode(tag, value)?),
            DocumentKind::KeteranganPenduduk => Self::KeteranganPenduduk(decode(tag, value)?),
            DocumentKind::Rekomendasi => Self::Rekomendasi(decode(tag, value)?),
            DocumentKind::KeteranganUmum => return Self::generic(value),
        };
        Ok(record)
    }

    fn generic(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(fields) => Ok(Self::Generic(GenericRecord::from_object(fields)?)),
            _ => Err(DocumentError::InvalidRecord("record must be a JSON object".to_string())),
        }
    }

    /// The letter family this record was decoded as, if typed
    pub fn kind(&self) -> Option<DocumentKind> {
        let kind = match self {
            Self::PengantarSkck(_) => DocumentKind::PengantarSkck,
            Self::KeteranganDomisili(_) => DocumentKind::KeteranganDomisili,
            Self::KeteranganUsaha(_) => DocumentKind::KeteranganUsaha,
            Self::KeteranganTidakMampu(_) => DocumentKind::KeteranganTidakMampu,
            Self::KeteranganPenghasilan(_) => DocumentKind::KeteranganPenghasilan,
            Self::KeteranganKelahiran(_) => DocumentKind::KeteranganKelahiran,
            Self::KeteranganKematian(_) => DocumentKind::KeteranganKematian,
            Self::KeteranganAhliWaris(_) => DocumentKind::KeteranganAhliWaris,
            Self::PengantarNikah(_) => DocumentKind::PengantarNikah,
            Self::KeteranganPindah(_) => DocumentKind::KeteranganPindah,
            Self::IzinKeramaian(_) => DocumentKind::IzinKeramaian,
            Self::KeteranganKepemilikanTanah(_) => DocumentKind::KeteranganKepemilikanTanah,
            Self::KeteranganBelumMenikah(_) => DocumentKind::KeteranganBelumMenikah,
            Self::KeteranganJandaDuda(_) => DocumentKind::KeteranganJandaDuda,
            Self::KeteranganBedaNama(_) => DocumentKind::KeteranganBedaNama,
            Self::KeteranganKehilangan(_) => DocumentKind::KeteranganKehilangan,
            Self::KeteranganOrangTua(_) => DocumentKind::KeteranganOrangTua,
            Self::KeteranganPenduduk(_) => DocumentKind::KeteranganPenduduk,
            Self::Rekomendasi(_) => DocumentKind::Rekomendasi,
            Self::Generic(_) => return None,
        };
        Some(kind)
    }

    /// The applicant (`pemohon`) reference, if the record carries one
    pub fn applicant(&self) -> Option<&PersonReference> {
        match self {
            Self::PengantarSkck(r) => r.pemohon.as_ref(),
            Self::KeteranganDomisili(r) => r.pemohon.as_ref(),
            Self::KeteranganUsaha(r) => r.pemohon.as_ref(),
            Self::KeteranganTidakMampu(r) => r.pemohon.as_ref(),
            Self::KeteranganPenghasilan(r) => r.pemohon.as_ref(),
            Self::KeteranganKelahiran(r) => r.pemohon.as_ref(),
            Self::KeteranganKematian(r) => r.pemohon.as_ref(),
            Self::KeteranganAhliWaris(r) => r.pemohon.as_ref(),
            Self::PengantarNikah(r) => r.pemohon.as_ref(),
            Self::KeteranganPindah(r) => r.pemohon.as_ref(),
            Self::IzinKeramaian(r) => r.pemohon.as_ref(),
            Self::KeteranganKepemilikanTanah(r) => r.pemohon.as_ref(),
            Self::KeteranganBelumMenikah(r) => r.pemohon.as_ref(),
            Self::KeteranganJandaDuda(r) => r.pemohon.as_ref(),
            Self::KeteranganBedaNama(r) => r.pemohon.as_ref(),
            Self::KeteranganKehilangan(r) => r.pemohon.as_ref(),
            Self::KeteranganOrangTua(r) => r.pemohon.as_ref(),
            Self::KeteranganPenduduk(r) => r.pemohon.as_ref(),
            Self::Rekomendasi(r) => r.pemohon.as_ref(),
            Self::Generic(r) => r.applicant.as_ref(),
        }
    }

    /// Top-level scalar fields under their wire names.
    ///
    /// This is the capability the generic mapping path relies on: every
    /// string, number and boolean field is exposed, nested references and
    /// absent fields are not.
    pub fn scalar_fields(&self) -> Vec<(String, VariableValue)> {
        match self {
            Self::PengantarSkck(r) => scalars_of(r),
            Self::KeteranganDomisili(r) => scalars_of(r),
            Self::KeteranganUsaha(r) => scalars_of(r),
            Self::KeteranganTidakMampu(r) => scalars_of(r),
            Self::KeteranganPenghasilan(r) => scalars_of(r),
            Self::KeteranganKelahiran(r) => scalars_of(r),
            Self::KeteranganKematian(r) => scalars_of(r),
            Self::KeteranganAhliWaris(r) => scalars_of(r),
            Self::PengantarNikah(r) => scalars_of(r),
            Self::KeteranganPindah(r) => scalars_of(r),
            Self::IzinKeramaian(r) => scalars_of(r),
            Self::KeteranganKepemilikanTanah(r) => scalars_of(r),
            Self::KeteranganBelumMenikah(r) => scalars_of(r),
            Self::KeteranganJandaDuda(r) => scalars_of(r),
            Self::KeteranganBedaNama(r) => scalars_of(r),
            Self::KeteranganKehilangan(r) => scalars_of(r),
            Self::KeteranganOrangTua(r) => scalars_of(r),
            Self::KeteranganPenduduk(r) => scalars_of(r),
            Self::Rekomendasi(r) => scalars_of(r),
            Self::Generic(r) => r.scalar_fields(),
        }
    }
}

fn scalars_of<T: Serialize>(record: &T) -> Vec<(String, VariableValue)> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields
            .iter()
            .filter_map(|(key, value)| VariableValue::from_json(value).map(|v| (key.clone(), v)))
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "scalars_of: record did not serialize, no scalar fields exposed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_typed_record_with_applicant() {
        let tag = DocumentTypeTag::Known(DocumentKind::PengantarSkck);
        let record = LetterRecord::from_json(
            &tag,
            json!({
                "pemohonNIK": {"nik": "123", "namaLengkap": "Budi"},
                "tujuanPembuatan": "Melamar kerja"
            }),
        )
        .unwrap();

        let LetterRecord::PengantarSkck(ref skck) = record else {
            panic!("expected PengantarSkck, got {:?}", record);
        };
        assert_eq!(skck.tujuan_pembuatan.as_deref(), Some("Melamar kerja"));
        assert_eq!(record.applicant().and_then(|p| p.nama_lengkap.as_deref()), Some("Budi"));
        assert_eq!(record.kind(), Some(DocumentKind::PengantarSkck));
    }

    #[test]
    fn test_applicant_alias() {
        let tag = DocumentTypeTag::Known(DocumentKind::KeteranganPenduduk);
        let record = LetterRecord::from_json(&tag, json!({"pemohon": {"nik": "9"}})).unwrap();
        assert_eq!(record.applicant().and_then(|p| p.nik.as_deref()), Some("9"));
    }

    #[test]
    fn test_unknown_tag_decodes_generic() {
        let tag = DocumentTypeTag::parse("surat-keterangan-ternak");
        let record = LetterRecord::from_json(
            &tag,
            json!({
                "pemohonNIK": {"nik": "1"},
                "jumlahSapi": 4,
                "namaKandang": "Kandang A",
                "berizin": true,
                "lampiran": ["a", "b"],
                "catatan": null
            }),
        )
        .unwrap();

        assert_eq!(record.kind(), None);
        assert!(record.applicant().is_some());

        let scalars = record.scalar_fields();
        let mut names: Vec<_> = scalars.iter().map(|(k, _)| k.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["berizin", "jumlahSapi", "namaKandang"]);
    }

    #[test]
    fn test_umum_tag_decodes_generic() {
        let tag = DocumentTypeTag::Known(DocumentKind::KeteranganUmum);
        let record = LetterRecord::from_json(&tag, json!({"perihal": "Keterangan"})).unwrap();
        assert!(matches!(record, LetterRecord::Generic(_)));
    }

    #[test]
    fn test_non_object_record_rejected() {
        let tag = DocumentTypeTag::Known(DocumentKind::PengantarSkck);
        let err = LetterRecord::from_json(&tag, json!(["not", "a", "record"])).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRecord(_)));
    }

    #[test]
    fn test_bad_field_type_rejected() {
        let tag = DocumentTypeTag::Known(DocumentKind::KeteranganKepemilikanTanah);
        let err = LetterRecord::from_json(&tag, json!({"luasTanah": [250, 300]})).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRecord(_)));
        assert!(err.to_string().contains("surat-keterangan-kepemilikan-tanah"));
    }

    #[test]
    fn test_free_text_in_numeric_field_kept() {
        let tag = DocumentTypeTag::Known(DocumentKind::KeteranganKepemilikanTanah);
        let record = LetterRecord::from_json(&tag, json!({"luasTanah": "250 m2"})).unwrap();

        let LetterRecord::KeteranganKepemilikanTanah(ref tanah) = record else {
            panic!("expected KeteranganKepemilikanTanah, got {:?}", record);
        };
        assert_eq!(tanah.luas_tanah, Some(Amount::Text("250 m2".to_string())));
        assert!(
            record
                .scalar_fields()
                .contains(&("luasTanah".to_string(), VariableValue::Text("250 m2".to_string())))
        );
    }

    #[test]
    fn test_non_object_person_slot_is_absent() {
        let tag = DocumentTypeTag::Known(DocumentKind::KeteranganKelahiran);
        let record = LetterRecord::from_json(
            &tag,
            json!({"pemohonNIK": "3201010101010001", "ayah": {"namaLengkap": "Dedi"}, "ibu": 42}),
        )
        .unwrap();

        let LetterRecord::KeteranganKelahiran(ref lahir) = record else {
            panic!("expected KeteranganKelahiran, got {:?}", record);
        };
        assert!(record.applicant().is_none());
        assert!(lahir.ibu.is_none());
        assert_eq!(lahir.ayah.as_ref().and_then(|p| p.nama_lengkap.as_deref()), Some("Dedi"));
    }

    #[test]
    fn test_typed_scalar_fields_skip_absent_and_nested() {
        let record = LetterRecord::KeteranganDomisili(KeteranganDomisili {
            pemohon: Some(PersonReference::default()),
            jumlah_tahun_domisili: Some(Amount::Number(5.0)),
            keperluan: Some("Persyaratan bank".to_string()),
            ..Default::default()
        });

        let scalars = record.scalar_fields();
        assert_eq!(
            scalars,
            vec![
                ("jumlahTahunDomisili".to_string(), VariableValue::Number(5.0)),
                ("keperluan".to_string(), VariableValue::Text("Persyaratan bank".to_string())),
            ]
        );
    }

    #[test]
    fn test_generic_from_scalars() {
        let record = GenericRecord::from_scalars([("a", json!("x")), ("b", json!({"nested": 1}))]);
        assert_eq!(record.scalar_fields(), vec![("a".to_string(), VariableValue::Text("x".to_string()))]);
    }
}
