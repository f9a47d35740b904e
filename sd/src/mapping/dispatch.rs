//! Type dispatch: one letter record into the full variable dictionary
//!
//! Every typed letter family has its own mapper function. [`mapper_for`] is
//! the lookup table, built from an exhaustive match so a new
//! [`DocumentKind`] cannot be added without deciding how it maps.

use tracing::{debug, warn};

use super::common::build_common;
use super::flatten::flatten;
use crate::clock::Clock;
use crate::domain::{
    Amount, DocumentKind, DocumentTypeTag, LetterRecord, PersonReference, SettingsSnapshot, VariableDictionary,
};
use crate::locale;

/// Adds a letter family's own keys. Returns `false` when the record is not
/// of the family the mapper handles, leaving the dictionary untouched.
pub type Mapper = fn(&LetterRecord, &mut VariableDictionary) -> bool;

/// Build the dictionary for a record rendered as `tag`.
///
/// Starts from the common context, adds the `pemohon` block when the record
/// has an applicant, then the family's own keys. Tags without a typed mapper,
/// and records whose shape does not match the tag, get every top-level scalar
/// field copied under its bare name instead. Pure; never fails.
pub fn map_variables(
    tag: &DocumentTypeTag,
    record: &LetterRecord,
    settings: Option<&SettingsSnapshot>,
    clock: &dyn Clock,
) -> VariableDictionary {
    debug!(%tag, "map_variables: called");
    let mut dict = build_common(settings, clock);

    if let Some(applicant) = record.applicant() {
        debug!("map_variables: merging applicant block");
        dict.merge(flatten(Some(applicant), "pemohon"));
    }

    match mapper_for(tag) {
        Some(mapper) => {
            if mapper(record, &mut dict) {
                debug!(%tag, keys = dict.len(), "map_variables: typed mapper applied");
            } else {
                warn!(%tag, record_kind = ?record.kind(), "map_variables: record does not match tag, using generic mapping");
                spread_scalars(record, &mut dict);
            }
        }
        None => {
            debug!(%tag, "map_variables: no typed mapper, using generic mapping");
            spread_scalars(record, &mut dict);
        }
    }

    dict
}

/// The typed mapper registered for a tag, if any
pub fn mapper_for(tag: &DocumentTypeTag) -> Option<Mapper> {
    let DocumentTypeTag::Known(kind) = tag else {
        return None;
    };

    let mapper: Mapper = match kind {
        DocumentKind::PengantarSkck => map_pengantar_skck,
        DocumentKind::KeteranganDomisili => map_keterangan_domisili,
        DocumentKind::KeteranganUsaha => map_keterangan_usaha,
        DocumentKind::KeteranganTidakMampu => map_keterangan_tidak_mampu,
        DocumentKind::KeteranganPenghasilan => map_keterangan_penghasilan,
        DocumentKind::KeteranganKelahiran => map_keterangan_kelahiran,
        DocumentKind::KeteranganKematian => map_keterangan_kematian,
        DocumentKind::KeteranganAhliWaris => map_keterangan_ahli_waris,
        DocumentKind::PengantarNikah => map_pengantar_nikah,
        DocumentKind::KeteranganPindah => map_keterangan_pindah,
        DocumentKind::IzinKeramaian => map_izin_keramaian,
        DocumentKind::KeteranganKepemilikanTanah => map_keterangan_kepemilikan_tanah,
        DocumentKind::KeteranganBelumMenikah => map_keterangan_belum_menikah,
        DocumentKind::KeteranganJandaDuda => map_keterangan_janda_duda,
        DocumentKind::KeteranganBedaNama => map_keterangan_beda_nama,
        DocumentKind::KeteranganKehilangan => map_keterangan_kehilangan,
        DocumentKind::KeteranganOrangTua => map_keterangan_orang_tua,
        DocumentKind::KeteranganPenduduk => map_keterangan_penduduk,
        DocumentKind::Rekomendasi => map_rekomendasi,
        DocumentKind::KeteranganUmum => return None,
    };
    Some(mapper)
}

/// Copy every top-level scalar field under its bare name
fn spread_scalars(record: &LetterRecord, dict: &mut VariableDictionary) {
    for (key, value) in record.scalar_fields() {
        dict.insert(key, value);
    }
}

fn person(dict: &mut VariableDictionary, prefix: &str, person: Option<&PersonReference>) {
    dict.merge(flatten(person, prefix));
}

fn text(dict: &mut VariableDictionary, key: &str, value: &Option<String>) {
    dict.insert_text(key, value.as_deref());
}

fn count(dict: &mut VariableDictionary, key: &str, value: &Option<Amount>) {
    dict.insert(key, value.as_ref().map(|a| a.display_with(locale::group_number)).unwrap_or_default());
}

fn money(dict: &mut VariableDictionary, key: &str, value: &Option<Amount>) {
    dict.insert(key, value.as_ref().map(|a| a.display_with(locale::rupiah)).unwrap_or_default());
}

fn date(dict: &mut VariableDictionary, key: &str, value: &Option<String>) {
    dict.insert(key, value.as_deref().map(locale::long_date_from_str).unwrap_or_default());
}

fn datetime(dict: &mut VariableDictionary, key: &str, value: &Option<String>) {
    dict.insert(key, value.as_deref().map(locale::long_datetime_from_str).unwrap_or_default());
}

fn map_pengantar_skck(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::PengantarSkck(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "tujuanPembuatan", &r.tujuan_pembuatan);
    true
}

fn map_keterangan_domisili(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganDomisili(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "alamatDomisili", &r.alamat_domisili);
    count(dict, "jumlahTahunDomisili", &r.jumlah_tahun_domisili);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_usaha(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganUsaha(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "namaUsaha", &r.nama_usaha);
    text(dict, "jenisUsaha", &r.jenis_usaha);
    text(dict, "alamatUsaha", &r.alamat_usaha);
    date(dict, "mulaiUsaha", &r.mulai_usaha);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_tidak_mampu(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganTidakMampu(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    money(dict, "penghasilanPerBulan", &r.penghasilan_per_bulan);
    count(dict, "jumlahTanggungan", &r.jumlah_tanggungan);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_penghasilan(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganPenghasilan(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    money(dict, "penghasilanPerBulan", &r.penghasilan_per_bulan);
    text(dict, "sumberPenghasilan", &r.sumber_penghasilan);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_kelahiran(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganKelahiran(r) = record else {
        return false;
    };
    person(dict, "bayi", r.bayi.as_ref());
    person(dict, "ayah", r.ayah.as_ref());
    person(dict, "ibu", r.ibu.as_ref());
    person(dict, "pelapor", r.pelapor.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    datetime(dict, "waktuKelahiran", &r.waktu_kelahiran);
    text(dict, "tempatKelahiran", &r.tempat_kelahiran);
    count(dict, "anakKe", &r.anak_ke);
    count(dict, "beratBayi", &r.berat_bayi);
    count(dict, "panjangBayi", &r.panjang_bayi);
    text(dict, "hubunganPelapor", &r.hubungan_pelapor);
    true
}

fn map_keterangan_kematian(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganKematian(r) = record else {
        return false;
    };
    person(dict, "yangMeninggal", r.yang_meninggal.as_ref());
    person(dict, "pelapor", r.pelapor.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    datetime(dict, "waktuKematian", &r.waktu_kematian);
    date(dict, "tanggalKematian", &r.waktu_kematian);
    text(dict, "tempatKematian", &r.tempat_kematian);
    text(dict, "penyebabKematian", &r.penyebab_kematian);
    text(dict, "hubunganPelapor", &r.hubungan_pelapor);
    true
}

fn map_keterangan_ahli_waris(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganAhliWaris(r) = record else {
        return false;
    };
    person(dict, "pewaris", r.pewaris.as_ref());
    person(dict, "saksi1", r.saksi1.as_ref());
    person(dict, "saksi2", r.saksi2.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    date(dict, "tanggalWafatPewaris", &r.tanggal_wafat_pewaris);
    count(dict, "jumlahAhliWaris", &r.jumlah_ahli_waris);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_pengantar_nikah(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::PengantarNikah(r) = record else {
        return false;
    };
    person(dict, "pasangan", r.pasangan.as_ref());
    person(dict, "ayah", r.ayah.as_ref());
    person(dict, "ibu", r.ibu.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "statusPemohon", &r.status_pemohon);
    date(dict, "tanggalAkad", &r.tanggal_akad);
    text(dict, "tempatAkad", &r.tempat_akad);
    true
}

fn map_keterangan_pindah(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganPindah(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "alamatTujuan", &r.alamat_tujuan);
    text(dict, "desaTujuan", &r.desa_tujuan);
    text(dict, "kecamatanTujuan", &r.kecamatan_tujuan);
    text(dict, "kabupatenTujuan", &r.kabupaten_tujuan);
    text(dict, "provinsiTujuan", &r.provinsi_tujuan);
    text(dict, "alasanPindah", &r.alasan_pindah);
    count(dict, "jumlahPengikut", &r.jumlah_pengikut);
    date(dict, "tanggalPindah", &r.tanggal_pindah);
    true
}

fn map_izin_keramaian(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::IzinKeramaian(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "namaAcara", &r.nama_acara);
    datetime(dict, "waktuAcara", &r.waktu_acara);
    text(dict, "tempatAcara", &r.tempat_acara);
    count(dict, "jumlahUndangan", &r.jumlah_undangan);
    text(dict, "jenisHiburan", &r.jenis_hiburan);
    true
}

fn map_keterangan_kepemilikan_tanah(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganKepemilikanTanah(r) = record else {
        return false;
    };
    person(dict, "saksi1", r.saksi1.as_ref());
    person(dict, "saksi2", r.saksi2.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    count(dict, "luasTanah", &r.luas_tanah);
    text(dict, "lokasiTanah", &r.lokasi_tanah);
    text(dict, "nomorPersil", &r.nomor_persil);
    text(dict, "asalUsulTanah", &r.asal_usul_tanah);
    text(dict, "batasUtara", &r.batas_utara);
    text(dict, "batasTimur", &r.batas_timur);
    text(dict, "batasSelatan", &r.batas_selatan);
    text(dict, "batasBarat", &r.batas_barat);
    true
}

fn map_keterangan_belum_menikah(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganBelumMenikah(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_janda_duda(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganJandaDuda(r) = record else {
        return false;
    };
    person(dict, "pasangan", r.pasangan.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "statusJandaDuda", &r.status_janda_duda);
    text(dict, "sebabStatus", &r.sebab_status);
    date(dict, "tanggalKejadian", &r.tanggal_kejadian);
    true
}

fn map_keterangan_beda_nama(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganBedaNama(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "namaDokumenPertama", &r.nama_dokumen_pertama);
    text(dict, "dokumenPertama", &r.dokumen_pertama);
    text(dict, "namaDokumenKedua", &r.nama_dokumen_kedua);
    text(dict, "dokumenKedua", &r.dokumen_kedua);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_kehilangan(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganKehilangan(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "barangHilang", &r.barang_hilang);
    text(dict, "tempatKehilangan", &r.tempat_kehilangan);
    date(dict, "tanggalKehilangan", &r.tanggal_kehilangan);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_orang_tua(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganOrangTua(r) = record else {
        return false;
    };
    person(dict, "ayah", r.ayah.as_ref());
    person(dict, "ibu", r.ibu.as_ref());
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_keterangan_penduduk(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::KeteranganPenduduk(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "keperluan", &r.keperluan);
    true
}

fn map_rekomendasi(record: &LetterRecord, dict: &mut VariableDictionary) -> bool {
    let LetterRecord::Rekomendasi(r) = record else {
        return false;
    };
    text(dict, "nomorSurat", &r.nomor_surat);
    text(dict, "perihal", &r.perihal);
    text(dict, "instansiTujuan", &r.instansi_tujuan);
    text(dict, "keperluan", &r.keperluan);
    true
}
