//! Domain types shared by the mapping, rendering and print layers

mod de;
mod kind;
mod person;
mod record;
mod settings;
mod template;
mod value;

pub use kind::{DocumentKind, DocumentTypeTag};
pub use person::{PersonField, PersonReference};
pub use record::{
    APPLICANT_KEYS, GenericRecord, IzinKeramaian, KeteranganAhliWaris, KeteranganBedaNama, KeteranganBelumMenikah,
    KeteranganDomisili, KeteranganJandaDuda, KeteranganKehilangan, KeteranganKelahiran, KeteranganKematian,
    KeteranganKepemilikanTanah, KeteranganOrangTua, KeteranganPenduduk, KeteranganPenghasilan, KeteranganPindah,
    KeteranganTidakMampu, KeteranganUsaha, LetterRecord, PengantarNikah, PengantarSkck, Rekomendasi,
};
pub use settings::SettingsSnapshot;
pub use template::Template;
pub use value::{Amount, VariableDictionary, VariableValue};
