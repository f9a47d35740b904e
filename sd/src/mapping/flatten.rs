//! Entity flattening: one person reference into namespaced keys

use tracing::debug;

use crate::domain::{PersonField, PersonReference, VariableDictionary};

/// Flatten a person into `<prefix>.<field>` keys.
///
/// An absent person contributes no keys at all, so templates can tell
/// "no such person on this letter" apart from "person with blank data".
pub fn flatten(person: Option<&PersonReference>, prefix: &str) -> VariableDictionary {
    let Some(person) = person else {
        debug!(%prefix, "flatten: no person, namespace left empty");
        return VariableDictionary::new();
    };

    debug!(%prefix, "flatten: called");
    PersonField::ALL
        .iter()
        .map(|field| (format!("{}.{}", prefix, field.key()), person.display(*field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budi() -> PersonReference {
        PersonReference {
            nik: Some("3273012801890003".to_string()),
            nama_lengkap: Some("Budi Santoso".to_string()),
            tempat_lahir: Some("Bandung".to_string()),
            tanggal_lahir: Some("1989-01-28".to_string()),
            rt: Some("003".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_emits_every_field() {
        let dict = flatten(Some(&budi()), "pemohon");
        assert_eq!(dict.len(), PersonField::ALL.len());
        assert_eq!(dict.display("pemohon.namaLengkap").as_deref(), Some("Budi Santoso"));
        assert_eq!(dict.display("pemohon.tanggalLahir").as_deref(), Some("28 Januari 1989"));
        assert_eq!(dict.display("pemohon.rt").as_deref(), Some("003"));
    }

    #[test]
    fn test_missing_fields_are_empty_strings() {
        let dict = flatten(Some(&PersonReference::default()), "saksi1");
        for (key, value) in dict.iter() {
            let shown = value.to_string();
            assert_eq!(shown, "", "{} should be empty", key);
        }
    }

    #[test]
    fn test_absent_person_emits_nothing() {
        assert!(flatten(None, "ayah").is_empty());
    }

    #[test]
    fn test_prefix_is_applied() {
        let dict = flatten(Some(&budi()), "yangMeninggal");
        assert!(dict.keys().all(|k| k.starts_with("yangMeninggal.")));
    }
}
