//! Agreement between the registry and the dispatcher

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};
use tracing::debug;

use super::dispatch::map_variables;
use super::registry::{definitions_for, document_spec};
use crate::clock::SystemClock;
use crate::domain::{DocumentKind, DocumentTypeTag, LetterRecord, PersonField};
use crate::error::DocumentError;

/// Differences between documented and emitted keys for one family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drift {
    /// Documented in the registry but never emitted
    pub missing: Vec<String>,
    /// Emitted by the mapper but absent from the registry
    pub undocumented: Vec<String>,
}

impl Drift {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.undocumented.is_empty()
    }
}

fn full_person() -> Value {
    let fields: Map<String, Value> = PersonField::ALL
        .iter()
        .map(|f| (f.key().to_string(), json!("x")))
        .collect();
    Value::Object(fields)
}

/// A record of `kind` with the applicant and every documented person present
pub fn sample_record(kind: DocumentKind) -> Result<LetterRecord, DocumentError> {
    let mut fields = Map::new();
    fields.insert("pemohonNIK".to_string(), full_person());
    for slot in document_spec(kind).persons {
        fields.insert(slot.prefix.to_string(), full_person());
    }
    LetterRecord::from_json(&DocumentTypeTag::Known(kind), Value::Object(fields))
}

/// Compare the registry's definitions for `kind` with what the mapper emits
pub fn drift(kind: DocumentKind) -> Result<Drift, DocumentError> {
    debug!(%kind, "drift: called");
    let tag = DocumentTypeTag::Known(kind);
    let record = sample_record(kind)?;

    let emitted: BTreeSet<String> = map_variables(&tag, &record, None, &SystemClock)
        .keys()
        .map(str::to_string)
        .collect();
    let documented: BTreeSet<String> = definitions_for(&tag).into_iter().map(|d| d.name).collect();

    Ok(Drift {
        missing: documented.difference(&emitted).cloned().collect(),
        undocumented: emitted.difference(&documented).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_families_have_no_drift() {
        for kind in DocumentKind::ALL {
            if !document_spec(kind).typed {
                continue;
            }
            let drift = drift(kind).unwrap();
            assert!(drift.is_clean(), "{}: {:?}", kind, drift);
        }
    }

    #[test]
    fn test_sample_record_carries_every_person() {
        let record = sample_record(DocumentKind::KeteranganKelahiran).unwrap();
        match record {
            LetterRecord::KeteranganKelahiran(r) => {
                assert!(r.pemohon.is_some());
                assert!(r.bayi.is_some());
                assert!(r.ayah.is_some());
                assert!(r.ibu.is_some());
                assert!(r.pelapor.is_some());
            }
            other => panic!("unexpected record {:?}", other),
        }
    }
}
