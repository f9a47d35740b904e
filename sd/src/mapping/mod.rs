//! Record to dictionary mapping

mod check;
mod common;
mod dispatch;
mod flatten;
mod registry;

pub use check::{Drift, drift, sample_record};
pub use common::{COMMON_FIELDS, CommonField, CommonSource, build_common};
pub use dispatch::{Mapper, map_variables, mapper_for};
pub use flatten::flatten;
pub use registry::{
    DocumentSpec, FieldDoc, PEMOHON, PersonSlot, VariableCategory, VariableDefinition, catalog, common_definitions,
    definitions_for, document_spec, person_definitions,
};
