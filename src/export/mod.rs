//! Output serializers for the parsed diagram and the derived FMEDA
//! table. Each exporter is a pure function from in-memory data to a
//! string; writing to disk is the caller's concern.

pub mod to_dot;
pub mod to_fmeda_csv;
pub mod to_fmeda_json;
pub mod to_xml;
