//! Serialize milliunit fields as display floats.

use serde::Serializer;
use ynab_types::{milliunits_to_float, Milliunits};

pub fn serialize<S: Serializer>(value: &Milliunits, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(milliunits_to_float(*value))
}

pub fn serialize_option<S: Serializer>(
    value: &Option<Milliunits>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(m) => serializer.serialize_some(&milliunits_to_float(*m)),
        None => serializer.serialize_none(),
    }
}
