//! # Response Formatting
//!
//! Reshapes a filtered record into the published JSON schema.
//!
//! 1. Each field is renamed through [`PUBLIC_LABELS`]. Fields the table does
//!    not list keep their internal name and stay flat.
//! 2. Dotted labels nest: `pac.nbPac` writes `{ "pac": { "nbPac": … } }`.
//!    Labels sharing a prefix merge into the same object.
//! 3. An empty string is published as `null`.
//! 4. When the street component of the fiscal address is set, a flat `aft`
//!    string is added next to the structured `aftDetail` object, matching
//!    the production DGFiP API. A non-empty commune is appended last.
//!
//! Nesting goes through [`set_at_path`], which knows nothing about the
//! label table; switching to another schema only means another table.

use serde_json::{Map, Value};

use crate::record::InternalRecord;

/// Internal field name to public output path.
pub const PUBLIC_LABELS: &[(&str, &str)] = &[
    ("revenuFiscalDeReference", "rfr"),
    ("nombreDeParts", "nbPart"),
    ("situationFamille", "sitFam"),
    ("nombreDePersonnesACharge", "pac.nbPac"),
    ("nombreDePersonnesAChargeF", "pac.nbPacF"),
    ("nombreDePersonnesAChargeH", "pac.nbPacH"),
    ("nombreDePersonnesAChargeR", "pac.nbPacR"),
    ("nombreDePersonnesAChargeJ", "pac.nbPacJ"),
    ("nombreDePersonnesAChargeN", "pac.nbPacN"),
    ("nombreDePersonnesAChargeP", "pac.nbPacP"),
    (ADDRESS_STREET, "aftDetail.voie"),
    (ADDRESS_COMPLEMENT, "aftDetail.complementAdresse"),
    (ADDRESS_POSTAL_CITY, "aftDetail.codePostal"),
    (ADDRESS_COMMUNE, "aftDetail.commune"),
];

const ADDRESS_STREET: &str = "adresseFiscaleDeTaxationVoie";
const ADDRESS_COMPLEMENT: &str = "adresseFiscaleDeTaxationComplement";
const ADDRESS_POSTAL_CITY: &str = "adresseFiscaleDeTaxationCodePostal";
const ADDRESS_COMMUNE: &str = "adresseFiscaleDeTaxationCommune";

/// Public key of the flattened fiscal address.
const FLAT_ADDRESS_KEY: &str = "aft";

fn public_label(field: &str) -> Option<&'static str> {
    PUBLIC_LABELS
        .iter()
        .find(|(internal, _)| *internal == field)
        .map(|(_, label)| *label)
}

/// Write `value` at a dotted `path` inside `object`, creating intermediate
/// objects as needed.
///
/// An existing object on the way is reused, so sibling paths merge. A
/// non-object value sitting on an intermediate segment is replaced by an
/// object. An empty path segment is kept as an empty key.
pub fn set_at_path(object: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.');
    // split always yields at least one segment.
    let mut current = segments.next().unwrap_or_default();
    let mut target = object;

    for next in segments {
        let slot = target
            .entry(current.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(inner) = slot else {
            return;
        };
        target = inner;
        current = next;
    }

    target.insert(current.to_string(), value);
}

fn publish(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

/// Flat one-line fiscal address: complement, street, postal code and city,
/// joined by single spaces, then the commune when it is set. `None` when the
/// street is missing or empty.
fn flat_address(record: &InternalRecord) -> Option<String> {
    let street = record.get(ADDRESS_STREET).filter(|s| !s.is_empty())?;
    let complement = record.get(ADDRESS_COMPLEMENT).unwrap_or("");
    let postal_city = record.get(ADDRESS_POSTAL_CITY).unwrap_or("");
    let mut aft = format!("{complement} {street} {postal_city}");
    if let Some(commune) = record.get(ADDRESS_COMMUNE).filter(|c| !c.is_empty()) {
        aft.push(' ');
        aft.push_str(commune);
    }
    Some(aft)
}

/// Shape a filtered record into the public JSON object.
pub fn format(record: &InternalRecord) -> Value {
    let mut out = Map::new();

    for (field, value) in record.iter() {
        match public_label(field) {
            Some(path) => set_at_path(&mut out, path, publish(value)),
            None => {
                out.insert(field.to_string(), publish(value));
            }
        }
    }

    if let Some(aft) = flat_address(record) {
        out.insert(FLAT_ADDRESS_KEY.to_string(), Value::String(aft));
    }

    Value::Object(out)
}
