//! # Scope Authorization and Field Projection
//!
//! [`SCOPE_TO_FIELDS`] is an allowlist: a record field is disclosed only if
//! one of the caller's scopes is a key of the table and lists that field.
//! Scopes the table does not know grant nothing and raise nothing.
//!
//! | Scope          | Unlocks                                   |
//! |----------------|-------------------------------------------|
//! | `dgfip_rfr`    | reference tax income                      |
//! | `dgfip_nbpart` | number of tax shares                      |
//! | `dgfip_sitfam` | family situation                          |
//! | `dgfip_pac`    | all dependent counts                      |
//! | `dgfip_pacf`   | dependents in alternating custody only    |
//! | `dgfip_aft`    | fiscal address components                 |

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::InternalRecord;

/// Scope identifier to the record fields it unlocks.
///
/// Entries may overlap (`dgfip_pacf` is a subset of `dgfip_pac`).
pub const SCOPE_TO_FIELDS: &[(&str, &[&str])] = &[
    ("dgfip_rfr", &["revenuFiscalDeReference"]),
    ("dgfip_nbpart", &["nombreDeParts"]),
    ("dgfip_sitfam", &["situationFamille"]),
    (
        "dgfip_pac",
        &[
            "nombreDePersonnesACharge",
            "nombreDePersonnesAChargeF",
            "nombreDePersonnesAChargeH",
            "nombreDePersonnesAChargeR",
            "nombreDePersonnesAChargeJ",
            "nombreDePersonnesAChargeN",
            "nombreDePersonnesAChargeP",
        ],
    ),
    ("dgfip_pacf", &["nombreDePersonnesAChargeF"]),
    (
        "dgfip_aft",
        &[
            "adresseFiscaleDeTaxationVoie",
            "adresseFiscaleDeTaxationComplement",
            "adresseFiscaleDeTaxationCodePostal",
            "adresseFiscaleDeTaxationCommune",
        ],
    ),
];

/// Set of scopes granted to the relying service.
///
/// Deserializes from the JSON array FranceConnect returns; duplicates
/// collapse and order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Create an empty scope set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Whether `scope` is in the set.
    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    /// Iterate scopes in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct scopes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Table entries for the scopes the caller holds.
fn granted(scopes: &ScopeSet) -> impl Iterator<Item = &'static [&'static str]> + '_ {
    SCOPE_TO_FIELDS
        .iter()
        .filter(move |(scope, _)| scopes.contains(scope))
        .map(|(_, fields)| *fields)
}

/// Whether the caller holds at least one scope this provider serves.
///
/// Gates access as a whole; which fields are visible is decided by
/// [`filter`].
pub fn is_authorized(scopes: &ScopeSet) -> bool {
    granted(scopes).next().is_some()
}

/// Union of the fields unlocked by the caller's known scopes.
pub fn allowed_fields(scopes: &ScopeSet) -> BTreeSet<&'static str> {
    granted(scopes).flatten().copied().collect()
}

/// Copy of `record` restricted to the fields `scopes` unlock.
///
/// Allowed fields missing from the record are skipped; record fields no
/// scope unlocks are dropped.
pub fn filter(scopes: &ScopeSet, record: &InternalRecord) -> InternalRecord {
    let allowed = allowed_fields(scopes);
    record
        .iter()
        .filter(|(field, _)| allowed.contains(*field))
        .collect()
}
