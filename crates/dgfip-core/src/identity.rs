//! # Federated Identity and Lookup Key
//!
//! [`FederatedIdentity`] is the subset of FranceConnect claims used for
//! reconciliation. [`ReconciliationCriteria`] is the exact-match key built
//! from it and sent to the record store.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::normalize::{first_given_name, normalize};

/// Identity asserted by FranceConnect for the token holder.
///
/// Every field is optional on the wire. An absent or empty value makes the
/// identity incomplete, which is a non-match rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    /// Given names, space separated, accents included.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Birth family name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// Birth date as `YYYY-MM-DD`.
    #[serde(default)]
    pub birthdate: Option<String>,
    /// `male` or `female`.
    #[serde(default)]
    pub gender: Option<String>,
    /// INSEE country code of birth (`99100` for France).
    #[serde(default)]
    pub birthcountry: Option<String>,
}

/// Gender claim values FranceConnect defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
}

impl Gender {
    /// Parse the claim value. Anything but `male`/`female` is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// Civil title stored on the tax record for this gender.
    pub fn title(self) -> Title {
        match self {
            Self::Male => Title::M,
            Self::Female => Title::Mme,
        }
    }
}

/// Civil title as stored in the `titre` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Title {
    /// Monsieur.
    M,
    /// Madame.
    Mme,
}

impl Title {
    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::Mme => "MME",
        }
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match lookup key for the record store.
///
/// Field names serialize to the stored column names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReconciliationCriteria {
    /// Normalized first given name.
    pub prenom: String,
    /// Normalized birth family name.
    #[serde(rename = "nomDeNaissance")]
    pub nom_de_naissance: String,
    /// Four-digit birth year.
    #[serde(rename = "AAAA")]
    pub aaaa: String,
    /// Two-digit birth month.
    #[serde(rename = "MM")]
    pub mm: String,
    /// Two-digit birth day.
    #[serde(rename = "JJ")]
    pub jj: String,
    /// Civil title derived from gender.
    pub titre: Title,
    /// Birth country code, verbatim.
    #[serde(rename = "codePaysDeNaissance")]
    pub code_pays_de_naissance: String,
}

/// Treat an empty claim the same as a missing one.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ReconciliationCriteria {
    /// Build the lookup key from an identity.
    ///
    /// Returns `None` when a claim is missing, the birth date is not a
    /// calendar date in `YYYY-MM-DD` form, or the gender has no title
    /// mapping. Each of these is a guaranteed non-match.
    pub fn from_identity(identity: &FederatedIdentity) -> Option<Self> {
        let given_name = present(&identity.given_name)?;
        let family_name = present(&identity.family_name)?;
        let birthdate = present(&identity.birthdate)?;
        let gender = present(&identity.gender)?;
        let birthcountry = present(&identity.birthcountry)?;

        let date = NaiveDate::parse_from_str(birthdate, "%Y-%m-%d").ok()?;
        let titre = Gender::parse(gender)?.title();

        Some(Self {
            prenom: normalize(first_given_name(given_name)),
            nom_de_naissance: normalize(family_name),
            aaaa: format!("{:04}", date.year()),
            mm: format!("{:02}", date.month()),
            jj: format!("{:02}", date.day()),
            titre,
            code_pays_de_naissance: birthcountry.to_string(),
        })
    }

    /// Stored field name and expected value, in a fixed order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("prenom", self.prenom.as_str()),
            ("nomDeNaissance", self.nom_de_naissance.as_str()),
            ("AAAA", self.aaaa.as_str()),
            ("MM", self.mm.as_str()),
            ("JJ", self.jj.as_str()),
            ("titre", self.titre.as_str()),
            ("codePaysDeNaissance", self.code_pays_de_naissance.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carlos() -> FederatedIdentity {
        FederatedIdentity {
            given_name: Some("Carlós".into()),
            family_name: Some("Nuñez".into()),
            birthdate: Some("1970-08-16".into()),
            gender: Some("male".into()),
            birthcountry: Some("99100".into()),
        }
    }

    #[test]
    fn builds_normalized_key() {
        let key = ReconciliationCriteria::from_identity(&carlos()).unwrap();
        assert_eq!(key.prenom, "CARLOS");
        assert_eq!(key.nom_de_naissance, "NUNEZ");
        assert_eq!(key.aaaa, "1970");
        assert_eq!(key.mm, "08");
        assert_eq!(key.jj, "16");
        assert_eq!(key.titre, Title::M);
        assert_eq!(key.code_pays_de_naissance, "99100");
    }

    #[test]
    fn uses_first_given_name_only() {
        let mut identity = carlos();
        identity.given_name = Some("Carlós Miguel".into());
        let key = ReconciliationCriteria::from_identity(&identity).unwrap();
        assert_eq!(key.prenom, "CARLOS");
    }

    #[test]
    fn female_maps_to_mme() {
        let mut identity = carlos();
        identity.gender = Some("female".into());
        let key = ReconciliationCriteria::from_identity(&identity).unwrap();
        assert_eq!(key.titre, Title::Mme);
        assert_eq!(key.titre.to_string(), "MME");
    }

    #[test]
    fn country_code_is_not_normalized() {
        let mut identity = carlos();
        identity.birthcountry = Some("99 134".into());
        let key = ReconciliationCriteria::from_identity(&identity).unwrap();
        assert_eq!(key.code_pays_de_naissance, "99 134");
    }

    #[test]
    fn missing_claim_gives_no_key() {
        let mut identity = carlos();
        identity.birthcountry = None;
        assert!(ReconciliationCriteria::from_identity(&identity).is_none());

        let mut identity = carlos();
        identity.given_name = Some(String::new());
        assert!(ReconciliationCriteria::from_identity(&identity).is_none());
    }

    #[test]
    fn unknown_gender_gives_no_key() {
        let mut identity = carlos();
        identity.gender = Some("other".into());
        assert!(ReconciliationCriteria::from_identity(&identity).is_none());
    }

    #[test]
    fn invalid_birthdate_gives_no_key() {
        for bad in ["1970-13-01", "1970-02-30", "16/08/1970", "1970"] {
            let mut identity = carlos();
            identity.birthdate = Some(bad.into());
            assert!(
                ReconciliationCriteria::from_identity(&identity).is_none(),
                "{bad} must not produce a key"
            );
        }
    }

    #[test]
    fn criteria_serializes_to_stored_names() {
        let key = ReconciliationCriteria::from_identity(&carlos()).unwrap();
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["nomDeNaissance"], "NUNEZ");
        assert_eq!(json["AAAA"], "1970");
        assert_eq!(json["titre"], "M");
        assert_eq!(json["codePaysDeNaissance"], "99100");
    }

    #[test]
    fn identity_ignores_extra_claims() {
        let identity: FederatedIdentity = serde_json::from_value(serde_json::json!({
            "given_name": "François",
            "family_name": "Seize",
            "nickname": "",
            "birthdate": "1950-01-06",
            "gender": "male",
            "birthcountry": "99100",
            "address": { "locality": "Paris" }
        }))
        .unwrap();
        assert_eq!(identity.given_name.as_deref(), Some("François"));
    }
}
