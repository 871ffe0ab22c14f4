//! # Fixture Record Store
//!
//! Read-only, in-memory [`RecordStore`] over a JSON array of records. The
//! default data set is compiled into the binary; `DATABASE_PATH` points at
//! another file with the same shape.
//!
//! Lookups are linear scans: the fixture holds a handful of citizens.

use std::path::Path;

use async_trait::async_trait;
use dgfip_core::{InternalRecord, ReconciliationCriteria, RecordStore, StoreError};

/// Data set shipped with the service.
const EMBEDDED_FIXTURE: &str = include_str!("../data/database.json");

/// Immutable record set loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    records: Vec<InternalRecord>,
}

impl FixtureStore {
    /// Store over explicit records.
    pub fn new(records: Vec<InternalRecord>) -> Self {
        Self { records }
    }

    /// Store over the embedded data set.
    pub fn embedded() -> Result<Self, StoreError> {
        Self::from_json(EMBEDDED_FIXTURE)
    }

    /// Parse a JSON array of flat string records.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let records: Vec<InternalRecord> =
            serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Self { records })
    }

    /// Load a data set from disk.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for FixtureStore {
    async fn find(
        &self,
        criteria: &ReconciliationCriteria,
    ) -> Result<Vec<InternalRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.matches(criteria))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dgfip_core::Title;
    use std::io::Write;

    fn criteria(prenom: &str, nom: &str, jj: &str) -> ReconciliationCriteria {
        ReconciliationCriteria {
            prenom: prenom.into(),
            nom_de_naissance: nom.into(),
            aaaa: "1970".into(),
            mm: "08".into(),
            jj: jj.into(),
            titre: Title::M,
            code_pays_de_naissance: "99100".into(),
        }
    }

    #[test]
    fn embedded_fixture_parses() {
        let store = FixtureStore::embedded().unwrap();
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn find_returns_exact_matches_only() {
        let store = FixtureStore::embedded().unwrap();
        let found = store.find(&criteria("CARLOS", "NUNEZ", "16")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].spi(), Some("3999999901234"));

        let none = store.find(&criteria("CARLOS", "NUNEZ", "17")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn find_returns_every_namesake() {
        let store = FixtureStore::embedded().unwrap();
        let found = store.find(&criteria("DUPONT", "MARTINE", "16")).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn from_path_reads_custom_data_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"SPI":"42","prenom":"ALICE","revenuFiscalDeReference":"1000"}}]"#
        )
        .unwrap();
        let store = FixtureStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_path_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureStore::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn non_string_values_are_corrupt() {
        let err = FixtureStore::from_json(r#"[{"SPI": 42}]"#).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
