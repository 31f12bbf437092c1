//! Owned portfolio state with explicit load/save lifecycle
//!
//! Every mutation rewrites the whole blob. A missing or unreadable blob loads
//! as an empty portfolio so a damaged file never blocks the application.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::investment::{InvestmentPatch, NewInvestment, StoredInvestment};
use super::storage::BlobStore;
use crate::error::StorageError;

/// Blob key the portfolio is persisted under
pub const PORTFOLIO_KEY: &str = "fund-portfolio";

/// The investment list plus the blob store it is persisted to
#[derive(Debug)]
pub struct PortfolioStore<B: BlobStore> {
    backend: B,
    investments: Vec<StoredInvestment>,
}

impl<B: BlobStore> PortfolioStore<B> {
    /// Rehydrate from the backend, falling back to empty on any failure
    pub fn load(backend: B) -> Self {
        let investments = match backend.get(PORTFOLIO_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<StoredInvestment>>(&text) {
                Ok(investments) => investments,
                Err(e) => {
                    log::warn!("portfolio blob is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("could not read portfolio blob, starting empty: {e}");
                Vec::new()
            }
        };
        log::debug!("loaded {} investments", investments.len());
        Self { backend, investments }
    }

    pub fn investments(&self) -> &[StoredInvestment] {
        &self.investments
    }

    pub fn get(&self, id: &str) -> Option<&StoredInvestment> {
        self.investments.iter().find(|inv| inv.id == id)
    }

    pub fn len(&self) -> usize {
        self.investments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.investments.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a new investment stamped with the current time as its id
    pub fn add(&mut self, investment: NewInvestment) -> Result<&StoredInvestment, StorageError> {
        self.add_at(investment, Utc::now())
    }

    /// Append a new investment, deriving its id from `created_at`
    pub fn add_at(
        &mut self,
        investment: NewInvestment,
        created_at: DateTime<Utc>,
    ) -> Result<&StoredInvestment, StorageError> {
        let id = self.next_id(created_at);
        log::info!("adding investment {} ({})", id, investment.fund_name);
        let mut candidate = self.investments.clone();
        candidate.push(investment.with_id(id));
        self.commit(candidate)?;
        let last = self.investments.len() - 1;
        Ok(&self.investments[last])
    }

    /// Merge `patch` into the investment with `id`
    pub fn update(
        &mut self,
        id: &str,
        patch: InvestmentPatch,
    ) -> Result<&StoredInvestment, StorageError> {
        let index = self.position(id)?;
        let mut candidate = self.investments.clone();
        candidate[index].apply(patch);
        self.commit(candidate)?;
        log::info!("updated investment {id}");
        Ok(&self.investments[index])
    }

    /// Remove and return the investment with `id`
    pub fn delete(&mut self, id: &str) -> Result<StoredInvestment, StorageError> {
        let index = self.position(id)?;
        let mut candidate = self.investments.clone();
        let removed = candidate.remove(index);
        self.commit(candidate)?;
        log::info!("deleted investment {id}");
        Ok(removed)
    }

    /// Persist the full list
    pub fn save(&mut self) -> Result<(), StorageError> {
        let text = serde_json::to_string(&self.investments)?;
        self.backend.set(PORTFOLIO_KEY, &text)
    }

    /// Write `candidate` and only then make it the in-memory list
    fn commit(&mut self, candidate: Vec<StoredInvestment>) -> Result<(), StorageError> {
        let text = serde_json::to_string(&candidate)?;
        self.backend.set(PORTFOLIO_KEY, &text)?;
        self.investments = candidate;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, StorageError> {
        self.investments
            .iter()
            .position(|inv| inv.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// Millisecond timestamp, bumped past any existing numeric id
    ///
    /// When the highest id is already `i64::MAX`, falls back to the first
    /// unused value at or after the timestamp.
    fn next_id(&self, created_at: DateTime<Utc>) -> String {
        let stamp = created_at.timestamp_millis();
        let taken: HashSet<i64> = self
            .investments
            .iter()
            .filter_map(|inv| inv.id.parse::<i64>().ok())
            .collect();
        let next = match taken.iter().max() {
            Some(&max) if max >= stamp => max.checked_add(1).or_else(|| {
                (stamp..=i64::MAX)
                    .chain((i64::MIN..stamp).rev())
                    .find(|candidate| !taken.contains(candidate))
            }),
            _ => Some(stamp),
        };
        next.unwrap_or(stamp).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::storage::{FileBlobStore, MemoryBlobStore};
    use chrono::{NaiveDate, TimeZone};
    use std::fs;
    use std::io;

    /// Reads from an inner store, refuses every write once `read_only` is set
    #[derive(Debug, Default)]
    struct ReadOnlyBlobStore {
        inner: MemoryBlobStore,
        read_only: bool,
    }

    impl BlobStore for ReadOnlyBlobStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.read_only {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn new_investment(name: &str, monthly: f64) -> NewInvestment {
        NewInvestment {
            fund_name: name.to_string(),
            fund_type: name.to_string(),
            initial_balance: 10_000.0,
            monthly_contribution: monthly,
            annual_rate_pct: 12.5,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            is_tax_filer: true,
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_empty_when_blob_missing() {
        let store = PortfolioStore::load(MemoryBlobStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_when_blob_corrupt() {
        let mut backend = MemoryBlobStore::new();
        backend.set(PORTFOLIO_KEY, "{not json").unwrap();
        let store = PortfolioStore::load(backend);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut store = PortfolioStore::load(MemoryBlobStore::new());
        let first = store.add_at(new_investment("Cash Fund", 1_000.0), at(1_000)).unwrap().id.clone();
        let second = store.add_at(new_investment("Equity Fund", 2_000.0), at(1_000)).unwrap().id.clone();
        assert_eq!(first, "1000");
        assert_eq!(second, "1001");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let mut store = PortfolioStore::load(MemoryBlobStore::new());
        store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap();
        store.add_at(new_investment("Cash Fund", 2_500.0), at(20)).unwrap();
        store.add_at(new_investment("Islamic Fund", 750.5), at(30)).unwrap();

        let before = store.investments().to_vec();
        let reloaded = PortfolioStore::load(store.backend().clone());
        assert_eq!(reloaded.investments(), before.as_slice());
    }

    #[test]
    fn test_update_merges_and_persists() {
        let mut store = PortfolioStore::load(MemoryBlobStore::new());
        let id = store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap().id.clone();

        let patch = InvestmentPatch {
            annual_rate_pct: Some(13.5),
            ..Default::default()
        };
        let updated = store.update(&id, patch).unwrap();
        assert_eq!(updated.annual_rate_pct, 13.5);
        assert_eq!(updated.monthly_contribution, 5_000.0);

        let reloaded = PortfolioStore::load(store.backend().clone());
        assert_eq!(reloaded.get(&id).map(|inv| inv.annual_rate_pct), Some(13.5));
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let mut store = PortfolioStore::load(MemoryBlobStore::new());
        let keep = store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap().id.clone();
        let gone = store.add_at(new_investment("Cash Fund", 1_000.0), at(20)).unwrap().id.clone();

        let removed = store.delete(&gone).unwrap();
        assert_eq!(removed.fund_name, "Cash Fund");

        let reloaded = PortfolioStore::load(store.backend().clone());
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get(&keep).is_some());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = PortfolioStore::load(MemoryBlobStore::new());
        assert!(matches!(store.delete("missing"), Err(StorageError::NotFound(_))));
        assert!(matches!(
            store.update("missing", InvestmentPatch::default()),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_add_leaves_list_unchanged() {
        let mut store = PortfolioStore::load(ReadOnlyBlobStore::default());
        store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap();
        store.backend.read_only = true;

        let result = store.add_at(new_investment("Cash Fund", 1_000.0), at(20));
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert_eq!(store.len(), 1);
        assert!(store.get("20").is_none());
    }

    #[test]
    fn test_failed_update_leaves_record_unchanged() {
        let mut store = PortfolioStore::load(ReadOnlyBlobStore::default());
        let id = store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap().id.clone();
        store.backend.read_only = true;

        let patch = InvestmentPatch {
            monthly_contribution: Some(9_000.0),
            ..Default::default()
        };
        assert!(store.update(&id, patch).is_err());
        assert_eq!(store.get(&id).map(|inv| inv.monthly_contribution), Some(5_000.0));
    }

    #[test]
    fn test_failed_delete_keeps_record_in_place() {
        let mut store = PortfolioStore::load(ReadOnlyBlobStore::default());
        let first = store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap().id.clone();
        let second = store.add_at(new_investment("Cash Fund", 1_000.0), at(20)).unwrap().id.clone();
        store.backend.read_only = true;

        assert!(store.delete(&first).is_err());
        let ids: Vec<_> = store.investments().iter().map(|inv| inv.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_next_id_survives_max_numeric_id() {
        let mut backend = MemoryBlobStore::new();
        let seeded = new_investment("Income Fund", 5_000.0).with_id(i64::MAX.to_string());
        backend
            .set(PORTFOLIO_KEY, &serde_json::to_string(&vec![seeded]).unwrap())
            .unwrap();

        let mut store = PortfolioStore::load(backend);
        assert_eq!(store.len(), 1);
        let first = store.add_at(new_investment("Cash Fund", 1_000.0), at(1_000)).unwrap().id.clone();
        let second = store.add_at(new_investment("Equity Fund", 1_000.0), at(1_000)).unwrap().id.clone();
        assert_eq!(first, "1000");
        assert_eq!(second, "1001");
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fund_calculator_store_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_absent_file_loads_empty() {
        let dir = scratch_dir("absent");
        let mut store = PortfolioStore::load(FileBlobStore::new(&dir));
        assert!(store.is_empty());

        store.add_at(new_investment("Income Fund", 5_000.0), at(10)).unwrap();
        let reloaded = PortfolioStore::load(FileBlobStore::new(&dir));
        assert_eq!(reloaded.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_corrupt_file_loads_empty() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{PORTFOLIO_KEY}.json")), "[{\"id\": 12").unwrap();

        let mut store = PortfolioStore::load(FileBlobStore::new(&dir));
        assert!(store.is_empty());

        store.add_at(new_investment("Cash Fund", 1_000.0), at(10)).unwrap();
        let reloaded = PortfolioStore::load(FileBlobStore::new(&dir));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.investments()[0].fund_name, "Cash Fund");
        let _ = fs::remove_dir_all(&dir);
    }
}
