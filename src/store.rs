use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::HISTORY_MAX;
use crate::model::{GeneratedLinks, Order, OrderKind};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One generated contract, kept so its links stay reachable after the
/// draft moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub contract_number: String,
    pub kind: OrderKind,
    pub client_name: String,
    pub event_date: String,
    pub links: GeneratedLinks,
    pub created_at: String,
}

/// Draft and history persistence under `<data_root>/data`. Storage being
/// unavailable is never fatal: reads fall back to empty, writes surface an
/// error the caller may log and ignore, and in-memory editing continues.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(root: &Path) -> Result<Store, StoreError> {
        let dir = root.join("data");
        fs::create_dir_all(&dir)?;
        Ok(Store { dir })
    }

    fn draft_path(&self, kind: OrderKind) -> PathBuf {
        self.dir.join(format!("draft-{}.json", kind.as_str()))
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    pub fn load_draft(&self, kind: OrderKind) -> Option<Order> {
        let path = self.draft_path(kind);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!("unreadable draft at {}: {e}", path.display());
                    None
                }
            },
            Err(e) => {
                warn!("failed to read draft at {}: {e}", path.display());
                None
            }
        }
    }

    pub fn save_draft(&self, order: &Order) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(order)?;
        fs::write(self.draft_path(order.kind()), json)?;
        Ok(())
    }

    pub fn clear_draft(&self, kind: OrderKind) {
        fs::remove_file(self.draft_path(kind)).ok();
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        let path = self.history_path();
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path).map(|c| serde_json::from_str(&c)) {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                warn!("unreadable history at {}: {e}", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("failed to read history at {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(self.history_path(), json)?;
        Ok(())
    }

    /// Prepends a new entry; the oldest entries past the cap are evicted.
    pub fn add_history(
        &self,
        contract_number: &str,
        kind: OrderKind,
        client_name: &str,
        event_date: &str,
        links: GeneratedLinks,
    ) -> Result<HistoryEntry, StoreError> {
        let now = Utc::now();
        let entry = HistoryEntry {
            id: format!("{}-{}", contract_number, now.timestamp_millis()),
            contract_number: contract_number.to_string(),
            kind,
            client_name: client_name.to_string(),
            event_date: event_date.to_string(),
            links,
            created_at: now.to_rfc3339(),
        };
        let mut entries = self.history();
        entries.insert(0, entry.clone());
        entries.truncate(HISTORY_MAX);
        self.save_history(&entries)?;
        Ok(entry)
    }

    pub fn remove_history(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.history();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if removed {
            self.save_history(&entries)?;
        }
        Ok(removed)
    }

    pub fn clear_history(&self) {
        fs::remove_file(self.history_path()).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> GeneratedLinks {
        GeneratedLinks {
            doc_url: "https://docs.example/d".to_string(),
            pdf_url: "https://docs.example/p".to_string(),
            pdf_download_url: "https://docs.example/dl".to_string(),
            file_name: None,
        }
    }

    #[test]
    fn drafts_round_trip_per_kind() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let mut order = Order::new(OrderKind::Booth);
        order.client_name = "Ana".to_string();
        store.save_draft(&order).unwrap();

        assert_eq!(store.load_draft(OrderKind::Booth), Some(order));
        assert_eq!(store.load_draft(OrderKind::Music), None);

        store.clear_draft(OrderKind::Booth);
        assert_eq!(store.load_draft(OrderKind::Booth), None);
    }

    #[test]
    fn corrupt_drafts_load_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        fs::write(store.draft_path(OrderKind::Dj), "{not json").unwrap();
        assert_eq!(store.load_draft(OrderKind::Dj), None);
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        for i in 0..(HISTORY_MAX + 5) {
            store
                .add_history(&format!("{i:03}"), OrderKind::Music, "Juan", "5 de junio", links())
                .unwrap();
        }

        let history = store.history();
        assert_eq!(history.len(), HISTORY_MAX);
        // Newest entry leads; the first five inserted were evicted.
        assert_eq!(history[0].contract_number, format!("{:03}", HISTORY_MAX + 4));
        assert!(history.iter().all(|e| e.contract_number != "000"));
    }

    #[test]
    fn history_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let entry = store
            .add_history("001", OrderKind::Dj, "Ana", "Fecha no especificada", links())
            .unwrap();
        store.add_history("002", OrderKind::Dj, "Luis", "Fecha no especificada", links()).unwrap();

        assert!(store.remove_history(&entry.id).unwrap());
        assert!(!store.remove_history(&entry.id).unwrap());
        assert_eq!(store.history().len(), 1);

        store.clear_history();
        assert!(store.history().is_empty());
    }
}
