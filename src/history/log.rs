use super::model::{HistoryEntry, RequestSnapshot};
use crate::Result;
use crate::storage::{HISTORY_KEY, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Newest entries kept; older ones are evicted on append.
pub const MAX_ENTRIES: usize = 50;

/// Size-bounded request history, newest first.
///
/// Each `append` is a read-modify-write of the whole list. Nothing guards
/// that cycle, so two writers on the same storage can lose each other's
/// entry (last writer wins).
pub struct HistoryLog {
    backend: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Record a request.
    ///
    /// Best-effort: storage failures are logged and swallowed so the caller's
    /// submission flow is never interrupted. The built entry is returned either way.
    /// A corrupted document is replaced, but when the backend itself cannot be
    /// read the stored list is left untouched.
    pub fn append(&self, snapshot: RequestSnapshot) -> HistoryEntry {
        let entry = HistoryEntry::from_snapshot(snapshot);

        let raw = match self.backend.get(HISTORY_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read request history, entry not saved: {}", e);
                return entry;
            }
        };

        let mut entries = parse_entries(raw.as_deref()).unwrap_or_else(|e| {
            warn!("Request history is corrupted, starting over: {}", e);
            Vec::new()
        });
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);

        match self.write_entries(&entries) {
            Ok(()) => debug!(id = %entry.id, total = entries.len(), "History entry saved"),
            Err(e) => warn!("Failed to save request history: {}", e),
        }

        entry
    }

    /// All entries, newest first. Unreadable or corrupted storage reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read request history, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Page `page` (1-based) of the newest-first list.
    pub fn page(&self, page: usize, size: usize) -> Vec<HistoryEntry> {
        paginate(&self.list(), page, size).to_vec()
    }

    pub fn page_count(&self, size: usize) -> usize {
        page_count(self.list().len(), size)
    }

    fn read_entries(&self) -> Result<Vec<HistoryEntry>> {
        parse_entries(self.backend.get(HISTORY_KEY)?.as_deref())
    }

    fn write_entries(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.backend.set(HISTORY_KEY, &json)
    }
}

fn parse_entries(raw: Option<&str>) -> Result<Vec<HistoryEntry>> {
    match raw {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Vec::new()),
    }
}

/// Items `[(page - 1) * size, page * size)`; out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if page == 0 || size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestpadError;
    use crate::http::types::Method;
    use crate::storage::MemoryStore;
    use std::sync::Mutex;

    fn snapshot(url: &str) -> RequestSnapshot {
        RequestSnapshot {
            method: Method::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(RestpadError::Storage("read-only".to_string()))
        }
    }

    #[test]
    fn test_append_is_newest_first() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        log.append(snapshot("https://example.com/1"));
        log.append(snapshot("https://example.com/2"));

        let entries = log.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://example.com/2");
        assert_eq!(entries[1].url, "https://example.com/1");
    }

    #[test]
    fn test_bounded_to_max_entries() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        for i in 0..=MAX_ENTRIES {
            log.append(snapshot(&format!("https://example.com/{}", i)));
        }

        let entries = log.list();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].url, format!("https://example.com/{}", MAX_ENTRIES));
        assert!(entries.iter().all(|e| e.url != "https://example.com/0"));
    }

    #[test]
    fn test_corrupted_history_reads_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(HISTORY_KEY, "not json").unwrap();

        let log = HistoryLog::new(backend);
        assert!(log.list().is_empty());

        log.append(snapshot("https://example.com"));
        assert_eq!(log.list().len(), 1);
    }

    struct UnreadableStore {
        writes: Mutex<usize>,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(RestpadError::Storage("locked".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_unreadable_backend_is_not_overwritten() {
        let backend = Arc::new(UnreadableStore {
            writes: Mutex::new(0),
        });
        let log = HistoryLog::new(backend.clone());

        let entry = log.append(snapshot("https://example.com"));
        assert_eq!(entry.url, "https://example.com");
        assert_eq!(*backend.writes.lock().unwrap(), 0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let log = HistoryLog::new(Arc::new(ReadOnlyStore));
        let entry = log.append(snapshot("https://example.com"));

        assert_eq!(entry.url, "https://example.com");
        assert!(log.list().is_empty());
    }

    #[test]
    fn test_paginate() {
        let items: Vec<usize> = (0..25).collect();

        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &items[20..25]);
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_page_over_log() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        for i in 0..12 {
            log.append(snapshot(&format!("https://example.com/{}", i)));
        }

        assert_eq!(log.page_count(10), 2);
        let second = log.page(2, 10);
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].url, "https://example.com/0");
    }
}
