use restpad::history::{HistoryLog, MAX_ENTRIES, RequestSnapshot};
use restpad::http::Method;
use restpad::storage::FileStore;
use restpad::variable::{Variable, VariableStore};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn snapshot(url: String) -> RequestSnapshot {
    RequestSnapshot {
        method: Method::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

/// Two variable stores opened on the same directory do not see each other's
/// writes. Each one rewrites the whole collection, so the last writer wins.
#[test]
fn test_variable_stores_last_writer_wins() {
    let temp_dir = TempDir::new().unwrap();

    let mut first = VariableStore::load(Arc::new(FileStore::new(temp_dir.path())));
    let mut second = VariableStore::load(Arc::new(FileStore::new(temp_dir.path())));

    first.add(Variable::new("from_first", "1")).unwrap();
    second.add(Variable::new("from_second", "2")).unwrap();

    let reloaded = VariableStore::load(Arc::new(FileStore::new(temp_dir.path())));
    assert_eq!(reloaded.get("from_second"), Some("2"));
    assert_eq!(reloaded.get("from_first"), None);
}

/// Sequential appends from separate handles re-read storage every time, so
/// nothing is lost when they don't overlap.
#[test]
fn test_interleaved_history_handles() {
    let temp_dir = TempDir::new().unwrap();
    let a = HistoryLog::new(Arc::new(FileStore::new(temp_dir.path())));
    let b = HistoryLog::new(Arc::new(FileStore::new(temp_dir.path())));

    a.append(snapshot("https://example.com/a".to_string()));
    b.append(snapshot("https://example.com/b".to_string()));
    a.append(snapshot("https://example.com/c".to_string()));

    let urls: Vec<String> = b.list().into_iter().map(|e| e.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/c",
            "https://example.com/b",
            "https://example.com/a"
        ]
    );
}

/// Overlapping appends may drop entries, but the stored document always
/// stays a readable, bounded list.
#[test]
fn test_concurrent_appends_keep_document_valid() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Arc::new(temp_dir.path().to_path_buf());

    let thread_count = 4;
    let entries_per_thread = 20;

    let handles: Vec<_> = (0..thread_count)
        .map(|i| {
            let dir = dir.clone();
            thread::spawn(move || {
                let log = HistoryLog::new(Arc::new(FileStore::new(dir.as_path())));
                for j in 0..entries_per_thread {
                    log.append(snapshot(format!("https://example.com/{}/{}", i, j)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let log = HistoryLog::new(Arc::new(FileStore::new(temp_dir.path())));
    let entries = log.list();
    assert!(!entries.is_empty());
    assert!(entries.len() <= MAX_ENTRIES);
}
