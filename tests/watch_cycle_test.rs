//! End-to-end polling cycles over a scripted catalog source.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use stickerwatch::client::CatalogSource;
use stickerwatch::market::{Item, StickerDirectory};
use stickerwatch::store::{FoundStore, SnapshotCache};
use stickerwatch::watcher::Watcher;
use stickerwatch::{Result, WatchError};
use tempfile::TempDir;

const BASE: &str = "https://market.test";

enum ScriptedCycle {
    Ok { name: String, body: String },
    NameError,
    BodyError,
    AuthError,
}

/// Catalog source that replays a fixed script of cycles.
struct ScriptedSource {
    cycles: Mutex<VecDeque<ScriptedCycle>>,
}

impl ScriptedSource {
    fn new(cycles: Vec<ScriptedCycle>) -> Self {
        Self {
            cycles: Mutex::new(cycles.into_iter().collect()),
        }
    }
}

impl CatalogSource for ScriptedSource {
    async fn snapshot_name(&self) -> Result<String> {
        let mut cycles = self.cycles.lock().unwrap();
        match cycles.front() {
            Some(ScriptedCycle::Ok { name, .. }) => Ok(name.clone()),
            Some(ScriptedCycle::BodyError) => Ok("doomed.csv".to_string()),
            Some(ScriptedCycle::NameError) => {
                cycles.pop_front();
                Err(WatchError::Status {
                    status: 502,
                    url: format!("{}/itemdb/current.json", BASE),
                })
            }
            Some(ScriptedCycle::AuthError) => {
                cycles.pop_front();
                Err(WatchError::Auth("session expired".to_string()))
            }
            None => panic!("catalog script exhausted"),
        }
    }

    async fn snapshot_body(&self, _name: &str) -> Result<String> {
        let mut cycles = self.cycles.lock().unwrap();
        match cycles.pop_front() {
            Some(ScriptedCycle::Ok { body, .. }) => Ok(body),
            Some(ScriptedCycle::BodyError) => Err(WatchError::Status {
                status: 500,
                url: format!("{}/itemdb/doomed.csv", BASE),
            }),
            _ => panic!("unexpected snapshot body fetch"),
        }
    }
}

fn ok(name: &str, rows: &[&str]) -> ScriptedCycle {
    let mut body = String::from("header\n");
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    ScriptedCycle::Ok {
        name: name.to_string(),
        body,
    }
}

fn listing(class_id: &str, instance_id: &str, stickers: &str, name: &str) -> String {
    format!(
        "{};{};15000;1;x;x;FN;x;x;{};{};x;{} (Hash)",
        class_id, instance_id, stickers, name, name
    )
}

fn directory() -> StickerDirectory {
    StickerDirectory::from_json(
        r#"{"stickers": [
            {"id": "10", "name": "Plain | Event 2014"},
            {"id": "20", "name": "Holo | Event 2014"}
        ]}"#,
    )
    .unwrap()
}

fn watch_ids(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn watcher_in(dir: &TempDir, source: ScriptedSource, ids: &[&str]) -> Watcher<ScriptedSource> {
    Watcher::new(
        source,
        directory(),
        watch_ids(ids),
        FoundStore::new(&dir.path().join("found_items.json")),
        SnapshotCache::new(&dir.path().join("market_items.csv")),
        BASE.to_string(),
        Duration::from_secs(60),
    )
}

fn persisted(dir: &TempDir) -> Vec<Item> {
    let raw = std::fs::read_to_string(dir.path().join("found_items.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn match_then_no_duplicate_then_prune() {
    let dir = TempDir::new().unwrap();
    let row = listing("A", "1", "10|20", "AK-47 | Redline");
    let source = ScriptedSource::new(vec![
        ok("db_1.csv", &[&row]),
        ok("db_2.csv", &[&row]),
        ok("db_3.csv", &[]),
    ]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    // First sighting is reported and retained.
    let first = watcher.cycle().await.unwrap();
    assert_eq!(first.newly_matched, 1);
    assert_eq!(first.found_len, 1);
    assert_eq!(persisted(&dir).len(), 1);
    assert_eq!(persisted(&dir)[0].class_id, "A");

    // Identical snapshot: no duplicate alert.
    let second = watcher.cycle().await.unwrap();
    assert_eq!(second.newly_matched, 0);
    assert_eq!(second.found_len, 1);

    // Item delisted: found-set is pruned and the file reflects it.
    let third = watcher.cycle().await.unwrap();
    assert_eq!(third.newly_matched, 0);
    assert_eq!(third.found_len, 0);
    assert!(persisted(&dir).is_empty());
}

#[tokio::test]
async fn delisted_then_relisted_is_reported_again() {
    let dir = TempDir::new().unwrap();
    let row = listing("A", "1", "20", "Souvenir Case");
    let source = ScriptedSource::new(vec![
        ok("db_1.csv", &[&row]),
        ok("db_2.csv", &[]),
        ok("db_3.csv", &[&row]),
    ]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    assert_eq!(watcher.cycle().await.unwrap().newly_matched, 1);
    assert_eq!(watcher.cycle().await.unwrap().found_len, 0);
    assert_eq!(watcher.cycle().await.unwrap().newly_matched, 1);
}

#[tokio::test]
async fn transient_failure_leaves_state_and_next_cycle_proceeds() {
    let dir = TempDir::new().unwrap();
    let row = listing("A", "1", "20", "M4A4 | Asiimov");
    let source = ScriptedSource::new(vec![
        ok("db_1.csv", &[&row]),
        ScriptedCycle::BodyError,
        ScriptedCycle::NameError,
        ok("db_2.csv", &[&row]),
    ]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    assert_eq!(watcher.cycle().await.unwrap().newly_matched, 1);

    let body_err = watcher.cycle().await.unwrap_err();
    assert!(!body_err.is_fatal());
    let name_err = watcher.cycle().await.unwrap_err();
    assert!(!name_err.is_fatal());

    // Found-set untouched by the failed cycles: same snapshot, nothing new.
    assert_eq!(watcher.found().len(), 1);
    let recovered = watcher.cycle().await.unwrap();
    assert_eq!(recovered.newly_matched, 0);
    assert_eq!(recovered.found_len, 1);
}

#[tokio::test]
async fn unwatched_items_never_enter_found_set() {
    let dir = TempDir::new().unwrap();
    let rows = [
        listing("A", "1", "10", "Watched sticker missing"),
        listing("B", "2", "", "No stickers at all"),
    ];
    let source = ScriptedSource::new(vec![ok("db_1.csv", &[&rows[0], &rows[1]])]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    let report = watcher.cycle().await.unwrap();

    assert_eq!(report.catalog_len, 2);
    assert_eq!(report.newly_matched, 0);
    assert!(persisted(&dir).is_empty());
}

#[tokio::test]
async fn run_stops_on_shutdown_after_cycle() {
    let dir = TempDir::new().unwrap();
    let row = listing("A", "1", "20", "AWP | Dragon Lore");
    let source = ScriptedSource::new(vec![ok("db_1.csv", &[&row])]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = shutdown_tx.send(true);
    });

    let result = tokio::time::timeout(Duration::from_secs(5), watcher.run(shutdown_rx)).await;

    assert!(result.expect("run should stop before the timeout").is_ok());
    assert_eq!(watcher.found().len(), 1);
}

#[tokio::test]
async fn run_surfaces_authentication_failure() {
    let dir = TempDir::new().unwrap();
    let source = ScriptedSource::new(vec![ScriptedCycle::AuthError]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let result = tokio::time::timeout(Duration::from_secs(5), watcher.run(shutdown_rx)).await;

    let err = result
        .expect("run should fail fast")
        .expect_err("authentication failure must end the run");
    assert!(err.is_fatal());
}

#[tokio::test]
async fn snapshot_cache_reflects_last_fetch() {
    let dir = TempDir::new().unwrap();
    let row = listing("A", "1", "20", "P250 | Sand Dune");
    let source = ScriptedSource::new(vec![ok("db_1.csv", &[&row]), ok("db_2.csv", &[])]);
    let mut watcher = watcher_in(&dir, source, &["20"]);

    watcher.cycle().await.unwrap();
    let cached_first = std::fs::read_to_string(dir.path().join("market_items.csv")).unwrap();
    assert!(cached_first.contains("P250 | Sand Dune"));

    watcher.cycle().await.unwrap();
    let cached_second = std::fs::read_to_string(dir.path().join("market_items.csv")).unwrap();
    assert_eq!(cached_second, "header\n");
}
