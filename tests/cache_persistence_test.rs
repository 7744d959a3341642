//! Persistent cache behaviour against a real directory

use chrono::{Duration as ChronoDuration, Utc};
use gitstack::cache::{profile_key, repo_key, FileStore, Freshness, ResultStore, TtlClass};
use gitstack::{ScanCache, ScanResult, TtlPolicy};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_cache(dir: &TempDir) -> (ScanCache, Arc<FileStore>) {
    let store = Arc::new(FileStore::new(dir.path()));
    (ScanCache::new(store.clone(), TtlPolicy::default()), store)
}

fn techs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_round_trip_before_expiry() {
    let dir = TempDir::new().unwrap();
    let (cache, _) = file_cache(&dir);
    let written = ScanResult::new(techs(&["React", "TypeScript", "Vite"]));
    cache.put(&repo_key("octo", "app"), &written);

    let read = cache.repo("octo", "app").expect("fresh record");
    assert_eq!(read.result.technologies, written.technologies);
    assert_eq!(read.freshness, Freshness::Fresh);
}

#[test]
fn test_expired_record_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let (cache, _) = file_cache(&dir);
    let old = ScanResult::new(techs(&["Go"])).with_timestamp(Utc::now() - ChronoDuration::minutes(11));
    cache.put(&repo_key("octo", "app"), &old);

    assert!(cache.repo("octo", "app").is_none());
    // still present for callers that ignore age
    assert!(cache.peek(&repo_key("octo", "app")).is_some());
}

#[test]
fn test_ttl_classes_are_independent() {
    let dir = TempDir::new().unwrap();
    let (cache, _) = file_cache(&dir);
    let twenty_minutes = ScanResult::new(techs(&["Go"])).with_timestamp(Utc::now() - ChronoDuration::minutes(20));
    cache.put(&repo_key("octo", "app"), &twenty_minutes);

    assert!(cache.repo("octo", "app").is_none());
    assert!(cache
        .lookup(&repo_key("octo", "app"), TtlClass::Profile)
        .is_some());
}

#[test]
fn test_corrupted_record_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let (cache, store) = file_cache(&dir);
    let key = profile_key("octo");
    cache.put(&key, &ScanResult::aggregate(techs(&["Docker"]), 3));

    fs::write(store.path_for(&key), "{ truncated").unwrap();
    assert!(cache.profile("octo").is_none());
    assert!(store.load(&key).unwrap().is_none());
}

#[test]
fn test_records_survive_a_new_cache_instance() {
    let dir = TempDir::new().unwrap();
    {
        let (cache, _) = file_cache(&dir);
        cache.put(&profile_key("Octo"), &ScanResult::aggregate(techs(&["Rust"]), 4));
    }

    let (cache, _) = file_cache(&dir);
    let read = cache.profile("octo").expect("persisted aggregate");
    assert_eq!(read.result.repo_count, Some(4));
}

#[test]
fn test_empty_result_without_prior_record_is_not_written() {
    let dir = TempDir::new().unwrap();
    let (cache, _) = file_cache(&dir);
    let key = repo_key("octo", "empty");

    assert!(!cache.record(&key, &ScanResult::new(vec![])));
    assert!(cache.peek(&key).is_none());

    cache.put(&key, &ScanResult::new(techs(&["Go"])));
    assert!(cache.record(&key, &ScanResult::new(vec![])));
    assert!(cache.peek(&key).unwrap().is_empty());
}
