//! Disk cache behavior through the public API.

use std::fs;
use tempfile::TempDir;
use tokviz::cache::{CacheLookup, DiskCache};

#[test]
fn entries_survive_a_new_handle() {
    let dir = TempDir::new().unwrap();
    DiskCache::with_dir(dir.path()).put("claude:m:hello", &7usize).unwrap();

    let reopened = DiskCache::with_dir(dir.path());
    assert_eq!(reopened.get::<usize>("claude:m:hello").hit(), Some(7));
    assert!(matches!(reopened.get::<usize>("claude:m:other"), CacheLookup::Miss));
}

#[test]
fn keys_differing_only_by_model_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let cache = DiskCache::with_dir(dir.path());
    cache.put("claude:a:text", &1usize).unwrap();
    cache.put("claude:b:text", &2usize).unwrap();

    assert_eq!(cache.get::<usize>("claude:a:text").hit(), Some(1));
    assert_eq!(cache.get::<usize>("claude:b:text").hit(), Some(2));
    assert_eq!(cache.entry_count().unwrap(), 2);
}

#[test]
fn unreadable_entry_is_corrupt_not_an_error() {
    let dir = TempDir::new().unwrap();
    let cache = DiskCache::with_dir(dir.path());
    fs::write(cache.path_for("k"), "{not json").unwrap();

    assert!(matches!(cache.get::<usize>("k"), CacheLookup::Corrupt(_)));

    cache.put("k", &3usize).unwrap();
    assert_eq!(cache.get::<usize>("k").hit(), Some(3));
}

#[test]
fn size_counts_entry_bytes() {
    let dir = TempDir::new().unwrap();
    let cache = DiskCache::with_dir(dir.path());
    assert_eq!(cache.size_bytes().unwrap(), 0);

    cache.put("k", &12345usize).unwrap();
    assert_eq!(cache.size_bytes().unwrap(), fs::metadata(cache.path_for("k")).unwrap().len());
}
