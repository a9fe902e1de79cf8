//! Integration tests for recent repository lists persisted through the JSON store.

use hubrecents::recent::RecentRepositories;
use hubrecents::storage::{JsonStore, KeyValueStore, MemoryStore};
use hubrecents::{open_session, Config, Repository, ScopeOwner, MAX_SIZE};
use tempfile::tempdir;

fn org() -> ScopeOwner {
    ScopeOwner::organization(20, "octo-org")
}

#[test]
fn test_bad_input() {
    let recent = RecentRepositories::load(&org(), &MemoryStore::default());
    assert!(!recent.contains_repository(None::<&Repository>));
    assert!(!recent.contains(None::<&str>));
    assert!(!recent.contains(""));
}

#[test]
fn test_max_reached() {
    let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());

    for i in 0..MAX_SIZE {
        let id = format!("owner/repo{i}");
        recent.add(&id);
        assert!(recent.contains(id.as_str()));
    }

    recent.add("owner/repoLast");
    assert!(recent.contains("owner/repoLast"));
    assert!(!recent.contains("owner/repo0"));

    for i in 1..MAX_SIZE {
        assert!(recent.contains(format!("owner/repo{i}").as_str()));
    }
}

#[test]
fn test_max_reached_with_twenty_entries() {
    let mut recent = RecentRepositories::load_with_capacity(&org(), &MemoryStore::default(), 20);

    for i in 0..20 {
        recent.add(&format!("owner/repo{i}"));
    }
    assert_eq!(recent.len(), 20);

    recent.add("owner/repoLast");
    assert!(recent.contains("owner/repoLast"));
    assert!(!recent.contains("owner/repo0"));
    for i in 1..20 {
        assert!(recent.contains(format!("owner/repo{i}").as_str()));
    }
    assert_eq!(recent.len(), 20);
}

#[test]
fn test_io_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = JsonStore::open(path.clone()).unwrap();
    let mut recent1 = RecentRepositories::load(&org(), &store);
    recent1.add("owner/repo");
    assert!(recent1.contains("owner/repo"));
    recent1.save(&mut store).unwrap();
    drop(store);

    let store = JsonStore::open(path).unwrap();
    let recent2 = RecentRepositories::load(&org(), &store);
    assert!(recent2.contains("owner/repo"));
}

#[test]
fn test_save_is_idempotent_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut store = JsonStore::open(path.clone()).unwrap();
    let mut recent = RecentRepositories::load(&org(), &store);
    recent.add("owner/a").add("owner/b");

    recent.save(&mut store).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    recent.save(&mut store).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.get("recent_repos_20").unwrap().as_deref(), Some("owner/a,owner/b"));
}

#[test]
fn test_session_round_trip_through_config() {
    let dir = tempdir().unwrap();
    let config = Config {
        data_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    };
    let me = ScopeOwner::user(1, "octocat");

    {
        let mut session = open_session(&config, me.clone()).unwrap();
        session.recent_repositories(&org()).add("octo-org/tools");
        session.recent_for_account().add("octocat/dotfiles");
        session.save_all().unwrap();
    }

    let mut session = open_session(&config, me).unwrap();
    assert!(session.recent_repositories(&org()).contains("octo-org/tools"));
    assert!(!session.recent_repositories(&org()).contains("octocat/dotfiles"));
    assert!(session.recent_for_account().contains("octocat/dotfiles"));
}

#[test]
fn test_corrupt_store_degrades_to_empty_session() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("store.json"), "{not json").unwrap();
    let config = Config {
        data_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    };

    let mut session = open_session(&config, ScopeOwner::user(1, "octocat")).unwrap();
    assert!(session.recent_repositories(&org()).is_empty());

    session.recent_repositories(&org()).add("octo-org/tools");
    session.save_recent(&org()).unwrap();
    drop(session);

    let mut session = open_session(&config, ScopeOwner::user(1, "octocat")).unwrap();
    assert!(session.recent_repositories(&org()).contains("octo-org/tools"));
    assert!(dir.path().join("store.json.corrupt").exists());
}
