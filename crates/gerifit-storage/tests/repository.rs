use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_storage::error::StorageError;
use gerifit_storage::{AssessmentRepository, JsonFileRepository, MemoryRepository};
use jiff::civil::date;
use uuid::Uuid;

fn assessment(name: &str) -> Assessment {
    let mut a = Assessment::new(date(2024, 5, 10));
    a.name = name.to_string();
    a.gender = Gender::Male;
    a.tug_seconds = 11.0;
    a
}

fn exercise(repo: &mut dyn AssessmentRepository) {
    assert!(repo.list().unwrap().is_empty());

    let first = repo.append(assessment("Ana")).unwrap();
    let second = repo.append(assessment("Bruno")).unwrap();
    assert_ne!(first.id, second.id);
    assert!(second.created_at >= first.created_at);

    let names: Vec<_> = repo
        .list()
        .unwrap()
        .into_iter()
        .map(|r| r.assessment.name)
        .collect();
    assert_eq!(names, ["Bruno", "Ana"]);

    assert_eq!(repo.get(first.id).unwrap(), first);
    assert!(matches!(
        repo.get(Uuid::new_v4()),
        Err(StorageError::NotFound { .. })
    ));
}

#[test]
fn memory_repository_lists_newest_first() {
    exercise(&mut MemoryRepository::new());
}

#[test]
fn file_repository_lists_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = JsonFileRepository::open(dir.path().join("records.json")).unwrap();
    exercise(&mut repo);
}

#[test]
fn file_repository_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("records.json");

    let saved = {
        let mut repo = JsonFileRepository::open(&path).unwrap();
        repo.append(assessment("Carla")).unwrap()
    };
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let reopened = JsonFileRepository::open(&path).unwrap();
    let records = reopened.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], saved);
}

#[test]
fn empty_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, "").unwrap();
    let repo = JsonFileRepository::open(&path).unwrap();
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        JsonFileRepository::open(&path),
        Err(StorageError::Serialization(_))
    ));
}

#[test]
fn failed_write_leaves_the_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let mut repo = JsonFileRepository::open(&path).unwrap();
    let kept = repo.append(assessment("Ana")).unwrap();

    // A directory where the temp file goes makes the next write fail.
    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

    let err = repo.append(assessment("Bruno")).unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));

    let ids: Vec<_> = repo.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, [kept.id]);
    let reopened = JsonFileRepository::open(&path).unwrap();
    assert_eq!(reopened.list().unwrap().len(), 1);
}

#[test]
fn unwritable_location_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"a file, not a directory").unwrap();

    let mut repo = JsonFileRepository::open(blocker.join("records.json")).unwrap();
    assert!(matches!(
        repo.append(assessment("Ana")),
        Err(StorageError::Write { .. })
    ));
    assert!(repo.list().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn record_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let mut repo = JsonFileRepository::open(&path).unwrap();
    repo.append(assessment("Ana")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
