use std::error::Error;
use std::fs;
use std::sync::{Arc, Mutex};

use filetime::{FileTime, set_file_mtime};
use tempfile::TempDir;
use watchfs::watch::{Callback, ChangeEvent, ChangeKind, TriggerType, Watcher, WatchSpec};

type TestResult = Result<(), Box<dyn Error>>;

fn create_files(dir: &TempDir) -> TestResult {
    for name in ["aaa.txt", "bbb.txt", "ccc.txt"] {
        fs::write(dir.path().join(name), "initial")?;
    }
    Ok(())
}

fn touch_all(dir: &TempDir) -> TestResult {
    for name in ["aaa.txt", "bbb.txt", "ccc.txt"] {
        set_file_mtime(
            dir.path().join(name),
            FileTime::from_unix_time(1_700_000_000, 0),
        )?;
    }
    Ok(())
}

#[test]
fn per_file_fires_once_per_event_in_path_order() -> TestResult {
    let dir = TempDir::new()?;
    for name in ["ccc.txt", "aaa.txt", "bbb.txt"] {
        fs::write(dir.path().join(name), "initial")?;
    }

    let batches: Arc<Mutex<Vec<Vec<ChangeEvent>>>> = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::clone(&batches);
    let mut watcher = Watcher::new();
    watcher.register(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        Callback::events(move |events: &[ChangeEvent]| {
            store.lock().unwrap().push(events.to_vec());
            Ok(())
        }),
    );

    touch_all(&dir)?;
    watcher.check();

    let batches = batches.lock().unwrap();
    // Three firings, one event each, ascending path order.
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|batch| batch.len() == 1));
    let paths: Vec<_> = batches.iter().map(|batch| batch[0].path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            dir.path().join("aaa.txt"),
            dir.path().join("bbb.txt"),
            dir.path().join("ccc.txt"),
        ]
    );
    assert!(
        batches
            .iter()
            .all(|batch| batch[0].kind == ChangeKind::Modified)
    );
    Ok(())
}

#[test]
fn any_file_fires_once_with_the_whole_batch() -> TestResult {
    let dir = TempDir::new()?;
    create_files(&dir)?;

    let batches: Arc<Mutex<Vec<Vec<ChangeEvent>>>> = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::clone(&batches);
    let mut watcher = Watcher::new();
    watcher.register(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::AnyFile,
        Callback::events(move |events: &[ChangeEvent]| {
            store.lock().unwrap().push(events.to_vec());
            Ok(())
        }),
    );

    touch_all(&dir)?;
    watcher.check();

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
    let paths: Vec<_> = batches[0].iter().map(|e| e.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            dir.path().join("aaa.txt"),
            dir.path().join("bbb.txt"),
            dir.path().join("ccc.txt"),
        ]
    );
    Ok(())
}

#[test]
fn unit_callbacks_receive_nothing_but_still_fire_per_rule() -> TestResult {
    let dir = TempDir::new()?;
    create_files(&dir)?;

    let per_file_calls = Arc::new(Mutex::new(0usize));
    let any_file_calls = Arc::new(Mutex::new(0usize));

    let mut watcher = Watcher::new();
    let counter = Arc::clone(&per_file_calls);
    watcher.register(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        Callback::unit(move || {
            *counter.lock().unwrap() += 1;
            Ok(())
        }),
    );
    let counter = Arc::clone(&any_file_calls);
    watcher.register(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::AnyFile,
        Callback::unit(move || {
            *counter.lock().unwrap() += 1;
            Ok(())
        }),
    );

    touch_all(&dir)?;
    watcher.check();

    assert_eq!(*per_file_calls.lock().unwrap(), 3);
    assert_eq!(*any_file_calls.lock().unwrap(), 1);
    Ok(())
}

#[test]
fn no_events_means_no_invocation_at_all() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("aaa.txt"), "initial")?;

    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let mut watcher = Watcher::new();
    watcher.register(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::AnyFile,
        Callback::unit(move || {
            *counter.lock().unwrap() += 1;
            Ok(())
        }),
    );

    watcher.check();
    watcher.check();
    assert_eq!(*calls.lock().unwrap(), 0);
    Ok(())
}
