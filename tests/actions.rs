use std::error::Error;
use std::fs;

use filetime::{FileTime, set_file_mtime};
use tempfile::TempDir;
use watchfs::actions::Action;
use watchfs::errors::WatchError;
use watchfs::watch::{TriggerType, Watcher, WatchSpec};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn cmd_template_substitutes_the_changed_path() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("aaa.txt");
    let log = dir.path().join("fired.log");
    fs::write(&file, "initial")?;

    let mut watcher = Watcher::new();
    watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        vec![Action::Cmd {
            template: format!("echo {{0}} >> {}", log.display()),
        }],
    )?;

    set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 0))?;
    let outcome = watcher.check();

    assert!(outcome.errors.is_empty());
    let logged = fs::read_to_string(&log)?;
    assert_eq!(logged.trim(), file.display().to_string());
    Ok(())
}

#[test]
fn any_file_cmd_runs_once_per_affected_path() -> TestResult {
    let dir = TempDir::new()?;
    let aaa = dir.path().join("aaa.txt");
    let bbb = dir.path().join("bbb.txt");
    let log = dir.path().join("fired.log");
    fs::write(&aaa, "initial")?;
    fs::write(&bbb, "initial")?;

    let mut watcher = Watcher::new();
    watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::AnyFile,
        vec![Action::Cmd {
            template: format!("echo {{0}} >> {}", log.display()),
        }],
    )?;

    set_file_mtime(&aaa, FileTime::from_unix_time(1_700_000_000, 0))?;
    set_file_mtime(&bbb, FileTime::from_unix_time(1_700_000_000, 0))?;
    let outcome = watcher.check();

    assert!(outcome.errors.is_empty());
    let logged = fs::read_to_string(&log)?;
    let lines: Vec<_> = logged.lines().collect();
    assert_eq!(
        lines,
        vec![aaa.display().to_string(), bbb.display().to_string()]
    );
    Ok(())
}

#[test]
fn failing_action_does_not_skip_later_actions() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("aaa.txt");
    let marker = dir.path().join("still-ran.log");
    fs::write(&file, "initial")?;

    let mut watcher = Watcher::new();
    watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        vec![
            Action::Cmd {
                template: "false".to_string(),
            },
            Action::Cmd {
                template: format!("echo {{0}} >> {}", marker.display()),
            },
        ],
    )?;

    set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 0))?;
    let outcome = watcher.check();

    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        outcome.errors[0],
        WatchError::CommandStatus { code: 1, .. }
    ));
    assert!(marker.exists(), "second action still ran");
    Ok(())
}

#[test]
fn notify_alongside_cmd_keeps_both_running() -> TestResult {
    let dir = TempDir::new()?;
    let file = dir.path().join("aaa.txt");
    let log = dir.path().join("fired.log");
    fs::write(&file, "initial")?;

    let mut watcher = Watcher::new();
    watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        vec![
            Action::Notify,
            Action::Cmd {
                template: format!("echo {{0}} >> {}", log.display()),
            },
        ],
    )?;

    set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 0))?;
    let outcome = watcher.check();

    assert!(outcome.errors.is_empty());
    assert!(log.exists());
    Ok(())
}

#[test]
fn empty_action_list_is_rejected_at_registration() -> TestResult {
    let dir = TempDir::new()?;
    let mut watcher = Watcher::new();
    let result = watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        Vec::new(),
    );

    assert!(matches!(result, Err(WatchError::NoActions)));
    assert!(watcher.is_empty());
    Ok(())
}

#[tokio::test]
async fn async_cmd_action_fires_too() -> TestResult {
    use watchfs::watch::AsyncWatcher;

    let dir = TempDir::new()?;
    let file = dir.path().join("aaa.txt");
    let log = dir.path().join("fired.log");
    fs::write(&file, "initial")?;

    let mut watcher = AsyncWatcher::new();
    watcher.register_actions(
        WatchSpec::glob(&format!("{}/*.txt", dir.path().display()))?,
        TriggerType::PerFile,
        vec![Action::Cmd {
            template: format!("echo {{0}} >> {}", log.display()),
        }],
    )?;

    set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 0))?;
    let outcome = watcher.check().await;

    assert!(outcome.errors.is_empty());
    let logged = fs::read_to_string(&log)?;
    assert_eq!(logged.trim(), file.display().to_string());
    Ok(())
}
