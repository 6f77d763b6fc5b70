// src/actions/notify.rs

use crate::watch::state::ChangeEvent;

const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// Print one human-readable line for a single change.
///
/// Output shape: `[notify] File <path> has been <kind>`, with a colored
/// header so it stands out between command output.
pub fn notify(event: &ChangeEvent) {
    println!(
        "{GREEN}[notify]{RESET} File {} has been {}",
        event.path.display(),
        event.kind
    );
}
