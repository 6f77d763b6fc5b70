// src/watch/async_watcher.rs

use std::time::Instant;

use tracing::{debug, warn};

use crate::actions;
use crate::errors::WatchError;
use crate::watch::dispatch::{AsyncCallback, Handler, firing_batches};
use crate::watch::resolve::{self, Resolution};
use crate::watch::state::diff;
use crate::watch::watcher::{CheckOutcome, WatcherCore};

/// The cooperative variant: same registrations, same per-registration
/// algorithm as [`crate::watch::Watcher`], but callbacks and command actions
/// are awaited instead of blocking the caller's thread.
///
/// Registrations are processed strictly sequentially: each one's dispatch is
/// awaited to completion before the next one's resolve begins, so both
/// variants give identical "what fired, in what order, with what arguments"
/// guarantees.
pub type AsyncWatcher = WatcherCore<AsyncCallback>;

impl WatcherCore<AsyncCallback> {
    /// Detect and dispatch changes for every registration, in registration
    /// order, awaiting each callback/action to completion.
    ///
    /// A registration's snapshot is swapped in only after its dispatch has
    /// completed. If the returned future is dropped mid-dispatch, the old
    /// snapshot stays in place and the same changes are recomputed on the
    /// next check (at-least-once re-detection). Overlapping checks cannot
    /// happen: `&mut self` makes a second call while one is suspended a
    /// compile error.
    pub async fn check(&mut self) -> CheckOutcome {
        let started = Instant::now();
        let mut outcome = CheckOutcome::default();

        for reg in self.registrations_mut() {
            let Resolution { snapshot, failures } = resolve::resolve(reg.spec());
            outcome.errors.extend(failures);

            let events = diff(reg.snapshot(), &snapshot);
            debug!(
                spec = %reg.spec().describe(),
                changes = events.len(),
                "resolved and diffed"
            );

            for batch in firing_batches(reg.trigger(), &events) {
                match reg.handler_mut() {
                    Handler::Callback(callback) => {
                        let result = match callback {
                            AsyncCallback::Unit(f) => f().await,
                            AsyncCallback::Events(f) => f(batch.to_vec()).await,
                        };
                        if let Err(err) = result {
                            warn!(error = %err, "callback failed");
                            outcome.errors.push(WatchError::Callback(err));
                        }
                    }
                    Handler::Actions(actions) => {
                        outcome
                            .errors
                            .extend(actions::run_all_async(actions, batch).await);
                    }
                }
            }

            reg.commit_snapshot(snapshot);
            outcome.events.extend(events);
        }

        self.record_check_duration(started.elapsed());
        outcome
    }
}
