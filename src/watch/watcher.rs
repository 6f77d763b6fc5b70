// src/watch/watcher.rs

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::actions::{self, Action};
use crate::errors::WatchError;
use crate::watch::dispatch::{Callback, Handler, firing_batches};
use crate::watch::resolve::{self, Resolution};
use crate::watch::spec::{TriggerType, WatchSpec};
use crate::watch::state::{ChangeEvent, Snapshot, diff};

/// Identifies one registration within its owning watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// One registered interest: what to track, how often to fire, what to do,
/// and the snapshot from the end of the most recent completed check.
///
/// Owned exclusively by its watcher; `check` is the only thing that mutates
/// the snapshot after registration.
pub struct Registration<C> {
    id: RegistrationId,
    spec: WatchSpec,
    trigger: TriggerType,
    handler: Handler<C>,
    snapshot: Snapshot,
}

impl<C> Registration<C> {
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    pub fn spec(&self) -> &WatchSpec {
        &self.spec
    }

    pub fn trigger(&self) -> TriggerType {
        self.trigger
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub(crate) fn handler_mut(&mut self) -> &mut Handler<C> {
        &mut self.handler
    }

    pub(crate) fn commit_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }
}

/// Everything one `check` call observed and collected.
///
/// `events` lists every change dispatched, in dispatch order (registration
/// order, path order within a registration). `errors` carries per-path
/// resolution failures plus callback/action failures; `check` itself never
/// fails, so a broken registration cannot starve the ones after it.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub events: Vec<ChangeEvent>,
    pub errors: Vec<WatchError>,
}

/// Shared state machine behind both watcher variants.
///
/// Holds the ordered registration list and drives
/// resolve → diff → dispatch → snapshot-swap per registration on each check.
/// The type parameter is the callback representation ([`Watcher`] plugs in
/// blocking closures, [`crate::watch::AsyncWatcher`] plugs in future-returning
/// ones), which is the only place the two variants differ.
///
/// Both `check` methods take `&mut self`, so overlapping checks on one
/// watcher are a compile error rather than a runtime hazard; there is no
/// internal locking, and sharing a watcher across threads requires external
/// synchronization.
pub struct WatcherCore<C> {
    registrations: Vec<Registration<C>>,
    next_id: u64,
    last_check_duration: Option<Duration>,
}

/// The blocking variant: callbacks run on the caller's thread and `check`
/// returns once every registration has been processed.
pub type Watcher = WatcherCore<Callback>;

impl<C> WatcherCore<C> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            next_id: 0,
            last_check_duration: None,
        }
    }

    /// Register a callback-backed watch.
    ///
    /// Resolves the spec immediately and stores the result as the baseline
    /// snapshot, so files that already exist at registration time never fire.
    pub fn register(&mut self, spec: WatchSpec, trigger: TriggerType, callback: C) -> RegistrationId {
        self.insert(spec, trigger, Handler::Callback(callback))
    }

    /// Register an action-backed watch.
    ///
    /// An empty action list is rejected: the registration could never do
    /// anything when fired.
    pub fn register_actions(
        &mut self,
        spec: WatchSpec,
        trigger: TriggerType,
        actions: Vec<Action>,
    ) -> Result<RegistrationId, WatchError> {
        if actions.is_empty() {
            return Err(WatchError::NoActions);
        }
        Ok(self.insert(spec, trigger, Handler::Actions(actions)))
    }

    fn insert(&mut self, spec: WatchSpec, trigger: TriggerType, handler: Handler<C>) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;

        let Resolution { snapshot, failures } = resolve::resolve(&spec);
        if !failures.is_empty() {
            warn!(
                spec = %spec.describe(),
                failures = failures.len(),
                "baseline resolve had per-path failures"
            );
        }

        info!(
            spec = %spec.describe(),
            trigger = %trigger,
            baseline = snapshot.len(),
            "registered watch"
        );

        self.registrations.push(Registration {
            id,
            spec,
            trigger,
            handler,
            snapshot,
        });
        id
    }

    /// Remove a registration. Returns false if the id is unknown (e.g.
    /// already unregistered).
    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|reg| reg.id != id);
        before != self.registrations.len()
    }

    /// The stored snapshot for a registration, as of the end of the most
    /// recent completed check (or the baseline, before any check ran).
    pub fn snapshot(&self, id: RegistrationId) -> Option<&Snapshot> {
        self.registrations
            .iter()
            .find(|reg| reg.id == id)
            .map(Registration::snapshot)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Wall-clock duration of the most recent check, callbacks included.
    pub fn last_check_duration(&self) -> Option<Duration> {
        self.last_check_duration
    }

    pub(crate) fn registrations_mut(&mut self) -> &mut [Registration<C>] {
        &mut self.registrations
    }

    pub(crate) fn record_check_duration(&mut self, elapsed: Duration) {
        self.last_check_duration = Some(elapsed);
    }
}

impl<C> Default for WatcherCore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for WatcherCore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherCore")
            .field("registrations", &self.registrations.len())
            .finish_non_exhaustive()
    }
}

impl WatcherCore<Callback> {
    /// Detect and dispatch changes for every registration, in registration
    /// order.
    ///
    /// Per registration: resolve the spec, diff against the stored snapshot,
    /// fire the handler per the trigger granularity, then swap in the new
    /// snapshot. The swap is unconditional: a dispatch failure consumes its
    /// events rather than re-firing them on every later check.
    ///
    /// `check` never sleeps or loops; repeated polling is the caller's job.
    pub fn check(&mut self) -> CheckOutcome {
        let started = Instant::now();
        let mut outcome = CheckOutcome::default();

        for reg in self.registrations_mut() {
            let Resolution { snapshot, failures } = resolve::resolve(&reg.spec);
            outcome.errors.extend(failures);

            let events = diff(&reg.snapshot, &snapshot);
            debug!(
                spec = %reg.spec.describe(),
                changes = events.len(),
                "resolved and diffed"
            );

            for batch in firing_batches(reg.trigger, &events) {
                match &mut reg.handler {
                    Handler::Callback(callback) => {
                        let result = match callback {
                            Callback::Unit(f) => f(),
                            Callback::Events(f) => f(batch),
                        };
                        if let Err(err) = result {
                            warn!(spec = %reg.spec.describe(), error = %err, "callback failed");
                            outcome.errors.push(WatchError::Callback(err));
                        }
                    }
                    Handler::Actions(actions) => {
                        outcome.errors.extend(actions::run_all(actions, batch));
                    }
                }
            }

            reg.snapshot = snapshot;
            outcome.events.extend(events);
        }

        self.record_check_duration(started.elapsed());
        outcome
    }
}
