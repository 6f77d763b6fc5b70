// src/watch/dispatch.rs

//! Trigger-granularity dispatch rules, shared by both watcher variants.
//!
//! The split into firing batches is the whole state machine here: `PerFile`
//! turns N events into N single-event firings (already in path order),
//! `AnyFile` turns them into one firing carrying the full batch. Whether a
//! firing then runs a boxed closure, an awaited future, or an action list is
//! the watcher's business, not this module's.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::actions::Action;
use crate::watch::spec::TriggerType;
use crate::watch::state::ChangeEvent;

/// Boxed future returned by async callbacks.
pub type CallbackFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// A blocking callback.
///
/// The two variants replace the original flag-style "pass extra arguments"
/// toggle with types: `Unit` callbacks receive nothing, `Events` callbacks
/// receive the firing's batch. Under `PerFile` the batch is always a single
/// event; under `AnyFile` it is the full ordered change list for the cycle.
pub enum Callback {
    Unit(Box<dyn FnMut() -> anyhow::Result<()> + Send>),
    Events(Box<dyn FnMut(&[ChangeEvent]) -> anyhow::Result<()> + Send>),
}

impl Callback {
    pub fn unit<F>(f: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        Callback::Unit(Box::new(f))
    }

    pub fn events<F>(f: F) -> Self
    where
        F: FnMut(&[ChangeEvent]) -> anyhow::Result<()> + Send + 'static,
    {
        Callback::Events(Box::new(f))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Callback::Unit(_) => "Callback::Unit",
            Callback::Events(_) => "Callback::Events",
        };
        f.debug_struct(name).finish_non_exhaustive()
    }
}

/// A cooperatively-scheduled callback. Same shape as [`Callback`], but each
/// invocation yields a future the watcher awaits to completion before moving
/// on. Events own their data so the future can outlive the call site.
pub enum AsyncCallback {
    Unit(Box<dyn FnMut() -> CallbackFuture + Send>),
    Events(Box<dyn FnMut(Vec<ChangeEvent>) -> CallbackFuture + Send>),
}

impl AsyncCallback {
    pub fn unit<F, Fut>(mut f: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        AsyncCallback::Unit(Box::new(move || Box::pin(f())))
    }

    pub fn events<F, Fut>(mut f: F) -> Self
    where
        F: FnMut(Vec<ChangeEvent>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        AsyncCallback::Events(Box::new(move |events| Box::pin(f(events))))
    }
}

impl fmt::Debug for AsyncCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AsyncCallback::Unit(_) => "AsyncCallback::Unit",
            AsyncCallback::Events(_) => "AsyncCallback::Events",
        };
        f.debug_struct(name).finish_non_exhaustive()
    }
}

/// What a registration does when it fires: call back into code, or run a
/// declarative action list. Action lists go through the same dispatch rules
/// as callbacks; they are simply the callback body used when the caller
/// configured actions instead of code.
#[derive(Debug)]
pub enum Handler<C> {
    Callback(C),
    Actions(Vec<Action>),
}

/// Split a check cycle's ordered events into firing batches per the trigger
/// granularity. An empty event list yields no firings at all.
pub fn firing_batches<'a>(
    trigger: TriggerType,
    events: &'a [ChangeEvent],
) -> Vec<&'a [ChangeEvent]> {
    if events.is_empty() {
        return Vec::new();
    }
    match trigger {
        TriggerType::PerFile => events.chunks(1).collect(),
        TriggerType::AnyFile => vec![events],
    }
}
