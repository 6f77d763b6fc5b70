// src/watch/mod.rs

//! Poll-based change detection and trigger dispatch.
//!
//! This module is responsible for:
//! - Expanding watch specs (glob patterns or explicit path lists) into
//!   snapshots of the filesystem (`spec.rs`, `resolve.rs`).
//! - Diffing snapshots into ordered change events (`state.rs`).
//! - Turning a batch of events into callback/action firings per the trigger
//!   granularity (`dispatch.rs`).
//! - Driving the whole resolve → diff → dispatch → snapshot-swap cycle per
//!   registration (`watcher.rs`, `async_watcher.rs`).
//!
//! It is a pull-based primitive: nothing here starts a timer, a thread, or an
//! OS-level file watch. The caller invokes `check()` whenever it wants a poll;
//! the CLI layer in `lib.rs` is one such caller.

pub mod async_watcher;
pub mod dispatch;
pub mod resolve;
pub mod spec;
pub mod state;
pub mod watcher;

pub use async_watcher::AsyncWatcher;
pub use dispatch::{AsyncCallback, Callback, CallbackFuture, Handler, firing_batches};
pub use resolve::{Resolution, resolve};
pub use spec::{GlobPattern, TriggerType, WatchSpec};
pub use state::{ChangeEvent, ChangeKind, FileState, Snapshot, diff};
pub use watcher::{CheckOutcome, Registration, RegistrationId, Watcher, WatcherCore};
