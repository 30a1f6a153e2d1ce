//! # System Lifecycle
//!
//! Starting, wiring and stopping the actor behind the HTTP service.
//!
//! ## Start-up
//!
//! [`UserSystem::start`] builds the user actor (seeded with the four default users),
//! spawns its loop on the Tokio runtime and keeps the [`UserClient`](crate::clients::UserClient)
//! that the HTTP router clones into every handler.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop every client** - the router's clones go away when the server stops,
//!    [`UserSystem::shutdown`] drops the last one
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`, the loop logs its
//!    final size and ends
//! 3. **Await completion** - the join handle reports a panicked actor as an error
//!
//! The store is process-lifetime only; nothing is flushed on shutdown.

pub mod user_system;

pub use user_system::*;
