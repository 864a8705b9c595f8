//! Runtime support for deferred work.
//!
//! Everything in this crate runs on one thread. The only work that happens
//! "later" (the EcoGuide reply and toast expiry) goes through the
//! [`Scheduler`], whose clock only moves when its owner advances it.

mod scheduler;

pub use scheduler::{Scheduler, TaskId};
