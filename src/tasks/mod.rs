//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: drops expired responses from the in-memory backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;
