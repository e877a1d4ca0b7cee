//! Audit notification module
//!
//! Engine operations return structured [`AuditEvent`](crate::types::AuditEvent)
//! values; this module turns them into human-readable messages and delivers
//! them. `render` owns all formatting, `sink` owns delivery, so the engines
//! never touch presentation.

pub mod render;
pub mod sink;

pub use render::{render, AuditMessage, AuditTarget};
pub use sink::{AuditSink, MemorySink, TracingSink};
