//! Audit message delivery

use super::render::{AuditMessage, AuditTarget};
use tracing::info;

/// Receives rendered audit messages
pub trait AuditSink {
    /// Deliver one message to its target record
    fn post(&mut self, target: AuditTarget, message: AuditMessage);
}

/// Sink that records messages in memory, for assertions
#[derive(Debug, Default)]
pub struct MemorySink {
    posted: Vec<(AuditTarget, AuditMessage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink { posted: Vec::new() }
    }

    /// Messages posted so far, in delivery order
    pub fn posted(&self) -> &[(AuditTarget, AuditMessage)] {
        &self.posted
    }
}

impl AuditSink for MemorySink {
    fn post(&mut self, target: AuditTarget, message: AuditMessage) {
        self.posted.push((target, message));
    }
}

/// Sink that logs messages through tracing, used by the binary
#[derive(Debug, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn post(&mut self, target: AuditTarget, message: AuditMessage) {
        info!(?target, subject = %message.subject, body = %message.body, "audit");
    }
}
