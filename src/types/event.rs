//! Structured audit events
//!
//! Engine operations do not write notification text themselves. Each
//! operation returns one of these events inside its outcome; the
//! [`audit`](crate::audit) module renders them into subject/body messages and
//! posts them to an [`AuditSink`](crate::audit::AuditSink). This keeps the
//! computation free of presentation concerns.

use super::currency::Currency;
use super::customer::CustomerId;
use super::document::{DocumentId, OrderId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A notification-worthy fact produced by an engine operation
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEvent {
    /// Cashback was accrued from a posted document
    CashbackEarned {
        customer: CustomerId,
        document: DocumentId,
        date: NaiveDate,
        document_total: Decimal,
        document_currency: Currency,
        percent: u32,
        cashback_amount: Decimal,
        cashback_currency: Currency,
        pending_balance: Decimal,
        spendable_balance: Decimal,
    },

    /// Monthly settlement transferred the pending balance
    SettlementCompleted {
        customer: CustomerId,
        date: NaiveDate,
        transferred: Decimal,
        spendable_balance: Decimal,
        currency: Currency,
    },

    /// Monthly settlement forfeited the pending balance due to debt
    SettlementForfeited {
        customer: CustomerId,
        date: NaiveDate,
        forfeited: Decimal,
        debt: Decimal,
        currency: Currency,
    },

    /// Spendable balance was redeemed against an order
    CashbackRedeemed {
        customer: CustomerId,
        order: OrderId,
        date: NaiveDate,
        amount: Decimal,
        spendable_balance: Decimal,
        currency: Currency,
    },

    /// A cancelled order's cashback lines were compensated back
    CashbackRefunded {
        customer: CustomerId,
        order: OrderId,
        amount: Decimal,
        spendable_balance: Decimal,
        currency: Currency,
    },
}

impl AuditEvent {
    /// The customer this event concerns
    pub fn customer(&self) -> CustomerId {
        match self {
            AuditEvent::CashbackEarned { customer, .. }
            | AuditEvent::SettlementCompleted { customer, .. }
            | AuditEvent::SettlementForfeited { customer, .. }
            | AuditEvent::CashbackRedeemed { customer, .. }
            | AuditEvent::CashbackRefunded { customer, .. } => *customer,
        }
    }
}
