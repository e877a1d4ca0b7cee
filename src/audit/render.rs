//! Audit event rendering
//!
//! Formats structured events into subject/body messages addressed to the
//! record they belong on. Messages are free-text and informational only;
//! nothing downstream parses them.

use crate::types::{AuditEvent, CustomerId, DocumentId, OrderId};

/// Record an audit message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    Customer(CustomerId),
    Document(DocumentId),
    Order(OrderId),
}

/// A rendered audit notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditMessage {
    pub subject: String,
    pub body: String,
}

/// Render an event into its audit messages
///
/// Accrual notifies both the customer and the triggering document; every
/// other event notifies the customer alone.
pub fn render(event: &AuditEvent) -> Vec<(AuditTarget, AuditMessage)> {
    match event {
        AuditEvent::CashbackEarned {
            customer,
            document,
            date,
            document_total,
            document_currency,
            percent,
            cashback_amount,
            cashback_currency,
            pending_balance,
            spendable_balance,
        } => vec![
            (
                AuditTarget::Customer(*customer),
                AuditMessage {
                    subject: "Cashback Earned".to_string(),
                    body: format!(
                        "Document: {document}\n\
                         Document Date: {date}\n\
                         Document Amount: {document_total} {document_currency}\n\
                         Cashback Percent: {percent}%\n\
                         Cashback Amount: {cashback_amount} {cashback_currency}\n\
                         Pending Cashback: {pending_balance} {cashback_currency}\n\
                         Cashback Balance: {spendable_balance} {cashback_currency}"
                    ),
                },
            ),
            (
                AuditTarget::Document(*document),
                AuditMessage {
                    subject: "Cashback Processed".to_string(),
                    body: format!(
                        "Cashback of {cashback_amount} {cashback_currency} ({percent}%) \
                         awarded to customer {customer}"
                    ),
                },
            ),
        ],

        AuditEvent::SettlementCompleted {
            customer,
            date,
            transferred,
            spendable_balance,
            currency,
        } => vec![(
            AuditTarget::Customer(*customer),
            AuditMessage {
                subject: "Monthly Cashback Settlement - Completed".to_string(),
                body: format!(
                    "Settlement Date: {date}\n\
                     Pending Cashback Transferred: {transferred} {currency}\n\
                     New Cashback Balance: {spendable_balance} {currency}\n\
                     Status: SETTLED"
                ),
            },
        )],

        AuditEvent::SettlementForfeited {
            customer,
            date,
            forfeited,
            debt,
            currency,
        } => vec![(
            AuditTarget::Customer(*customer),
            AuditMessage {
                subject: "Monthly Cashback Settlement - Reset".to_string(),
                body: format!(
                    "Settlement Date Attempted: {date}\n\
                     Pending Cashback (Before): {forfeited} {currency}\n\
                     Outstanding Debt: {debt} {currency}\n\
                     Status: PENDING CASHBACK SET TO 0"
                ),
            },
        )],

        AuditEvent::CashbackRedeemed {
            customer,
            order,
            date,
            amount,
            spendable_balance,
            currency,
        } => vec![(
            AuditTarget::Customer(*customer),
            AuditMessage {
                subject: "Cashback Redeemed".to_string(),
                body: format!(
                    "Order: {order}\n\
                     Redemption Date: {date}\n\
                     Redeemed Amount: {amount} {currency}\n\
                     New Cashback Balance: {spendable_balance} {currency}"
                ),
            },
        )],

        AuditEvent::CashbackRefunded {
            customer,
            order,
            amount,
            spendable_balance,
            currency,
        } => vec![(
            AuditTarget::Customer(*customer),
            AuditMessage {
                subject: "Cashback Refunded - Order Cancelled".to_string(),
                body: format!(
                    "Order: {order}\n\
                     Refunded Amount: {amount} {currency}\n\
                     New Cashback Balance: {spendable_balance} {currency}"
                ),
            },
        )],
    }
}
