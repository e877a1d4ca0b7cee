//! Cashback ledger record types
//!
//! This module defines the append-only audit records the engines produce:
//! cashback transactions (accrual and settlement events) and redemption
//! records, plus the guarded status state machine governing transaction
//! lifecycle.

use super::currency::Currency;
use super::customer::CustomerId;
use super::document::{DocumentId, OrderId};
use super::error::CashbackError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cashback transaction identifier, assigned by the transaction log
pub type TransactionId = u64;

/// Redemption record identifier, assigned by the redemption log
pub type RedemptionId = u64;

/// Lifecycle status of a cashback transaction
///
/// Statuses form a small state machine rather than a free-form flag. The only
/// legal transitions are:
///
/// - `Earned` → `PendingSettlement` (selected by a settlement run)
/// - `PendingSettlement` → `Settled` (debt-free settlement)
/// - `PendingSettlement` → `Reset` (forfeited due to outstanding debt)
/// - `Earned` → `Reset`
///
/// `Settled` and `Reset` are terminal; any transition out of them, and any
/// transition that skips or reverses the chain, is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashbackStatus {
    /// Transaction just created by accrual
    Earned,
    /// Selected by a settlement run, decision pending
    PendingSettlement,
    /// Transferred to the customer's spendable balance
    Settled,
    /// Forfeited; the pending amount was not transferred
    Reset,
}

impl CashbackStatus {
    /// Whether this status permits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, CashbackStatus::Settled | CashbackStatus::Reset)
    }

    /// Whether a transition from `self` to `next` is legal
    pub fn can_transition_to(self, next: CashbackStatus) -> bool {
        use CashbackStatus::*;
        matches!(
            (self, next),
            (Earned, PendingSettlement)
                | (PendingSettlement, Settled)
                | (PendingSettlement, Reset)
                | (Earned, Reset)
        )
    }

    /// Validate a transition, returning the new status
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::InvalidStatusTransition`] if the transition
    /// skips a step, reverses the chain, or leaves a terminal status.
    pub fn transition(self, next: CashbackStatus) -> Result<CashbackStatus, CashbackError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CashbackError::invalid_status_transition(self, next))
        }
    }
}

impl fmt::Display for CashbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashbackStatus::Earned => "earned",
            CashbackStatus::PendingSettlement => "pending_settlement",
            CashbackStatus::Settled => "settled",
            CashbackStatus::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Audit record of one accrual or settlement event
///
/// Created with status `Earned` by the accrual engine, or directly in a
/// terminal status by the settlement engine for its summary records. Once a
/// record reaches a terminal status it is never mutated again; the state
/// machine enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashbackTransaction {
    /// The customer that earned (or forfeited) the cashback
    pub customer: CustomerId,

    /// The document that triggered the accrual, if any
    ///
    /// Settlement summary records have no source document.
    pub document: Option<DocumentId>,

    /// Cashback percent applied (zero for settlement summaries)
    pub percent: u32,

    /// Source amount in the source currency
    ///
    /// The full document total for accruals; the outstanding debt for
    /// forfeiture summaries.
    pub source_amount: Decimal,

    /// Currency of the source amount
    pub source_currency: Currency,

    /// Cashback amount in the cashback currency
    pub cashback_amount: Decimal,

    /// Currency of the cashback amount (the company currency)
    pub cashback_currency: Currency,

    /// Event date
    pub date: NaiveDate,

    /// Lifecycle status
    pub status: CashbackStatus,

    /// Date the cashback was transferred to the spendable balance
    pub settlement_date: Option<NaiveDate>,

    /// Free-text note
    pub note: Option<String>,
}

/// Immutable log entry of one redemption
///
/// Created only by the redemption engine and read by the cooldown check.
/// Order cancellation compensates the balance but deliberately leaves these
/// records untouched, so the cooldown still counts a redemption whose order
/// was later cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionRecord {
    /// The customer that redeemed
    pub customer: CustomerId,

    /// The order the redemption was applied to
    pub order: OrderId,

    /// Redeemed amount
    pub amount: Decimal,

    /// Redemption date
    pub date: NaiveDate,

    /// Free-text note
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::select(CashbackStatus::Earned, CashbackStatus::PendingSettlement)]
    #[case::settle(CashbackStatus::PendingSettlement, CashbackStatus::Settled)]
    #[case::forfeit(CashbackStatus::PendingSettlement, CashbackStatus::Reset)]
    #[case::direct_reset(CashbackStatus::Earned, CashbackStatus::Reset)]
    fn test_legal_transitions(#[case] from: CashbackStatus, #[case] to: CashbackStatus) {
        assert!(from.can_transition_to(to));
        assert_eq!(from.transition(to).unwrap(), to);
    }

    #[rstest]
    #[case::skip_to_settled(CashbackStatus::Earned, CashbackStatus::Settled)]
    #[case::reverse_selection(CashbackStatus::PendingSettlement, CashbackStatus::Earned)]
    #[case::leave_settled(CashbackStatus::Settled, CashbackStatus::Reset)]
    #[case::leave_reset(CashbackStatus::Reset, CashbackStatus::Earned)]
    #[case::reopen_settled(CashbackStatus::Settled, CashbackStatus::PendingSettlement)]
    #[case::self_transition(CashbackStatus::Earned, CashbackStatus::Earned)]
    fn test_illegal_transitions(#[case] from: CashbackStatus, #[case] to: CashbackStatus) {
        assert!(!from.can_transition_to(to));

        let result = from.transition(to);
        assert!(matches!(
            result.unwrap_err(),
            CashbackError::InvalidStatusTransition { .. }
        ));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!CashbackStatus::Earned.is_terminal());
        assert!(!CashbackStatus::PendingSettlement.is_terminal());
        assert!(CashbackStatus::Settled.is_terminal());
        assert!(CashbackStatus::Reset.is_terminal());
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(CashbackStatus::Earned.to_string(), "earned");
        assert_eq!(
            CashbackStatus::PendingSettlement.to_string(),
            "pending_settlement"
        );
        assert_eq!(CashbackStatus::Settled.to_string(), "settled");
        assert_eq!(CashbackStatus::Reset.to_string(), "reset");
    }
}
