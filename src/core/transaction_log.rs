//! Cashback transaction log
//!
//! This module provides the TransactionLog component that maintains the
//! append-only ledger of cashback transactions. The log assigns IDs, answers
//! the settlement engine's month-window query, and routes every status change
//! through the [`CashbackStatus`](crate::types::CashbackStatus) state
//! machine, which is what keeps terminal records immutable.

use crate::types::{CashbackError, CashbackStatus, CashbackTransaction, CustomerId, TransactionId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Append-only ledger of cashback transactions
///
/// IDs are assigned sequentially starting at 1. A `BTreeMap` keeps iteration
/// in creation order for deterministic reporting.
#[derive(Debug, Default)]
pub struct TransactionLog {
    transactions: BTreeMap<TransactionId, CashbackTransaction>,
    next_id: TransactionId,
}

impl TransactionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        TransactionLog {
            transactions: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Append a transaction, returning its assigned ID
    pub fn append(&mut self, transaction: CashbackTransaction) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;
        self.transactions.insert(id, transaction);
        id
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Option<&CashbackTransaction> {
        self.transactions.get(&id)
    }

    /// Number of transactions in the log
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate over all transactions in creation order
    pub fn iter(&self) -> impl Iterator<Item = (TransactionId, &CashbackTransaction)> {
        self.transactions.iter().map(|(id, tx)| (*id, tx))
    }

    /// IDs of a customer's `Earned` transactions dated within `[from, to]`
    ///
    /// This is the settlement engine's selection query: the current calendar
    /// month's accruals that have not been through a settlement run yet.
    pub fn earned_in_window(
        &self,
        customer: CustomerId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<TransactionId> {
        self.transactions
            .iter()
            .filter(|(_, tx)| {
                tx.customer == customer
                    && tx.status == CashbackStatus::Earned
                    && tx.date >= from
                    && tx.date <= to
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Mark a transaction as selected for settlement
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the transition
    /// is illegal.
    pub fn mark_pending_settlement(&mut self, id: TransactionId) -> Result<(), CashbackError> {
        self.set_status(id, CashbackStatus::PendingSettlement, "mark_pending_settlement")
    }

    /// Mark a transaction as settled on the given date
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the transition
    /// is illegal.
    pub fn mark_settled(
        &mut self,
        id: TransactionId,
        settlement_date: NaiveDate,
    ) -> Result<(), CashbackError> {
        self.set_status(id, CashbackStatus::Settled, "mark_settled")?;
        if let Some(tx) = self.transactions.get_mut(&id) {
            tx.settlement_date = Some(settlement_date);
        }
        Ok(())
    }

    /// Mark a transaction as reset (forfeited)
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the transition
    /// is illegal.
    pub fn mark_reset(&mut self, id: TransactionId) -> Result<(), CashbackError> {
        self.set_status(id, CashbackStatus::Reset, "mark_reset")
    }

    fn set_status(
        &mut self,
        id: TransactionId,
        next: CashbackStatus,
        operation: &str,
    ) -> Result<(), CashbackError> {
        let tx = self
            .transactions
            .get_mut(&id)
            .ok_or_else(|| CashbackError::transaction_not_found(id, operation))?;

        tx.status = tx.status.transition(next)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;
    use rust_decimal::Decimal;

    fn earned_tx(customer: CustomerId, date: NaiveDate) -> CashbackTransaction {
        CashbackTransaction {
            customer,
            document: Some(10),
            percent: 5,
            source_amount: Decimal::new(10000, 2),
            source_currency: Currency::new("USD"),
            cashback_amount: Decimal::new(500, 2),
            cashback_currency: Currency::new("USD"),
            date,
            status: CashbackStatus::Earned,
            settlement_date: None,
            note: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut log = TransactionLog::new();

        let first = log.append(earned_tx(1, day(2025, 3, 5)));
        let second = log.append(earned_tx(1, day(2025, 3, 6)));

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_earned_in_window_filters_customer_status_and_dates() {
        let mut log = TransactionLog::new();
        let in_window = log.append(earned_tx(1, day(2025, 3, 5)));
        log.append(earned_tx(2, day(2025, 3, 5))); // other customer
        let last_month = log.append(earned_tx(1, day(2025, 2, 25)));
        let settled = log.append(earned_tx(1, day(2025, 3, 8)));
        log.mark_pending_settlement(settled).unwrap();
        log.mark_settled(settled, day(2025, 3, 31)).unwrap();

        let ids = log.earned_in_window(1, day(2025, 3, 1), day(2025, 3, 31));

        assert_eq!(ids, vec![in_window]);
        assert!(!ids.contains(&last_month));
    }

    #[test]
    fn test_mark_settled_records_settlement_date() {
        let mut log = TransactionLog::new();
        let id = log.append(earned_tx(1, day(2025, 3, 5)));

        log.mark_pending_settlement(id).unwrap();
        log.mark_settled(id, day(2025, 3, 31)).unwrap();

        let tx = log.get(id).unwrap();
        assert_eq!(tx.status, CashbackStatus::Settled);
        assert_eq!(tx.settlement_date, Some(day(2025, 3, 31)));
    }

    #[test]
    fn test_mark_settled_requires_pending_settlement_first() {
        let mut log = TransactionLog::new();
        let id = log.append(earned_tx(1, day(2025, 3, 5)));

        // Skipping the selection step is an illegal transition
        let result = log.mark_settled(id, day(2025, 3, 31));
        assert!(matches!(
            result.unwrap_err(),
            CashbackError::InvalidStatusTransition { .. }
        ));
        assert_eq!(log.get(id).unwrap().status, CashbackStatus::Earned);
    }

    #[test]
    fn test_terminal_transaction_cannot_be_reset() {
        let mut log = TransactionLog::new();
        let id = log.append(earned_tx(1, day(2025, 3, 5)));
        log.mark_pending_settlement(id).unwrap();
        log.mark_settled(id, day(2025, 3, 31)).unwrap();

        let result = log.mark_reset(id);
        assert!(matches!(
            result.unwrap_err(),
            CashbackError::InvalidStatusTransition { .. }
        ));
    }

    #[test]
    fn test_direct_reset_from_earned() {
        let mut log = TransactionLog::new();
        let id = log.append(earned_tx(1, day(2025, 3, 5)));

        log.mark_reset(id).unwrap();

        assert_eq!(log.get(id).unwrap().status, CashbackStatus::Reset);
    }

    #[test]
    fn test_mark_on_nonexistent_transaction() {
        let mut log = TransactionLog::new();

        let result = log.mark_pending_settlement(999);
        assert!(matches!(
            result.unwrap_err(),
            CashbackError::TransactionNotFound { .. }
        ));
    }
}
