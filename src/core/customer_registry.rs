//! Customer registry
//!
//! This module provides the `CustomerRegistry` struct which maintains the
//! cashback state of all known customers and provides the balance operations
//! the engines build on.
//!
//! The registry is responsible for:
//! - Holding customer records keyed by ID
//! - Mutating the pending/spendable balance pair with checked arithmetic
//! - Selecting customers that qualify for settlement
//! - Providing sorted customer listings for output

use crate::types::{CashbackError, Customer, CustomerId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Maintains all customer cashback state
///
/// The registry keeps an in-memory map of customer IDs to customer records.
/// Customers are created by the host (seeded through [`insert`](Self::insert));
/// the engines only mutate balances and percents through the operations here,
/// which preserve the non-negativity of both balances.
#[derive(Debug, Default)]
pub struct CustomerRegistry {
    /// Map of customer IDs to customer state
    customers: HashMap<CustomerId, Customer>,
}

impl CustomerRegistry {
    /// Create a new registry with no customers
    pub fn new() -> Self {
        CustomerRegistry {
            customers: HashMap::new(),
        }
    }

    /// Insert or replace a customer record
    pub fn insert(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    /// Get a customer by ID
    pub fn get(&self, customer: CustomerId) -> Option<&Customer> {
        self.customers.get(&customer)
    }

    /// Get a customer by ID, failing if absent
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::CustomerNotFound`] if no customer with the
    /// given ID exists.
    pub fn require(&self, customer: CustomerId) -> Result<&Customer, CashbackError> {
        self.customers
            .get(&customer)
            .ok_or_else(|| CashbackError::customer_not_found(customer))
    }

    fn require_mut(&mut self, customer: CustomerId) -> Result<&mut Customer, CashbackError> {
        self.customers
            .get_mut(&customer)
            .ok_or_else(|| CashbackError::customer_not_found(customer))
    }

    /// Get all customers sorted by ID
    ///
    /// Sorted output keeps CSV generation and settlement iteration
    /// deterministic.
    pub fn all_sorted(&self) -> Vec<&Customer> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by_key(|customer| customer.id);
        customers
    }

    /// IDs of customers that qualify for a settlement run
    ///
    /// A customer qualifies with `cashback_percent > 0` and a positive
    /// pending balance. Customers whose pending balance is already zero are
    /// not selected, which is what makes re-running settlement a no-op.
    pub fn settlement_candidates(&self) -> Vec<CustomerId> {
        let mut ids: Vec<CustomerId> = self
            .customers
            .values()
            .filter(|c| c.cashback_percent > 0 && c.pending_balance > Decimal::ZERO)
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Add accrued cashback to a customer's pending balance
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the addition would
    /// overflow.
    pub fn accrue_pending(
        &mut self,
        customer: CustomerId,
        amount: Decimal,
    ) -> Result<(), CashbackError> {
        let record = self.require_mut(customer)?;

        record.pending_balance = record
            .pending_balance
            .checked_add(amount)
            .ok_or_else(|| CashbackError::arithmetic_overflow("accrue_pending", customer))?;

        Ok(())
    }

    /// Transfer the full pending balance into the spendable balance
    ///
    /// Zeroes the pending balance and returns the transferred amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the addition to the
    /// spendable balance would overflow; the pending balance is untouched on
    /// failure.
    pub fn settle_pending(&mut self, customer: CustomerId) -> Result<Decimal, CashbackError> {
        let record = self.require_mut(customer)?;

        let transferred = record.pending_balance;
        let new_spendable = record
            .spendable_balance
            .checked_add(transferred)
            .ok_or_else(|| CashbackError::arithmetic_overflow("settle_pending", customer))?;

        record.spendable_balance = new_spendable;
        record.pending_balance = Decimal::ZERO;

        Ok(transferred)
    }

    /// Forfeit the full pending balance
    ///
    /// Zeroes the pending balance without touching the spendable balance and
    /// returns the forfeited amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist.
    pub fn forfeit_pending(&mut self, customer: CustomerId) -> Result<Decimal, CashbackError> {
        let record = self.require_mut(customer)?;

        let forfeited = record.pending_balance;
        record.pending_balance = Decimal::ZERO;

        Ok(forfeited)
    }

    /// Deduct a redeemed amount from the spendable balance
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist, the amount exceeds
    /// the spendable balance, or the subtraction would underflow.
    pub fn deduct_spendable(
        &mut self,
        customer: CustomerId,
        amount: Decimal,
    ) -> Result<(), CashbackError> {
        let record = self.require_mut(customer)?;

        if record.spendable_balance < amount {
            return Err(CashbackError::exceeds_spendable_balance(
                customer,
                amount,
                record.spendable_balance,
            ));
        }

        record.spendable_balance = record
            .spendable_balance
            .checked_sub(amount)
            .ok_or_else(|| CashbackError::arithmetic_underflow("deduct_spendable", customer))?;

        Ok(())
    }

    /// Restore a compensated amount to the spendable balance
    ///
    /// Used by order-cancellation compensation.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the addition would
    /// overflow.
    pub fn restore_spendable(
        &mut self,
        customer: CustomerId,
        amount: Decimal,
    ) -> Result<(), CashbackError> {
        let record = self.require_mut(customer)?;

        record.spendable_balance = record
            .spendable_balance
            .checked_add(amount)
            .ok_or_else(|| CashbackError::arithmetic_overflow("restore_spendable", customer))?;

        Ok(())
    }

    /// Assign the given percent to every customer currently lacking one
    ///
    /// Customers with an explicit (non-zero) percent keep it. Returns the
    /// number of customers updated.
    pub fn assign_default_percent(&mut self, percent: u32) -> usize {
        let mut updated = 0;
        for customer in self.customers.values_mut() {
            if customer.cashback_percent == 0 {
                customer.cashback_percent = percent;
                updated += 1;
            }
        }
        updated
    }
}
