//! Customer-related types for the cashback engine
//!
//! This module defines the Customer structure holding the cashback-relevant
//! state the engines mutate: the accrual percent and the two balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer identifier
///
/// Supports customer IDs from 0 to 4,294,967,295
pub type CustomerId = u32;

/// Customer cashback state
///
/// Customers are owned by the host's registry; this crate only mutates the
/// cashback fields. The two balances are kept non-negative by the
/// [`CustomerRegistry`](crate::core::CustomerRegistry) operations:
/// `pending_balance` only grows via accrual and is zeroed by settlement
/// (transferred or forfeited), `spendable_balance` only grows via settlement
/// or cancellation compensation and only shrinks via redemption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer ID
    pub id: CustomerId,

    /// Display name, used in audit messages
    #[serde(default)]
    pub name: String,

    /// Cashback percentage applied to posted documents (e.g. 5 for 5%)
    ///
    /// A percent of zero means the customer does not participate in the
    /// cashback program; accrual silently skips such customers.
    #[serde(default)]
    pub cashback_percent: u32,

    /// Cashback earned this accrual period, not yet spendable
    #[serde(default)]
    pub pending_balance: Decimal,

    /// Cashback that has cleared settlement and can be redeemed
    #[serde(default)]
    pub spendable_balance: Decimal,

    /// Maximum outstanding exposure allowed at order confirmation
    ///
    /// `None` disables the credit-limit guard for this customer.
    #[serde(default)]
    pub credit_limit: Option<Decimal>,
}

impl Customer {
    /// Create a new customer with zero balances and no cashback percent
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
            cashback_percent: 0,
            pending_balance: Decimal::ZERO,
            spendable_balance: Decimal::ZERO,
            credit_limit: None,
        }
    }

    /// Builder-style setter for the cashback percent
    pub fn with_percent(mut self, percent: u32) -> Self {
        self.cashback_percent = percent;
        self
    }

    /// Builder-style setter for the credit limit
    pub fn with_credit_limit(mut self, limit: Decimal) -> Self {
        self.credit_limit = Some(limit);
        self
    }
}
