//! External collaborator traits
//!
//! The host platform supplies currency conversion and the outstanding-debt
//! figure; this crate only consumes them. The traits keep the engine testable
//! and let the CLI plug in table-backed implementations.

use crate::types::{CashbackError, Currency, CustomerId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Converts monetary amounts between currencies
pub trait CurrencyConverter {
    /// Convert `amount` from one currency to another at the given reference
    /// date
    ///
    /// Implementations must return the amount unchanged when `from == to`.
    ///
    /// # Errors
    ///
    /// Returns an error if no rate is known for the pair or the conversion
    /// overflows.
    fn convert(
        &self,
        amount: Decimal,
        from: &Currency,
        to: &Currency,
        as_of: NaiveDate,
    ) -> Result<Decimal, CashbackError>;
}

/// Supplies the total unpaid amount a customer owes
///
/// The settlement engine treats a debt of exactly zero as debt-free; any
/// other value forfeits the period's accrual.
pub trait DebtProvider {
    /// Outstanding receivable for the customer, in company currency
    fn debt_of(&self, customer: CustomerId) -> Decimal;
}

/// Rate-table currency converter
///
/// Holds one rate per ordered currency pair. Suitable for scenarios and
/// tests; a production host would back this trait with its own rate service.
#[derive(Debug, Default)]
pub struct FixedRateConverter {
    rates: HashMap<(Currency, Currency), Decimal>,
}

impl FixedRateConverter {
    /// Create a converter with no rates
    pub fn new() -> Self {
        FixedRateConverter {
            rates: HashMap::new(),
        }
    }

    /// Register a rate for the ordered pair `from -> to`
    pub fn set_rate(&mut self, from: Currency, to: Currency, rate: Decimal) {
        self.rates.insert((from, to), rate);
    }

    /// Builder-style variant of [`set_rate`](Self::set_rate)
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.set_rate(from, to, rate);
        self
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn convert(
        &self,
        amount: Decimal,
        from: &Currency,
        to: &Currency,
        _as_of: NaiveDate,
    ) -> Result<Decimal, CashbackError> {
        if from == to {
            return Ok(amount);
        }

        let rate = self
            .rates
            .get(&(from.clone(), to.clone()))
            .ok_or_else(|| CashbackError::rate_unavailable(from, to))?;

        amount
            .checked_mul(*rate)
            .ok_or_else(|| CashbackError::ConversionOverflow {
                from: from.clone(),
                to: to.clone(),
            })
    }
}

/// Map-backed debt provider
///
/// Customers without an entry owe nothing.
#[derive(Debug, Default)]
pub struct StaticDebtProvider {
    debts: HashMap<CustomerId, Decimal>,
}

impl StaticDebtProvider {
    /// Create a provider with no recorded debts
    pub fn new() -> Self {
        StaticDebtProvider {
            debts: HashMap::new(),
        }
    }

    /// Record a customer's outstanding debt
    pub fn set_debt(&mut self, customer: CustomerId, amount: Decimal) {
        self.debts.insert(customer, amount);
    }

    /// Builder-style variant of [`set_debt`](Self::set_debt)
    pub fn with_debt(mut self, customer: CustomerId, amount: Decimal) -> Self {
        self.set_debt(customer, amount);
        self
    }
}

impl DebtProvider for StaticDebtProvider {
    fn debt_of(&self, customer: CustomerId) -> Decimal {
        self.debts.get(&customer).copied().unwrap_or(Decimal::ZERO)
    }
}
