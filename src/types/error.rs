//! Error types for the cashback engine
//!
//! Failures fall into the two classes the engines distinguish, plus the
//! infrastructure around them:
//!
//! - **Rejected operations**: redemption validation, the configuration
//!   cross-field rule, the credit-limit guard. Surfaced synchronously to the
//!   caller with a human-readable reason; the triggering operation aborts
//!   with no partial state change.
//! - **Integrity failures**: unknown customers, illegal status transitions,
//!   checked-arithmetic overflow, missing exchange rates.
//! - **I/O and scenario errors**: file and parse failures in the CLI surface.
//!
//! Silent skips (accrual preconditions, settlement no-ops) are never errors;
//! they are `Skipped` outcomes on the operations themselves.

use super::currency::Currency;
use super::customer::CustomerId;
use super::transaction::{CashbackStatus, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the cashback engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CashbackError {
    /// The configuration cross-field rule was violated
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the violated rule
        message: String,
    },

    /// The customer is not present in the registry
    #[error("Customer {customer} not found")]
    CustomerNotFound {
        /// Customer ID that was not found
        customer: CustomerId,
    },

    /// The customer has no spendable balance to redeem
    #[error("Customer {customer} has no available cashback balance")]
    NoSpendableBalance {
        /// Customer ID
        customer: CustomerId,
    },

    /// The redemption cooldown window has not elapsed
    #[error("Customer {customer} last redeemed on {last_redemption}; next redemption available on {next_eligible}")]
    CooldownActive {
        /// Customer ID
        customer: CustomerId,
        /// Date of the most recent redemption
        last_redemption: NaiveDate,
        /// First date a redemption is permitted again
        next_eligible: NaiveDate,
    },

    /// A negative amount was entered interactively
    #[error("Redemption amount cannot be negative (got {amount})")]
    RedemptionNegative {
        /// The rejected amount
        amount: Decimal,
    },

    /// A non-positive amount reached the commit check
    #[error("Redemption amount must be greater than 0 (got {amount})")]
    RedemptionNotPositive {
        /// The rejected amount
        amount: Decimal,
    },

    /// The amount exceeds min(spendable balance, order total)
    #[error("Redemption amount {amount} cannot exceed {max_redeemable}")]
    ExceedsMaxRedeemable {
        /// The rejected amount
        amount: Decimal,
        /// Maximum redeemable amount
        max_redeemable: Decimal,
    },

    /// The amount exceeds the customer's spendable balance
    #[error("Redemption amount {amount} exceeds available cashback balance {spendable} for customer {customer}")]
    ExceedsSpendableBalance {
        /// Customer ID
        customer: CustomerId,
        /// The rejected amount
        amount: Decimal,
        /// Current spendable balance
        spendable: Decimal,
    },

    /// The amount exceeds the order total
    #[error("Redemption amount {amount} cannot exceed order total {order_total}")]
    ExceedsOrderTotal {
        /// The rejected amount
        amount: Decimal,
        /// Current order total
        order_total: Decimal,
    },

    /// Confirming the order would push the customer past their credit limit
    #[error("Customer {customer} would exceed credit limit {credit_limit}: projected exposure {projected}")]
    CreditLimitExceeded {
        /// Customer ID
        customer: CustomerId,
        /// Configured credit limit
        credit_limit: Decimal,
        /// Outstanding debt plus the converted order total
        projected: Decimal,
    },

    /// No exchange rate is available for the currency pair
    #[error("No exchange rate from {from} to {to}")]
    RateUnavailable {
        /// Source currency
        from: Currency,
        /// Target currency
        to: Currency,
    },

    /// Currency conversion overflowed
    #[error("Overflow converting {from} to {to}")]
    ConversionOverflow {
        /// Source currency
        from: Currency,
        /// Target currency
        to: Currency,
    },

    /// Checked arithmetic overflowed in a balance operation
    #[error("Arithmetic overflow in {operation} for customer {customer}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Customer ID
        customer: CustomerId,
    },

    /// Checked arithmetic underflowed in a balance operation
    #[error("Arithmetic underflow in {operation} for customer {customer}")]
    ArithmeticUnderflow {
        /// Operation that would underflow
        operation: String,
        /// Customer ID
        customer: CustomerId,
    },

    /// A status transition that skips, reverses, or leaves a terminal state
    #[error("Invalid cashback status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status
        from: CashbackStatus,
        /// Requested status
        to: CashbackStatus,
    },

    /// A transaction ID was not found in the log
    #[error("Cashback transaction {id} not found for {operation}")]
    TransactionNotFound {
        /// Transaction ID that was not found
        id: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// An order referenced by a scenario event does not exist
    #[error("Order {order} not found in scenario")]
    OrderNotFound {
        /// Order ID that was not found
        order: u32,
    },

    /// I/O error reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Scenario file is malformed
    #[error("Scenario error: {message}")]
    ScenarioError {
        /// Description of the parse failure
        message: String,
    },
}

impl From<std::io::Error> for CashbackError {
    fn from(error: std::io::Error) -> Self {
        CashbackError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CashbackError {
    fn from(error: serde_json::Error) -> Self {
        CashbackError::ScenarioError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for CashbackError {
    fn from(error: csv::Error) -> Self {
        CashbackError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CashbackError {
    /// Create an InvalidConfig error
    pub fn invalid_config(message: &str) -> Self {
        CashbackError::InvalidConfig {
            message: message.to_string(),
        }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(customer: CustomerId) -> Self {
        CashbackError::CustomerNotFound { customer }
    }

    /// Create a NoSpendableBalance error
    pub fn no_spendable_balance(customer: CustomerId) -> Self {
        CashbackError::NoSpendableBalance { customer }
    }

    /// Create a CooldownActive error
    pub fn cooldown_active(
        customer: CustomerId,
        last_redemption: NaiveDate,
        next_eligible: NaiveDate,
    ) -> Self {
        CashbackError::CooldownActive {
            customer,
            last_redemption,
            next_eligible,
        }
    }

    /// Create an ExceedsSpendableBalance error
    pub fn exceeds_spendable_balance(
        customer: CustomerId,
        amount: Decimal,
        spendable: Decimal,
    ) -> Self {
        CashbackError::ExceedsSpendableBalance {
            customer,
            amount,
            spendable,
        }
    }

    /// Create a CreditLimitExceeded error
    pub fn credit_limit_exceeded(
        customer: CustomerId,
        credit_limit: Decimal,
        projected: Decimal,
    ) -> Self {
        CashbackError::CreditLimitExceeded {
            customer,
            credit_limit,
            projected,
        }
    }

    /// Create a RateUnavailable error
    pub fn rate_unavailable(from: &Currency, to: &Currency) -> Self {
        CashbackError::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, customer: CustomerId) -> Self {
        CashbackError::ArithmeticOverflow {
            operation: operation.to_string(),
            customer,
        }
    }

    /// Create an ArithmeticUnderflow error
    pub fn arithmetic_underflow(operation: &str, customer: CustomerId) -> Self {
        CashbackError::ArithmeticUnderflow {
            operation: operation.to_string(),
            customer,
        }
    }

    /// Create an InvalidStatusTransition error
    pub fn invalid_status_transition(from: CashbackStatus, to: CashbackStatus) -> Self {
        CashbackError::InvalidStatusTransition { from, to }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: TransactionId, operation: &str) -> Self {
        CashbackError::TransactionNotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Whether this error is a rejected operation (as opposed to an
    /// integrity or I/O failure)
    ///
    /// Rejected operations are expected runtime outcomes: they abort the
    /// triggering action but do not indicate a broken engine.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CashbackError::InvalidConfig { .. }
                | CashbackError::NoSpendableBalance { .. }
                | CashbackError::CooldownActive { .. }
                | CashbackError::RedemptionNegative { .. }
                | CashbackError::RedemptionNotPositive { .. }
                | CashbackError::ExceedsMaxRedeemable { .. }
                | CashbackError::ExceedsSpendableBalance { .. }
                | CashbackError::ExceedsOrderTotal { .. }
                | CashbackError::CreditLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_config(
        CashbackError::invalid_config("redeem_cooldown_days must be greater than 0 when cashback is enabled"),
        "Invalid configuration: redeem_cooldown_days must be greater than 0 when cashback is enabled"
    )]
    #[case::customer_not_found(
        CashbackError::customer_not_found(7),
        "Customer 7 not found"
    )]
    #[case::no_spendable_balance(
        CashbackError::no_spendable_balance(3),
        "Customer 3 has no available cashback balance"
    )]
    #[case::cooldown_active(
        CashbackError::cooldown_active(
            1,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        ),
        "Customer 1 last redeemed on 2025-01-10; next redemption available on 2025-04-10"
    )]
    #[case::redemption_negative(
        CashbackError::RedemptionNegative { amount: Decimal::new(-500, 2) },
        "Redemption amount cannot be negative (got -5.00)"
    )]
    #[case::redemption_not_positive(
        CashbackError::RedemptionNotPositive { amount: Decimal::ZERO },
        "Redemption amount must be greater than 0 (got 0)"
    )]
    #[case::exceeds_max_redeemable(
        CashbackError::ExceedsMaxRedeemable {
            amount: Decimal::new(6000, 2),
            max_redeemable: Decimal::new(5000, 2),
        },
        "Redemption amount 60.00 cannot exceed 50.00"
    )]
    #[case::exceeds_order_total(
        CashbackError::ExceedsOrderTotal {
            amount: Decimal::new(6000, 2),
            order_total: Decimal::new(5000, 2),
        },
        "Redemption amount 60.00 cannot exceed order total 50.00"
    )]
    #[case::credit_limit_exceeded(
        CashbackError::credit_limit_exceeded(2, Decimal::new(100000, 2), Decimal::new(125000, 2)),
        "Customer 2 would exceed credit limit 1000.00: projected exposure 1250.00"
    )]
    #[case::rate_unavailable(
        CashbackError::rate_unavailable(&Currency::new("EUR"), &Currency::new("USD")),
        "No exchange rate from EUR to USD"
    )]
    #[case::invalid_status_transition(
        CashbackError::invalid_status_transition(CashbackStatus::Settled, CashbackStatus::Reset),
        "Invalid cashback status transition: settled -> reset"
    )]
    #[case::transaction_not_found(
        CashbackError::transaction_not_found(99, "mark_settled"),
        "Cashback transaction 99 not found for mark_settled"
    )]
    fn test_error_display(#[case] error: CashbackError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::cooldown(CashbackError::cooldown_active(
        1,
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
    ), true)]
    #[case::credit_limit(
        CashbackError::credit_limit_exceeded(1, Decimal::ONE, Decimal::TWO),
        true
    )]
    #[case::not_found(CashbackError::customer_not_found(1), false)]
    #[case::transition(
        CashbackError::invalid_status_transition(CashbackStatus::Settled, CashbackStatus::Earned),
        false
    )]
    #[case::overflow(CashbackError::arithmetic_overflow("accrue_pending", 1), false)]
    fn test_is_rejection(#[case] error: CashbackError, #[case] expected: bool) {
        assert_eq!(error.is_rejection(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: CashbackError = io_error.into();
        assert!(matches!(error, CashbackError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: CashbackError = json_error.into();
        assert!(matches!(error, CashbackError::ScenarioError { .. }));
    }
}
