//! Core business logic module
//!
//! Contains the components that implement the cashback rules:
//! - `traits`: external collaborator abstractions (currency conversion, debt)
//! - `customer_registry`: customer state and balance operations
//! - `transaction_log`: append-only cashback transaction ledger
//! - `redemption_log`: redemption history backing the cooldown
//! - `catalog`: product registry for redemption order lines
//! - `engine`: the orchestrating CashbackEngine

pub mod catalog;
pub mod customer_registry;
pub mod engine;
pub mod redemption_log;
pub mod traits;
pub mod transaction_log;

pub use catalog::{Product, ProductCatalog};
pub use customer_registry::CustomerRegistry;
pub use engine::{
    AccrualOutcome, CancellationOutcome, CashbackEngine, ConfirmOutcome, RedemptionOutcome,
    RedemptionQuote, SettingsOutcome, SettlementOutcome, SkipReason, CASHBACK_PRODUCT_NAME,
};
pub use redemption_log::RedemptionLog;
pub use traits::{CurrencyConverter, DebtProvider, FixedRateConverter, StaticDebtProvider};
pub use transaction_log::TransactionLog;
