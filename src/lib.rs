//! Cashback Engine Library
//! # Overview
//!
//! This library implements a cashback program for a sales ledger: accrual on
//! posted invoices, monthly settlement gated on outstanding debt, interactive
//! redemption against orders, and a credit-limit guard at order confirmation.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, SalesDocument, CashbackTransaction, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The orchestrating CashbackEngine
//!   - [`core::customer_registry`] - Customer state and balance operations
//!   - [`core::transaction_log`] - Append-only cashback transaction ledger
//!   - [`core::redemption_log`] - Redemption history backing the cooldown
//! - [`audit`] - Structured-event rendering and delivery
//! - [`io`] - Scenario file loading and balances CSV output
//!
//! # Balance Lifecycle
//!
//! Each customer carries two balances:
//!
//! - `pending_balance`: grows as invoices accrue cashback
//! - `spendable_balance`: receives the pending balance at monthly settlement
//!   (when the customer is debt-free) and is spent through redemption
//!
//! Every accrual and settlement is recorded as a [`types::CashbackTransaction`]
//! whose status walks the guarded `earned` → `pending_settlement` →
//! `settled`/`reset` state machine.

// Module declarations
pub mod audit;
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{CashbackEngine, CurrencyConverter, DebtProvider};
pub use crate::io::write_balances_csv;
pub use types::{
    CashbackConfig, CashbackError, CashbackStatus, CashbackTransaction, Currency, Customer,
    CustomerId, Order, SalesDocument,
};
