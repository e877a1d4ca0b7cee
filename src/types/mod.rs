//! Types module
//!
//! Contains core data structures used throughout the crate.
//! This module organizes types into logical submodules:
//! - `currency`: Currency code newtype
//! - `customer`: Customer state and identifiers
//! - `document`: Posted-document and order snapshots
//! - `transaction`: Cashback/redemption ledger records and the status machine
//! - `config`: Validated engine configuration
//! - `event`: Structured audit events
//! - `error`: Error types for the cashback engine

pub mod config;
pub mod currency;
pub mod customer;
pub mod document;
pub mod error;
pub mod event;
pub mod transaction;

pub use config::CashbackConfig;
pub use currency::Currency;
pub use customer::{Customer, CustomerId};
pub use document::{
    DocumentId, DocumentKind, DocumentLine, Order, OrderId, OrderLine, ProductId, SalesDocument,
};
pub use error::CashbackError;
pub use event::AuditEvent;
pub use transaction::{
    CashbackStatus, CashbackTransaction, RedemptionId, RedemptionRecord, TransactionId,
};
