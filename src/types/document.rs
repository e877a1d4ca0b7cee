//! Document and order snapshots consumed by the engines
//!
//! The host platform's ledger emits these as part of its lifecycle events:
//! a [`SalesDocument`] arrives with a "document posted" event and feeds the
//! accrual engine, an [`Order`] is the target of redemption and of the
//! confirm/cancel hooks.

use super::currency::Currency;
use super::customer::CustomerId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document identifier
pub type DocumentId = u32;

/// Order identifier
pub type OrderId = u32;

/// Catalog product identifier
pub type ProductId = u32;

/// Kind of a posted sales document
///
/// Only invoices accrue cashback; refunds are explicitly excluded and make
/// the accrual engine skip the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Refund,
}

/// One line of a posted sales document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Line description
    #[serde(default)]
    pub description: String,

    /// Unit price; lines priced at zero or below (discounts, prior cashback
    /// lines) never contribute to accrual
    pub unit_price: Decimal,

    /// Line subtotal
    pub subtotal: Decimal,
}

/// Snapshot of a posted sales document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesDocument {
    /// The document ID
    pub id: DocumentId,

    /// Invoice or refund
    pub kind: DocumentKind,

    /// The customer the document was issued to, if any
    ///
    /// Documents without a customer are skipped by accrual.
    pub customer: Option<CustomerId>,

    /// Currency the document is denominated in
    pub currency: Currency,

    /// Document date, used as the conversion reference date
    pub date: NaiveDate,

    /// Line items
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl SalesDocument {
    /// Total document amount (sum of all line subtotals)
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.subtotal).sum()
    }

    /// Accrual base: sum of subtotals over lines with a strictly positive
    /// unit price
    pub fn positive_line_total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.unit_price > Decimal::ZERO)
            .map(|line| line.subtotal)
            .sum()
    }
}

/// One line of a sales order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog product this line references, if any
    #[serde(default)]
    pub product: Option<ProductId>,

    /// Line description
    #[serde(default)]
    pub description: String,

    /// Ordered quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Unit price; negative for cashback redemption lines
    pub unit_price: Decimal,

    /// Line subtotal
    pub subtotal: Decimal,
}

fn default_quantity() -> u32 {
    1
}

/// Snapshot of a sales order
///
/// Redemption appends a negative-priced line to the order; cancellation reads
/// the cashback lines back to compute the compensation amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// The order ID
    pub id: OrderId,

    /// The customer placing the order
    pub customer: CustomerId,

    /// Currency the order is denominated in
    pub currency: Currency,

    /// Order date, used as the conversion reference date at confirmation
    pub date: NaiveDate,

    /// Order lines
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Current order total (sum of all line subtotals, redemption lines
    /// included)
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.subtotal).sum()
    }

    /// Absolute value of the summed subtotals of lines referencing the given
    /// cashback product
    pub fn cashback_line_total(&self, cashback_product: ProductId) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.product == Some(cashback_product))
            .map(|line| line.subtotal)
            .sum::<Decimal>()
            .abs()
    }
}
