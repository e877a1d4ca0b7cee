//! Cashback engine
//!
//! This module provides the CashbackEngine that orchestrates the accrual,
//! settlement, redemption and order-guard operations by coordinating between
//! the CustomerRegistry, TransactionLog and RedemptionLog components.
//!
//! The engine enforces business rules such as:
//! - Accrual preconditions (invoice kind, customer present, program enabled,
//!   non-zero percent), each a silent skip rather than an error
//! - The monthly settlement partition (transfer when debt-free, forfeit
//!   otherwise)
//! - The ordered redemption commit checks (cooldown, positivity, balance,
//!   order total)
//! - The credit-limit guard at order confirmation
//!
//! Operations return structured outcomes carrying an [`AuditEvent`]; rendering
//! the event into notification text is the [`audit`](crate::audit) module's
//! job, not the engine's.

use crate::core::catalog::ProductCatalog;
use crate::core::customer_registry::CustomerRegistry;
use crate::core::redemption_log::RedemptionLog;
use crate::core::traits::{CurrencyConverter, DebtProvider};
use crate::core::transaction_log::TransactionLog;
use crate::types::{
    AuditEvent, CashbackConfig, CashbackError, CashbackStatus, CashbackTransaction, Currency,
    Customer, CustomerId, DocumentKind, Order, OrderLine, RedemptionId, SalesDocument,
    TransactionId,
};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Name of the catalog product redemption lines are booked against
pub const CASHBACK_PRODUCT_NAME: &str = "Cashback";

/// Why the accrual engine skipped a posted document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Refund documents never accrue
    RefundDocument,
    /// The document carries no customer
    NoCustomer,
    /// The cashback program is switched off
    CashbackDisabled,
    /// The customer's cashback percent is zero
    ZeroPercent,
}

/// Result of posting a document through the accrual engine
#[derive(Debug, Clone, PartialEq)]
pub enum AccrualOutcome {
    /// A precondition failed; nothing was recorded
    Skipped(SkipReason),
    /// Cashback was accrued
    Accrued {
        /// The appended `Earned` transaction
        transaction: TransactionId,
        /// Accrued amount in company currency
        amount: Decimal,
        /// Event for the audit renderer
        event: AuditEvent,
    },
}

/// Result of one customer's settlement within a monthly run
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    /// The pending balance was transferred to the spendable balance
    Completed {
        customer: CustomerId,
        /// Amount moved from pending to spendable
        transferred: Decimal,
        /// The appended `Settled` summary transaction
        transaction: TransactionId,
        event: AuditEvent,
    },
    /// The pending balance was forfeited due to outstanding debt
    Forfeited {
        customer: CustomerId,
        /// Amount zeroed without transfer
        forfeited: Decimal,
        /// The customer's outstanding debt at settlement time
        debt: Decimal,
        /// The appended `Reset` summary transaction
        transaction: TransactionId,
        event: AuditEvent,
    },
}

/// Figures presented to the interactive redemption surface
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionQuote {
    pub customer: CustomerId,
    pub spendable_balance: Decimal,
    pub order_total: Decimal,
    /// `min(spendable_balance, order_total)`
    pub max_redeemable: Decimal,
    pub last_redemption_date: Option<NaiveDate>,
    /// Whether the cooldown permits a redemption today
    pub can_redeem: bool,
    /// First date a redemption is permitted again, when the cooldown blocks
    pub next_eligible_date: Option<NaiveDate>,
}

impl RedemptionQuote {
    /// Validate an amount as it is entered, before commit
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::RedemptionNegative`] for negative amounts and
    /// [`CashbackError::ExceedsMaxRedeemable`] for amounts above
    /// `max_redeemable`.
    pub fn check_amount(&self, amount: Decimal) -> Result<(), CashbackError> {
        if amount < Decimal::ZERO {
            return Err(CashbackError::RedemptionNegative { amount });
        }
        if amount > self.max_redeemable {
            return Err(CashbackError::ExceedsMaxRedeemable {
                amount,
                max_redeemable: self.max_redeemable,
            });
        }
        Ok(())
    }
}

/// Result of a committed redemption
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionOutcome {
    /// The appended redemption record
    pub record: RedemptionId,
    /// Redeemed amount
    pub amount: Decimal,
    pub event: AuditEvent,
}

/// Result of compensating a cancelled order
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationOutcome {
    /// Amount restored to the spendable balance
    pub restored: Decimal,
    pub event: AuditEvent,
}

/// Result of applying a new configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsOutcome {
    /// Customers that received the default percent
    pub customers_updated: usize,
}

/// Result of a successful order confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOutcome {
    pub customer: CustomerId,
    /// Outstanding debt plus the converted order total, when a credit limit
    /// is configured
    pub projected_exposure: Option<Decimal>,
}

/// Cashback processing engine
///
/// Owns the customer registry, the transaction and redemption logs, the
/// product catalog, and a validated configuration. Currency conversion and
/// debt lookups are delegated to the injected collaborators.
#[derive(Debug)]
pub struct CashbackEngine<C: CurrencyConverter, D: DebtProvider> {
    customers: CustomerRegistry,
    transactions: TransactionLog,
    redemptions: RedemptionLog,
    catalog: ProductCatalog,
    config: CashbackConfig,
    company_currency: Currency,
    converter: C,
    debts: D,
}

impl<C: CurrencyConverter, D: DebtProvider> CashbackEngine<C, D> {
    /// Create a new engine with no customers
    ///
    /// # Arguments
    ///
    /// * `config` - Validated cashback configuration
    /// * `company_currency` - The currency balances and transactions are kept in
    /// * `converter` - Currency conversion collaborator
    /// * `debts` - Outstanding-debt collaborator
    pub fn new(config: CashbackConfig, company_currency: Currency, converter: C, debts: D) -> Self {
        CashbackEngine {
            customers: CustomerRegistry::new(),
            transactions: TransactionLog::new(),
            redemptions: RedemptionLog::new(),
            catalog: ProductCatalog::new(),
            config,
            company_currency,
            converter,
            debts,
        }
    }

    /// Seed a customer into the registry
    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.insert(customer);
    }

    /// The customer registry, for reporting
    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    /// The transaction log, for reporting
    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }

    /// The redemption log, for reporting
    pub fn redemptions(&self) -> &RedemptionLog {
        &self.redemptions
    }

    /// The active configuration
    pub fn config(&self) -> &CashbackConfig {
        &self.config
    }

    /// Process a posted sales document through the accrual engine
    ///
    /// Preconditions are checked in order; each failure is a silent
    /// [`AccrualOutcome::Skipped`], never an error. On success the customer's
    /// pending balance grows by the computed cashback and one `Earned`
    /// transaction is appended.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure failures: the referenced
    /// customer is missing from the registry, the currency conversion fails,
    /// or the balance arithmetic overflows.
    pub fn post_document(
        &mut self,
        document: &SalesDocument,
    ) -> Result<AccrualOutcome, CashbackError> {
        if document.kind == DocumentKind::Refund {
            debug!(document = document.id, "skipping accrual: refund document");
            return Ok(AccrualOutcome::Skipped(SkipReason::RefundDocument));
        }

        let customer_id = match document.customer {
            Some(id) => id,
            None => {
                debug!(document = document.id, "skipping accrual: no customer");
                return Ok(AccrualOutcome::Skipped(SkipReason::NoCustomer));
            }
        };

        if !self.config.enabled() {
            debug!(document = document.id, "skipping accrual: cashback disabled");
            return Ok(AccrualOutcome::Skipped(SkipReason::CashbackDisabled));
        }

        let percent = self.customers.require(customer_id)?.cashback_percent;
        if percent == 0 {
            debug!(
                document = document.id,
                customer = customer_id,
                "skipping accrual: zero cashback percent"
            );
            return Ok(AccrualOutcome::Skipped(SkipReason::ZeroPercent));
        }

        // Base excludes discount and prior-cashback lines (unit price <= 0)
        let base = document.positive_line_total();
        let in_document_currency = base
            .checked_mul(Decimal::from(percent))
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| CashbackError::arithmetic_overflow("accrual", customer_id))?;

        let cashback = if document.currency != self.company_currency {
            self.converter.convert(
                in_document_currency,
                &document.currency,
                &self.company_currency,
                document.date,
            )?
        } else {
            in_document_currency
        };

        self.customers.accrue_pending(customer_id, cashback)?;

        let transaction = self.transactions.append(CashbackTransaction {
            customer: customer_id,
            document: Some(document.id),
            percent,
            source_amount: document.total(),
            source_currency: document.currency.clone(),
            cashback_amount: cashback,
            cashback_currency: self.company_currency.clone(),
            date: document.date,
            status: CashbackStatus::Earned,
            settlement_date: None,
            note: None,
        });

        let record = self.customers.require(customer_id)?;
        info!(
            customer = customer_id,
            document = document.id,
            %cashback,
            "cashback accrued"
        );

        let event = AuditEvent::CashbackEarned {
            customer: customer_id,
            document: document.id,
            date: document.date,
            document_total: document.total(),
            document_currency: document.currency.clone(),
            percent,
            cashback_amount: cashback,
            cashback_currency: self.company_currency.clone(),
            pending_balance: record.pending_balance,
            spendable_balance: record.spendable_balance,
        };

        Ok(AccrualOutcome::Accrued {
            transaction,
            amount: cashback,
            event,
        })
    }

    /// Run the monthly settlement over every qualifying customer
    ///
    /// Customers qualify with a non-zero percent and a positive pending
    /// balance, which makes re-running the settlement a no-op. Per customer,
    /// this month's `Earned` transactions are first marked
    /// `PendingSettlement`, then settled or reset depending on whether the
    /// customer's outstanding debt is exactly zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a status transition or balance operation fails;
    /// business conditions (debt, empty selection) never do.
    pub fn settle_month(
        &mut self,
        today: NaiveDate,
    ) -> Result<Vec<SettlementOutcome>, CashbackError> {
        let month_start = today.with_day(1).unwrap_or(today);
        let mut outcomes = Vec::new();

        for customer_id in self.customers.settlement_candidates() {
            let debt = self.debts.debt_of(customer_id);
            let qualifying = self
                .transactions
                .earned_in_window(customer_id, month_start, today);

            for id in &qualifying {
                self.transactions.mark_pending_settlement(*id)?;
            }

            let outcome = if debt == Decimal::ZERO {
                let transferred = self.customers.settle_pending(customer_id)?;
                for id in &qualifying {
                    self.transactions.mark_settled(*id, today)?;
                }

                let transaction = self.transactions.append(CashbackTransaction {
                    customer: customer_id,
                    document: None,
                    percent: 0,
                    source_amount: transferred,
                    source_currency: self.company_currency.clone(),
                    cashback_amount: transferred,
                    cashback_currency: self.company_currency.clone(),
                    date: today,
                    status: CashbackStatus::Settled,
                    settlement_date: Some(today),
                    note: Some("Monthly settlement".to_string()),
                });

                let record = self.customers.require(customer_id)?;
                info!(
                    customer = customer_id,
                    %transferred,
                    "settlement completed"
                );

                SettlementOutcome::Completed {
                    customer: customer_id,
                    transferred,
                    transaction,
                    event: AuditEvent::SettlementCompleted {
                        customer: customer_id,
                        date: today,
                        transferred,
                        spendable_balance: record.spendable_balance,
                        currency: self.company_currency.clone(),
                    },
                }
            } else {
                for id in &qualifying {
                    self.transactions.mark_reset(*id)?;
                }
                let forfeited = self.customers.forfeit_pending(customer_id)?;

                let transaction = self.transactions.append(CashbackTransaction {
                    customer: customer_id,
                    document: None,
                    percent: 0,
                    source_amount: debt,
                    source_currency: self.company_currency.clone(),
                    cashback_amount: forfeited,
                    cashback_currency: self.company_currency.clone(),
                    date: today,
                    status: CashbackStatus::Reset,
                    settlement_date: None,
                    note: Some(format!("Forfeited due to outstanding debt of {debt}")),
                });

                warn!(
                    customer = customer_id,
                    %forfeited,
                    %debt,
                    "settlement forfeited"
                );

                SettlementOutcome::Forfeited {
                    customer: customer_id,
                    forfeited,
                    debt,
                    transaction,
                    event: AuditEvent::SettlementForfeited {
                        customer: customer_id,
                        date: today,
                        forfeited,
                        debt,
                        currency: self.company_currency.clone(),
                    },
                }
            };

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Open a redemption quote for the order's customer
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::NoSpendableBalance`] when the customer has
    /// nothing to redeem, or [`CashbackError::CustomerNotFound`] when the
    /// customer is missing from the registry.
    pub fn redemption_quote(
        &self,
        order: &Order,
        today: NaiveDate,
    ) -> Result<RedemptionQuote, CashbackError> {
        let record = self.customers.require(order.customer)?;
        if record.spendable_balance <= Decimal::ZERO {
            return Err(CashbackError::no_spendable_balance(order.customer));
        }

        let order_total = order.total();
        let last_redemption_date = self.redemptions.last_redemption_date(order.customer);
        let cooldown = self.config.redeem_cooldown_days();
        let can_redeem = match last_redemption_date {
            None => true,
            Some(last) => (today - last).num_days() >= cooldown,
        };
        let next_eligible_date = match (can_redeem, last_redemption_date) {
            (false, Some(last)) => Some(last + Duration::days(cooldown)),
            _ => None,
        };

        Ok(RedemptionQuote {
            customer: order.customer,
            spendable_balance: record.spendable_balance,
            order_total,
            max_redeemable: record.spendable_balance.min(order_total),
            last_redemption_date,
            can_redeem,
            next_eligible_date,
        })
    }

    /// Commit a redemption against an order
    ///
    /// Validation fires in order, each failure aborting with no side effects:
    /// cooldown not satisfied, amount not positive, amount above the
    /// spendable balance, amount above the order total. On success the order
    /// gains a negative-priced line for the redeemed amount, the spendable
    /// balance shrinks by it, and one redemption record is appended.
    ///
    /// # Errors
    ///
    /// Returns one of the rejection errors above, or
    /// [`CashbackError::CustomerNotFound`] for an unknown customer.
    pub fn redeem(
        &mut self,
        order: &mut Order,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<RedemptionOutcome, CashbackError> {
        let customer_id = order.customer;
        let record = self.customers.require(customer_id)?;

        let cooldown = self.config.redeem_cooldown_days();
        if let Some(last) = self.redemptions.last_redemption_date(customer_id) {
            if (today - last).num_days() < cooldown {
                return Err(CashbackError::cooldown_active(
                    customer_id,
                    last,
                    last + Duration::days(cooldown),
                ));
            }
        }

        if amount <= Decimal::ZERO {
            return Err(CashbackError::RedemptionNotPositive { amount });
        }
        if amount > record.spendable_balance {
            return Err(CashbackError::exceeds_spendable_balance(
                customer_id,
                amount,
                record.spendable_balance,
            ));
        }
        let order_total = order.total();
        if amount > order_total {
            return Err(CashbackError::ExceedsOrderTotal {
                amount,
                order_total,
            });
        }

        let product = self.catalog.get_or_create(CASHBACK_PRODUCT_NAME);
        order.lines.push(OrderLine {
            product: Some(product),
            description: format!("Cashback Redemption - {amount}"),
            quantity: 1,
            unit_price: -amount,
            subtotal: -amount,
        });

        self.customers.deduct_spendable(customer_id, amount)?;
        let record = self.redemptions.append(crate::types::RedemptionRecord {
            customer: customer_id,
            order: order.id,
            amount,
            date: today,
            note: None,
        });

        let spendable = self.customers.require(customer_id)?.spendable_balance;
        info!(
            customer = customer_id,
            order = order.id,
            %amount,
            "cashback redeemed"
        );

        Ok(RedemptionOutcome {
            record,
            amount,
            event: AuditEvent::CashbackRedeemed {
                customer: customer_id,
                order: order.id,
                date: today,
                amount,
                spendable_balance: spendable,
                currency: self.company_currency.clone(),
            },
        })
    }

    /// Compensate a cancelled order's cashback lines
    ///
    /// Restores the spendable balance by the absolute sum of the order's
    /// cashback-line subtotals. Orders without cashback lines yield
    /// `Ok(None)`. The redemption log is left untouched, so the cooldown
    /// still counts the original redemption.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is missing or the balance addition
    /// overflows.
    pub fn cancel_order(
        &mut self,
        order: &Order,
    ) -> Result<Option<CancellationOutcome>, CashbackError> {
        let product = match self.catalog.find_by_name(CASHBACK_PRODUCT_NAME) {
            Some(product) => product.id,
            None => return Ok(None),
        };

        let restored = order.cashback_line_total(product);
        if restored <= Decimal::ZERO {
            return Ok(None);
        }

        self.customers.restore_spendable(order.customer, restored)?;
        let spendable = self.customers.require(order.customer)?.spendable_balance;
        info!(
            customer = order.customer,
            order = order.id,
            %restored,
            "cashback restored after order cancellation"
        );

        Ok(Some(CancellationOutcome {
            restored,
            event: AuditEvent::CashbackRefunded {
                customer: order.customer,
                order: order.id,
                amount: restored,
                spendable_balance: spendable,
                currency: self.company_currency.clone(),
            },
        }))
    }

    /// Confirm an order against the customer's credit limit
    ///
    /// When a limit is configured, the order total is converted to company
    /// currency at the order date and added to the customer's outstanding
    /// debt; the order is rejected when the projected exposure exceeds the
    /// limit. Customers without a limit always confirm.
    ///
    /// # Errors
    ///
    /// Returns [`CashbackError::CreditLimitExceeded`] on rejection, or an
    /// infrastructure error if the conversion fails.
    pub fn confirm_order(&self, order: &Order) -> Result<ConfirmOutcome, CashbackError> {
        let record = self.customers.require(order.customer)?;

        let limit = match record.credit_limit {
            Some(limit) => limit,
            None => {
                return Ok(ConfirmOutcome {
                    customer: order.customer,
                    projected_exposure: None,
                })
            }
        };

        let converted = self.converter.convert(
            order.total(),
            &order.currency,
            &self.company_currency,
            order.date,
        )?;
        let projected = self
            .debts
            .debt_of(order.customer)
            .checked_add(converted)
            .ok_or_else(|| CashbackError::arithmetic_overflow("confirm_order", order.customer))?;

        if projected > limit {
            warn!(
                customer = order.customer,
                order = order.id,
                %projected,
                %limit,
                "order rejected: credit limit exceeded"
            );
            return Err(CashbackError::credit_limit_exceeded(
                order.customer,
                limit,
                projected,
            ));
        }

        Ok(ConfirmOutcome {
            customer: order.customer,
            projected_exposure: Some(projected),
        })
    }

    /// Replace the engine's configuration
    ///
    /// When the new configuration enables cashback, its default percent is
    /// bulk-assigned to every customer whose percent is currently zero.
    pub fn apply_settings(&mut self, config: CashbackConfig) -> SettingsOutcome {
        let customers_updated = if config.enabled() {
            self.customers.assign_default_percent(config.default_percent())
        } else {
            0
        };

        info!(
            enabled = config.enabled(),
            customers_updated, "settings applied"
        );
        self.config = config;

        SettingsOutcome { customers_updated }
    }
}
