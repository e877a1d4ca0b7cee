//! Scenario file loading and the event-driven runner
//!
//! A scenario is one JSON document describing the starting world (config,
//! company currency, exchange rates, customers, debts, orders) followed by an
//! ordered list of events to drive through the engine. Rejected operations
//! are logged and skipped; infrastructure failures abort the run.

use crate::audit::{render, AuditSink};
use crate::core::{CashbackEngine, FixedRateConverter, StaticDebtProvider};
use crate::types::{
    AuditEvent, CashbackConfig, CashbackError, Currency, Customer, CustomerId, Order, OrderId,
    SalesDocument,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// One exchange-rate table entry
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRate {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

/// One outstanding-debt table entry
#[derive(Debug, Clone, Deserialize)]
pub struct DebtEntry {
    pub customer: CustomerId,
    pub amount: Decimal,
}

/// A parsed scenario file
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Validated at deserialization; an invalid config fails the parse
    pub config: CashbackConfig,
    pub company_currency: Currency,
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRate>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub debts: Vec<DebtEntry>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// One event in a scenario's timeline
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// A sales document was posted
    PostDocument { document: SalesDocument },
    /// The monthly settlement ran
    Settle { date: NaiveDate },
    /// A customer redeemed against an order
    Redeem {
        order: OrderId,
        amount: Decimal,
        date: NaiveDate,
    },
    /// An order was confirmed (credit-limit guard)
    ConfirmOrder { order: OrderId },
    /// An order was cancelled
    CancelOrder { order: OrderId },
    /// The configuration was changed
    ApplySettings { config: CashbackConfig },
}

/// Load and parse a scenario file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a scenario error if
/// the JSON is malformed or the embedded configuration is invalid.
pub fn load_scenario(path: &Path) -> Result<Scenario, CashbackError> {
    let contents = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&contents)?;
    Ok(scenario)
}

/// Drive a scenario through a fresh engine
///
/// Events run in order. Rejected operations (cooldown, balance, order-total,
/// credit-limit failures) are logged through `tracing` and skipped; any other
/// error aborts the run. Audit events are rendered and delivered to `sink`.
///
/// Returns the engine in its final state for reporting.
///
/// # Errors
///
/// Returns the first infrastructure error encountered: unknown customer or
/// order, missing exchange rate, arithmetic overflow.
pub fn run_scenario<S: AuditSink>(
    scenario: Scenario,
    sink: &mut S,
) -> Result<CashbackEngine<FixedRateConverter, StaticDebtProvider>, CashbackError> {
    let mut converter = FixedRateConverter::new();
    for entry in scenario.exchange_rates {
        converter.set_rate(entry.from, entry.to, entry.rate);
    }

    let mut debts = StaticDebtProvider::new();
    for entry in scenario.debts {
        debts.set_debt(entry.customer, entry.amount);
    }

    let mut engine = CashbackEngine::new(
        scenario.config,
        scenario.company_currency,
        converter,
        debts,
    );
    for customer in scenario.customers {
        engine.add_customer(customer);
    }

    let mut orders: HashMap<OrderId, Order> = scenario
        .orders
        .into_iter()
        .map(|order| (order.id, order))
        .collect();

    for event in scenario.events {
        match event {
            ScenarioEvent::PostDocument { document } => {
                if let crate::core::AccrualOutcome::Accrued { event, .. } =
                    engine.post_document(&document)?
                {
                    deliver(&event, sink);
                }
            }

            ScenarioEvent::Settle { date } => {
                for outcome in engine.settle_month(date)? {
                    let event = match outcome {
                        crate::core::SettlementOutcome::Completed { event, .. } => event,
                        crate::core::SettlementOutcome::Forfeited { event, .. } => event,
                    };
                    deliver(&event, sink);
                }
            }

            ScenarioEvent::Redeem {
                order,
                amount,
                date,
            } => {
                let target = orders
                    .get_mut(&order)
                    .ok_or(CashbackError::OrderNotFound { order })?;
                match engine.redeem(target, amount, date) {
                    Ok(outcome) => deliver(&outcome.event, sink),
                    Err(error) if error.is_rejection() => {
                        warn!(order, %error, "redemption rejected");
                    }
                    Err(error) => return Err(error),
                }
            }

            ScenarioEvent::ConfirmOrder { order } => {
                let target = orders
                    .get(&order)
                    .ok_or(CashbackError::OrderNotFound { order })?;
                match engine.confirm_order(target) {
                    Ok(_) => {}
                    Err(error) if error.is_rejection() => {
                        warn!(order, %error, "order confirmation rejected");
                    }
                    Err(error) => return Err(error),
                }
            }

            ScenarioEvent::CancelOrder { order } => {
                let target = orders
                    .get(&order)
                    .ok_or(CashbackError::OrderNotFound { order })?;
                if let Some(outcome) = engine.cancel_order(target)? {
                    deliver(&outcome.event, sink);
                }
            }

            ScenarioEvent::ApplySettings { config } => {
                engine.apply_settings(config);
            }
        }
    }

    Ok(engine)
}

fn deliver<S: AuditSink>(event: &AuditEvent, sink: &mut S) {
    for (target, message) in render(event) {
        sink.post(target, message);
    }
}
