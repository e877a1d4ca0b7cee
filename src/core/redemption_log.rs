//! Redemption history
//!
//! A small append-only record of redemptions used to enforce the cooldown
//! window. Records are never removed, even when the order they belong to is
//! later cancelled, so the cooldown throttles redemption attempts rather
//! than successful spends.

use crate::types::{CustomerId, RedemptionId, RedemptionRecord};
use chrono::NaiveDate;

/// Append-only history of cashback redemptions
#[derive(Debug, Default)]
pub struct RedemptionLog {
    records: Vec<RedemptionRecord>,
}

impl RedemptionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        RedemptionLog {
            records: Vec::new(),
        }
    }

    /// Append a record, returning its assigned ID
    pub fn append(&mut self, record: RedemptionRecord) -> RedemptionId {
        self.records.push(record);
        self.records.len() as RedemptionId
    }

    /// Number of records in the log
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent redemption date for a customer, if any
    pub fn last_redemption_date(&self, customer: CustomerId) -> Option<NaiveDate> {
        self.records
            .iter()
            .filter(|record| record.customer == customer)
            .map(|record| record.date)
            .max()
    }

    /// Iterate over all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &RedemptionRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(customer: CustomerId, date: NaiveDate) -> RedemptionRecord {
        RedemptionRecord {
            customer,
            order: 50,
            amount: Decimal::new(1000, 2),
            date,
            note: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut log = RedemptionLog::new();

        assert_eq!(log.append(record(1, day(2025, 3, 1))), 1);
        assert_eq!(log.append(record(1, day(2025, 3, 10))), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_last_redemption_date_picks_latest() {
        let mut log = RedemptionLog::new();
        log.append(record(1, day(2025, 3, 10)));
        log.append(record(1, day(2025, 3, 1)));
        log.append(record(2, day(2025, 3, 20)));

        assert_eq!(log.last_redemption_date(1), Some(day(2025, 3, 10)));
        assert_eq!(log.last_redemption_date(2), Some(day(2025, 3, 20)));
    }

    #[test]
    fn test_last_redemption_date_none_for_fresh_customer() {
        let log = RedemptionLog::new();
        assert_eq!(log.last_redemption_date(1), None);
    }
}
