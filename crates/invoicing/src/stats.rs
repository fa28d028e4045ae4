//! Aggregate figures over generated invoices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{InvoiceRecord, InvoiceStatus};

/// Totals over the invoices whose number carries a given prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub invoice_count: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    pub status_breakdown: BTreeMap<InvoiceStatus, usize>,
}

impl InvoiceStats {
    /// Summarize records whose invoice number starts with `"{prefix}-"`.
    pub fn for_prefix<'a>(
        records: impl IntoIterator<Item = &'a InvoiceRecord>,
        prefix: &str,
    ) -> Self {
        let marker = format!("{prefix}-");
        let mut invoice_count = 0usize;
        let mut total_amount = 0.0;
        let mut status_breakdown = BTreeMap::new();

        for record in records
            .into_iter()
            .filter(|r| r.invoice_number.starts_with(&marker))
        {
            invoice_count += 1;
            total_amount += record.total_amount;
            *status_breakdown.entry(record.status).or_insert(0) += 1;
        }

        let average_amount = if invoice_count > 0 {
            total_amount / invoice_count as f64
        } else {
            0.0
        };

        Self {
            invoice_count,
            total_amount,
            average_amount,
            status_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewInvoice;
    use chrono::Utc;
    use sarthi_core::{CustomerId, InvoiceId, OrderId};

    fn record(number: &str, total: f64, status: InvoiceStatus) -> InvoiceRecord {
        NewInvoice {
            invoice_number: number.to_string(),
            order_id: OrderId::new(),
            customer_id: CustomerId::new(),
            amount: total,
            tax_amount: 0.0,
            total_amount: total,
            status,
            due_date: None,
            notes: String::new(),
        }
        .into_record(InvoiceId::new(), Utc::now())
    }

    #[test]
    fn only_prefixed_invoices_are_counted() {
        let records = vec![
            record("TSI-20261016-AAAAAA", 1000.0, InvoiceStatus::Pending),
            record("TSI-20261016-BBBBBB", 3000.0, InvoiceStatus::Paid),
            record("INV-20261016-CCCCCCCC", 9999.0, InvoiceStatus::Pending),
            // Prefix must be followed by the separator.
            record("TSIX-20261016-DDDDDD", 5.0, InvoiceStatus::Pending),
        ];

        let stats = InvoiceStats::for_prefix(&records, "TSI");
        assert_eq!(stats.invoice_count, 2);
        assert_eq!(stats.total_amount, 4000.0);
        assert_eq!(stats.average_amount, 2000.0);
        assert_eq!(stats.status_breakdown.get(&InvoiceStatus::Pending), Some(&1));
        assert_eq!(stats.status_breakdown.get(&InvoiceStatus::Paid), Some(&1));
        assert_eq!(stats.status_breakdown.get(&InvoiceStatus::Overdue), None);
    }

    #[test]
    fn no_matching_invoices_gives_zero_average() {
        let stats = InvoiceStats::for_prefix(&Vec::<InvoiceRecord>::new(), "TSI");
        assert_eq!(stats.invoice_count, 0);
        assert_eq!(stats.average_amount, 0.0);
        assert!(stats.status_breakdown.is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::NewInvoice;
    use chrono::Utc;
    use proptest::prelude::*;
    use sarthi_core::{CustomerId, InvoiceId, OrderId};

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: average × count reproduces the total for any non-empty set.
        #[test]
        fn average_times_count_is_total(totals in prop::collection::vec(0.0f64..1_000_000.0, 1..20)) {
            let records: Vec<InvoiceRecord> = totals
                .iter()
                .enumerate()
                .map(|(i, total)| {
                    NewInvoice {
                        invoice_number: format!("TSI-20261016-{i:06}"),
                        order_id: OrderId::new(),
                        customer_id: CustomerId::new(),
                        amount: *total,
                        tax_amount: 0.0,
                        total_amount: *total,
                        status: InvoiceStatus::Pending,
                        due_date: None,
                        notes: String::new(),
                    }
                    .into_record(InvoiceId::new(), Utc::now())
                })
                .collect();

            let stats = InvoiceStats::for_prefix(&records, "TSI");
            prop_assert_eq!(stats.invoice_count, totals.len());
            let expected: f64 = totals.iter().sum();
            prop_assert!((stats.average_amount * stats.invoice_count as f64 - expected).abs() < 1e-6 * expected.max(1.0));
        }
    }
}
