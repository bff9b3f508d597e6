use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::invoice::{Invoice, InvoiceStatus};

/// All-time invoice figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_invoices: u64,
    /// Sum of invoice grand totals.
    pub total_amount: f64,
    pub paid_amount: f64,
    /// Grand totals of every invoice not yet paid (draft, sent, overdue).
    pub pending_amount: f64,
}

/// Figures for the calendar month containing the reference instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub monthly_invoices: u64,
    pub monthly_amount: f64,
}

/// Dashboard overview: all-time plus current-month figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub total: OverallStats,
    pub monthly: MonthlyStats,
}

/// Compute the dashboard statistics over a set of invoices.
///
/// `now` anchors the monthly window (the calendar month containing it, UTC);
/// it is passed in so the computation stays a pure function.
pub fn invoice_stats(invoices: &[Invoice], now: DateTime<Utc>) -> InvoiceStats {
    let mut stats = InvoiceStats::default();

    for invoice in invoices {
        stats.total.total_invoices += 1;
        stats.total.total_amount += invoice.grand_total;
        if invoice.status == InvoiceStatus::Paid {
            stats.total.paid_amount += invoice.grand_total;
        } else {
            stats.total.pending_amount += invoice.grand_total;
        }

        if invoice.date.year() == now.year() && invoice.date.month() == now.month() {
            stats.monthly.monthly_invoices += 1;
            stats.monthly.monthly_amount += invoice.grand_total;
        }
    }

    stats
}
