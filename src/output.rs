//! Run-level output: row previews after load and the end-of-run summary.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::record::BillingRecord;

/// Summary of a completed run, logged as JSON once all reports are written.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub timestamp: String,
    pub rows_loaded: usize,
    pub grand_total: f64,
    pub reports: Vec<PathBuf>,
}

/// Logs the first few loaded rows at debug level.
pub fn print_preview(rows: &[BillingRecord]) {
    for row in rows.iter().take(5) {
        debug!(
            subscription = %row.subscription_name,
            meter_category = %row.meter_category,
            account = %row.account_name,
            date = %row.date,
            cost = row.cost_in_billing_currency,
            "Loaded billing row"
        );
    }
}

/// Logs a run summary as pretty-printed JSON.
pub fn print_json(summary: &RunSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> RunSummary {
        RunSummary {
            timestamp: "20240101T120000".to_string(),
            rows_loaded: 3,
            grand_total: 18.0,
            reports: vec![PathBuf::from("out/20240101T120000/cost_by_subscription.csv")],
        }
    }

    #[test]
    fn test_print_preview_does_not_panic() {
        let rows = vec![BillingRecord::default(); 10];
        print_preview(&rows);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_summary()).unwrap();
    }

    #[test]
    fn test_summary_serializes_totals() {
        let json = serde_json::to_string(&sample_summary()).unwrap();
        assert!(json.contains("\"rows_loaded\":3"));
        assert!(json.contains("\"grand_total\":18.0"));
    }
}
