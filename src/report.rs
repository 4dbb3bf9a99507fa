//! Aggregate cost reports: group by one dimension, sum the cost column,
//! write a two-column CSV.

use anyhow::{Context, Result, anyhow};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::record::BillingRecord;

/// The dimension a cost report is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Subscription,
    MeterCategory,
    Account,
    Month,
}

impl GroupKey {
    /// Header name for the key column in the written report.
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::Subscription => "SubscriptionName",
            GroupKey::MeterCategory => "MeterCategory",
            GroupKey::Account => "AccountName",
            GroupKey::Month => "Month",
        }
    }

    fn extract<'a>(&self, row: &'a BillingRecord) -> Result<&'a str> {
        match self {
            GroupKey::Subscription => Ok(&row.subscription_name),
            GroupKey::MeterCategory => Ok(&row.meter_category),
            GroupKey::Account => Ok(&row.account_name),
            GroupKey::Month => row
                .month
                .as_deref()
                .ok_or_else(|| anyhow!("Month column missing: period labels were never derived")),
        }
    }
}

/// Groups `rows` by `key`, sums `CostInBillingCurrency` within each group,
/// and writes one `<Key>,CostInBillingCurrency` line per group to
/// `dest_dir/file_name`, overwriting any existing file.
///
/// Groups are written in lexicographic key order.
pub fn write_cost_report(
    rows: &[BillingRecord],
    key: GroupKey,
    dest_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let file_path = dest_dir.join(file_name);
    info!(key = key.column(), path = %file_path.display(), "Creating cost report");

    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        let group = key.extract(row)?;
        *groups.entry(group.to_string()).or_insert(0.0) += row.cost_in_billing_currency;
    }

    let mut writer = WriterBuilder::new()
        .from_path(&file_path)
        .with_context(|| format!("creating {}", file_path.display()))?;

    writer.write_record([key.column(), "CostInBillingCurrency"])?;
    for (group, cost) in &groups {
        writer.write_record([group.as_str(), cost.to_string().as_str()])?;
    }
    writer.flush()?;

    Ok(file_path)
}

/// Total cost over all rows, for run summaries and conservation checks.
pub fn grand_total(rows: &[BillingRecord]) -> f64 {
    rows.iter().map(|r| r.cost_in_billing_currency).sum()
}
