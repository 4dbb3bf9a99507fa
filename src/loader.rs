//! CSV loading for the billing detail export.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::record::{BILLING_COLUMNS, BillingRecord};

/// Reads the billing export at `path` into memory, coercing each declared
/// column to its schema type.
///
/// # Errors
///
/// Fails if a declared column is absent from the header, a row is malformed,
/// or a cost value does not parse as a number. Extra columns are ignored.
pub fn load_billing_csv(path: &Path) -> Result<Vec<BillingRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    for column in BILLING_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            bail!("billing export is missing declared column {column:?}");
        }
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: BillingRecord =
            result.with_context(|| format!("parsing billing row {}", i + 1))?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "Billing export loaded");
    Ok(rows)
}

/// Appends the derived `Month`/`Year` labels to every row.
pub fn derive_periods(rows: &mut [BillingRecord]) -> Result<()> {
    for (i, row) in rows.iter_mut().enumerate() {
        row.derive_periods()
            .with_context(|| format!("deriving period columns for row {}", i + 1))?;
    }
    Ok(())
}
