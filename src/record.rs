//! The billing detail row and its column schema.
//!
//! The Azure cost export is a wide CSV; every declared column is typed here
//! (text everywhere except the cost amount). Columns not listed are tolerated
//! and ignored on load.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

/// Declared columns of the billing detail export, in file order.
///
/// Used to validate headers before deserialization so a missing column fails
/// with its name rather than a generic decode error.
pub static BILLING_COLUMNS: &[&str] = &[
    "InvoiceSectionName",
    "AccountName",
    "AccountOwnerId",
    "SubscriptionId",
    "SubscriptionName",
    "ResourceGroup",
    "ResourceLocation",
    "Date",
    "ProductName",
    "MeterCategory",
    "MeterSubCategory",
    "MeterId",
    "MeterName",
    "MeterRegion",
    "UnitOfMeasure",
    "Quantity",
    "EffectivePrice",
    "CostInBillingCurrency",
    "CostCenter",
    "ConsumedService",
    "ResourceId",
    "Tags",
    "OfferId",
    "AdditionalInfo",
    "ServiceInfo1",
    "ServiceInfo2",
    "ResourceName",
    "ReservationId",
    "ReservationName",
    "UnitPrice",
    "ProductOrderId",
    "ProductOrderName",
    "Term",
    "PublisherType",
    "PublisherName",
    "ChargeType",
    "Frequency",
    "PricingModel",
    "AvailabilityZone",
    "BillingAccountId",
    "BillingAccountName",
    "BillingCurrencyCode",
    "BillingPeriodStartDate",
    "BillingPeriodEndDate",
    "BillingProfileId",
    "BillingProfileName",
    "InvoiceSectionId",
    "IsAzureCreditEligible",
    "PartNumber",
    "PayGPrice",
    "PlanName",
    "ServiceFamily",
    "CostAllocationRuleName",
];

/// One line item of the billing export.
///
/// `month` and `year` are not part of the file; they are derived from `Date`
/// once after load and never mutated afterwards.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingRecord {
    pub invoice_section_name: String,
    pub account_name: String,
    pub account_owner_id: String,
    pub subscription_id: String,
    pub subscription_name: String,
    pub resource_group: String,
    pub resource_location: String,
    pub date: String,
    pub product_name: String,
    pub meter_category: String,
    pub meter_sub_category: String,
    pub meter_id: String,
    pub meter_name: String,
    pub meter_region: String,
    pub unit_of_measure: String,
    pub quantity: String,
    pub effective_price: String,
    pub cost_in_billing_currency: f64,
    pub cost_center: String,
    pub consumed_service: String,
    pub resource_id: String,
    pub tags: String,
    pub offer_id: String,
    pub additional_info: String,
    pub service_info1: String,
    pub service_info2: String,
    pub resource_name: String,
    pub reservation_id: String,
    pub reservation_name: String,
    pub unit_price: String,
    pub product_order_id: String,
    pub product_order_name: String,
    pub term: String,
    pub publisher_type: String,
    pub publisher_name: String,
    pub charge_type: String,
    pub frequency: String,
    pub pricing_model: String,
    pub availability_zone: String,
    pub billing_account_id: String,
    pub billing_account_name: String,
    pub billing_currency_code: String,
    pub billing_period_start_date: String,
    pub billing_period_end_date: String,
    pub billing_profile_id: String,
    pub billing_profile_name: String,
    pub invoice_section_id: String,
    pub is_azure_credit_eligible: String,
    pub part_number: String,
    pub pay_g_price: String,
    pub plan_name: String,
    pub service_family: String,
    pub cost_allocation_rule_name: String,

    #[serde(skip)]
    pub month: Option<String>,
    #[serde(skip)]
    pub year: Option<String>,
}

impl BillingRecord {
    /// Parses the `Date` column into a calendar date.
    pub fn billing_date(&self) -> Result<NaiveDate> {
        parse_billing_date(&self.date)
    }

    /// Derives the `Month` (`YYYY-MM`) and `Year` (`YYYY`) period labels
    /// from the `Date` column.
    pub fn derive_periods(&mut self) -> Result<()> {
        let date = self.billing_date()?;
        self.month = Some(date.format("%Y-%m").to_string());
        self.year = Some(date.format("%Y").to_string());
        Ok(())
    }
}

/// Accepts the export's `MM/DD/YYYY` form or ISO `YYYY-MM-DD`.
pub fn parse_billing_date(raw: &str) -> Result<NaiveDate> {
    for format in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    bail!("unparseable Date value {raw:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_billing_date_export_format() {
        let date = parse_billing_date("01/15/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_billing_date_iso_format() {
        let date = parse_billing_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_billing_date_rejects_garbage() {
        assert!(parse_billing_date("January 15th").is_err());
        assert!(parse_billing_date("").is_err());
    }

    #[test]
    fn test_derive_periods_sets_labels() {
        let mut record = BillingRecord {
            date: "2024-02-01".to_string(),
            ..Default::default()
        };

        record.derive_periods().unwrap();

        assert_eq!(record.month.as_deref(), Some("2024-02"));
        assert_eq!(record.year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_derive_periods_bad_date_is_fatal() {
        let mut record = BillingRecord {
            date: "not-a-date".to_string(),
            ..Default::default()
        };

        assert!(record.derive_periods().is_err());
    }

    #[test]
    fn test_columns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for column in BILLING_COLUMNS {
            assert!(seen.insert(column), "duplicate column {column}");
        }
    }
}
