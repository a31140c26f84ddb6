use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::filter::Facet;

// ---------------------------------------------------------------------------
// DatedRecord — One dated sale or production entry
// ---------------------------------------------------------------------------

/// A single dated entry from a farm ledger: a sale, a milk collection, a
/// weighing. `amount` is what charts sum; `quantity` is the secondary measure
/// (kilograms sold against currency earned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedRecord {
    pub iso_date: String,
    pub amount: f64,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl DatedRecord {
    pub fn new(iso_date: impl Into<String>, amount: f64) -> Self {
        Self {
            iso_date: iso_date.into(),
            amount,
            quantity: 0.0,
            product: None,
            client: None,
            status: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// The parsed calendar date, or `None` when `iso_date` is malformed.
    pub fn date(&self) -> Option<NaiveDate> {
        calendar::parse_iso(&self.iso_date)
    }

    pub fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Product => self.product.as_deref(),
            Facet::Client => self.client.as_deref(),
            Facet::Status => self.status.as_deref(),
        }
    }
}
