use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RecordSummary — KPI totals over a filtered record list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordSummary {
    pub total_amount: f64,
    pub total_quantity: f64,
    pub record_count: usize,
}
