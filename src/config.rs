use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Maximum-total floor for monthly charts, in currency units.
pub const DEFAULT_MONTHLY_HEIGHT_FLOOR: f64 = 100_000.0;
/// Maximum-total floor for daily charts (litres, kilograms).
pub const DEFAULT_DAILY_HEIGHT_FLOOR: f64 = 1.0;
/// Smallest bar height, in percent, so empty buckets stay clickable.
pub const DEFAULT_MIN_HEIGHT_PERCENT: f64 = 5.0;

pub const WILDCARD_ES: &str = "Todos";
pub const WILDCARD_EN: &str = "All";

pub const SALES: &str = "sales";
pub const PRODUCTION: &str = "production";

pub fn collection_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (SALES, "sales.json"),
        (PRODUCTION, "production.json"),
    ])
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("farm-ledger")
    } else {
        PathBuf::from(".farm-ledger-data")
    }
}

// ---------------------------------------------------------------------------
// TrailingWindow
// ---------------------------------------------------------------------------

/// Number of trailing months shown on a monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrailingWindow {
    #[default]
    SixMonths,
    TwelveMonths,
}

impl TrailingWindow {
    pub fn months(&self) -> u32 {
        match self {
            TrailingWindow::SixMonths => 6,
            TrailingWindow::TwelveMonths => 12,
        }
    }

    pub fn from_months(months: u32) -> Result<Self> {
        match months {
            6 => Ok(TrailingWindow::SixMonths),
            12 => Ok(TrailingWindow::TwelveMonths),
            other => Err(LedgerError::InvalidArgument(format!(
                "trailing window must be 6 or 12 months, got {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// LabelLocale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    #[default]
    Es,
    En,
}

impl LabelLocale {
    /// Short month name for a 0-based month index.
    pub fn month_abbrev(&self, month_index: u32) -> &'static str {
        const ES: [&str; 12] = [
            "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
        ];
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let idx = (month_index as usize).min(11);
        match self {
            LabelLocale::Es => ES[idx],
            LabelLocale::En => EN[idx],
        }
    }
}

// ---------------------------------------------------------------------------
// AggregatorConfig
// ---------------------------------------------------------------------------

/// Tunables for bucket construction and facet matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregatorConfig {
    pub monthly_height_floor: f64,
    pub daily_height_floor: f64,
    pub min_height_percent: f64,
    /// Facet values meaning "no filter". The first entry is used as the
    /// leading option returned by facet value listings.
    pub wildcards: Vec<String>,
    pub locale: LabelLocale,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            monthly_height_floor: DEFAULT_MONTHLY_HEIGHT_FLOOR,
            daily_height_floor: DEFAULT_DAILY_HEIGHT_FLOOR,
            min_height_percent: DEFAULT_MIN_HEIGHT_PERCENT,
            wildcards: vec![WILDCARD_ES.to_string(), WILDCARD_EN.to_string()],
            locale: LabelLocale::default(),
        }
    }
}

impl AggregatorConfig {
    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AggregatorConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject floors that would divide by zero or produce negative heights.
    pub fn validate(&self) -> Result<()> {
        if self.monthly_height_floor.is_nan()
            || self.daily_height_floor.is_nan()
            || self.monthly_height_floor <= 0.0
            || self.daily_height_floor <= 0.0
        {
            return Err(LedgerError::InvalidArgument(
                "height floors must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.min_height_percent) {
            return Err(LedgerError::InvalidArgument(format!(
                "min_height_percent must be within 0..=100, got {}",
                self.min_height_percent
            )));
        }
        Ok(())
    }

    pub fn is_wildcard(&self, value: &str) -> bool {
        self.wildcards.iter().any(|w| w == value)
    }

    pub fn primary_wildcard(&self) -> &str {
        self.wildcards
            .first()
            .map(String::as_str)
            .unwrap_or(WILDCARD_ES)
    }
}
