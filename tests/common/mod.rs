//! Shared test fixtures for the farm-ledger integration tests.
//!
//! Provides small sample sales and production record sets plus helpers that
//! build a ledger over an in-memory store or a temp-dir JSON store.

#![allow(dead_code)]

use chrono::NaiveDate;
use farm_ledger::{DatedRecord, FarmLedger, JsonFileStore, MemoryStore, RecordStore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The three-record scenario: two March sales and one February sale.
pub fn march_sales() -> Vec<DatedRecord> {
    vec![
        DatedRecord::new("2023-03-10", 950_000.0)
            .with_quantity(420.0)
            .with_product("Novillo")
            .with_client("Frigorifico Sur")
            .with_status("Pagado"),
        DatedRecord::new("2023-03-11", 1_400_000.0)
            .with_quantity(610.0)
            .with_product("Vaquillona")
            .with_client("Feria Central")
            .with_status("Pendiente"),
        DatedRecord::new("2023-02-28", 240_000.0)
            .with_quantity(95.0)
            .with_product("Novillo")
            .with_client("Feria Central")
            .with_status("Pagado"),
    ]
}

/// A week of milk collections, one of them with a broken date.
pub fn milk_log() -> Vec<DatedRecord> {
    vec![
        DatedRecord::new("2024-02-26", 410.0).with_product("Leche"),
        DatedRecord::new("2024-02-27", 395.5).with_product("Leche"),
        DatedRecord::new("2024-02-28", 402.0).with_product("Leche"),
        DatedRecord::new("2024-02-29", 388.0).with_product("Leche"),
        DatedRecord::new("2024-03-01", 420.0).with_product("Leche"),
        DatedRecord::new("2024-03-01", 12.5).with_product("Calostro"),
        DatedRecord::new("2024-13-01", 999.0).with_product("Leche"),
    ]
}

/// Ledger over an in-memory store seeded with `march_sales` and `milk_log`.
pub fn sample_ledger() -> FarmLedger {
    let store = MemoryStore::new()
        .with_records("sales", march_sales())
        .unwrap()
        .with_records("production", milk_log())
        .unwrap();
    FarmLedger::builder()
        .store(Box::new(store))
        .today(date(2024, 6, 15))
        .build()
        .unwrap()
}

/// JSON store in a temp dir. Keep the `TempDir` alive for the whole test.
pub fn temp_store() -> (JsonFileStore, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(Some(tmp_dir.path().to_path_buf())).unwrap();
    (store, tmp_dir)
}

/// Temp JSON store pre-populated with `march_sales`.
pub fn seeded_temp_store() -> (JsonFileStore, tempfile::TempDir) {
    let (store, tmp) = temp_store();
    store.save("sales", &march_sales()).unwrap();
    (store, tmp)
}
