//! FarmLedger facade and dashboard query tests.

mod common;

use common::date;
use farm_ledger::{
    AggregatorConfig, DateRange, DatedRecord, Facet, FarmLedger, LedgerError, RecordFilter,
    TrailingWindow,
};

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_rejects_invalid_config() {
    let cfg = AggregatorConfig {
        daily_height_floor: -1.0,
        ..AggregatorConfig::default()
    };
    let result = FarmLedger::builder().in_memory().config(cfg).build();
    assert!(matches!(result, Err(LedgerError::InvalidArgument(_))));
}

#[test]
fn builder_opens_json_store_in_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = FarmLedger::builder().data_dir(tmp.path()).build().unwrap();
    ledger.sales().add(DatedRecord::new("2023-03-10", 1.0)).unwrap();
    assert!(tmp.path().join("sales.json").exists());
    assert!(ledger.to_string().contains("json:"));
}

#[test]
fn display_names_store_and_floor() {
    let ledger = FarmLedger::builder().in_memory().build().unwrap();
    assert_eq!(
        ledger.to_string(),
        "FarmLedger(store=memory, monthly_floor=100000, locale=Es)"
    );
}

// ---------------------------------------------------------------------------
// SalesQuery
// ---------------------------------------------------------------------------

#[test]
fn sales_chart_then_drill_down() {
    let ledger = common::sample_ledger();
    let sales = ledger.sales();

    let buckets = sales.monthly_chart(TrailingWindow::SixMonths, None).unwrap();
    assert_eq!(buckets.len(), 6);

    let filter = ledger
        .aggregator()
        .select_bucket(&buckets[5])
        .where_eq(Facet::Client, "Frigorifico Sur");
    let listed = sales.list(&filter).unwrap();
    assert_eq!(listed.len(), 1);

    let summary = sales.summary(&filter.clear_facets()).unwrap();
    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.total_amount, 2_350_000.0);
}

#[test]
fn sales_add_rejects_bad_records() {
    let ledger = common::sample_ledger();
    let sales = ledger.sales();

    assert!(matches!(
        sales.add(DatedRecord::new("31/03/2023", 1.0)),
        Err(LedgerError::InvalidDate(_))
    ));
    assert!(matches!(
        sales.add(DatedRecord::new("2023-03-31", f64::NAN)),
        Err(LedgerError::InvalidArgument(_))
    ));
    assert_eq!(sales.all().unwrap().len(), 3);
}

#[test]
fn new_sale_moves_the_chart_anchor() {
    let ledger = common::sample_ledger();
    ledger
        .sales()
        .add(DatedRecord::new("2023-05-02", 300_000.0).with_product("Toro"))
        .unwrap();

    let buckets = ledger
        .sales()
        .monthly_chart(TrailingWindow::SixMonths, None)
        .unwrap();
    let last = buckets.last().unwrap();
    assert_eq!((last.year, last.month_index), (2023, 4));
    assert_eq!(last.total, 300_000.0);
    assert_eq!(
        ledger.sales().facet_values(Facet::Product).unwrap(),
        vec!["Todos", "Novillo", "Toro", "Vaquillona"]
    );
}

#[test]
fn active_range_flags_chart_bucket() {
    let ledger = common::sample_ledger();
    let range = DateRange::month_of(date(2023, 3, 1));
    let buckets = ledger
        .sales()
        .monthly_chart(TrailingWindow::TwelveMonths, Some(&range))
        .unwrap();
    assert_eq!(buckets.len(), 12);
    assert!(buckets[11].is_active);
    assert_eq!(buckets.iter().filter(|b| b.is_active).count(), 1);
}

// ---------------------------------------------------------------------------
// ProductionQuery
// ---------------------------------------------------------------------------

#[test]
fn production_summary_skips_malformed_entry() {
    let ledger = common::sample_ledger();
    let summary = ledger.production().summary(&RecordFilter::new()).unwrap();
    assert_eq!(summary.record_count, 6);
    assert_eq!(summary.total_amount, 2_028.0);
}

#[test]
fn production_daily_chart_by_product() {
    let ledger = common::sample_ledger();
    let production = ledger.production();

    let buckets = production.daily_chart(5, None).unwrap();
    assert_eq!(buckets.len(), 5);
    assert_eq!(buckets[0].start, date(2024, 2, 26));

    let only_milk = RecordFilter::new()
        .date_range(buckets[4].range())
        .where_eq(Facet::Product, "Leche");
    assert_eq!(production.list(&only_milk).unwrap().len(), 1);
}

#[test]
fn production_monthly_chart_uses_configured_floor() {
    let cfg = AggregatorConfig {
        monthly_height_floor: 1.0,
        ..AggregatorConfig::default()
    };
    let ledger = FarmLedger::builder()
        .in_memory()
        .config(cfg)
        .today(date(2024, 6, 15))
        .build()
        .unwrap();
    for record in common::milk_log() {
        if record.date().is_some() {
            ledger.production().add(record).unwrap();
        }
    }

    let buckets = ledger
        .production()
        .monthly_chart(TrailingWindow::SixMonths, None)
        .unwrap();
    let feb = &buckets[4];
    let mar = &buckets[5];
    assert_eq!(feb.total, 1_595.5);
    assert_eq!(mar.total, 432.5);
    assert_eq!(feb.height_ratio, 1.0);
    assert_eq!(mar.height_ratio, 0.27);
}
