/// Catalog generator and filter tests.
///
/// Checks per-row invariants over a wide index range, determinism of the
/// generator, and the algebra of the free-text filter.
use sellerdash::catalog::templates::TEMPLATES;
use sellerdash::catalog::{self, CatalogRecord};
use sellerdash::filter::filter_catalog;
use sellerdash::utils::format::round2;

// ---------------------------------------------------------------------------
// Row invariants
// ---------------------------------------------------------------------------

#[test]
fn every_row_upholds_its_invariants() {
    for i in 0..500 {
        let r = catalog::record_at(i);

        assert!(r.units_sold >= 1, "row {i}: units_sold");
        assert!(r.orders_count >= 1, "row {i}: orders_count");
        assert!(r.orders_count <= r.units_sold, "row {i}: orders > units");
        assert!(r.average_daily_velocity >= 1, "row {i}: velocity");
        assert_eq!(
            r.net_profit_per_unit,
            round2(r.net_profit / f64::from(r.units_sold.max(1))),
            "row {i}: per-unit profit"
        );
        assert!(r.gross_sales > 0.0);
        assert!(r.platform_fees > 0.0 && r.platform_fees < r.gross_sales);
        if i % 7 == 0 {
            assert!(r.refund_amount > 0.0, "row {i}: refund expected");
        } else {
            assert_eq!(r.refund_amount, 0.0, "row {i}: no refund expected");
        }
    }
}

#[test]
fn identifiers_are_well_formed_and_unique() {
    let records = catalog::generate_catalog(1_000);
    let mut seen = std::collections::HashSet::new();
    for r in &records {
        assert_eq!(r.identifier.len(), 10, "{}", r.identifier);
        assert!(r.identifier.starts_with("B0"));
        assert!(
            r.identifier[2..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
        assert!(seen.insert(r.identifier.clone()), "duplicate {}", r.identifier);
    }
}

#[test]
fn names_and_codes_cycle_through_templates() {
    for (i, r) in catalog::generate_catalog(24).iter().enumerate() {
        let template = TEMPLATES[i % TEMPLATES.len()];
        assert_eq!(r.display_name, template.display_name);
        assert_eq!(
            r.stock_keeping_code,
            format!("{}-{:02}", template.base_code, i + 1)
        );
    }
}

#[test]
fn stockout_dates_stay_in_march() {
    for r in catalog::generate_catalog(40) {
        assert!(r.projected_stockout_date.starts_with("Mar "));
        assert!(r.projected_stockout_date.ends_with(", 2026"));
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn generation_is_deterministic() {
    assert_eq!(catalog::generate_catalog(50), catalog::generate_catalog(50));
}

#[test]
fn smaller_catalog_is_a_prefix_of_larger() {
    let small = catalog::generate_catalog(10);
    let large = catalog::generate_catalog(30);
    assert_eq!(small.as_slice(), &large[..10]);
}

#[test]
fn zero_count_is_empty() {
    assert!(catalog::generate_catalog(0).is_empty());
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn demo() -> Vec<CatalogRecord> {
    catalog::generate_catalog(30)
}

#[test]
fn blank_query_returns_everything_in_order() {
    let records = demo();
    assert_eq!(filter_catalog(&records, ""), records);
    assert_eq!(filter_catalog(&records, "   "), records);
}

#[test]
fn filter_is_idempotent_and_a_subset() {
    let records = demo();
    for query in ["tesla", "SHADE", "b000", "gap filler", "zzz"] {
        let once = filter_catalog(&records, query);
        let twice = filter_catalog(&once, query);
        assert_eq!(once, twice, "query {query:?}");
        assert!(once.iter().all(|r| records.contains(r)));
    }
}

#[test]
fn filter_is_case_insensitive_and_trims() {
    let records = demo();
    assert_eq!(
        filter_catalog(&records, "  Toyota "),
        filter_catalog(&records, "TOYOTA")
    );
    assert_eq!(filter_catalog(&records, "toyota").len(), 5);
}

#[test]
fn filter_matches_identifiers() {
    let records = demo();
    let target = &records[17];
    let hits = filter_catalog(&records, &target.identifier.to_lowercase());
    assert_eq!(hits.len(), 1);
    assert_eq!(&hits[0], target);
}

#[test]
fn no_match_yields_empty() {
    assert!(filter_catalog(&demo(), "no such product").is_empty());
}
