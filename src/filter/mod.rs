//! Free-text filtering of catalog rows.

use crate::catalog::CatalogRecord;

/// Keep the rows whose display name or identifier contains `query`,
/// ignoring case and surrounding whitespace.
///
/// A blank query returns every row. Order is always preserved, so
/// filtering twice with the same query gives the same result.
pub fn filter_catalog(records: &[CatalogRecord], query: &str) -> Vec<CatalogRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| matches(r, &needle))
        .cloned()
        .collect()
}

fn matches(record: &CatalogRecord, needle: &str) -> bool {
    record.display_name.to_lowercase().contains(needle)
        || record.identifier.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generate_catalog;

    #[test]
    fn blank_query_is_identity() {
        let rows = generate_catalog(12);
        assert_eq!(filter_catalog(&rows, ""), rows);
        assert_eq!(filter_catalog(&rows, "   "), rows);
    }

    #[test]
    fn matches_display_name_case_insensitively() {
        let rows = generate_catalog(12);
        let hits = filter_catalog(&rows, "TESLA");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.display_name.contains("Tesla")));
    }

    #[test]
    fn matches_identifier() {
        let rows = generate_catalog(12);
        let hits = filter_catalog(&rows, "b00005yc1s");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identifier, "B00005YC1S");
    }

    #[test]
    fn sku_is_not_searched() {
        let rows = generate_catalog(12);
        assert!(filter_catalog(&rows, "MG-CWS-02").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let rows = generate_catalog(12);
        assert!(filter_catalog(&rows, "umbrella").is_empty());
    }
}
