//! Top performers by net profit.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;

/// Number of bars shown in the top-performer chart.
pub const DEFAULT_TOP_LIMIT: usize = 5;
/// Identifier characters kept in a bar label.
const LABEL_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    /// Shortened identifier, e.g. `B000...`.
    pub label: String,
    pub identifier: String,
    pub display_name: String,
    pub net_profit: f64,
}

/// Rank rows by net profit, highest first, keeping at most `limit`.
///
/// Rows with equal profit keep their catalog order.
pub fn top_performers(records: &[CatalogRecord], limit: usize) -> Vec<TopPerformer> {
    let mut ranked: Vec<&CatalogRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.net_profit.total_cmp(&a.net_profit));

    ranked
        .into_iter()
        .take(limit)
        .map(|r| TopPerformer {
            label: short_label(&r.identifier),
            identifier: r.identifier.clone(),
            display_name: r.display_name.clone(),
            net_profit: r.net_profit,
        })
        .collect()
}

fn short_label(identifier: &str) -> String {
    let prefix: String = identifier.chars().take(LABEL_PREFIX_LEN).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generate_catalog;

    #[test]
    fn ranks_by_profit_descending() {
        let top = top_performers(&generate_catalog(30), DEFAULT_TOP_LIMIT);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].identifier, "B00006398Z");
        assert_eq!(top[0].net_profit, 46.82);
        assert!(top.windows(2).all(|w| w[0].net_profit >= w[1].net_profit));
    }

    #[test]
    fn limit_larger_than_catalog() {
        let top = top_performers(&generate_catalog(3), 10);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn label_is_shortened() {
        let top = top_performers(&generate_catalog(1), 1);
        assert_eq!(top[0].label, "B000...");
    }
}
