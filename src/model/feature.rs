//! The flattened per-network output record.

use crate::stats::Summary;

/// CSV columns that precede the per-measure statistic blocks.
pub const LEADING_FIELDS: [&str; 6] = [
    "name",
    "type",
    "interaction_type",
    "interaction_subtype",
    "node_count",
    "edge_count",
];

/// One successfully processed network: identity, labels, derived counts, and
/// one nine-statistic block per enabled measure in canonical order.
///
/// Rows are built whole and written once — a network either contributes a
/// complete record or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub name: String,
    pub network_type: String,
    pub interaction_type: String,
    pub interaction_subtype: String,
    pub node_count: usize,
    pub edge_count: usize,
    /// `(column prefix, summary)` per measure, in the engine's order.
    pub summaries: Vec<(&'static str, Summary)>,
}

impl FeatureRow {
    /// Header row for the given measure prefixes.
    pub fn header(prefixes: &[&'static str]) -> Vec<String> {
        let mut fields: Vec<String> =
            LEADING_FIELDS.iter().map(|s| s.to_string()).collect();
        for prefix in prefixes {
            fields.extend(Summary::field_names(prefix));
        }
        fields
    }

    /// Render as CSV cells, in header order. Empty summaries render their
    /// non-count fields as empty cells, never as zeros.
    pub fn csv_record(&self) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.network_type.clone(),
            self.interaction_type.clone(),
            self.interaction_subtype.clone(),
            self.node_count.to_string(),
            self.edge_count.to_string(),
        ];
        for (_, summary) in &self.summaries {
            cells.extend(summary.csv_cells());
        }
        cells
    }
}
