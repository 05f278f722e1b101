//! Edge-list file loading.
//!
//! Edge lists are headerless CSVs, one interaction per row: `u, v[, weight]`.
//! The loader preserves the raw sequence exactly as encountered — duplicates
//! and self-pairs included — so canonicalization stays the adjacency
//! builder's job. Rows with fewer than two fields are skipped silently; a
//! malformed weight falls back to 1.0 rather than failing the row.

use std::path::Path;

use hashbrown::HashSet;

use crate::Result;

/// One raw edge-list row, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub u: String,
    pub v: String,
    /// Present only when weight interpretation was requested and the row had
    /// a third field.
    pub weight: Option<f64>,
}

/// Parsed edge-list file: the node set plus the raw edge sequence.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    nodes: HashSet<String>,
    edges: Vec<RawEdge>,
}

impl EdgeList {
    /// Load an edge-list file.
    ///
    /// Any read failure is fatal for this one network only — the caller maps
    /// it to a per-network skip, never a run abort.
    pub fn load(path: &Path, use_weights: bool) -> Result<EdgeList> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut list = EdgeList::default();
        for record in reader.records() {
            let record = record?;
            if record.len() < 2 {
                continue; // silently skip short rows
            }
            let weight = if use_weights {
                record.get(2).map(|raw| raw.parse().unwrap_or(1.0))
            } else {
                None
            };
            list.push(record[0].to_string(), record[1].to_string(), weight);
        }
        Ok(list)
    }

    /// Append one raw edge, registering both endpoints in the node set.
    pub fn push(&mut self, u: String, v: String, weight: Option<f64>) {
        self.nodes.insert(u.clone());
        self.nodes.insert(v.clone());
        self.edges.push(RawEdge { u, v, weight });
    }

    pub fn nodes(&self) -> &HashSet<String> {
        &self.nodes
    }

    /// Raw edges in encounter order, duplicates and self-pairs included.
    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    /// Raw row count — the pre-deduplication edge count used by size gating.
    pub fn raw_edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Endpoint label pairs, for the adjacency builder.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|e| (e.u.as_str(), e.v.as_str()))
    }
}

// ============================================================================
// Tests
// ============================================================================
