//! Dataset index and split records.
//!
//! Both formats are produced by collaborator tooling (index construction and
//! stratified split building) and consumed here read-only.

use std::fmt;
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::Result;

// ============================================================================
// Path resolution status
// ============================================================================

/// How the index builder resolved a network's edge-list file.
///
/// Only three of the six states point at a usable file; the rest gate the
/// network out of a run with reason `missing_path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    /// Found at the expected `<type>/<name>.csv` location.
    Ok,
    /// Found under a different network type directory.
    MatchedOtherType,
    /// More than one candidate file matched the name.
    Ambiguous,
    /// Matched after alphanumeric normalization of the name.
    NormalizedMatch,
    /// Normalized match was not unique.
    NormalizedAmbiguous,
    /// No candidate file at all.
    Missing,
}

impl PathStatus {
    /// Whether the recorded `file_path` is safe to load.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            PathStatus::Ok | PathStatus::MatchedOtherType | PathStatus::NormalizedMatch
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathStatus::Ok => "ok",
            PathStatus::MatchedOtherType => "matched_other_type",
            PathStatus::Ambiguous => "ambiguous",
            PathStatus::NormalizedMatch => "normalized_match",
            PathStatus::NormalizedAmbiguous => "normalized_ambiguous",
            PathStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Dataset index record
// ============================================================================

/// One row of the dataset index CSV.
///
/// Identity and labels are carried verbatim into the output; the metadata
/// counts (`nlinks`, `connectance`, `nrows`, `ncols`) come from the source
/// metadata table and are not recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub network_type: String,
    #[serde(default)]
    pub interaction_type: String,
    #[serde(default)]
    pub interaction_subtype: String,
    #[serde(default)]
    pub nlinks: Option<u64>,
    #[serde(default)]
    pub connectance: Option<f64>,
    #[serde(default)]
    pub nrows: Option<u64>,
    #[serde(default)]
    pub ncols: Option<u64>,
    #[serde(default)]
    pub file_path: String,
    pub path_status: PathStatus,
}

impl NetworkRecord {
    /// Read the full dataset index. An unreadable index is fatal for the run.
    pub fn read_index(path: &Path) -> Result<Vec<NetworkRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        Ok(rows)
    }
}

// ============================================================================
// Split records
// ============================================================================

/// Which side of a train/test split a network landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitSet {
    Train,
    Test,
}

/// One row of a split CSV produced by the split builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRecord {
    pub name: String,
    pub split: SplitSet,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub task: String,
    #[serde(rename = "type", default)]
    pub network_type: String,
    #[serde(default)]
    pub interaction_type: String,
    #[serde(default)]
    pub interaction_subtype: String,
}

/// Network-name allow-list built from split records.
///
/// Networks absent from the filter are passed over silently — they are not
/// skips and do not show up in the run summary.
#[derive(Debug, Clone, Default)]
pub struct SplitFilter {
    names: HashSet<String>,
}

impl SplitFilter {
    /// Build a filter from split records, optionally keeping only one side.
    pub fn from_records(records: &[SplitRecord], set: Option<SplitSet>) -> SplitFilter {
        let names = records
            .iter()
            .filter(|r| set.is_none_or(|s| r.split == s))
            .map(|r| r.name.clone())
            .collect();
        SplitFilter { names }
    }

    /// Read a split CSV and build the filter in one step.
    pub fn read_csv(path: &Path, set: Option<SplitSet>) -> Result<SplitFilter> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for record in reader.deserialize::<SplitRecord>() {
            records.push(record?);
        }
        Ok(SplitFilter::from_records(&records, set))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether the driver should process this network. An empty filter is no
    /// filter at all — everything passes.
    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split_record(name: &str, split: SplitSet) -> SplitRecord {
        SplitRecord {
            name: name.into(),
            split,
            label: String::new(),
            task: String::new(),
            network_type: String::new(),
            interaction_type: String::new(),
            interaction_subtype: String::new(),
        }
    }

    #[test]
    fn test_path_status_resolution() {
        assert!(PathStatus::Ok.is_resolved());
        assert!(PathStatus::MatchedOtherType.is_resolved());
        assert!(PathStatus::NormalizedMatch.is_resolved());
        assert!(!PathStatus::Ambiguous.is_resolved());
        assert!(!PathStatus::NormalizedAmbiguous.is_resolved());
        assert!(!PathStatus::Missing.is_resolved());
    }

    #[test]
    fn test_index_record_from_csv() {
        let data = "\
name,type,interaction_type,interaction_subtype,nlinks,connectance,nrows,ncols,file_path,path_status
M_PL_001,plant-pollinator,Mutualism,Pollination,167,0.15,84,101,data/edgelists/M_PL_001.csv,ok
A_HP_002,host-parasite,Antagonism,Parasitism,,,,,,missing
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<NetworkRecord> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "M_PL_001");
        assert_eq!(rows[0].network_type, "plant-pollinator");
        assert_eq!(rows[0].nlinks, Some(167));
        assert_eq!(rows[0].path_status, PathStatus::Ok);
        assert_eq!(rows[1].nlinks, None);
        assert_eq!(rows[1].path_status, PathStatus::Missing);
    }

    #[test]
    fn test_split_filter_from_csv() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,split,label,task,type,interaction_type,interaction_subtype").unwrap();
        writeln!(file, "a,train,Mutualism,binary,plant-pollinator,Mutualism,").unwrap();
        writeln!(file, "b,test,Antagonism,binary,host-parasite,Antagonism,").unwrap();
        file.flush().unwrap();

        let filter = SplitFilter::read_csv(file.path(), Some(SplitSet::Test)).unwrap();
        assert!(filter.contains("b"));
        assert!(!filter.contains("a"));
        assert_eq!(filter.len(), 1);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_split_filter_by_set() {
        let records = vec![
            split_record("a", SplitSet::Train),
            split_record("b", SplitSet::Test),
            split_record("c", SplitSet::Train),
        ];

        let all = SplitFilter::from_records(&records, None);
        assert_eq!(all.len(), 3);

        let train = SplitFilter::from_records(&records, Some(SplitSet::Train));
        assert_eq!(train.len(), 2);
        assert!(train.contains("a"));
        assert!(!train.contains("b"));
        assert!(train.allows("a"));
        assert!(!train.allows("b"));
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = SplitFilter::from_records(&[], None);
        assert!(filter.is_empty());
        assert!(filter.allows("anything"));
        assert!(!filter.contains("anything"));
    }
}
