//! # Network Data Model
//!
//! Clean DTOs shared by every stage of the feature pipeline.
//! These types cross every boundary: loading ↔ curvature ↔ statistics ↔ output.
//!
//! Design rule: NO file handles, NO provider types here.
//! This module is pure data — no I/O beyond the index/split readers, no state.

pub mod network;
pub mod adjacency;
pub mod feature;

pub use network::{NetworkRecord, PathStatus, SplitFilter, SplitRecord, SplitSet};
pub use adjacency::{Adjacency, EdgePair};
pub use feature::FeatureRow;
