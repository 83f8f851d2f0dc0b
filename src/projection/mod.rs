//! Response projections - tree outline, bar chart dataset, pretty JSON
//!
//! Pure functions over `serde_json::Value`; they never mutate or cache the
//! response they read.

pub mod chart;
pub mod format;
pub mod tree;

pub use chart::{is_chartable, render, visualize_text, ChartDataset};
pub use format::{format_json, to_pretty};
pub use tree::{flatten, project, TreeNode, TreeRow};
