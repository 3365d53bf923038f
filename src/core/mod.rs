pub mod error;
pub mod pattern;
pub mod walker;

use serde::Serialize;
use std::path::PathBuf;

/// Whether a tree node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

/// One tree node produced by a walk, emitted in pre-order.
///
/// `id` is unique within a single walk and `parent` refers to a node that
/// was emitted earlier, so a consumer can append children as events arrive
/// without sharing any tree structure with the walker.
#[derive(Debug, Clone, Serialize)]
pub struct NodeEvent {
    pub id: u64,
    pub parent: Option<u64>,
    pub name: String,
    /// Serialized lossily: a path with non-UTF-8 bytes must still reach the
    /// frontend as a renderable node, it is already in the counters.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub kind: NodeKind,
}

fn serialize_path_lossy<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&path.to_string_lossy())
}

/// Counters accumulated over one walk.
///
/// `total_files` counts every file in every visited directory regardless of
/// the pattern; `matched_files` only those whose name matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub total_files: usize,
    pub matched_files: usize,
}

pub use error::WalkError;
pub use pattern::FilePattern;
pub use walker::DirectoryWalker;
