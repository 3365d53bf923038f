//! The cancellable, depth-first directory walker.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::WalkError;
use super::pattern::FilePattern;
use super::{NodeEvent, NodeKind, WalkSummary};

/// Internal sentinel for a cancelled traversal; converted into
/// `WalkError::Cancelled` with the partial counts at the top level.
struct Interrupted;

/// Walks a directory tree depth-first and reports every directory plus every
/// pattern-matching file through a callback.
///
/// The walker is deliberately sequential: one directory is listed and fully
/// processed before its next sibling. It owns no UI state and makes no
/// assumption about the execution context of the callback; marshaling onto a
/// UI thread is the caller's concern.
pub struct DirectoryWalker {
    pattern: FilePattern,
}

impl DirectoryWalker {
    pub fn new(pattern: FilePattern) -> Self {
        Self { pattern }
    }

    /// Traverses `root`, emitting one [`NodeEvent`] per created node in
    /// strict pre-order.
    ///
    /// The cancel flag is checked before listing each directory, before
    /// recursing into each subdirectory, and before emitting each matching
    /// file. A set flag ends the walk with [`WalkError::Cancelled`] carrying
    /// the counts accumulated so far; nodes already emitted stay as they are.
    ///
    /// A subdirectory whose listing fails (permission denied or any other
    /// I/O error) keeps its node but contributes no children and no counts.
    /// Only a root that is not an existing directory fails the whole walk.
    pub fn walk<F>(
        &self,
        root: &Path,
        cancel: &AtomicBool,
        mut emit: F,
    ) -> Result<WalkSummary, WalkError>
    where
        F: FnMut(NodeEvent),
    {
        if !root.is_dir() {
            return Err(WalkError::PathNotFound(root.to_path_buf()));
        }

        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut next_id: u64 = 0;
        let mut summary = WalkSummary::default();

        let root_id = Self::alloc_id(&mut next_id);
        emit(NodeEvent {
            id: root_id,
            parent: None,
            name: root_name,
            path: root.to_path_buf(),
            kind: NodeKind::Directory,
        });

        match self.populate(root, root_id, &mut next_id, cancel, &mut emit, &mut summary) {
            Ok(()) => {
                tracing::debug!(
                    total = summary.total_files,
                    matched = summary.matched_files,
                    "walk completed"
                );
                Ok(summary)
            }
            Err(Interrupted) => {
                tracing::info!(
                    total = summary.total_files,
                    matched = summary.matched_files,
                    "walk cancelled"
                );
                Err(WalkError::Cancelled { partial: summary })
            }
        }
    }

    fn populate<F>(
        &self,
        dir: &Path,
        dir_id: u64,
        next_id: &mut u64,
        cancel: &AtomicBool,
        emit: &mut F,
        summary: &mut WalkSummary,
    ) -> Result<(), Interrupted>
    where
        F: FnMut(NodeEvent),
    {
        if cancel.load(Ordering::Relaxed) {
            return Err(Interrupted);
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                // Unreadable directory: keep the node, skip the contents.
                tracing::debug!(path = %dir.display(), error = %err, "skipping unreadable directory");
                return Ok(());
            }
        };

        // One listing, split by kind; filesystem enumeration order is kept
        // within each group.
        let mut subdirs: Vec<PathBuf> = Vec::new();
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries.flatten() {
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => subdirs.push(entry.path()),
                Ok(_) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    files.push((name, entry.path()));
                }
                Err(_) => continue,
            }
        }

        // Tallied at listing time: a cancellation further down the recursion
        // must not lose the files this directory already listed.
        summary.total_files += files.len();

        for sub in subdirs {
            if cancel.load(Ordering::Relaxed) {
                return Err(Interrupted);
            }
            let name = sub
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let sub_id = Self::alloc_id(next_id);
            emit(NodeEvent {
                id: sub_id,
                parent: Some(dir_id),
                name,
                path: sub.clone(),
                kind: NodeKind::Directory,
            });
            self.populate(&sub, sub_id, next_id, cancel, emit, summary)?;
        }

        for (name, path) in files {
            if cancel.load(Ordering::Relaxed) {
                return Err(Interrupted);
            }
            if self.pattern.is_match(&name) {
                summary.matched_files += 1;
                emit(NodeEvent {
                    id: Self::alloc_id(next_id),
                    parent: Some(dir_id),
                    name,
                    path,
                    kind: NodeKind::File,
                });
            }
        }

        Ok(())
    }

    fn alloc_id(next_id: &mut u64) -> u64 {
        let id = *next_id;
        *next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::setup_test_logging;
    use std::fs;
    use std::sync::atomic::AtomicBool;
    use tempfile::TempDir;

    fn collect_walk(
        root: &Path,
        pattern: &str,
    ) -> (Result<WalkSummary, WalkError>, Vec<NodeEvent>) {
        let walker = DirectoryWalker::new(FilePattern::new(pattern).unwrap());
        let cancel = AtomicBool::new(false);
        let mut events = Vec::new();
        let result = walker.walk(root, &cancel, |event| events.push(event));
        (result, events)
    }

    #[test]
    fn missing_root_fails_without_emitting_nodes() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let (result, events) = collect_walk(&missing, "*");
        assert!(matches!(result, Err(WalkError::PathNotFound(_))));
        assert!(events.is_empty());
    }

    #[test]
    fn worked_example_counts_and_tree_shape() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.txt"), "x").unwrap();
        fs::write(tmp.path().join("y.log"), "y").unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::write(tmp.path().join("b/z.txt"), "z").unwrap();

        let (result, events) = collect_walk(tmp.path(), "*.txt");
        let summary = result.unwrap();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.matched_files, 2);

        // Root, b, z.txt, x.txt: y.log is counted but never emitted.
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(&names[1..], ["b", "z.txt", "x.txt"]);
        assert!(!names.contains(&"y.log"));
    }

    #[test]
    fn events_arrive_in_pre_order() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();
        fs::write(tmp.path().join("a/b/c/deep.txt"), "").unwrap();
        fs::write(tmp.path().join("top.txt"), "").unwrap();

        let (result, events) = collect_walk(tmp.path(), "");
        result.unwrap();

        // Every parent id must have been emitted before its children.
        let mut seen = std::collections::HashSet::new();
        for event in &events {
            if let Some(parent) = event.parent {
                assert!(seen.contains(&parent), "parent of {} not yet emitted", event.name);
            }
            seen.insert(event.id);
        }
        // Directory chain comes before the file it contains.
        let pos = |name: &str| events.iter().position(|e| e.name == name).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
        assert!(pos("c") < pos("deep.txt"));
    }

    #[test]
    fn empty_subdirectory_keeps_its_node_and_counts_nothing() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("hollow")).unwrap();

        let (result, events) = collect_walk(tmp.path(), "*");
        let summary = result.unwrap();
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.matched_files, 0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "hollow");
        assert_eq!(events[1].kind, NodeKind::Directory);
    }

    #[test]
    fn pre_set_cancel_flag_yields_cancelled_not_completed() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let walker = DirectoryWalker::new(FilePattern::match_all());
        let cancel = AtomicBool::new(true);
        let mut events = Vec::new();
        let result = walker.walk(tmp.path(), &cancel, |event| events.push(event));

        match result {
            Err(WalkError::Cancelled { partial }) => {
                assert_eq!(partial, WalkSummary::default());
            }
            other => panic!("expected Cancelled, got {other:?}"),
        }
        // The root node is created before the first filesystem step.
        assert_eq!(events.len(), 1);
        assert!(events[0].parent.is_none());
    }

    #[test]
    fn cancel_mid_walk_keeps_partial_counts() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(tmp.path().join(format!("f{i:02}.txt")), "").unwrap();
        }

        let walker = DirectoryWalker::new(FilePattern::match_all());
        let cancel = AtomicBool::new(false);
        let mut emitted_files = 0usize;
        let result = walker.walk(tmp.path(), &cancel, |event| {
            if event.kind == NodeKind::File {
                emitted_files += 1;
                if emitted_files == 5 {
                    cancel.store(true, Ordering::Relaxed);
                }
            }
        });

        match result {
            Err(WalkError::Cancelled { partial }) => {
                assert_eq!(partial.matched_files, 5);
                // total is tallied at listing time, before the per-file
                // emission loop.
                assert_eq!(partial.total_files, 20);
            }
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn cancel_inside_subdirectory_keeps_parent_listing_in_total() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("one.txt"), "").unwrap();
        fs::write(tmp.path().join("two.txt"), "").unwrap();
        fs::write(tmp.path().join("three.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/inner.txt"), "").unwrap();

        let walker = DirectoryWalker::new(FilePattern::match_all());
        let cancel = AtomicBool::new(false);
        let result = walker.walk(tmp.path(), &cancel, |event| {
            // Stop as soon as the subdirectory node goes out, before its own
            // listing and before the root's files are emitted.
            if event.name == "sub" {
                cancel.store(true, Ordering::Relaxed);
            }
        });

        match result {
            Err(WalkError::Cancelled { partial }) => {
                // The root's three files were listed before the recursion and
                // must survive into the partial total; nothing was matched yet.
                assert_eq!(partial.total_files, 3);
                assert_eq!(partial.matched_files, 0);
            }
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn two_walks_over_a_fixed_tree_are_identical() {
        setup_test_logging();
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/inner.rs"), "").unwrap();
        fs::write(tmp.path().join("main.rs"), "").unwrap();
        fs::write(tmp.path().join("notes.md"), "").unwrap();

        let (first_result, first_events) = collect_walk(tmp.path(), "*.rs");
        let (second_result, second_events) = collect_walk(tmp.path(), "*.rs");

        assert_eq!(first_result.unwrap(), second_result.unwrap());
        let shape =
            |events: &[NodeEvent]| -> Vec<(u64, Option<u64>, String)> {
                events
                    .iter()
                    .map(|e| (e.id, e.parent, e.name.clone()))
                    .collect()
            };
        assert_eq!(shape(&first_events), shape(&second_events));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped_not_fatal() {
        use crate::utils::test_helpers::running_as_root;
        use std::os::unix::fs::PermissionsExt;

        setup_test_logging();
        if running_as_root() {
            // Root ignores mode bits, the directory would still be readable.
            return;
        }

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.txt"), "").unwrap();
        fs::write(tmp.path().join("visible.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let (result, events) = collect_walk(tmp.path(), "*.txt");

        // Restore so TempDir can clean up.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let summary = result.unwrap();
        assert_eq!(summary.total_files, 1);
        assert_eq!(summary.matched_files, 1);

        let locked_id = events
            .iter()
            .find(|e| e.name == "locked")
            .expect("locked directory keeps its node")
            .id;
        assert!(!events.iter().any(|e| e.parent == Some(locked_id)));
    }
}
