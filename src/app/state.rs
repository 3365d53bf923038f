//! Defines the central, mutable state of the application.

use crate::config::AppConfig;
use crate::core::WalkSummary;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared
/// access from the main event loop, IPC handlers, and async walk tasks.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Redirects config persistence for tests; `None` in production.
    pub config_dir_override: Option<PathBuf>,
    /// The absolute path of the directory the current walk runs on.
    pub current_path: String,
    /// `true` while a walk is in progress.
    pub is_walking: bool,
    /// Monotonically increasing id of the active walk. Events tagged with an
    /// older generation belong to a superseded walk and are dropped.
    pub walk_generation: u64,
    /// A flag used to signal cancellation to the active walk.
    pub walk_cancellation_flag: Arc<AtomicBool>,
    /// Counters of the last finished walk, if any.
    pub last_summary: Option<WalkSummary>,
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading the configuration from disk.
    fn default() -> Self {
        Self {
            config: AppConfig::load().unwrap_or_default(),
            config_dir_override: None,
            current_path: String::new(),
            is_walking: false,
            walk_generation: 0,
            walk_cancellation_flag: Arc::new(AtomicBool::new(false)),
            last_summary: None,
        }
    }
}

impl AppState {
    /// Supersedes any running walk and prepares state for a new one.
    ///
    /// Bumps the generation, installs a fresh cancellation flag, and returns
    /// the new generation together with the flag the walk task must observe.
    pub fn begin_walk(&mut self, path: &std::path::Path) -> (u64, Arc<AtomicBool>) {
        self.cancel_current_walk();

        self.walk_generation += 1;
        self.walk_cancellation_flag = Arc::new(AtomicBool::new(false));
        self.current_path = path.to_string_lossy().to_string();
        self.is_walking = true;
        self.last_summary = None;

        tracing::info!(
            generation = self.walk_generation,
            path = %self.current_path,
            "starting walk"
        );
        (self.walk_generation, self.walk_cancellation_flag.clone())
    }

    /// Signals the active walk to stop at its next check point.
    ///
    /// The walk stays `is_walking` until its terminal event arrives; the
    /// partial tree and counts accumulated so far are kept.
    pub fn cancel_current_walk(&mut self) {
        if self.is_walking {
            tracing::info!(generation = self.walk_generation, "cancelling active walk");
            self.walk_cancellation_flag.store(true, Ordering::SeqCst);
        }
    }

    /// `true` if `generation` identifies the currently active walk.
    pub fn is_current_generation(&self, generation: u64) -> bool {
        generation == self.walk_generation
    }

    /// Records the terminal outcome of the walk with the given generation.
    /// Outcomes of superseded walks are ignored.
    pub fn finish_walk(&mut self, generation: u64, summary: WalkSummary) {
        if !self.is_current_generation(generation) {
            tracing::debug!(generation, "ignoring outcome of superseded walk");
            return;
        }
        self.is_walking = false;
        self.last_summary = Some(summary);
    }

    /// Records a terminal failure (invalid root): the walk ends with no tree
    /// and no counts.
    pub fn fail_walk(&mut self, generation: u64) {
        if !self.is_current_generation(generation) {
            return;
        }
        self.is_walking = false;
        self.last_summary = None;
    }
}
