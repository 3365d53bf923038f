//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! The tree itself is not part of the view model: it is built incrementally
//! in the frontend from `WalkNode` events. `UiState` only carries the chrome
//! around it (path, pattern, walking flag, counters, status line).

use serde::Serialize;

use super::state::AppState;

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub current_path: String,
    pub pattern: String,
    pub is_walking: bool,
    pub generation: u64,
    pub total_files: usize,
    pub matched_files: usize,
    pub status_message: String,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let (total_files, matched_files) = state
        .last_summary
        .map(|s| (s.total_files, s.matched_files))
        .unwrap_or((0, 0));

    let status_message = if state.is_walking {
        format!("Walking {} ...", state.current_path)
    } else if let Some(summary) = state.last_summary {
        format!(
            "Found files: {}/{}",
            summary.matched_files, summary.total_files
        )
    } else {
        "Ready.".to_string()
    };

    UiState {
        current_path: state.current_path.clone(),
        pattern: state.config.last_pattern.clone(),
        is_walking: state.is_walking,
        generation: state.walk_generation,
        total_files,
        matched_files,
        status_message,
    }
}
