//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the
//! `core` logic, and for sending `UserEvent`s back to the UI.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::file_dialog::DialogService;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::start_walk_on_path;
use super::view_model::generate_ui_state;

/// Pattern used by browse and startup walks: show everything.
const MATCH_ALL: &str = "*.*";

/// Called once the frontend has loaded.
///
/// Sends the initial state and, if configured, restores the last session by
/// walking the last-used directory with the match-all pattern.
pub fn ui_initialized<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let last_directory = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        proxy.send_event(UserEvent::StateUpdate(Box::new(generate_ui_state(
            &state_guard,
        ))));

        if state_guard.config.auto_load_last_directory {
            state_guard.config.last_directory.clone()
        } else {
            None
        }
    };

    if let Some(path) = last_directory {
        start_walk_on_path(path, MATCH_ALL.to_string(), proxy, state);
    }
}

/// Opens the folder picker and walks the chosen directory with the pattern
/// currently entered in the search box.
///
/// An empty pattern is rejected up front, matching the original behavior of
/// the search button.
pub fn search<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    pattern: String,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if pattern.trim().is_empty() {
        proxy.send_event(UserEvent::ShowError("Nothing to search for.".to_string()));
        return;
    }

    match pick_start_directory(dialog, &state) {
        Some(path) => start_walk_on_path(path, pattern, proxy, state),
        None => {
            tracing::info!("User cancelled directory selection.");
        }
    }
}

/// Opens the folder picker and walks the chosen directory with the match-all
/// pattern.
pub fn browse<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match pick_start_directory(dialog, &state) {
        Some(path) => start_walk_on_path(path, MATCH_ALL.to_string(), proxy, state),
        None => {
            tracing::info!("User cancelled directory selection.");
        }
    }
}

/// Cancels the ongoing walk.
///
/// The walk stops at its next check point and delivers a cancelled terminal
/// event; the partial tree stays on screen.
pub fn cancel_walk<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.cancel_current_walk();
    });
}

/// Keeps the persisted pattern in sync with the search box.
/// Saved to disk on shutdown together with the window geometry.
pub fn pattern_changed(pattern: String, state: Arc<Mutex<AppState>>) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    state_guard.config.last_pattern = pattern;
}

fn pick_start_directory<D: DialogService + ?Sized>(
    dialog: &D,
    state: &Arc<Mutex<AppState>>,
) -> Option<PathBuf> {
    let start_dir = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        state_guard.config.last_directory.clone()
    };
    dialog.pick_directory(start_dir.as_deref())
}
