//! Background walk tasks.
//!
//! A walk runs as synchronous filesystem work on the blocking pool; node
//! events are forwarded to the event loop through the [`EventProxy`] as they
//! are produced, tagged with the generation of the walk that emitted them.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::events::{UserEvent, WalkFinished, WalkNode};
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;
use crate::config;
use crate::core::{DirectoryWalker, FilePattern, WalkError};

/// Starts a walk of `path` with the given pattern text, superseding any walk
/// that is still running.
///
/// State preparation (generation bump, fresh cancellation flag, persisted
/// last directory) happens synchronously before the task is spawned, so a
/// caller that cancels right after this function returns is guaranteed to
/// stop the walk it just started.
pub fn start_walk_on_path<P: EventProxy>(
    path: PathBuf,
    pattern_text: String,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if !path.is_dir() {
        proxy.send_event(UserEvent::ShowError(format!(
            "Path is not a valid directory: {}",
            path.display()
        )));
        return;
    }

    let pattern = match FilePattern::new(&pattern_text) {
        Ok(pattern) => pattern,
        Err(e) => {
            proxy.send_event(UserEvent::ShowError(e.to_string()));
            return;
        }
    };

    let (generation, cancel_flag) = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");

        let (generation, cancel_flag) = state_guard.begin_walk(&path);

        state_guard.config.last_directory = Some(path.clone());
        state_guard.config.last_pattern = pattern_text;
        let override_dir = state_guard.config_dir_override.clone();
        if let Err(e) = config::settings::save_config(&state_guard.config, override_dir.as_deref())
        {
            tracing::warn!("Failed to persist config before walk: {}", e);
        }

        proxy.send_event(UserEvent::StateUpdate(Box::new(generate_ui_state(
            &state_guard,
        ))));
        (generation, cancel_flag)
    };

    tokio::spawn(async move {
        walk_directory_task(path, pattern, generation, cancel_flag, proxy, state).await;
    });
}

/// Runs one walk to its terminal event.
async fn walk_directory_task<P: EventProxy>(
    path: PathBuf,
    pattern: FilePattern,
    generation: u64,
    cancel_flag: Arc<AtomicBool>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let started = Instant::now();

    let node_proxy = proxy.clone();
    let walk_result = tokio::task::spawn_blocking(move || {
        let walker = DirectoryWalker::new(pattern);
        walker.walk(&path, &cancel_flag, |node| {
            node_proxy.send_event(UserEvent::WalkNode(WalkNode { generation, node }));
        })
    })
    .await;

    let elapsed_secs = started.elapsed().as_secs_f64();

    let (summary, cancelled) = match walk_result {
        Ok(Ok(summary)) => (summary, false),
        Ok(Err(WalkError::Cancelled { partial })) => (partial, true),
        Ok(Err(err)) => {
            tracing::error!("Walk failed: {}", err);
            let mut state_guard = state
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            state_guard.fail_walk(generation);
            proxy.send_event(UserEvent::ShowError(err.to_string()));
            proxy.send_event(UserEvent::StateUpdate(Box::new(generate_ui_state(
                &state_guard,
            ))));
            return;
        }
        Err(join_err) => {
            tracing::error!("Walk task panicked: {}", join_err);
            let mut state_guard = state
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            state_guard.fail_walk(generation);
            proxy.send_event(UserEvent::ShowError("Walk task failed.".to_string()));
            return;
        }
    };

    tracing::info!(
        generation,
        total = summary.total_files,
        matched = summary.matched_files,
        elapsed_secs,
        cancelled,
        "walk finished"
    );

    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    state_guard.finish_walk(generation, summary);

    drop(state_guard);

    // The terminal event alone carries everything the frontend needs; a
    // trailing StateUpdate would overwrite the "Cancelled" status line.
    proxy.send_event(UserEvent::WalkFinished(WalkFinished {
        generation,
        summary,
        elapsed_secs,
        cancelled,
    }));
}
