//! The application shell: IPC dispatch and event-loop-side event handling.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use tao::event_loop::EventLoopProxy;
use wry::WebView;

use events::{IpcMessage, UserEvent};
use file_dialog::DialogService;
use state::AppState;

/// Dispatches a message received from the WebView to its command handler.
pub fn handle_ipc_message(
    message: String,
    dialog: Arc<dyn DialogService>,
    proxy: EventLoopProxy<UserEvent>,
    state: Arc<Mutex<AppState>>,
) {
    let message: IpcMessage = match serde_json::from_str(&message) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring malformed IPC message: {}", e);
            return;
        }
    };

    tracing::debug!(command = %message.command, "ipc message received");

    match message.command.as_str() {
        "initialized" => commands::ui_initialized(proxy, state),
        "search" => {
            let pattern = message
                .payload
                .as_str()
                .unwrap_or_default()
                .to_string();
            commands::search(dialog.as_ref(), pattern, proxy, state);
        }
        "browse" => commands::browse(dialog.as_ref(), proxy, state),
        "cancel" => commands::cancel_walk(proxy, state),
        "patternChanged" => {
            let pattern = message
                .payload
                .as_str()
                .unwrap_or_default()
                .to_string();
            commands::pattern_changed(pattern, state);
        }
        other => {
            tracing::warn!("Unknown IPC command: {}", other);
        }
    }
}

/// Applies a backend event to the WebView.
///
/// Walk events from a superseded generation are dropped here, on the single
/// thread that owns the view, so a walk that was replaced mid-flight can
/// never write into the tree of its successor.
pub fn handle_user_event(event: UserEvent, webview: &WebView, state: &Arc<Mutex<AppState>>) {
    match event {
        UserEvent::StateUpdate(ui_state) => {
            eval_js_call(webview, "stateUpdate", &*ui_state);
        }
        UserEvent::WalkNode(payload) => {
            if is_current_walk(state, payload.generation) {
                eval_js_call(webview, "walkNode", &payload);
            }
        }
        UserEvent::WalkFinished(payload) => {
            if is_current_walk(state, payload.generation) {
                eval_js_call(webview, "walkFinished", &payload);
            }
        }
        UserEvent::ShowError(message) => {
            eval_js_call(webview, "showError", &message);
        }
    }
}

fn is_current_walk(state: &Arc<Mutex<AppState>>, generation: u64) -> bool {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    let current = state_guard.is_current_generation(generation);
    if !current {
        tracing::debug!(generation, "dropping event from superseded walk");
    }
    current
}

fn eval_js_call<T: serde::Serialize>(webview: &WebView, function: &str, payload: &T) {
    match serde_json::to_string(payload) {
        Ok(json) => {
            if let Err(e) = webview.evaluate_script(&format!("window.{function}({json});")) {
                tracing::error!("Failed to evaluate script for {}: {}", function, e);
            }
        }
        Err(e) => {
            tracing::error!("Failed to serialize payload for {}: {}", function, e);
        }
    }
}
