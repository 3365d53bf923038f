//! Small shared helpers for the `app` command handlers.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;

/// Locks the `AppState`, applies a mutation, and pushes the resulting
/// `UiState` snapshot to the frontend in one step.
///
/// The cancel handler and the dialog-dismissal paths all end in the same
/// "mutate, then re-render the chrome" sequence; routing them through here
/// keeps each to a single call and guarantees the snapshot is taken under
/// the same lock as the mutation.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<AppState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut AppState),
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");

    update_fn(&mut state_guard);

    let ui_state = generate_ui_state(&state_guard);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}
