//! Defines the event and message structures for communication between the backend and frontend.

use serde::Serialize;

use super::view_model::UiState;
use crate::core::{NodeEvent, WalkSummary};

/// Events sent from the Rust backend to the WebView (UI thread).
///
/// Each variant corresponds to a specific JavaScript function (`window.*`)
/// that will be called in the frontend. Walk events carry the generation of
/// the walk that produced them so the event-loop side can drop anything a
/// superseded walk emits late.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the UI chrome.
    StateUpdate(Box<UiState>),
    /// One tree node created by the active walk, in pre-order.
    WalkNode(WalkNode),
    /// The terminal event of a walk: completed or cancelled, with counts.
    WalkFinished(WalkFinished),
    /// An error message to be displayed to the user.
    ShowError(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct WalkNode {
    pub generation: u64,
    #[serde(flatten)]
    pub node: NodeEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalkFinished {
    pub generation: u64,
    pub summary: WalkSummary,
    pub elapsed_secs: f64,
    pub cancelled: bool,
}

/// A message received from the WebView via the IPC channel.
#[derive(serde::Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
