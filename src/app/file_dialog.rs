//! Abstraction over the native folder picker.
//!
//! Commands depend on the `DialogService` trait so tests can substitute a
//! scripted dialog instead of opening a real native window.

use std::path::{Path, PathBuf};

pub trait DialogService: Send + Sync {
    /// Opens a folder picker, optionally starting at `start_dir`.
    /// Returns `None` if the user dismissed the dialog.
    fn pick_directory(&self, start_dir: Option<&Path>) -> Option<PathBuf>;
}

/// The production implementation backed by `rfd`.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title("Select a directory to walk");
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder()
    }
}
