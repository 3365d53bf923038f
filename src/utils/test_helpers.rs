use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initializes tracing output for tests.
///
/// Walker and config tests run in parallel threads but the tracing
/// subscriber is process-global, so installation is guarded by a `Once`;
/// every caller after the first is a no-op. Filtering follows `RUST_LOG`,
/// which is handy when chasing a cancellation-ordering failure.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Returns true when the current process runs as root (UID 0).
///
/// The unreadable-directory walker test relies on mode bits being enforced,
/// which root bypasses entirely; under a root CI container that test skips
/// itself instead of asserting on a directory it can in fact read.
#[inline]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid has no side effects.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
