use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::GenerateError;

/// Caller-driven cancellation signal, checked at each pipeline stage
/// boundary.
///
/// Cancellation aborts the current pass cleanly: the virtual overlay is
/// discarded and the real workspace is never touched, because real writes
/// only happen when the caller applies a fully built overlay.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next stage boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn ensure_active(&self, stage: &'static str) -> Result<(), GenerateError> {
        if self.is_cancelled() {
            Err(GenerateError::Cancelled { stage })
        } else {
            Ok(())
        }
    }
}
