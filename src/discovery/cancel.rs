use crate::error::AuditError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Cooperative cancellation flag shared by the two sides of a pipeline
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Keeps the first failure of a pipeline and cancels the rest of it
#[derive(Debug)]
pub(crate) struct FirstFailure {
    token: CancelToken,
    error: Mutex<Option<AuditError>>,
}

impl FirstFailure {
    pub(crate) fn new(token: CancelToken) -> Self {
        Self {
            token,
            error: Mutex::new(None),
        }
    }

    /// Record `error` unless an earlier failure is already held
    pub(crate) fn record(&self, error: AuditError) {
        let mut slot = self.error.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(error);
        }
        self.token.cancel();
    }

    pub(crate) fn into_result(self) -> Result<(), AuditError> {
        match self.error.into_inner().unwrap_or_else(|e| e.into_inner()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
