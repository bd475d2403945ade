//! At most one diagnosis in flight.

use parking_lot::{Mutex, MutexGuard};

/// Returned when a capture arrives while another is still being diagnosed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a diagnosis is already in progress")]
pub struct CaptureBusy;

/// Reject-while-pending gate around the capture flow.
#[derive(Debug, Default)]
pub struct CaptureGate {
    inflight: Mutex<()>,
}

/// Held for the duration of one diagnosis
pub struct CapturePass<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the gate, or fail immediately if someone is already inside.
    pub fn try_enter(&self) -> Result<CapturePass<'_>, CaptureBusy> {
        self.inflight
            .try_lock()
            .map(|guard| CapturePass { _guard: guard })
            .ok_or(CaptureBusy)
    }

    pub fn is_busy(&self) -> bool {
        self.inflight.is_locked()
    }
}
