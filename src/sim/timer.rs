//! Deferred projectile reset
//!
//! Runs on the frame clock instead of a separate timer callback, so the
//! reset is applied at the start of a step and never interleaves with one.

/// At most one pending reset, identified by its due time in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResetTimer {
    due_at_ms: Option<f64>,
}

impl ResetTimer {
    /// Schedule a reset `delay_ms` after `now_ms`.
    ///
    /// Returns false (and leaves the existing deadline alone) if one is
    /// already pending.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) -> bool {
        if self.due_at_ms.is_some() {
            return false;
        }
        self.due_at_ms = Some(now_ms + delay_ms);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.due_at_ms.is_some()
    }

    pub fn due_at(&self) -> Option<f64> {
        self.due_at_ms
    }

    /// Consume the deadline if it has passed
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.due_at_ms {
            Some(due) if now_ms >= due => {
                self.due_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.due_at_ms = None;
    }
}
