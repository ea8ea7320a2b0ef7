use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress callback for CLI or embedding applications
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Progress events emitted by long-running analyses
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    Started { task: String, total: u64 },
    Progress { task: String, current: u64, total: u64 },
    Message { task: String, message: String },
    Completed { task: String },
}

impl ProgressEvent {
    /// Fraction of work done, when the event carries one.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            ProgressEvent::Progress { current, total, .. } if *total > 0 => {
                Some(*current as f64 / *total as f64)
            }
            _ => None,
        }
    }
}

pub(crate) fn emit(callback: Option<&ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

/// Shared flag checked between iterations of long comparisons.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_fraction() {
        let ev = ProgressEvent::Progress {
            task: "matches".to_string(),
            current: 1,
            total: 4,
        };
        assert_eq!(ev.fraction(), Some(0.25));
        let ev = ProgressEvent::Completed {
            task: "matches".to_string(),
        };
        assert_eq!(ev.fraction(), None);
    }
}
