use std::time::Instant;
use tracing::info;

/// A timer that logs the duration of an operation when dropped.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.name,
            duration_ms = %duration.as_millis(),
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_timer_creation() {
        let timer = OperationTimer::new("create_story");
        assert_eq!(timer.name, "create_story");
    }

    #[test]
    fn test_operation_timer_drop_does_not_panic() {
        let _timer = OperationTimer::new("drop_check");
    }
}
