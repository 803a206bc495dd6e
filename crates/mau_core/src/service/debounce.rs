//! Restart-on-activity single-shot timer driven by caller-supplied instants.

use std::time::{Duration, Instant};

/// Delay between the last edit and the autosave write.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct Debounce {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)arms the timer to fire `interval` after `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once when the deadline has passed, disarming the timer.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(AUTOSAVE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::Debounce;
    use std::time::{Duration, Instant};

    #[test]
    fn restart_pushes_the_deadline() {
        let start = Instant::now();
        let mut timer = Debounce::new(Duration::from_millis(1000));
        timer.restart(start);
        timer.restart(start + Duration::from_millis(600));

        assert!(!timer.fire_if_due(start + Duration::from_millis(1200)));
        assert!(timer.fire_if_due(start + Duration::from_millis(1600)));
        assert!(!timer.fire_if_due(start + Duration::from_millis(5000)));
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut timer = Debounce::default();
        timer.restart(start);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(start + Duration::from_secs(10)));
    }
}
