use std::time::{Duration, Instant};

/// Fires once after a burst of changes has gone quiet for `delay`.
///
/// Time is passed in by the caller so the host's event loop stays in
/// charge of scheduling.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    last_change: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a change, restarting the quiet period.
    pub fn touch(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// When the pending burst will be ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_change.map(|at| at + self.delay)
    }

    /// True once per burst, when the quiet period has elapsed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn idle_debouncer_is_never_ready() {
        let mut debouncer = Debouncer::new(DELAY);
        assert!(!debouncer.ready(Instant::now()));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.touch(start);

        assert!(!debouncer.ready(start + Duration::from_millis(299)));
        assert!(debouncer.ready(start + DELAY));
    }

    #[test]
    fn fires_once_per_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.touch(start);

        assert!(debouncer.ready(start + DELAY));
        assert!(!debouncer.ready(start + DELAY * 2));
    }

    #[test]
    fn new_change_restarts_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.touch(start);
        debouncer.touch(start + Duration::from_millis(200));

        assert!(!debouncer.ready(start + DELAY));
        assert!(debouncer.ready(start + Duration::from_millis(500)));
    }

    #[test]
    fn zero_delay_fires_immediately() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.touch(now);
        assert!(debouncer.ready(now));
    }
}
