//! Debounced input state: the raw value follows every keystroke, the
//! committed value only settles after a quiet period.

use std::time::{Duration, Instant};

pub const QUIET_PERIOD: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    raw: T,
    committed: T,
    pending_since: Option<Instant>,
    quiet_period: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T) -> Self {
        Self::with_quiet_period(initial, QUIET_PERIOD)
    }

    pub fn with_quiet_period(initial: T, quiet_period: Duration) -> Self {
        Self {
            raw: initial.clone(),
            committed: initial,
            pending_since: None,
            quiet_period,
        }
    }

    /// Records an edit. Each change restarts the quiet-period timer.
    pub fn set(&mut self, value: T, now: Instant) {
        if value != self.raw {
            self.raw = value;
            self.pending_since = Some(now);
        }
    }

    /// Commits the raw value once it has been stable for the quiet period.
    /// Returns the newly committed value, or `None` when nothing settled.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let since = self.pending_since?;
        if now.duration_since(since) < self.quiet_period {
            return None;
        }
        self.pending_since = None;
        if self.raw != self.committed {
            self.committed = self.raw.clone();
            Some(self.committed.clone())
        } else {
            None
        }
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn commits_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new());

        // Keystrokes at t=0, 50, 100, 300 with a 350 ms quiet period.
        debouncer.set("p".to_string(), at(start, 0));
        debouncer.set("pa".to_string(), at(start, 50));
        debouncer.set("pak".to_string(), at(start, 100));
        debouncer.set("paket".to_string(), at(start, 300));

        let mut commits = Vec::new();
        for ms in (0..=700).step_by(10) {
            if let Some(value) = debouncer.poll(at(start, ms)) {
                commits.push((ms, value));
            }
        }

        assert_eq!(commits, vec![(650, "paket".to_string())]);
        assert_eq!(debouncer.committed(), "paket");
    }

    #[test]
    fn reverting_to_committed_value_commits_nothing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("silver".to_string());

        debouncer.set("silverx".to_string(), at(start, 0));
        debouncer.set("silver".to_string(), at(start, 100));

        assert!(debouncer.poll(at(start, 500)).is_none());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn repeated_identical_edits_do_not_restart_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new());

        debouncer.set("a".to_string(), at(start, 0));
        // Same value again later must not push the commit out.
        debouncer.set("a".to_string(), at(start, 300));

        assert_eq!(debouncer.poll(at(start, 360)), Some("a".to_string()));
    }
}
