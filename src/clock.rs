use std::time::{Duration, Instant};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// The recurring game timer. At most one schedule is ever armed.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, next_fire: None }
    }

    /// Arms the timer, replacing any schedule that was already running.
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_fire = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Returns true at most once per call when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let deadline = match self.next_fire {
            Some(deadline) if now >= deadline => deadline,
            _ => return false,
        };

        let next = deadline + self.interval;
        // Far behind (e.g. blocked on a modal): don't replay the missed ticks
        self.next_fire = Some(if next <= now { now + self.interval } else { next });
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker::new(DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn inactive_until_started() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert!(!ticker.is_active());
        assert!(!ticker.poll(now + 1000 * MS));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);

        assert!(!ticker.poll(t0 + 149 * MS));
        assert!(ticker.poll(t0 + 150 * MS));
        assert!(!ticker.poll(t0 + 151 * MS));
        assert!(ticker.poll(t0 + 300 * MS));
    }

    #[test]
    fn restart_replaces_the_schedule() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);
        ticker.start(t0 + 100 * MS);

        assert!(ticker.is_active());
        assert!(!ticker.poll(t0 + 150 * MS));
        assert!(ticker.poll(t0 + 250 * MS));
    }

    #[test]
    fn cancel_stops_firing() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);
        ticker.cancel();

        assert!(!ticker.is_active());
        assert!(!ticker.poll(t0 + 10_000 * MS));
    }

    #[test]
    fn missed_ticks_are_not_replayed() {
        let mut ticker = Ticker::default();
        let t0 = Instant::now();
        ticker.start(t0);

        assert!(ticker.poll(t0 + 2000 * MS));
        assert!(!ticker.poll(t0 + 2001 * MS));
        assert!(ticker.poll(t0 + 2150 * MS));
    }
}
