//! Fixed-interval tick scheduling.

use std::time::Duration;

/// Most ticks delivered by one [`Ticker::due`] call. After a longer stall
/// the schedule is realigned to `now` instead of replaying every missed tick.
const MAX_CATCH_UP: u32 = 4;

/// Fixed-interval ticker driven by the caller's clock.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Duration>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Start ticking. The first tick is due immediately. Later calls are ignored.
    pub fn start(&mut self, now: Duration) {
        if self.next_due.is_none() {
            self.next_due = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks due at `now`, advancing the schedule past them.
    pub fn due(&mut self, now: Duration) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while next <= now {
            ticks += 1;
            next += self.interval;
            if ticks == MAX_CATCH_UP {
                if next <= now {
                    next = now + self.interval;
                }
                break;
            }
        }
        self.next_due = Some(next);
        ticks
    }

    /// Time left until the next tick, or `None` if not running.
    pub fn until_next(&self, now: Duration) -> Option<Duration> {
        self.next_due.map(|next| next.saturating_sub(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_idle_until_started() {
        let mut ticker = Ticker::new(ms(25));
        assert!(!ticker.is_running());
        assert_eq!(ticker.due(ms(1000)), 0);
        assert_eq!(ticker.until_next(ms(0)), None);
    }

    #[test]
    fn test_fixed_interval() {
        let mut ticker = Ticker::new(ms(25));
        ticker.start(ms(100));
        assert_eq!(ticker.due(ms(100)), 1);
        assert_eq!(ticker.due(ms(110)), 0);
        assert_eq!(ticker.until_next(ms(110)), Some(ms(15)));
        assert_eq!(ticker.due(ms(125)), 1);
        assert_eq!(ticker.due(ms(175)), 2);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let mut ticker = Ticker::new(ms(25));
        ticker.start(ms(0));
        assert_eq!(ticker.due(ms(10_000)), MAX_CATCH_UP);
        assert_eq!(ticker.until_next(ms(10_000)), Some(ms(25)));
    }

    #[test]
    fn test_start_twice_keeps_schedule() {
        let mut ticker = Ticker::new(ms(25));
        ticker.start(ms(0));
        ticker.start(ms(500));
        assert_eq!(ticker.due(ms(0)), 1);
    }
}
