use std::time::{Duration, Instant};

/// Fixed-period scheduler polled from the host loop.
///
/// The first poll after construction or [`TickTimer::cancel`] arms the timer
/// without firing. After that, `poll` fires at most once per call. Deadlines
/// advance by whole periods; if the host stalled for longer than a period the
/// missed ticks are dropped rather than replayed.
#[derive(Clone, Debug)]
pub struct TickTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            None => {
                self.deadline = Some(now + self.period);
                false
            }
            Some(deadline) if now >= deadline => {
                let mut next = deadline + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.deadline = Some(next);
                true
            }
            Some(_) => false,
        }
    }

    /// Disarm. Nothing fires until the timer is polled again and a full
    /// period has passed.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn first_poll_arms_without_firing() {
        let start = Instant::now();
        let mut timer = TickTimer::new(PERIOD);

        assert!(!timer.poll(start));
        assert!(timer.is_armed());
        assert!(!timer.poll(start + Duration::from_millis(99)));
        assert!(timer.poll(start + PERIOD));
    }

    #[test]
    fn fires_once_per_period() {
        let start = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.poll(start);

        let fired = (1..=50)
            .map(|i| start + Duration::from_millis(i * 16))
            .filter(|&now| timer.poll(now))
            .count();
        // 800ms of frames at a 100ms period.
        assert_eq!(fired, 8);
    }

    #[test]
    fn stall_does_not_replay_missed_ticks() {
        let start = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.poll(start);

        assert!(timer.poll(start + Duration::from_secs(5)));
        assert!(!timer.poll(start + Duration::from_millis(5050)));
        assert!(timer.poll(start + Duration::from_millis(5100)));
    }

    #[test]
    fn cancel_disarms_until_repolled() {
        let start = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.poll(start);
        timer.cancel();
        assert!(!timer.is_armed());

        let later = start + Duration::from_secs(3);
        assert!(!timer.poll(later));
        assert!(!timer.poll(later + Duration::from_millis(50)));
        assert!(timer.poll(later + PERIOD));
    }
}
