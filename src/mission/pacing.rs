use std::thread;
use std::time::{Duration, Instant};

/// Fixed-rate frame scheduler.
///
/// Each [`wait`](FramePacer::wait) sleeps until the next frame deadline. A loop that falls
/// behind does not try to catch up; the schedule restarts from the late frame.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Option<Duration>,
    next: Option<Instant>,
}

impl FramePacer {
    /// Pace at `rate_hz` frames per second; `0` disables pacing.
    pub fn new(rate_hz: u32) -> Self {
        if rate_hz == 0 {
            return Self::unpaced();
        }
        Self {
            period: Some(Duration::from_secs(1) / rate_hz),
            next: None,
        }
    }

    /// Never sleeps.
    pub fn unpaced() -> Self {
        Self {
            period: None,
            next: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now) + period;
        if deadline > now {
            thread::sleep(deadline - now);
            self.next = Some(deadline);
        } else {
            self.next = Some(now);
        }
    }
}
