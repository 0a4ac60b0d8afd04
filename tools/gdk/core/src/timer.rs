//! Wall-clock helpers for game loops. Everything reads time through
//! [`TimeDaemon`] so loops can be driven by a fake clock in tests.

use std::time::Instant;

pub trait TimeDaemon {
    fn get_now_ms(&self) -> f64;
}

/// Milliseconds since the clock was created.
#[derive(Debug, Copy, Clone)]
pub struct SystemClock {
    pub instant: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { instant: Instant::now() }
    }
}

impl TimeDaemon for SystemClock {
    fn get_now_ms(&self) -> f64 {
        self.instant.elapsed().as_secs_f64() * 1000.0
    }
}

/// Fires once every `interval` seconds.
#[derive(Debug, Copy, Clone, Default)]
pub struct Timer {
    interval_ms: f64,
    start_ms: f64,
}

impl Timer {
    pub fn set_timer(&mut self, clock: &impl TimeDaemon, seconds: f64) {
        self.interval_ms = seconds * 1000.0;
        self.start_ms = clock.get_now_ms();
    }

    /// True when the interval has elapsed; the timer then starts over from now.
    pub fn check_timer(&mut self, clock: &impl TimeDaemon) -> bool {
        let now = clock.get_now_ms();
        if now - self.start_ms >= self.interval_ms {
            self.start_ms = now;
            return true;
        }
        false
    }
}

/// Counts calls per elapsed second.
#[derive(Debug, Copy, Clone, Default)]
pub struct FpsCounter {
    start_ms: f64,
    current: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new(clock: &impl TimeDaemon) -> Self {
        Self { start_ms: clock.get_now_ms(), ..Self::default() }
    }

    pub fn update_counter(&mut self, clock: &impl TimeDaemon) {
        self.current += 1;
        let now = clock.get_now_ms();
        if now - self.start_ms >= 1000.0 {
            self.fps = self.current;
            self.current = 0;
            self.start_ms = now;
        }
    }

    /// Frames counted during the last complete second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub(crate) struct ManualClock {
        pub now: Cell<f64>,
    }

    impl ManualClock {
        pub(crate) fn advance(&self, ms: f64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl TimeDaemon for ManualClock {
        fn get_now_ms(&self) -> f64 {
            self.now.get()
        }
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let clock = ManualClock::default();
        let mut timer = Timer::default();
        timer.set_timer(&clock, 0.5);

        clock.advance(499.0);
        assert!(!timer.check_timer(&clock));
        clock.advance(1.0);
        assert!(timer.check_timer(&clock));
        assert!(!timer.check_timer(&clock));
        clock.advance(500.0);
        assert!(timer.check_timer(&clock));
    }

    #[test]
    fn fps_reports_the_last_full_second() {
        let clock = ManualClock::default();
        let mut counter = FpsCounter::new(&clock);
        for _ in 0..30 {
            clock.advance(1000.0 / 30.0 + 0.01);
            counter.update_counter(&clock);
        }
        assert_eq!(counter.fps(), 30);

        clock.advance(2000.0);
        counter.update_counter(&clock);
        assert_eq!(counter.fps(), 1);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock::default();
        let first = clock.get_now_ms();
        assert!(clock.get_now_ms() >= first);
    }
}
