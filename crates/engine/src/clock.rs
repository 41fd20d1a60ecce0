use std::time::{Duration, Instant};

/// Monotonic time source. Readings never go backwards.
pub trait Clock {
    fn now(&mut self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock: the n-th reading is `n × step`.
///
/// The engine reads its clock once at start and once per frame, so with this
/// clock elapsed time equals frames run times the step.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: Duration,
    ticks: u32,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self { step, ticks: 0 }
    }

    /// A step of one `hz`-th of a second, rounded up to the next nanosecond.
    pub fn per_second(hz: u64) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000u64.div_ceil(hz.max(1))))
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> Duration {
        let t = self.step * self.ticks;
        self.ticks = self.ticks.saturating_add(1);
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_advances_per_reading() {
        let mut clock = FixedStepClock::new(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[test]
    fn sixty_hz_reaches_whole_seconds() {
        let mut clock = FixedStepClock::per_second(60);
        let start = clock.now();
        let mut last = start;
        for _ in 0..120 {
            last = clock.now();
        }
        assert_eq!((last - start).as_secs(), 2);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
