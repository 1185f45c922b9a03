/// Fixed-timestep pacing.
///
/// The simulation always advances in whole ticks of one display refresh.
/// `FixedStep` turns wall-clock time into a tick count; `FrameClock` sleeps
/// until the next tick boundary.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_ticks: u32,
}

impl FixedStep {
    pub fn new(step: Duration, max_ticks: u32) -> Self {
        FixedStep {
            step,
            accumulator: Duration::ZERO,
            max_ticks: max_ticks.max(1),
        }
    }

    /// Add `elapsed` and return how many ticks are due.
    ///
    /// At most `max_ticks` are returned; time beyond that is dropped so one
    /// long stall does not turn into a burst of catch-up ticks.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

pub struct FrameClock {
    stepper: FixedStep,
    last: Instant,
}

impl FrameClock {
    pub fn new(step: Duration, max_ticks: u32) -> Self {
        FrameClock {
            stepper: FixedStep::new(step, max_ticks),
            last: Instant::now(),
        }
    }

    /// Ticks due since the previous call.
    pub fn ticks(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.stepper.advance(elapsed)
    }

    /// Block until the next tick boundary. Stands in for waiting on vsync.
    pub fn wait(&self) {
        let remaining = self.stepper.until_next().saturating_sub(self.last.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}
