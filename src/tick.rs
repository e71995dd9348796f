use std::time::Duration;

/// Fixed-rate clock. Frame time goes in, a whole number of simulation ticks
/// comes out; the remainder carries over to the next frame.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Duration,
    max_ticks_per_frame: u32,
    accumulated: Duration,
}

impl TickDriver {
    pub fn new(rate_hz: f32, max_ticks_per_frame: u32) -> Self {
        TickDriver {
            interval: Duration::from_secs_f64(1.0 / f64::from(rate_hz)),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulated: Duration::ZERO,
        }
    }

    /// Number of ticks due after `elapsed`. Backlog beyond the per-frame cap is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            if ticks == self.max_ticks_per_frame {
                log::debug!("dropping {:?} of simulation backlog", self.accumulated);
                self.accumulated = Duration::ZERO;
                break;
            }
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }

    /// Run `tick` for every tick due after `elapsed`
    pub fn run<F: FnMut()>(&mut self, elapsed: Duration, mut tick: F) -> u32 {
        let ticks = self.advance(elapsed);
        for _ in 0..ticks {
            tick();
        }
        ticks
    }
}
