use std::time::{Duration, Instant};

/// Counts presented frames and periodically logs the average frame rate.
///
/// Pure bookkeeping. Ticking never sleeps, throttles, or feeds timing
/// back into the loop.
#[derive(Debug)]
pub struct FrameStats {
    frames: u32,
    window_start: Instant,
    report_every: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(5))
    }

    pub fn with_interval(report_every: Duration) -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
            report_every,
        }
    }

    /// Records one presented frame; emits a debug-level report once per
    /// interval.
    pub fn tick(&mut self) {
        self.frames += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed >= self.report_every {
            let fps = self.frames as f64 / elapsed.as_secs_f64();
            log::debug!("{} frames in {:.1}s ({fps:.1} fps avg)", self.frames, elapsed.as_secs_f64());
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
