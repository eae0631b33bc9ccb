//! Frame timing for the driver loop

use std::time::{Duration, Instant};

/// Source of per-tick delta time
///
/// In fixed mode every tick reports the same delta, which keeps headless runs
/// and tests deterministic. Otherwise the delta is the wall-clock time since
/// the previous tick.
pub struct Timer {
    last_frame: Instant,
    fixed_delta: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_delta: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that always reports `delta` seconds per tick
    ///
    /// Negative deltas are clamped to zero.
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta.max(0.0)),
            ..Self::new()
        }
    }

    /// Advance one tick and return the delta time in seconds (never negative)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.fixed_delta {
            Some(delta) => delta,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time of the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether this timer reports a fixed delta
    pub fn is_fixed(&self) -> bool {
        self.fixed_delta.is_some()
    }
}

/// Sleeps out the remainder of a frame to hold a target frame rate
pub struct FramePacer {
    frame_budget: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    /// Create a pacer for `target_fps` (0 disables pacing)
    pub fn new(target_fps: u32) -> Self {
        let frame_budget = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)));
        Self {
            frame_budget,
            frame_start: Instant::now(),
        }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleep until the frame budget has elapsed
    pub fn end_frame(&mut self) {
        if let Some(budget) = self.frame_budget {
            let elapsed = self.frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
    }

    /// Budget per frame, if pacing is enabled
    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timer_is_deterministic() {
        let mut timer = Timer::fixed(0.5);
        assert_eq!(timer.tick(), 0.5);
        assert_eq!(timer.tick(), 0.5);
        assert_eq!(timer.frame_count(), 2);
        assert!((timer.total_time() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fixed_timer_clamps_negative_delta() {
        let mut timer = Timer::fixed(-1.0);
        assert_eq!(timer.tick(), 0.0);
    }

    #[test]
    fn test_wall_clock_delta_is_non_negative() {
        let mut timer = Timer::new();
        assert!(timer.tick() >= 0.0);
        assert!(!timer.is_fixed());
    }

    #[test]
    fn test_pacer_budget() {
        assert!(FramePacer::new(0).frame_budget().is_none());
        let pacer = FramePacer::new(20);
        assert_eq!(pacer.frame_budget(), Some(Duration::from_millis(50)));
    }
}
