//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
///
/// Hosts call [`Timer::tick`] once per frame and feed the returned delta
/// into `Scene::update`.
pub struct Timer {
    last_frame: Instant,
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
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the timer and return the elapsed seconds since the last tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total elapsed time since timer creation in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_accumulates_time_and_frames() {
        let mut timer = Timer::new();
        let dt = timer.tick();
        assert!(dt >= 0.0);
        assert_eq!(timer.frame_count(), 1);
        timer.tick();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= dt);
    }
}
