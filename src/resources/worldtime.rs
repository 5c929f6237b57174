//! Frame clock.
//!
//! [`WorldTime`] is the per-frame timing snapshot handed to every update
//! through [`FrameContext`](super::framecontext::FrameContext). The host
//! calls [`WorldTime::advance`] once per frame with the unscaled delta.

/// Elapsed time since the previous frame and since start, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct WorldTime {
    /// Total scaled time since start. Monotonic, never negative.
    pub elapsed: f32,
    /// Scaled time since the previous frame.
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    /// Builder: set the time scale.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Build a clock reporting a single frame of `delta` seconds.
    pub fn from_delta(delta: f32) -> Self {
        let mut time = Self::default();
        time.advance(delta);
        time
    }

    /// Apply the time scale to `dt` and advance the clock by one frame.
    ///
    /// Negative deltas are treated as zero so `elapsed` stays monotonic.
    pub fn advance(&mut self, dt: f32) {
        let scaled_dt = (dt * self.time_scale).max(0.0);
        self.elapsed += scaled_dt;
        self.delta = scaled_dt;
    }
}
