//! Frame timing

/// Largest step a single tick may advance, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 1.0 / 30.0;

/// Timing for the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Frame number
    pub frame: u64,
    /// Clamped delta for this tick
    pub delta: f32,
    /// Simulated time since start
    pub total: f64,
}

/// Turns wall-clock elapsed time into clamped simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: f32,
    current: FrameTime,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta: if max_delta > 0.0 { max_delta } else { DEFAULT_MAX_DELTA },
            current: FrameTime::default(),
        }
    }

    /// Begin a new tick from the wall-clock time elapsed since the last one
    pub fn begin_frame(&mut self, elapsed: f32) -> FrameTime {
        let delta = elapsed.max(0.0).min(self.max_delta);
        self.current.frame += 1;
        self.current.delta = delta;
        self.current.total += delta as f64;
        self.current
    }

    /// Begin a tick from elapsed milliseconds
    pub fn begin_frame_millis(&mut self, elapsed_ms: f64) -> FrameTime {
        self.begin_frame((elapsed_ms * 0.001) as f32)
    }

    pub fn current(&self) -> FrameTime {
        self.current
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}
