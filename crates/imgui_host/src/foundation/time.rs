//! Frame timing

use std::time::Instant;

/// Delta time reported before a second frame exists
pub const DEFAULT_DELTA_TIME: f32 = 1.0 / 60.0;

/// Measures the time between consecutive frame starts
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock that has not seen a frame yet
    pub const fn new() -> Self {
        Self {
            last_frame: None,
            frame_count: 0,
        }
    }

    /// Mark a frame start and return the seconds since the previous one
    ///
    /// The library rejects a zero delta, so the first frame and frames
    /// started within the timer resolution report [`DEFAULT_DELTA_TIME`] or
    /// the smallest positive value respectively.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = match self.last_frame {
            Some(last) => {
                now.duration_since(last).as_secs_f32().max(f32::MIN_POSITIVE)
            }
            None => DEFAULT_DELTA_TIME,
        };

        self.last_frame = Some(now);
        self.frame_count += 1;
        delta
    }

    /// Frames started so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_uses_default_delta() {
        let mut clock = FrameClock::new();
        assert_relative_eq!(clock.tick(), DEFAULT_DELTA_TIME);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_later_ticks_are_positive() {
        let mut clock = FrameClock::new();
        clock.tick();
        for _ in 0..3 {
            assert!(clock.tick() > 0.0);
        }
        assert_eq!(clock.frame_count(), 4);
    }
}
