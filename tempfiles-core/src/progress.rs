use rand::Rng;

use crate::PROGRESS_MAX_STEP;

/// Outcome of a single animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTick {
    Continue,
    Finished,
}

/// Cosmetic upload progress.
///
/// The percentage only ever grows and is never reconciled with the real
/// request; the browser owns the actual POST.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressAnimation {
    percent: f64,
    running: bool,
}

impl ProgressAnimation {
    pub fn start(&mut self) {
        self.percent = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.percent = 0.0;
        self.running = false;
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Adds `increment` points, clamping at 100. Non-finite or negative
    /// increments count as zero.
    pub fn advance(&mut self, increment: f64) -> ProgressTick {
        if !self.running {
            return ProgressTick::Finished;
        }

        let step = if increment.is_finite() {
            increment.max(0.0)
        } else {
            0.0
        };
        self.percent += step;
        if self.percent >= 100.0 {
            self.percent = 100.0;
            self.running = false;
            return ProgressTick::Finished;
        }
        ProgressTick::Continue
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ProgressTick {
        let increment = rng.random_range(0.0..PROGRESS_MAX_STEP);
        self.advance(increment)
    }

    pub fn width_css(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn label(&self) -> String {
        format!("Uploading... {}%", self.percent.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn idle_animation_ignores_ticks() {
        let mut progress = ProgressAnimation::default();
        assert_eq!(progress.advance(10.0), ProgressTick::Finished);
        assert_eq!(progress.percent(), 0.0);
    }

    #[test]
    fn clamps_at_one_hundred() {
        let mut progress = ProgressAnimation::default();
        progress.start();
        assert_eq!(progress.advance(60.0), ProgressTick::Continue);
        assert_eq!(progress.advance(60.0), ProgressTick::Finished);
        assert_eq!(progress.percent(), 100.0);
        assert!(!progress.is_running());
        assert_eq!(progress.label(), "Uploading... 100%");
        assert_eq!(progress.width_css(), "100%");
    }

    #[test]
    fn bad_increments_do_not_move_backwards() {
        let mut progress = ProgressAnimation::default();
        progress.start();
        progress.advance(12.5);
        progress.advance(-4.0);
        progress.advance(f64::NAN);
        assert_eq!(progress.percent(), 12.5);
        assert_eq!(progress.label(), "Uploading... 13%");
    }

    #[test]
    fn seeded_run_is_monotonic_and_terminates() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut progress = ProgressAnimation::default();
        progress.start();

        let mut last = 0.0;
        let mut ticks = 0;
        while progress.tick(&mut rng) == ProgressTick::Continue {
            assert!(progress.percent() >= last);
            assert!(progress.percent() < 100.0);
            last = progress.percent();
            ticks += 1;
            assert!(ticks < 10_000, "animation never finished");
        }
        assert_eq!(progress.percent(), 100.0);
    }
}
