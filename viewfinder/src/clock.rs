//! Animation clock: eased sawtooth progress plus the laser alpha cycle.
//!
//! DESIGN
//! ======
//! Progress is sampled from a monotonic [`Instant`] rather than pushed in by a
//! host animation framework. Within one cycle the linear time fraction is
//! remapped with an accelerate/decelerate curve, then wraps back to zero at the
//! cycle boundary and repeats forever.
//!
//! The alpha cycle is deliberately independent of time: it advances exactly
//! once per rendered frame, so its pulse rate follows the redraw rate.
//!
//! Every time-dependent method has an `_at(now)` twin so callers and tests can
//! supply the sample instant explicitly.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::consts::{DEFAULT_CYCLE_MS, SCANNER_ALPHA, SCANNER_ALPHA_LEN};

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Shortest accepted cycle; guards the modulo against a zero duration.
const MIN_CYCLE: Duration = Duration::from_millis(1);

/// Whether the clock is currently ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Repeating 0→1 progress over a fixed cycle, plus a per-frame alpha counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationClock {
    cycle: Duration,
    started_at: Option<Instant>,
    alpha_index: usize,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CYCLE_MS))
    }
}

impl AnimationClock {
    /// Create a stopped clock with the given cycle duration.
    #[must_use]
    pub fn new(cycle: Duration) -> Self {
        Self { cycle: cycle.max(MIN_CYCLE), started_at: None, alpha_index: 0 }
    }

    #[must_use]
    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        if self.started_at.is_some() { ClockState::Running } else { ClockState::Stopped }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    // --- Lifecycle ---

    /// Start the clock now. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Start the clock with its cycle anchored at `now`.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        debug!(cycle_ms = self.cycle.as_millis(), "animation clock started");
        true
    }

    /// Stop the clock and drop its time anchor. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.started_at.take().is_none() {
            return false;
        }
        debug!("animation clock stopped");
        true
    }

    // --- Progress ---

    /// Eased position within the current cycle, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress_at(Instant::now())
    }

    /// Eased position within the cycle at `now`. A stopped clock reports `0.0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_at(&self, now: Instant) -> f32 {
        ease_in_out(self.linear_fraction_at(now)) as f32
    }

    /// Raw linear time fraction within the cycle at `now`, in `[0, 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn linear_fraction_at(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let cycle = self.cycle.as_nanos();
        let into_cycle = now.saturating_duration_since(started_at).as_nanos() % cycle;
        into_cycle as f64 / cycle as f64
    }

    // --- Alpha cycle ---

    /// Index into [`SCANNER_ALPHA`] for the frame being drawn; moves the
    /// counter on by one, wrapping.
    pub fn advance_alpha_cycle(&mut self) -> usize {
        let current = self.alpha_index;
        self.alpha_index = (self.alpha_index + 1) % SCANNER_ALPHA_LEN;
        current
    }

    /// Index the next [`advance_alpha_cycle`](Self::advance_alpha_cycle) call returns.
    #[must_use]
    pub fn alpha_index(&self) -> usize {
        self.alpha_index
    }

    /// Advance the alpha cycle and return the alpha value for this frame.
    pub fn next_alpha(&mut self) -> u8 {
        SCANNER_ALPHA[self.advance_alpha_cycle()]
    }
}

/// Accelerate/decelerate easing: `(1 - cos(tπ)) / 2`.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (t * PI).cos()) / 2.0
}
