//! The embeddable viewfinder component and its attach/detach lifecycle.
//!
//! DESIGN
//! ======
//! Attaching starts the animation clock and subscribes to the host's refresh
//! scheduler; detaching stops the clock and unsubscribes. Ticks are numbered
//! by the scheduler. The overlay draws a tick only if it was issued after the
//! current attachment or after a pending [`ViewfinderOverlay::invalidate`].
//! A tick already queued when the overlay detached is dropped without
//! touching the clock or the alpha cycle.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::clock::AnimationClock;
use crate::color::OverlayStyle;
use crate::geometry::ViewportSize;
use crate::render::{DrawList, OverlayRenderer, ResultPoint, ResultPointSink};
use crate::scheduler::{FrameScheduler, FrameTick, Subscription};

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

/// The viewfinder component the host surface embeds.
///
/// Attaching starts the animation clock and subscribes to the host's refresh
/// scheduler; detaching undoes both. All state is mutated through `&mut self`
/// on the render thread.
#[derive(Debug)]
pub struct ViewfinderOverlay {
    renderer: OverlayRenderer,
    clock: AnimationClock,
    subscription: Option<Subscription>,
    /// First tick index a pending one-shot repaint may use.
    invalidated_from: Option<u64>,
}

impl Default for ViewfinderOverlay {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

impl ViewfinderOverlay {
    #[must_use]
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            renderer: OverlayRenderer::new(style),
            clock: AnimationClock::default(),
            subscription: None,
            invalidated_from: None,
        }
    }

    /// Use a laser sweep of `cycle` instead of the default.
    #[must_use]
    pub fn with_cycle(mut self, cycle: Duration) -> Self {
        self.clock = AnimationClock::new(cycle);
        self
    }

    /// Draw result points offered by the decoder instead of ignoring them.
    #[must_use]
    pub fn with_result_points(mut self) -> Self {
        self.renderer = self.renderer.with_result_points();
        self
    }

    // --- Lifecycle ---

    /// Start animating. Returns `false` if already attached.
    pub fn attach(&mut self, scheduler: &mut FrameScheduler, now: Instant) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        self.clock.start_at(now);
        self.subscription = Some(scheduler.subscribe());
        true
    }

    /// Stop animating and release the refresh subscription. Returns `false`
    /// if already detached.
    pub fn detach(&mut self, scheduler: &mut FrameScheduler) -> bool {
        let Some(subscription) = self.subscription.take() else {
            return false;
        };
        self.clock.stop();
        scheduler.unsubscribe(subscription.id);
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Request a single repaint, even while detached.
    pub fn invalidate(&mut self, scheduler: &mut FrameScheduler) {
        if self.invalidated_from.is_none() {
            self.invalidated_from = Some(scheduler.next_frame());
        }
        scheduler.request_frame();
    }

    // --- Frames ---

    /// Handle one refresh. Returns the commands to replay, or `None` when the
    /// tick is stale (issued before this attachment or the pending repaint).
    pub fn on_frame(&mut self, tick: &FrameTick, viewport: ViewportSize) -> Option<&DrawList> {
        let live = self.subscription.is_some_and(|s| s.accepts(tick)) && self.clock.is_running();
        let requested = self.invalidated_from.is_some_and(|from| tick.index >= from);
        if !live && !requested {
            trace!(index = tick.index, "ignoring stale frame tick");
            return None;
        }
        self.invalidated_from = None;
        Some(self.renderer.render(viewport, &mut self.clock, tick.now))
    }

    // --- Queries ---

    #[must_use]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    #[must_use]
    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        self.renderer.draw_list()
    }
}

impl ResultPointSink for ViewfinderOverlay {
    fn add_possible_result_point(&mut self, point: ResultPoint) {
        self.renderer.add_possible_result_point(point);
    }
}
