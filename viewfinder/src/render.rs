//! Rendering: turns geometry and clock state into a list of draw commands.
//!
//! This module never touches a real canvas. [`OverlayRenderer::render`] fills a
//! [`DrawList`] that the host replays onto its surface. The list is cleared and
//! refilled in place every tick, so after the first frame no allocation
//! happens on the render path.
//!
//! Draw order per frame:
//! 1. Four mask strips around the scan frame (top, left, right, bottom).
//! 2. The laser oval at the eased clock position, alpha from the alpha cycle.
//! 3. Result-point dots, when a [`ResultPointTrail`] is enabled.

use std::time::Instant;

use serde::Serialize;

use crate::clock::AnimationClock;
use crate::color::{Color, OverlayStyle};
use crate::consts::{
    CURRENT_POINT_OPACITY, LASER_HALF_HEIGHT, LASER_LEFT_INSET, LASER_RIGHT_INSET, MAX_RESULT_POINTS, POINT_SIZE,
};
use crate::geometry::{Rect, RectF, ScanFrame, ViewportSize};

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Commands per frame before result points: four masks and the laser.
const BASE_COMMANDS: usize = 5;

// =============================================================
// Draw commands
// =============================================================

/// One primitive for the host canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle.
    FillRect { rect: Rect, color: Color },
    /// Fill the ellipse inscribed in `bounds`.
    FillOval { bounds: RectF, color: Color },
}

/// Reusable per-frame output of the renderer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    frame: ScanFrame,
    repaint_requested: bool,
}

impl DrawList {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { commands: Vec::with_capacity(capacity), frame: ScanFrame::default(), repaint_requested: false }
    }

    /// Empty the list, keeping its allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.frame = ScanFrame::default();
        self.repaint_requested = false;
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.commands.capacity()
    }

    /// The scan frame this list was composed for.
    #[must_use]
    pub fn frame(&self) -> ScanFrame {
        self.frame
    }

    /// Whether the host should schedule another repaint after replaying this list.
    #[must_use]
    pub fn repaint_requested(&self) -> bool {
        self.repaint_requested
    }

    /// All filled rectangles, in draw order.
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            DrawCommand::FillOval { .. } => None,
        })
    }

    /// All filled ovals, in draw order. The first one is the laser.
    pub fn ovals(&self) -> impl Iterator<Item = (RectF, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::FillOval { bounds, color } => Some((bounds, color)),
            DrawCommand::FillRect { .. } => None,
        })
    }

    /// Serialize the list for an out-of-process host.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================
// Result points
// =============================================================

/// A tentative detection reported by the decoder, relative to the scan frame's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultPoint {
    pub x: f32,
    pub y: f32,
}

impl ResultPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Capability handed to the decoding collaborator.
///
/// The default implementation ignores every point.
pub trait ResultPointSink {
    /// Offer a point found by the decoder. May be drawn as a marker or ignored.
    fn add_possible_result_point(&mut self, _point: ResultPoint) {}
}

/// Bounded history of result points, drawn as fading dots.
///
/// Points added since the last frame are drawn at full marker size; the
/// generation before that is drawn smaller and fainter, then dropped.
#[derive(Debug, Clone, Default)]
pub struct ResultPointTrail {
    current: Vec<ResultPoint>,
    last: Vec<ResultPoint>,
}

impl ResultPointTrail {
    #[must_use]
    pub fn new() -> Self {
        Self { current: Vec::with_capacity(MAX_RESULT_POINTS + 1), last: Vec::with_capacity(MAX_RESULT_POINTS + 1) }
    }

    /// Record a point. Past the cap, the oldest half is discarded.
    pub fn push(&mut self, point: ResultPoint) {
        self.current.push(point);
        if self.current.len() > MAX_RESULT_POINTS {
            let excess = self.current.len() - MAX_RESULT_POINTS / 2;
            self.current.drain(..excess);
        }
    }

    /// Points reported since the last frame.
    #[must_use]
    pub fn current(&self) -> &[ResultPoint] {
        &self.current
    }

    /// Points from the previous frame.
    #[must_use]
    pub fn last(&self) -> &[ResultPoint] {
        &self.last
    }

    /// Promote current points to the previous generation.
    fn rotate(&mut self) {
        std::mem::swap(&mut self.current, &mut self.last);
        self.current.clear();
    }
}

// =============================================================
// Renderer
// =============================================================

/// Composes the overlay for one frame at a time.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    draw_list: DrawList,
    trail: Option<ResultPointTrail>,
}

impl OverlayRenderer {
    #[must_use]
    pub fn new(style: OverlayStyle) -> Self {
        Self { style, draw_list: DrawList::with_capacity(BASE_COMMANDS), trail: None }
    }

    /// Keep and draw a bounded trail of result points instead of ignoring them.
    #[must_use]
    pub fn with_result_points(mut self) -> Self {
        self.trail = Some(ResultPointTrail::new());
        self.draw_list = DrawList::with_capacity(BASE_COMMANDS + 2 * MAX_RESULT_POINTS);
        self
    }

    #[must_use]
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    #[must_use]
    pub fn trail(&self) -> Option<&ResultPointTrail> {
        self.trail.as_ref()
    }

    /// The list produced by the most recent [`render`](Self::render).
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Compose one frame for `viewport`, sampling `clock` at `now`.
    ///
    /// Advances the clock's alpha cycle exactly once, even when the viewport is
    /// empty and nothing is drawn.
    pub fn render(&mut self, viewport: ViewportSize, clock: &mut AnimationClock, now: Instant) -> &DrawList {
        let alpha = clock.next_alpha();
        let progress = clock.progress_at(now);
        self.compose(viewport, progress, alpha);
        &self.draw_list
    }

    /// Compose one frame from an explicit laser position and alpha.
    pub fn compose(&mut self, viewport: ViewportSize, progress: f32, alpha: u8) -> &DrawList {
        self.draw_list.clear();
        let frame = ScanFrame::for_viewport(viewport);
        self.draw_list.frame = frame;
        self.draw_list.repaint_requested = true;

        if viewport.is_empty() {
            return &self.draw_list;
        }

        self.push_masks(viewport, frame);
        self.push_laser(frame, progress, alpha);
        self.push_result_points(frame);
        &self.draw_list
    }

    /// Four strips tiling the viewport outside the frame. The side and bottom
    /// strips start one pixel past the frame edge.
    fn push_masks(&mut self, viewport: ViewportSize, frame: ScanFrame) {
        let color = self.style.mask_color;
        let (vw, vh) = (viewport.width, viewport.height);
        let inner_bottom = (frame.bottom() + 1).min(vh);
        let inner_right = (frame.right() + 1).min(vw);

        let strips = [
            Rect::new(0, 0, vw, frame.y),
            Rect::new(0, frame.y, frame.x, inner_bottom),
            Rect::new(inner_right, frame.y, vw, inner_bottom),
            Rect::new(0, inner_bottom, vw, vh),
        ];
        for rect in strips {
            self.draw_list.push(DrawCommand::FillRect { rect, color });
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn push_laser(&mut self, frame: ScanFrame, progress: f32, alpha: u8) {
        let middle = frame.y as f32 + frame.height as f32 * progress.clamp(0.0, 1.0);
        let bounds = RectF::new(
            frame.x as f32 + LASER_LEFT_INSET,
            middle - LASER_HALF_HEIGHT,
            frame.right() as f32 - LASER_RIGHT_INSET,
            middle + LASER_HALF_HEIGHT,
        );
        if bounds.width() <= 0.0 {
            return;
        }
        let color = self.style.laser_color.with_alpha(alpha);
        self.draw_list.push(DrawCommand::FillOval { bounds, color });
    }

    #[allow(clippy::cast_precision_loss)]
    fn push_result_points(&mut self, frame: ScanFrame) {
        let Some(trail) = self.trail.as_mut() else {
            return;
        };
        let base = self.style.result_point_color;
        let (fx, fy) = (frame.x as f32, frame.y as f32);
        let (fw, fh) = (frame.width as f32, frame.height as f32);
        let generations = [
            (trail.current.as_slice(), CURRENT_POINT_OPACITY, POINT_SIZE / 2.0),
            (trail.last.as_slice(), CURRENT_POINT_OPACITY / 2, POINT_SIZE / 4.0),
        ];

        for (points, alpha, radius) in generations {
            let color = base.with_alpha(alpha);
            for point in points {
                if !(0.0..fw).contains(&point.x) || !(0.0..fh).contains(&point.y) {
                    continue;
                }
                let (cx, cy) = (fx + point.x, fy + point.y);
                let bounds = RectF::new(cx - radius, cy - radius, cx + radius, cy + radius);
                self.draw_list.push(DrawCommand::FillOval { bounds, color });
            }
        }

        trail.rotate();
    }
}

impl ResultPointSink for OverlayRenderer {
    fn add_possible_result_point(&mut self, point: ResultPoint) {
        if let Some(trail) = self.trail.as_mut() {
            trail.push(point);
        }
    }
}
