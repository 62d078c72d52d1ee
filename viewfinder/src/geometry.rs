//! Scan frame sizing and the rectangle types the renderer emits.
//!
//! DESIGN
//! ======
//! The frame targets 5/8 of each viewport axis, clamped to fixed pixel bounds,
//! and is centered with truncating division. Viewports smaller than the lower
//! bound would push the offsets negative, so the sized frame is additionally
//! clamped to the viewport: a tiny viewport yields a frame that fills it
//! (nothing left to mask) and a zero-area viewport yields a zero-area frame.

use serde::Serialize;

use crate::consts::{
    FRAME_RATIO_DEN, FRAME_RATIO_NUM, MAX_FRAME_HEIGHT, MAX_FRAME_WIDTH, MIN_FRAME_HEIGHT, MIN_FRAME_WIDTH,
};

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// Pixel size of the surface the overlay draws onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from signed host dimensions; negative values become zero.
    #[must_use]
    pub fn from_signed(width: i64, height: i64) -> Self {
        Self { width: clamp_to_u32(width), height: clamp_to_u32(height) }
    }

    /// True when either axis is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Integer rectangle given by its edges. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    #[must_use]
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Width, or zero when the edges are inverted.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height, or zero when the edges are inverted.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Whether the pixel at `(x, y)` lies inside this rectangle.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Floating-point rectangle, used for oval bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }
}

/// Centered scanning target inside the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanFrame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScanFrame {
    /// Size and center a frame for `viewport`.
    #[must_use]
    pub fn for_viewport(viewport: ViewportSize) -> Self {
        let width = compute_dimension(viewport.width, MIN_FRAME_WIDTH, MAX_FRAME_WIDTH).min(viewport.width);
        let height = compute_dimension(viewport.height, MIN_FRAME_HEIGHT, MAX_FRAME_HEIGHT).min(viewport.height);
        Self { x: (viewport.width - width) / 2, y: (viewport.height - height) / 2, width, height }
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Target 5/8 of `resolution`, clamped to `[hard_min, hard_max]`.
#[must_use]
pub fn compute_dimension(resolution: u32, hard_min: u32, hard_max: u32) -> u32 {
    let target = u64::from(resolution) * FRAME_RATIO_NUM / FRAME_RATIO_DEN;
    if target < u64::from(hard_min) {
        return hard_min;
    }
    if target > u64::from(hard_max) {
        return hard_max;
    }
    // In range, so it fits.
    u32::try_from(target).unwrap_or(hard_max)
}
