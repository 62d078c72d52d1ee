#![allow(clippy::float_cmp)]

use std::time::Duration;

use super::*;
use crate::consts::{SCANNER_ALPHA, SCANNER_ALPHA_LEN};

// =============================================================
// Helpers
// =============================================================

const GRAY: Color = Color::new(0xFF, 0x80, 0x80, 0x80);
const GREEN: Color = Color::new(0xFF, 0x00, 0xFF, 0x00);

fn renderer() -> OverlayRenderer {
    OverlayRenderer::new(OverlayStyle::new(GRAY, GREEN))
}

fn running_clock() -> (AnimationClock, Instant) {
    let mut clock = AnimationClock::default();
    let t0 = Instant::now();
    clock.start_at(t0);
    (clock, t0)
}

fn laser(list: &DrawList) -> (RectF, Color) {
    list.ovals().next().unwrap()
}

/// Region the masks leave uncovered: the frame plus its one-pixel seam.
fn interior(viewport: ViewportSize, frame: ScanFrame) -> Rect {
    Rect::new(
        frame.x,
        frame.y,
        (frame.right() + 1).min(viewport.width),
        (frame.bottom() + 1).min(viewport.height),
    )
}

fn overlap(a: Rect, b: Rect) -> bool {
    a.left.max(b.left) < a.right.min(b.right) && a.top.max(b.top) < a.bottom.min(b.bottom)
}

// =============================================================
// End-to-end
// =============================================================

#[test]
fn first_frame_on_portrait_phone() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    let list = r.render(ViewportSize::new(1080, 1920), &mut clock, t0);

    assert_eq!(list.frame(), ScanFrame { x: 202, y: 622, width: 675, height: 675 });

    let rects: Vec<_> = list.rects().collect();
    assert_eq!(rects.len(), 4);
    assert!(rects.iter().all(|(_, c)| *c == GRAY));
    assert_eq!(rects[0].0, Rect::new(0, 0, 1080, 622));
    assert_eq!(rects[1].0, Rect::new(0, 622, 202, 1298));
    assert_eq!(rects[2].0, Rect::new(878, 622, 1080, 1298));
    assert_eq!(rects[3].0, Rect::new(0, 1298, 1080, 1920));

    assert_eq!(list.ovals().count(), 1);
    let (bounds, color) = laser(list);
    assert_eq!(bounds.center_y(), 622.0);
    assert_eq!(bounds.left, 204.0);
    assert_eq!(bounds.right, 876.0);
    assert_eq!(bounds.height(), 4.0);
    assert_eq!(color, GREEN.with_alpha(SCANNER_ALPHA[0]));

    assert!(list.repaint_requested());
}

#[test]
fn masks_plus_interior_tile_viewport() {
    let mut r = renderer();
    for w in (1..2200).step_by(97) {
        for h in (1..2200).step_by(89) {
            let viewport = ViewportSize::new(w, h);
            let list = r.compose(viewport, 0.0, 255);
            let inner = interior(viewport, list.frame());
            let rects: Vec<Rect> = list.rects().map(|(rect, _)| rect).collect();

            let mask_area: u64 = rects.iter().map(Rect::area).sum();
            assert_eq!(mask_area + inner.area(), u64::from(w) * u64::from(h), "viewport {w}x{h}");

            for (i, a) in rects.iter().enumerate() {
                assert!(a.right <= w && a.bottom <= h);
                assert!(!overlap(*a, inner), "mask {a:?} overlaps interior in {w}x{h}");
                for b in &rects[i + 1..] {
                    assert!(!overlap(*a, *b), "{a:?} overlaps {b:?} in {w}x{h}");
                }
            }
        }
    }
}

#[test]
fn tiny_viewport_is_fully_frame() {
    let mut r = renderer();
    let list = r.compose(ViewportSize::new(100, 100), 0.0, 255);
    assert_eq!(list.rects().count(), 4);
    assert!(list.rects().all(|(rect, _)| rect.is_empty()));
}

// =============================================================
// Laser
// =============================================================

#[test]
fn laser_follows_progress() {
    let mut r = renderer();
    let list = r.compose(ViewportSize::new(1080, 1920), 0.5, 255);
    let (bounds, _) = laser(list);
    assert_eq!(bounds.center_y(), 622.0 + 675.0 * 0.5);
}

#[test]
fn laser_at_full_progress_is_frame_bottom() {
    let mut r = renderer();
    let list = r.compose(ViewportSize::new(1920, 1080), 1.0, 255);
    let (bounds, _) = laser(list);
    assert_eq!(bounds.center_y(), 202.0 + 675.0);
}

#[test]
fn laser_progress_is_clamped() {
    let mut r = renderer();
    let list = r.compose(ViewportSize::new(1920, 1080), 3.0, 255);
    let (bounds, _) = laser(list);
    assert_eq!(bounds.center_y(), 877.0);
}

#[test]
fn laser_uses_clock_progress() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    let list = r.render(ViewportSize::new(1920, 1080), &mut clock, t0 + Duration::from_millis(1000));
    let (bounds, _) = laser(list);
    assert!((bounds.center_y() - (202.0 + 337.5)).abs() < 1e-3);
}

#[test]
fn laser_alpha_cycles_each_render() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    let viewport = ViewportSize::new(800, 600);
    let alphas: Vec<u8> = (0..SCANNER_ALPHA_LEN * 2)
        .map(|_| laser(r.render(viewport, &mut clock, t0)).1.a)
        .collect();
    let expected: Vec<u8> = SCANNER_ALPHA.iter().chain(SCANNER_ALPHA.iter()).copied().collect();
    assert_eq!(alphas, expected);
}

#[test]
fn laser_skipped_when_frame_too_narrow() {
    let mut r = renderer();
    let list = r.compose(ViewportSize::new(3, 500), 0.0, 255);
    assert_eq!(list.ovals().count(), 0);
    assert_eq!(list.rects().count(), 4);
}

// =============================================================
// Degenerate viewports
// =============================================================

#[test]
fn zero_viewport_draws_nothing() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    let list = r.render(ViewportSize::new(0, 1920), &mut clock, t0);
    assert!(list.is_empty());
    assert!(list.repaint_requested());
    assert!(list.frame().is_empty());
}

#[test]
fn zero_viewport_still_advances_alpha() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    r.render(ViewportSize::default(), &mut clock, t0);
    assert_eq!(clock.alpha_index(), 1);
}

// =============================================================
// Buffer reuse
// =============================================================

#[test]
fn draw_list_capacity_is_stable() {
    let (mut clock, t0) = running_clock();
    let mut r = renderer();
    r.render(ViewportSize::new(1080, 1920), &mut clock, t0);
    let cap = r.draw_list().capacity();
    for i in 0..200 {
        r.render(ViewportSize::new(1080 + i, 1920 - i), &mut clock, t0);
    }
    assert_eq!(r.draw_list().capacity(), cap);
}

#[test]
fn render_replaces_previous_commands() {
    let mut r = renderer();
    r.compose(ViewportSize::new(1080, 1920), 0.0, 255);
    let list = r.compose(ViewportSize::new(1080, 1920), 0.0, 255);
    assert_eq!(list.len(), 5);
}

#[test]
fn draw_list_serializes_ops() {
    let mut r = renderer();
    let json = r.compose(ViewportSize::new(800, 600), 0.0, 255).to_json().unwrap();
    assert!(json.contains("\"op\":\"fill_rect\""));
    assert!(json.contains("\"op\":\"fill_oval\""));
    assert!(json.contains("\"repaint_requested\":true"));
}

// =============================================================
// Result points
// =============================================================

#[test]
fn result_points_ignored_by_default() {
    let mut r = renderer();
    r.add_possible_result_point(ResultPoint::new(10.0, 10.0));
    assert!(r.trail().is_none());
    let list = r.compose(ViewportSize::new(800, 600), 0.0, 255);
    assert_eq!(list.ovals().count(), 1);
}

#[test]
fn default_sink_is_noop() {
    struct Decoder;
    impl ResultPointSink for Decoder {}
    let mut d = Decoder;
    d.add_possible_result_point(ResultPoint::new(1.0, 2.0));
}

#[test]
fn trail_draws_current_then_fades() {
    let mut r = renderer().with_result_points();
    let viewport = ViewportSize::new(800, 600);
    let frame = ScanFrame::for_viewport(viewport);
    r.add_possible_result_point(ResultPoint::new(10.0, 20.0));
    r.add_possible_result_point(ResultPoint::new(30.0, 40.0));

    let list = r.compose(viewport, 0.0, 255);
    let dots: Vec<_> = list.ovals().skip(1).collect();
    assert_eq!(dots.len(), 2);
    let (bounds, color) = dots[0];
    assert_eq!(bounds.width(), POINT_SIZE);
    assert_eq!(bounds.center_y(), frame.y as f32 + 20.0);
    assert_eq!(color.a, CURRENT_POINT_OPACITY);

    let list = r.compose(viewport, 0.0, 255);
    let faded: Vec<_> = list.ovals().skip(1).collect();
    assert_eq!(faded.len(), 2);
    assert_eq!(faded[0].0.width(), POINT_SIZE / 2.0);
    assert_eq!(faded[0].1.a, CURRENT_POINT_OPACITY / 2);

    let list = r.compose(viewport, 0.0, 255);
    assert_eq!(list.ovals().count(), 1);
}

#[test]
fn trail_skips_points_outside_frame() {
    let mut r = renderer().with_result_points();
    r.add_possible_result_point(ResultPoint::new(-1.0, 5.0));
    r.add_possible_result_point(ResultPoint::new(5.0, 10_000.0));
    r.add_possible_result_point(ResultPoint::new(5.0, 5.0));
    let list = r.compose(ViewportSize::new(800, 600), 0.0, 255);
    assert_eq!(list.ovals().count(), 2);
}

#[test]
fn trail_is_bounded() {
    let mut trail = ResultPointTrail::new();
    for i in 0..25 {
        trail.push(ResultPoint::new(i as f32, 0.0));
    }
    assert_eq!(trail.current().len(), 14);
    assert_eq!(trail.current().last(), Some(&ResultPoint::new(24.0, 0.0)));
    assert!(trail.last().is_empty());
}

#[test]
fn trail_never_exceeds_cap() {
    let mut trail = ResultPointTrail::new();
    for i in 0..500 {
        trail.push(ResultPoint::new(i as f32, 0.0));
        assert!(trail.current().len() <= MAX_RESULT_POINTS);
    }
}

#[test]
fn result_point_color_applies() {
    let yellow = Color::new(0xFF, 0xFF, 0xFF, 0x00);
    let style = OverlayStyle::new(GRAY, GREEN).with_result_point_color(yellow);
    let mut r = OverlayRenderer::new(style).with_result_points();
    r.add_possible_result_point(ResultPoint::new(5.0, 5.0));
    let list = r.compose(ViewportSize::new(800, 600), 0.0, 255);
    let (_, color) = list.ovals().nth(1).unwrap();
    assert_eq!(color, yellow.with_alpha(CURRENT_POINT_OPACITY));
}
