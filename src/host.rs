//! Headless host surface for the viewfinder overlay.
//!
//! DESIGN
//! ======
//! A tokio interval stands in for the display's refresh signal. Each refresh
//! asks the [`FrameScheduler`] for a tick and hands it to the overlay, which
//! answers with a draw list. The overlay is attached before the first refresh
//! and detached when the run ends (frame budget reached or Ctrl-C), so the
//! scheduler must be empty afterwards; a leftover subscriber is reported as a
//! leak.

use std::time::Instant;

use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use viewfinder::overlay::ViewfinderOverlay;
use viewfinder::render::{ResultPoint, ResultPointSink};
use viewfinder::scheduler::FrameScheduler;

use crate::config::HostConfig;

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

/// Frames between synthetic decoder points.
const RESULT_POINT_EVERY: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to serialize draw list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("refresh scheduler still has {0} subscriber(s) after detach")]
    LeakedSubscription(usize),
}

/// What happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames_rendered: u64,
    pub stale_ticks: u64,
    pub commands_emitted: u64,
    pub elapsed_ms: u128,
}

/// Drive the overlay until the frame budget is spent or Ctrl-C arrives.
///
/// # Errors
///
/// Returns [`HostError`] if the first frame cannot be dumped or the overlay
/// leaks its refresh subscription.
pub async fn run(config: &HostConfig) -> Result<RunSummary, HostError> {
    let mut overlay = ViewfinderOverlay::new(config.style).with_cycle(config.cycle);
    if config.result_points {
        overlay = overlay.with_result_points();
    }
    let mut scheduler = FrameScheduler::new();

    let started = Instant::now();
    overlay.attach(&mut scheduler, started);
    info!(
        width = config.viewport.width,
        height = config.viewport.height,
        interval_ms = config.frame_interval.as_millis(),
        "viewfinder attached"
    );

    let mut summary = RunSummary::default();
    let mut interval = tokio::time::interval(config.frame_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }

        if config.result_points && summary.frames_rendered % RESULT_POINT_EVERY == 0 {
            overlay.add_possible_result_point(synthetic_point(summary.frames_rendered));
        }

        let Some(tick) = scheduler.next_tick(Instant::now()) else {
            break;
        };
        let Some(list) = overlay.on_frame(&tick, config.viewport) else {
            summary.stale_ticks += 1;
            continue;
        };

        if config.dump_json && summary.frames_rendered == 0 {
            info!(draw_list = %list.to_json()?, "first frame");
        }
        debug!(index = tick.index, commands = list.len(), "frame rendered");
        summary.frames_rendered += 1;
        summary.commands_emitted += list.len() as u64;

        if config.frames != 0 && summary.frames_rendered >= config.frames {
            break;
        }
    }

    overlay.detach(&mut scheduler);
    summary.elapsed_ms = started.elapsed().as_millis();

    let leaked = scheduler.subscriber_count();
    if leaked != 0 {
        warn!(leaked, "refresh subscription leaked");
        return Err(HostError::LeakedSubscription(leaked));
    }
    Ok(summary)
}

/// A wandering point inside a typical frame, standing in for a decoder hit.
#[allow(clippy::cast_precision_loss)]
fn synthetic_point(frame: u64) -> ResultPoint {
    let step = (frame / RESULT_POINT_EVERY) as f32;
    ResultPoint::new(40.0 + (step * 37.0) % 160.0, 40.0 + (step * 23.0) % 160.0)
}
