//! Drives a [`Universe`] without a display.

use nova_animation::ManualRefreshHost;
use nova_universe::{PLANET_GROUP, RING_GROUP, STARFIELD_GROUP, Universe};
use tracing::info;

/// What a headless run did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Update invocations that ran.
    pub frames: u64,
    /// Simulated seconds covered by the refresh timestamps.
    pub simulated_seconds: f64,
    pub planet_angle: f32,
    pub starfield_angle: f32,
    pub ring_angle: f32,
}

/// Start `universe` on `host` and deliver `frames` refreshes at
/// `refresh_rate_hz`, logging angles about once per simulated second.
pub fn run_frames(
    universe: &mut Universe,
    host: &mut ManualRefreshHost,
    frames: u64,
    refresh_rate_hz: f32,
) -> RunSummary {
    let rate = refresh_rate_hz.max(1.0) as f64;
    let log_every = rate.round().max(1.0) as u64;

    universe.start(host);
    let mut ran = 0;
    for frame in 0..frames {
        let timestamp = frame as f64 / rate;
        for token in host.take_due() {
            if universe.on_refresh(host, token, timestamp) {
                ran += 1;
            }
        }
        if frame % log_every == 0 {
            info!(
                frame,
                planet = universe.group_angle(PLANET_GROUP).unwrap_or_default(),
                starfield = universe.group_angle(STARFIELD_GROUP).unwrap_or_default(),
                ring = universe.group_angle(RING_GROUP).unwrap_or_default(),
                "group angles"
            );
        }
    }

    RunSummary {
        frames: ran,
        simulated_seconds: frames.saturating_sub(1) as f64 / rate,
        planet_angle: universe.group_angle(PLANET_GROUP).unwrap_or_default(),
        starfield_angle: universe.group_angle(STARFIELD_GROUP).unwrap_or_default(),
        ring_angle: universe.group_angle(RING_GROUP).unwrap_or_default(),
    }
}
