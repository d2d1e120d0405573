//! Once-per-second countdown ticker

use std::{sync::Weak, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::AppState;

/// Interval between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick the timer every second until the ticker is cancelled, superseded by
/// a newer generation, or the state is dropped.
///
/// The first tick fires one full period after spawning.
pub async fn ticker_task(state: Weak<AppState>, generation: u64) {
    debug!("Starting ticker generation {}", generation);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("Timer state dropped, ticker generation {} exiting", generation);
            break;
        };

        match state.tick(generation) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }

    debug!("Ticker generation {} stopped", generation);
}
