//! Timer controller: owns the timer state and its ticker task

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::{TimerSnapshot, TimerState};
use crate::tasks::ticker_task;

/// Handle to the running ticker task
#[derive(Debug)]
struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Timer state and ticker live behind one lock so that flipping the
/// running flag and starting or cancelling the ticker is a single step.
#[derive(Debug)]
struct Controller {
    timer: TimerState,
    ticker: Option<Ticker>,
    next_generation: u64,
}

impl Controller {
    fn spawn_ticker(&mut self, state: &Arc<AppState>) {
        self.cancel_ticker();

        let generation = self.next_generation;
        self.next_generation += 1;
        let handle = tokio::spawn(ticker_task(Arc::downgrade(state), generation));
        debug!("Spawned ticker generation {}", generation);

        self.ticker = Some(Ticker { generation, handle });
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
            debug!("Cancelled ticker generation {}", ticker.generation);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.timer.running
            && self
                .ticker
                .as_ref()
                .is_some_and(|ticker| ticker.generation == generation)
    }
}

/// Application state shared with the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<Controller>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Latest snapshot, updated on every state change
    timer_update_tx: watch::Sender<TimerSnapshot>,
}

impl AppState {
    /// Create a paused timer at the start of a session
    pub fn new(port: u16, host: String, session_length_minutes: u64, break_length_minutes: u64) -> Self {
        let timer = TimerState::new(session_length_minutes, break_length_minutes);
        let (timer_update_tx, _) = watch::channel(TimerSnapshot::from(&timer));

        Self {
            controller: Mutex::new(Controller {
                timer,
                ticker: None,
                next_generation: 0,
            }),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
        }
    }

    fn lock_controller(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Apply an update, publish the result and record it as the last action
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut Controller),
    {
        let mut controller = self.lock_controller()?;
        updater(&mut *controller);
        let snapshot = TimerSnapshot::from(&controller.timer);
        // Published under the lock so watchers never see updates out of order
        self.timer_update_tx.send_replace(snapshot.clone());
        drop(controller);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Toggle between running and paused, starting or cancelling the ticker
    pub fn start_stop(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        self.update_timer("start-stop", |controller| {
            if controller.timer.toggle_running() {
                controller.spawn_ticker(self);
                info!("Timer started with {}s left", controller.timer.remaining_seconds);
            } else {
                controller.cancel_ticker();
                info!("Timer paused with {}s left", controller.timer.remaining_seconds);
            }
        })
    }

    /// Switch to the other phase at its full length. A running timer gets a
    /// fresh ticker so the new phase shows its full length for a whole second.
    pub fn skip(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        self.update_timer("skip", |controller| {
            controller.timer.skip();
            if controller.timer.running {
                controller.spawn_ticker(self);
            }
            info!("Skipped to {} phase", controller.timer.phase.as_str());
        })
    }

    /// Pause and rewind the current phase
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("reset", |controller| {
            controller.cancel_ticker();
            controller.timer.reset();
            info!("Reset {} phase", controller.timer.phase.as_str());
        })
    }

    /// Advance the countdown by one second on behalf of the ticker with the
    /// given generation. Returns false if that ticker is no longer current.
    pub fn tick(&self, generation: u64) -> Result<bool, String> {
        let mut controller = self.lock_controller()?;
        if !controller.is_current(generation) {
            debug!("Discarding tick from stale ticker generation {}", generation);
            return Ok(false);
        }

        if controller.timer.tick() {
            info!(
                "Entered {} phase (session #{})",
                controller.timer.phase.as_str(),
                controller.timer.session_count
            );
        } else {
            debug!("Tick: {}s left", controller.timer.remaining_seconds);
        }

        self.timer_update_tx
            .send_replace(TimerSnapshot::from(&controller.timer));
        Ok(true)
    }

    /// Stop the timer and release the ticker before the view goes away
    pub fn shutdown(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("shutdown", |controller| {
            controller.cancel_ticker();
            controller.timer.running = false;
        })
    }

    /// Get current timer snapshot
    pub fn get_timer_state(&self) -> Result<TimerSnapshot, String> {
        self.lock_controller()
            .map(|controller| TimerSnapshot::from(&controller.timer))
    }

    /// Whether a ticker task is currently attached
    pub fn has_ticker(&self) -> Result<bool, String> {
        self.lock_controller()
            .map(|controller| controller.ticker.is_some())
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Ok(controller) = self.controller.get_mut() {
            controller.cancel_ticker();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use std::time::Duration;
    use tokio::time::sleep;

    fn new_state() -> Arc<AppState> {
        Arc::new(AppState::new(0, "127.0.0.1".to_string(), 25, 5))
    }

    #[tokio::test(start_paused = true)]
    async fn start_then_stop_changes_nothing() {
        let state = new_state();
        state.start_stop().unwrap();
        let snapshot = state.start_stop().unwrap();

        assert!(!snapshot.running);
        assert!(!state.has_ticker().unwrap());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let state = new_state();
        state.start_stop().unwrap();

        sleep(Duration::from_millis(3500)).await;
        let snapshot = state.get_timer_state().unwrap();
        assert_eq!(snapshot.remaining_seconds, 1497);
        assert_eq!(snapshot.title, "24:57");
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_toggling_keeps_a_single_ticker() {
        let state = new_state();
        for _ in 0..5 {
            state.start_stop().unwrap();
        }
        assert!(state.get_timer_state().unwrap().running);

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn full_session_rolls_into_break() {
        let state = new_state();
        state.start_stop().unwrap();

        sleep(Duration::from_millis(1_500_500)).await;
        let snapshot = state.get_timer_state().unwrap();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining_seconds, 300);
        assert_eq!(snapshot.session_count, 2);
        assert!(snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_the_ticker() {
        let state = new_state();
        state.start_stop().unwrap();
        sleep(Duration::from_millis(10_500)).await;

        let snapshot = state.reset().unwrap();
        assert!(!snapshot.running);
        assert_eq!(snapshot.remaining_seconds, 1500);
        assert!(!state.has_ticker().unwrap());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn skip_restarts_the_tick_schedule() {
        let state = new_state();
        state.start_stop().unwrap();
        sleep(Duration::from_millis(2900)).await;

        let snapshot = state.skip().unwrap();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining_seconds, 300);
        assert!(snapshot.running);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 300);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 299);
    }

    #[tokio::test(start_paused = true)]
    async fn skip_while_paused_starts_no_ticker() {
        let state = new_state();
        state.skip().unwrap();
        assert!(!state.has_ticker().unwrap());

        sleep(Duration::from_secs(3)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 300);
    }

    #[tokio::test]
    async fn stale_ticks_are_discarded() {
        let state = new_state();
        assert!(!state.tick(0).unwrap());

        state.start_stop().unwrap();
        assert!(!state.tick(42).unwrap());
        assert!(state.tick(0).unwrap());
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 1499);

        state.start_stop().unwrap();
        assert!(!state.tick(0).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_releases_the_ticker() {
        let state = new_state();
        state.start_stop().unwrap();

        let snapshot = state.shutdown().unwrap();
        assert!(!snapshot.running);
        assert!(!state.has_ticker().unwrap());
        assert_eq!(state.get_last_action().0.as_deref(), Some("shutdown"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_state_ends_the_ticker() {
        let state = new_state();
        state.start_stop().unwrap();
        let weak = Arc::downgrade(&state);
        drop(state);

        sleep(Duration::from_secs(3)).await;
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn watchers_see_each_command() {
        let state = new_state();
        let mut rx = state.subscribe();

        state.skip().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase, Phase::Break);

        state.reset().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().remaining_seconds, 300);
    }
}
