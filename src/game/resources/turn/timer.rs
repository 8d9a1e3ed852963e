//! Per-player countdown clocks
//!
//! Each [`PlayerClock`] owns a tokio task. While the clock is paused the task
//! waits on a `watch` channel; while it runs the task sleeps until the
//! remaining time would reach zero. Nothing polls.
//!
//! # Time Management
//!
//! - Only the side to move has a running clock
//! - Time is charged when the clock is paused, and read live while running
//! - Reaching zero marks the clock expired; expiry is final
//! - Dropping the clock aborts its task

use std::sync::Arc;
use std::time::Duration;

use checkers_engine::Side;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug)]
struct ClockState {
    remaining: Duration,
    /// Set while running
    started_at: Option<Instant>,
    expired: bool,
}

impl ClockState {
    fn remaining_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => self.remaining.saturating_sub(now.saturating_duration_since(start)),
            None => self.remaining,
        }
    }
}

/// Countdown clock for one side
#[derive(Debug)]
pub struct PlayerClock {
    side: Side,
    state: Arc<Mutex<ClockState>>,
    running: watch::Sender<bool>,
    expired: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl PlayerClock {
    /// Paused clock with `limit` on it
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(side: Side, limit: Duration) -> Self {
        let state = Arc::new(Mutex::new(ClockState {
            remaining: limit,
            started_at: None,
            expired: false,
        }));
        let (running_tx, running_rx) = watch::channel(false);
        let (expired_tx, expired_rx) = watch::channel(false);
        let task = tokio::spawn(run_clock(side, state.clone(), running_rx, expired_tx));
        Self {
            side,
            state,
            running: running_tx,
            expired: expired_rx,
            task,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Start counting down
    pub fn unpause(&self) {
        {
            let mut state = self.state.lock();
            if state.expired || state.started_at.is_some() {
                return;
            }
            state.started_at = Some(Instant::now());
        }
        self.running.send_replace(true);
        debug!("[CLOCK] {} clock running", self.side);
    }

    /// Stop counting down, charging the elapsed time
    pub fn pause(&self) {
        {
            let mut state = self.state.lock();
            if state.started_at.is_none() {
                return;
            }
            state.remaining = state.remaining_at(Instant::now());
            state.started_at = None;
        }
        self.running.send_replace(false);
        debug!("[CLOCK] {} clock paused at {:?}", self.side, self.remaining());
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().started_at.is_some()
    }

    /// Time left, read live while running
    pub fn remaining(&self) -> Duration {
        self.state.lock().remaining_at(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.state.lock().expired
    }

    /// Resolve once the clock reaches zero
    ///
    /// Never resolves if the clock is stopped before expiring.
    pub async fn expired(&self) {
        let mut rx = self.expired.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Pause and end the clock task
    pub fn stop(&self) {
        self.pause();
        self.task.abort();
    }
}

impl Drop for PlayerClock {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_clock(
    side: Side,
    state: Arc<Mutex<ClockState>>,
    mut running: watch::Receiver<bool>,
    expired: watch::Sender<bool>,
) {
    loop {
        // Wait for the clock to start
        while !*running.borrow_and_update() {
            if running.changed().await.is_err() {
                return;
            }
        }

        let left = state.lock().remaining_at(Instant::now());
        tokio::select! {
            _ = tokio::time::sleep(left) => {
                let mut guard = state.lock();
                let now = Instant::now();
                if guard.started_at.is_some() && guard.remaining_at(now).is_zero() {
                    guard.remaining = Duration::ZERO;
                    guard.started_at = None;
                    guard.expired = true;
                    drop(guard);
                    info!("[CLOCK] {} ran out of time", side);
                    expired.send_replace(true);
                    return;
                }
            }
            changed = running.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}

/// Both players' clocks
#[derive(Debug)]
pub struct GameClocks {
    dark: PlayerClock,
    light: PlayerClock,
}

impl GameClocks {
    /// Two paused clocks with the same limit
    pub fn new(limit: Duration) -> Self {
        Self {
            dark: PlayerClock::new(Side::Dark, limit),
            light: PlayerClock::new(Side::Light, limit),
        }
    }

    pub fn get(&self, side: Side) -> &PlayerClock {
        match side {
            Side::Dark => &self.dark,
            Side::Light => &self.light,
        }
    }

    /// Run `side`'s clock and pause the other
    pub fn switch_to(&self, side: Side) {
        self.get(side.opponent()).pause();
        self.get(side).unpause();
    }

    pub fn pause_all(&self) {
        self.dark.pause();
        self.light.pause();
    }

    /// Side whose clock has already expired
    pub fn expired_side(&self) -> Option<Side> {
        if self.dark.is_expired() {
            Some(Side::Dark)
        } else if self.light.is_expired() {
            Some(Side::Light)
        } else {
            None
        }
    }

    /// Resolve with the first side to run out of time
    pub async fn first_expired(&self) -> Side {
        tokio::select! {
            _ = self.dark.expired() => Side::Dark,
            _ = self.light.expired() => Side::Light,
        }
    }

    pub fn stop(&self) {
        self.dark.stop();
        self.light.stop();
    }
}
