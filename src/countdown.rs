//! Meditation countdown.
//!
//! Counts down once per tick while running and while the dashboard is
//! browsing. Edit mode pauses it: no tick is scheduled until the mode flips
//! back. The task is aborted when the [`Countdown`] is dropped and ends on
//! its own when the mode source goes away.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::UiMode;

/// Starting length, 16:45.
pub const DEFAULT_SECONDS: u32 = 1005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining: u32,
    pub running: bool,
}

impl CountdownState {
    fn step(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
        }
    }
}

/// Render seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub struct Countdown {
    state: Arc<watch::Sender<CountdownState>>,
    mode: watch::Receiver<UiMode>,
    seconds: u32,
    task: JoinHandle<()>,
}

impl Countdown {
    /// A stopped countdown of [`DEFAULT_SECONDS`] ticking every second.
    pub fn spawn(mode: watch::Receiver<UiMode>) -> Self {
        Self::with_tick(mode, DEFAULT_SECONDS, Duration::from_secs(1))
    }

    pub fn with_tick(mode: watch::Receiver<UiMode>, seconds: u32, tick: Duration) -> Self {
        let state = Arc::new(
            watch::channel(CountdownState {
                remaining: seconds,
                running: false,
            })
            .0,
        );
        let task = tokio::spawn(run(Arc::clone(&state), mode.clone(), tick));
        Self {
            state,
            mode,
            seconds,
            task,
        }
    }

    /// Start or pause. Ignored in edit mode; returns whether it took effect.
    pub fn toggle(&self) -> bool {
        if *self.mode.borrow() == UiMode::Edit {
            debug!("countdown toggle ignored in edit mode");
            return false;
        }
        self.state.send_modify(|s| s.running = !s.running && s.remaining > 0);
        true
    }

    /// Stop and rewind to the starting length.
    pub fn reset(&self) {
        let seconds = self.seconds;
        self.state.send_modify(|s| {
            s.remaining = seconds;
            s.running = false;
        });
    }

    pub fn state(&self) -> CountdownState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.subscribe()
    }

    pub fn display(&self) -> String {
        format_time(self.state().remaining)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    state: Arc<watch::Sender<CountdownState>>,
    mut mode: watch::Receiver<UiMode>,
    tick: Duration,
) {
    let mut control = state.subscribe();
    loop {
        let running = control.borrow_and_update().running;
        let browsing = *mode.borrow_and_update() == UiMode::Browse;
        tokio::select! {
            _ = tokio::time::sleep(tick), if running && browsing => {
                state.send_modify(CountdownState::step);
            }
            changed = control.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = mode.changed() => {
                if changed.is_err() {
                    debug!("mode source closed, countdown stopping");
                    break;
                }
            }
        }
    }
}
