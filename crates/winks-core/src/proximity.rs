//! Cursor-to-overlay proximity polling.
//!
//! There is no OS event for "cursor came near a window", so the watcher polls
//! on a fixed ticker and the controller feeds each tick through [`ProximityWatcher::poll`].

use crate::{ProximityConfig, Rect, ScreenPoint};
use crossbeam_channel::{never, tick, Receiver};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct ProximityWatcher {
    interval: Duration,
    buffer: i32,
    ticker: Option<Receiver<Instant>>,
}

impl ProximityWatcher {
    pub fn new(config: &ProximityConfig) -> Self {
        Self {
            interval: config.interval(),
            buffer: config.buffer_px,
            ticker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start polling. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.ticker.is_some() {
            return false;
        }
        self.ticker = Some(tick(self.interval));
        info!(interval = ?self.interval, buffer = self.buffer, "Proximity watcher started");
        true
    }

    /// Stop polling. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.ticker.take().is_some() {
            info!("Proximity watcher stopped");
            true
        } else {
            false
        }
    }

    /// Tick source for `select!`; never fires while stopped.
    pub fn ticks(&self) -> Receiver<Instant> {
        self.ticker.clone().unwrap_or_else(never)
    }

    /// Whether `cursor` lies within `bounds` grown by the buffer.
    pub fn is_near(&self, cursor: ScreenPoint, bounds: Rect) -> bool {
        bounds.expanded(self.buffer).contains(cursor)
    }

    /// Evaluate one tick.
    ///
    /// A missing overlay stops the watcher and yields `None`.
    pub fn poll(&mut self, cursor: ScreenPoint, bounds: Option<Rect>) -> Option<bool> {
        let Some(bounds) = bounds else {
            debug!("Overlay window gone, stopping proximity watcher");
            self.stop();
            return None;
        };
        Some(self.is_near(cursor, bounds))
    }
}
