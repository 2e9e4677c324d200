//! Fixed-step session clock
//!
//! Converts variable frame times into whole `TICK_DT` steps. The clock detaches
//! itself as soon as the session stops playing, so a finished or superseded
//! session never sees another tick.

use crate::consts::{TICK_DT, TIMER_EPSILON};
use crate::sim::{Session, tick};

/// Longest frame accepted before clamping (tab in background, debugger pause)
pub const MAX_FRAME_DT: f32 = 1.0;
/// Maximum steps per `advance` call
pub const MAX_SUBSTEPS: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    accumulator: f32,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start driving a freshly started session
    pub fn attach(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    pub fn detach(&mut self) {
        self.accumulator = 0.0;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed `elapsed` wall-clock seconds; returns the number of ticks run
    pub fn advance(&mut self, session: &mut Session, elapsed: f32) -> u32 {
        if !self.running {
            return 0;
        }
        if !session.is_playing() {
            self.detach();
            return 0;
        }

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);
        let mut steps = 0;
        // Tolerance keeps float drift from swallowing a whole step
        while self.accumulator + TIMER_EPSILON >= TICK_DT && steps < MAX_SUBSTEPS {
            tick(session, TICK_DT);
            self.accumulator = (self.accumulator - TICK_DT).max(0.0);
            steps += 1;
            if !session.is_playing() {
                self.detach();
                break;
            }
        }
        steps
    }
}
