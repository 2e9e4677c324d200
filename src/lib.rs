//! Infinite Regatta - an adaptive arithmetic quiz game
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (question generation, timer, difficulty)
//! - `tuning`: Data-driven game balance
//! - `progress`: Cross-session points, login streak and unlocks
//! - `catalog`: Cosmetics sold in the shipyard
//! - `persistence`: Key-value storage with a versioned save envelope
//! - `platform`: Browser bridge for the presentation layer

pub mod catalog;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progress::{Progress, PurchaseError};
pub use settings::{Settings, SettingsPatch};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Seconds on the clock at the start of a session
    pub const TIME_BUDGET: f32 = 30.0;
    /// Reference clock cadence (100 ms)
    pub const TICK_DT: f32 = 0.1;
    /// Timer values closer to zero than this are treated as expired
    pub const TIMER_EPSILON: f32 = 1e-3;

    /// Correct answers needed to win
    pub const WIN_THRESHOLD: u32 = 10;
    /// Boat advance per correct answer (percent of the course)
    pub const BOAT_STEP: u8 = 10;
    /// Finish line (percent)
    pub const BOAT_FINISH: u8 = 100;
    /// Consecutive wrong answers that trigger a demotion
    pub const DEMOTION_STREAK: u32 = 2;

    /// Answer choices shown per question (correct answer included)
    pub const ANSWER_CHOICES: usize = 4;
    /// Smallest answer set that still makes a choice
    pub const MIN_ANSWER_CHOICES: usize = 2;

    /// Difficulty bounds
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;
}

/// Clamp any requested difficulty into `[MIN_LEVEL, MAX_LEVEL]`
#[inline]
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(
        i32::from(consts::MIN_LEVEL),
        i32::from(consts::MAX_LEVEL),
    ) as u8
}
