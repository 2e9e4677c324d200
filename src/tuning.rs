//! Data-driven game balance
//!
//! Per-session knobs. Defaults mirror `consts`; overrides come from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be within {min}..={max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds on the clock at start
    pub time_budget: f32,
    /// Correct answers needed to win
    pub win_threshold: u32,
    /// Boat advance per correct answer (percent)
    pub boat_step: u8,
    /// Consecutive misses before the level drops
    pub demotion_streak: u32,
    /// Total answer choices per question
    pub answer_choices: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_budget: TIME_BUDGET,
            win_threshold: WIN_THRESHOLD,
            boat_step: BOAT_STEP,
            demotion_streak: DEMOTION_STREAK,
            answer_choices: ANSWER_CHOICES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field against its documented bounds.
    ///
    /// # Errors
    ///
    /// Returns `TuningError::RangeViolation` naming the first offending field.
    pub fn validate(&self) -> Result<(), TuningError> {
        check("time_budget", f64::from(self.time_budget), 1.0, 600.0)?;
        check("win_threshold", f64::from(self.win_threshold), 1.0, 100.0)?;
        check(
            "boat_step",
            f64::from(self.boat_step),
            1.0,
            f64::from(BOAT_FINISH),
        )?;
        check("demotion_streak", f64::from(self.demotion_streak), 1.0, 10.0)?;
        check(
            "answer_choices",
            self.answer_choices as f64,
            MIN_ANSWER_CHOICES as f64,
            8.0,
        )?;
        Ok(())
    }

    /// Correct count at which the overtime grace applies
    pub fn final_question_index(&self) -> u32 {
        self.win_threshold.saturating_sub(1)
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), TuningError> {
    // NaN fails the range check too
    if !(min..=max).contains(&value) {
        return Err(TuningError::RangeViolation {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
