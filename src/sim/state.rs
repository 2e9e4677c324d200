//! Session state and core simulation types
//!
//! Everything a play session needs lives on `Session`, including its RNG, so a
//! session can be serialized mid-run and replayed from its seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::{Question, level_name};
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Created, not started
    #[default]
    Idle,
    /// Question on screen, clock running (or in overtime)
    Playing,
    /// Won or lost; terminal
    Finished,
}

/// One submitted answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub was_correct: bool,
    /// Value the player submitted
    pub answer: i32,
    /// Seconds of clock spent on the question (0 in overtime)
    pub time_taken: f32,
}

/// Notable transitions, drained by the presentation layer for cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started { level: u8 },
    Correct { correct_count: u32, level: u8 },
    Wrong { consecutive_wrong: u32 },
    Demoted { level: u8 },
    /// Clock hit zero on the final question; one answer left
    Overtime,
    Won,
    TimeUp,
    OvertimeFailed,
}

impl SessionEvent {
    /// Whether this event ends the session (stop the clock)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionEvent::Won | SessionEvent::TimeUp | SessionEvent::OvertimeFailed
        )
    }
}

/// Result of a finished session, reported to the progress ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub won: bool,
    pub correct_count: u32,
}

/// Read-only view handed to the presentation layer after each call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub timer: f32,
    pub time_budget: f32,
    pub boat_position: u8,
    pub correct_count: u32,
    pub win_threshold: u32,
    pub consecutive_wrong: u32,
    pub complexity_level: u8,
    pub level_name: String,
    pub current_question: Option<Question>,
    pub history: Vec<AnswerRecord>,
    pub in_overtime: bool,
}

/// A single play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Seed the RNG was created from
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    pub(crate) status: SessionStatus,
    /// Seconds remaining, never below 0
    pub(crate) timer: f32,
    /// Percent of the course covered
    pub(crate) boat_position: u8,
    pub(crate) correct_count: u32,
    pub(crate) consecutive_wrong: u32,
    pub(crate) complexity_level: u8,
    /// Level passed to the last `start`, reused by `reset(None)`
    pub(crate) starting_level: u8,
    pub(crate) current_question: Option<Question>,
    /// Timer value when the current question was issued
    pub(crate) question_issued_at: f32,
    pub(crate) history: Vec<AnswerRecord>,
    #[serde(skip)]
    pub(crate) events: Vec<SessionEvent>,
}

impl Session {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle session with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            status: SessionStatus::Idle,
            timer: 0.0,
            boat_position: 0,
            correct_count: 0,
            consecutive_wrong: 0,
            complexity_level: MIN_LEVEL,
            starting_level: MIN_LEVEL,
            current_question: None,
            question_issued_at: 0.0,
            history: Vec::new(),
            events: Vec::new(),
        };
        session.clear_run(MIN_LEVEL);
        session
    }

    /// Put every per-run field back to its initial value. RNG and tuning survive.
    pub(crate) fn clear_run(&mut self, level: u8) {
        self.status = SessionStatus::Idle;
        self.timer = self.tuning.time_budget;
        self.boat_position = 0;
        self.correct_count = 0;
        self.consecutive_wrong = 0;
        self.complexity_level = level;
        self.starting_level = level;
        self.current_question = None;
        self.question_issued_at = self.timer;
        self.history.clear();
        self.events.clear();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn boat_position(&self) -> u8 {
        self.boat_position
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn consecutive_wrong(&self) -> u32 {
        self.consecutive_wrong
    }

    pub fn complexity_level(&self) -> u8 {
        self.complexity_level
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Playing on the final question with the clock at zero
    pub fn in_overtime(&self) -> bool {
        self.is_playing() && self.timer <= 0.0
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Final result, once the session is over
    pub fn outcome(&self) -> Option<SessionOutcome> {
        (self.status == SessionStatus::Finished).then(|| SessionOutcome {
            won: self.correct_count >= self.tuning.win_threshold,
            correct_count: self.correct_count,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            timer: self.timer,
            time_budget: self.tuning.time_budget,
            boat_position: self.boat_position,
            correct_count: self.correct_count,
            win_threshold: self.tuning.win_threshold,
            consecutive_wrong: self.consecutive_wrong,
            complexity_level: self.complexity_level,
            level_name: level_name(i32::from(self.complexity_level)).to_string(),
            current_question: self.current_question.clone(),
            history: self.history.clone(),
            in_overtime: self.in_overtime(),
        }
    }
}
