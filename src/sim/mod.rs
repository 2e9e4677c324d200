//! Deterministic session simulation
//!
//! All quiz logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only (owned by the session)
//! - Time only advances through `tick`
//! - No rendering, audio or platform dependencies

pub mod question;
pub mod state;
pub mod tick;

pub use question::{Question, generate, generate_with_choices, level_name};
pub use state::{
    AnswerRecord, Session, SessionEvent, SessionOutcome, SessionSnapshot, SessionStatus,
};
pub use tick::{SubmitResult, reset, start, submit_answer, tick};
