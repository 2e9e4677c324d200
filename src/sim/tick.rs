//! Session transitions
//!
//! `start`, `reset`, `submit_answer` and `tick` are the only ways a session
//! changes. All of them are total: bad input is clamped or ignored.

use super::question::generate_with_choices;
use super::state::{AnswerRecord, Session, SessionEvent, SessionStatus};
use crate::clamp_level;
use crate::consts::*;

/// What `submit_answer` did with the value it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// No live question (session idle or finished); nothing changed
    Ignored,
    Correct,
    Wrong,
}

/// Begin a fresh run at `level`, discarding whatever the session held
pub fn start(session: &mut Session, level: i32) {
    let level = clamp_level(level);
    session.clear_run(level);
    session.status = SessionStatus::Playing;
    session.events.push(SessionEvent::Started { level });
    issue_question(session);
    log::info!(
        "Session started at level {} ({:.1}s on the clock)",
        level,
        session.timer
    );
}

/// Restart, optionally at a new level. `None` reuses the last starting level.
pub fn reset(session: &mut Session, level: Option<i32>) {
    let level = level.unwrap_or(i32::from(session.starting_level));
    start(session, level);
}

/// Advance the countdown by `dt` seconds
pub fn tick(session: &mut Session, dt: f32) {
    if session.status != SessionStatus::Playing {
        return;
    }

    // NaN and negative steps never move the clock
    let dt = dt.max(0.0);
    let was_running = session.timer > 0.0;
    session.timer = (session.timer - dt).max(0.0);
    if session.timer > TIMER_EPSILON {
        return;
    }
    session.timer = 0.0;

    if session.correct_count < session.tuning.final_question_index() {
        finish(session, SessionEvent::TimeUp);
    } else if was_running {
        // On the winning question: keep playing with one answer left
        session.events.push(SessionEvent::Overtime);
        log::debug!("Overtime on the final question");
    }
}

/// Check `value` against the live question and apply the outcome
pub fn submit_answer(session: &mut Session, value: i32) -> SubmitResult {
    if session.status != SessionStatus::Playing {
        return SubmitResult::Ignored;
    }
    let Some(question) = session.current_question.as_ref() else {
        return SubmitResult::Ignored;
    };

    let was_correct = question.is_correct(value);
    let record = AnswerRecord {
        question_id: question.id,
        was_correct,
        answer: value,
        // Overtime answers cost no clock time
        time_taken: if session.timer <= 0.0 {
            0.0
        } else {
            (session.question_issued_at - session.timer).max(0.0)
        },
    };
    session.history.push(record);

    if was_correct {
        on_correct(session);
        SubmitResult::Correct
    } else {
        on_wrong(session);
        SubmitResult::Wrong
    }
}

fn on_correct(session: &mut Session) {
    session.correct_count += 1;
    session.complexity_level = (session.complexity_level + 1).min(MAX_LEVEL);
    session.boat_position = session
        .boat_position
        .saturating_add(session.tuning.boat_step)
        .min(BOAT_FINISH);
    session.consecutive_wrong = 0;
    session.events.push(SessionEvent::Correct {
        correct_count: session.correct_count,
        level: session.complexity_level,
    });
    log::debug!(
        "Correct ({}/{}), level {} boat {}%",
        session.correct_count,
        session.tuning.win_threshold,
        session.complexity_level,
        session.boat_position
    );

    if session.correct_count >= session.tuning.win_threshold {
        finish(session, SessionEvent::Won);
    } else {
        issue_question(session);
    }
}

fn on_wrong(session: &mut Session) {
    session.consecutive_wrong += 1;
    session.events.push(SessionEvent::Wrong {
        consecutive_wrong: session.consecutive_wrong,
    });

    if session.consecutive_wrong >= session.tuning.demotion_streak {
        session.complexity_level = session.complexity_level.saturating_sub(1).max(MIN_LEVEL);
        session.consecutive_wrong = 0;
        session.events.push(SessionEvent::Demoted {
            level: session.complexity_level,
        });
        log::debug!("Demoted to level {}", session.complexity_level);
    }

    if session.timer <= 0.0 {
        finish(session, SessionEvent::OvertimeFailed);
    } else {
        issue_question(session);
    }
}

fn issue_question(session: &mut Session) {
    let question = generate_with_choices(
        i32::from(session.complexity_level),
        session.tuning.answer_choices,
        &mut session.rng,
    );
    session.question_issued_at = session.timer;
    session.current_question = Some(question);
}

fn finish(session: &mut Session, reason: SessionEvent) {
    session.status = SessionStatus::Finished;
    session.current_question = None;
    session.events.push(reason);
    log::info!(
        "Session finished ({:?}): {} correct, boat at {}%",
        reason,
        session.correct_count,
        session.boat_position
    );
}
