//! End-to-end session scenarios

use infinite_regatta::consts::{TICK_DT, TIME_BUDGET};
use infinite_regatta::sim::{
    self, Session, SessionEvent, SessionStatus, SubmitResult, generate, start, submit_answer, tick,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn correct(session: &mut Session) {
    let value = session.current_question().unwrap().correct_answer;
    assert_eq!(submit_answer(session, value), SubmitResult::Correct);
}

fn wrong(session: &mut Session) {
    let question = session.current_question().unwrap();
    let value = *question
        .answer_choices
        .iter()
        .find(|&&choice| choice != question.correct_answer)
        .unwrap();
    assert_eq!(submit_answer(session, value), SubmitResult::Wrong);
}

#[test]
fn test_ten_straight_correct_answers_win() {
    let mut session = Session::new(2026);
    start(&mut session, 1);
    for expected in 1..=10u8 {
        correct(&mut session);
        assert_eq!(session.boat_position(), expected * 10);
    }
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.correct_count(), 10);
    assert_eq!(session.boat_position(), 100);
    assert!(session.outcome().unwrap().won);
}

#[test]
fn test_two_misses_at_level_five_demote() {
    let mut session = Session::new(77);
    start(&mut session, 5);
    wrong(&mut session);
    wrong(&mut session);
    assert_eq!(session.complexity_level(), 4);
    assert_eq!(session.consecutive_wrong(), 0);
    assert!(session.is_playing());
}

#[test]
fn test_clock_out_on_fourth_question_loses() {
    let mut session = Session::new(5);
    start(&mut session, 1);
    for _ in 0..3 {
        correct(&mut session);
    }
    let mut ticks = 0;
    while session.timer() > 0.0 {
        tick(&mut session, TICK_DT);
        ticks += 1;
        assert!(ticks <= 400, "clock never ran out");
    }
    assert_eq!(session.status(), SessionStatus::Finished);
    assert!(!session.outcome().unwrap().won);
    assert_eq!(session.outcome().unwrap().correct_count, 3);
}

#[test]
fn test_overtime_grants_exactly_one_answer() {
    let mut session = Session::new(31);
    start(&mut session, 3);
    for _ in 0..9 {
        correct(&mut session);
    }
    tick(&mut session, TIME_BUDGET + 5.0);
    assert_eq!(session.timer(), 0.0);
    assert!(session.is_playing());
    assert!(session.snapshot().in_overtime);

    wrong(&mut session);
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(submit_answer(&mut session, 0), SubmitResult::Ignored);

    let events = session.drain_events();
    let overtime = events.iter().position(|e| *e == SessionEvent::Overtime).unwrap();
    let failed = events
        .iter()
        .position(|e| *e == SessionEvent::OvertimeFailed)
        .unwrap();
    assert!(overtime < failed);
}

#[test]
fn test_history_survives_terminal_answer() {
    let mut session = Session::new(13);
    start(&mut session, 1);
    for _ in 0..10 {
        correct(&mut session);
    }
    let history = session.history();
    assert_eq!(history.len(), 10);
    assert!(history.iter().all(|record| record.was_correct));
}

#[test]
fn test_same_seed_replays_same_session() {
    let mut a = Session::new(404);
    let mut b = Session::new(404);
    start(&mut a, 4);
    start(&mut b, 4);
    for round in 0..12 {
        assert_eq!(a.current_question(), b.current_question());
        if round % 3 == 0 {
            wrong(&mut a);
            wrong(&mut b);
        } else {
            correct(&mut a);
            correct(&mut b);
        }
        if !a.is_playing() {
            break;
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_session_survives_serialization_mid_run() {
    let mut session = Session::new(55);
    start(&mut session, 2);
    correct(&mut session);
    tick(&mut session, 1.5);

    let json = serde_json::to_string(&session).unwrap();
    let mut restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.snapshot(), session.snapshot());

    // The RNG stream continues identically
    correct(&mut session);
    correct(&mut restored);
    assert_eq!(restored.current_question(), session.current_question());
}

#[test]
fn test_level_six_questions_divide_exactly() {
    let mut rng = Pcg32::seed_from_u64(6);
    for _ in 0..200 {
        let q = generate(6, &mut rng);
        let (dividend, divisor) = q.expression.split_once(" ÷ ").unwrap();
        let (dividend, divisor): (i32, i32) = (dividend.parse().unwrap(), divisor.parse().unwrap());
        assert_eq!(dividend % divisor, 0);
        assert_eq!(q.correct_answer, dividend / divisor);
    }
}

#[test]
fn test_restart_supersedes_running_session() {
    let mut session = Session::new(8);
    start(&mut session, 7);
    correct(&mut session);
    sim::reset(&mut session, Some(2));
    assert!(session.is_playing());
    assert_eq!(session.correct_count(), 0);
    assert_eq!(session.complexity_level(), 2);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::Started { level: 2 }]
    );
}
