//! Question generation
//!
//! Stateless: every call draws only from the RNG it is handed, so a seeded
//! `Pcg32` replays the exact same questions.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clamp_level;
use crate::consts::{ANSWER_CHOICES, MIN_ANSWER_CHOICES};

/// Attempts a single distractor draw gets before falling back to `correct + 1`
const DISTRACTOR_ATTEMPTS: u32 = 20;
/// Attempts the whole distractor set gets before deterministic filling
const DISTRACTOR_SET_ATTEMPTS: u32 = 50;

/// Display names for each complexity level
const LEVEL_NAMES: [&str; 10] = [
    "Basic Addition",
    "Basic Subtraction",
    "Intermediate Addition",
    "Intermediate Subtraction",
    "Multiplication (Basic)",
    "Division",
    "Multiplication (Advanced)",
    "Mixed Operations",
    "Simple Algebra",
    "Pre-Algebra",
];

/// Name shown for a complexity level (out-of-range input is clamped)
pub fn level_name(level: i32) -> &'static str {
    LEVEL_NAMES[usize::from(clamp_level(level)) - 1]
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    /// Prompt, e.g. `7 × 8` or `3x + 4 = 19`
    pub expression: String,
    pub correct_answer: i32,
    /// Distinct values in display order, `correct_answer` included
    pub answer_choices: Vec<i32>,
    pub complexity_level: u8,
}

impl Question {
    pub fn is_correct(&self, value: i32) -> bool {
        value == self.correct_answer
    }

    pub fn level_name(&self) -> &'static str {
        level_name(i32::from(self.complexity_level))
    }
}

/// Generate a question with the default number of answer choices
pub fn generate<R: Rng + ?Sized>(level: i32, rng: &mut R) -> Question {
    generate_with_choices(level, ANSWER_CHOICES, rng)
}

/// Generate a question with `choices` total answers (at least two)
pub fn generate_with_choices<R: Rng + ?Sized>(level: i32, choices: usize, rng: &mut R) -> Question {
    let level = clamp_level(level);
    let (expression, correct_answer) = compose(level, rng);

    let mut answer_choices = Vec::with_capacity(choices.max(MIN_ANSWER_CHOICES));
    answer_choices.push(correct_answer);
    answer_choices.extend(pick_distractors(
        correct_answer,
        choices.max(MIN_ANSWER_CHOICES) - 1,
        rng,
    ));
    answer_choices.shuffle(rng);

    Question {
        id: question_id(rng),
        expression,
        correct_answer,
        answer_choices,
        complexity_level: level,
    }
}

fn question_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Build the prompt and its answer for an already-clamped level
fn compose<R: Rng + ?Sized>(level: u8, rng: &mut R) -> (String, i32) {
    match level {
        1 => {
            if rng.random_bool(0.2) {
                let a = rng.random_range(1..=5);
                let b = rng.random_range(1..=5);
                let c = rng.random_range(1..=5);
                (format!("{a} + {b} + {c}"), a + b + c)
            } else {
                let a = rng.random_range(5..=20);
                let b = rng.random_range(1..=10);
                (format!("{a} + {b}"), a + b)
            }
        }
        2 => {
            let a = rng.random_range(10..=25);
            let b = rng.random_range(1..=10);
            (format!("{a} - {b}"), a - b)
        }
        3 => {
            let a = rng.random_range(15..=99);
            let b = rng.random_range(10..=50);
            (format!("{a} + {b}"), a + b)
        }
        4 => {
            let a: i32 = rng.random_range(30..=99);
            let b = rng.random_range(10..=(a - 1).min(50));
            (format!("{a} - {b}"), a - b)
        }
        5 => {
            let a = rng.random_range(2..=9);
            let b = rng.random_range(2..=10);
            (format!("{a} × {b}"), a * b)
        }
        6 => {
            // Divisor and quotient first so the division is always exact
            let divisor = rng.random_range(3..=10);
            let quotient = rng.random_range(4..=15);
            (format!("{} ÷ {divisor}", divisor * quotient), quotient)
        }
        7 => {
            if rng.random_bool(0.3) {
                let a = rng.random_range(5..=12);
                (format!("{a} × {a}"), a * a)
            } else {
                let a = rng.random_range(8..=15);
                let b = rng.random_range(3..=10);
                (format!("{a} × {b}"), a * b)
            }
        }
        8 => match rng.random_range(0..3) {
            0 => {
                let a = rng.random_range(2..=8);
                let b = rng.random_range(2..=8);
                let c = rng.random_range(1..=20);
                (format!("{a} × {b} + {c}"), a * b + c)
            }
            1 => {
                let a: i32 = rng.random_range(3..=9);
                let b: i32 = rng.random_range(2..=9);
                let c = rng.random_range(1..=a * b - 1);
                (format!("{a} × {b} - {c}"), a * b - c)
            }
            _ => {
                let a = rng.random_range(5..=20);
                let b = rng.random_range(2..=6);
                let c = rng.random_range(2..=6);
                (format!("{a} + {b} × {c}"), a + b * c)
            }
        },
        9 => {
            if rng.random_bool(0.5) {
                let x = rng.random_range(2..=10);
                let a = rng.random_range(2..=5);
                let b = rng.random_range(1..=20);
                (format!("{a}x + {b} = {}", a * x + b), x)
            } else {
                let x = rng.random_range(10..=50);
                let a = rng.random_range(5..=20);
                (format!("x - {a} = {}", x - a), x)
            }
        }
        _ => match rng.random_range(0..3) {
            0 => {
                let x = rng.random_range(3..=12);
                let a = rng.random_range(3..=9);
                let b = rng.random_range(1..=20);
                (format!("{a}x - {b} = {}", a * x - b), x)
            }
            1 => {
                let a = rng.random_range(5..=20);
                let b = rng.random_range(25..=50);
                (format!("{a} - {b}"), a - b)
            }
            _ => {
                let x = rng.random_range(3..=12);
                (format!("x² = {}", x * x), x)
            }
        },
    }
}

/// One plausible wrong answer near `correct`
fn pick_distractor<R: Rng + ?Sized>(correct: i32, rng: &mut R) -> i32 {
    let mut candidate = correct;
    let mut attempts = 0;
    while candidate == correct && attempts < DISTRACTOR_ATTEMPTS {
        candidate = match rng.random_range(0..7) {
            0 => correct + 1,
            1 => correct - 1,
            2 => correct + 2,
            3 => correct - 2,
            4 => correct + 3,
            5 => correct - 3,
            // parity flip
            _ => correct + if correct % 2 == 0 { 1 } else { -1 },
        };
        if correct >= 0 && candidate < 0 {
            candidate = candidate.abs();
        }
        attempts += 1;
    }
    if candidate == correct { correct + 1 } else { candidate }
}

/// `count` distinct distractors, none equal to `correct`
fn pick_distractors<R: Rng + ?Sized>(correct: i32, count: usize, rng: &mut R) -> Vec<i32> {
    let mut chosen: Vec<i32> = Vec::with_capacity(count);
    let mut attempts = 0;
    while chosen.len() < count && attempts < DISTRACTOR_SET_ATTEMPTS {
        let candidate = pick_distractor(correct, rng);
        if candidate != correct && !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
        attempts += 1;
    }

    let mut offset = 1;
    while chosen.len() < count {
        let filler = correct + offset;
        if !chosen.contains(&filler) {
            chosen.push(filler);
        }
        offset += 1;
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_valid(q: &Question, choices: usize) {
        assert_eq!(q.answer_choices.len(), choices, "{q:?}");
        assert!(q.answer_choices.contains(&q.correct_answer), "{q:?}");
        let mut sorted = q.answer_choices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), choices, "duplicate choices in {q:?}");
    }

    #[test]
    fn test_every_level_produces_valid_choices() {
        let mut rng = Pcg32::seed_from_u64(7);
        for level in 1..=10 {
            for _ in 0..200 {
                let q = generate(level, &mut rng);
                assert_eq!(i32::from(q.complexity_level), level);
                assert_valid(&q, ANSWER_CHOICES);
            }
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let q = generate(6, &mut rng);
            let (dividend, divisor) = q.expression.split_once(" ÷ ").unwrap();
            let dividend: i32 = dividend.parse().unwrap();
            let divisor: i32 = divisor.parse().unwrap();
            assert_eq!(dividend % divisor, 0);
            assert_eq!(q.correct_answer, dividend / divisor);
            assert!(q.correct_answer > 0);
        }
    }

    #[test]
    fn test_subtraction_levels_stay_non_negative() {
        let mut rng = Pcg32::seed_from_u64(3);
        for level in [2, 4] {
            for _ in 0..300 {
                assert!(generate(level, &mut rng).correct_answer >= 0);
            }
        }
    }

    #[test]
    fn test_mixed_operations_respect_precedence() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..300 {
            let q = generate(8, &mut rng);
            let tokens: Vec<&str> = q.expression.split(' ').collect();
            let n = |i: usize| tokens[i].parse::<i32>().unwrap();
            let expected = match (tokens[1], tokens[3]) {
                ("×", "+") => n(0) * n(2) + n(4),
                ("×", "-") => n(0) * n(2) - n(4),
                ("+", "×") => n(0) + n(2) * n(4),
                other => panic!("unexpected shape {other:?}"),
            };
            assert_eq!(q.correct_answer, expected, "{}", q.expression);
        }
    }

    #[test]
    fn test_linear_equations_solve_for_x() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..300 {
            let q = generate(9, &mut rng);
            let x = q.correct_answer;
            let (lhs, rhs) = q.expression.split_once(" = ").unwrap();
            let rhs: i32 = rhs.parse().unwrap();
            if let Some(rest) = lhs.strip_prefix("x - ") {
                assert_eq!(x - rest.parse::<i32>().unwrap(), rhs);
            } else {
                let (a, b) = lhs.split_once("x + ").unwrap();
                assert_eq!(a.parse::<i32>().unwrap() * x + b.parse::<i32>().unwrap(), rhs);
            }
        }
    }

    #[test]
    fn test_pre_algebra_shapes() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut saw_negative = false;
        for _ in 0..300 {
            let q = generate(10, &mut rng);
            if let Some(k) = q.expression.strip_prefix("x² = ") {
                assert_eq!(q.correct_answer * q.correct_answer, k.parse::<i32>().unwrap());
            } else if q.correct_answer < 0 {
                saw_negative = true;
                assert!(!q.expression.contains('x'));
            }
            assert_valid(&q, ANSWER_CHOICES);
        }
        assert!(saw_negative);
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(generate(0, &mut rng).complexity_level, 1);
        assert_eq!(generate(-30, &mut rng).complexity_level, 1);
        assert_eq!(generate(42, &mut rng).complexity_level, 10);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let mut a = Pcg32::seed_from_u64(2024);
        let mut b = Pcg32::seed_from_u64(2024);
        for level in 1..=10 {
            assert_eq!(generate(level, &mut a), generate(level, &mut b));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(8);
        let ids: std::collections::HashSet<Uuid> =
            (0..1000).map(|_| generate(1, &mut rng).id).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_distractor_fill_when_choices_exceed_strategies() {
        // Only six distinct perturbations exist, so seven distractors must be filled
        let mut rng = Pcg32::seed_from_u64(17);
        let q = generate_with_choices(5, 8, &mut rng);
        assert_valid(&q, 8);
    }

    #[test]
    fn test_zero_answer_mirrors_negative_distractors() {
        let mut rng = Pcg32::seed_from_u64(23);
        for _ in 0..200 {
            let set = pick_distractors(0, 3, &mut rng);
            assert!(set.iter().all(|&d| d > 0), "{set:?}");
        }
    }

    #[test]
    fn test_choice_count_floor() {
        let mut rng = Pcg32::seed_from_u64(4);
        assert_valid(&generate_with_choices(3, 0, &mut rng), MIN_ANSWER_CHOICES);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(1), "Basic Addition");
        assert_eq!(level_name(6), "Division");
        assert_eq!(level_name(10), "Pre-Algebra");
        assert_eq!(level_name(99), "Pre-Algebra");
    }

    proptest! {
        #[test]
        fn prop_choices_contain_answer_without_duplicates(
            seed in any::<u64>(),
            level in -5i32..16,
            choices in 2usize..=8,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let q = generate_with_choices(level, choices, &mut rng);
            prop_assert!(q.answer_choices.contains(&q.correct_answer));
            let mut sorted = q.answer_choices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), choices);
            prop_assert!((1..=10).contains(&q.complexity_level));
        }

        #[test]
        fn prop_non_negative_answers_get_non_negative_distractors(
            seed in any::<u64>(),
            correct in 0i32..200,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for d in pick_distractors(correct, 3, &mut rng) {
                prop_assert!(d >= 0);
                prop_assert_ne!(d, correct);
            }
        }
    }
}
