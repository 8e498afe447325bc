use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::{Expression, Operator, Quiz, Settings};

/// Builds a fresh quiz from a snapshot of `settings`.
///
/// The random source is passed in so production can use `thread_rng()` while
/// tests use a seeded generator. Repeated questions are allowed.
pub fn generate<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Quiz {
    let questions = (0..settings.question_count())
        .map(|_| generate_question(settings, rng))
        .collect();

    Quiz::new(settings.clone(), questions)
}

fn generate_question<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Expression {
    // Settings never holds an empty operator list, Add is only a fallback for the type
    let operator = settings
        .operators()
        .choose(rng)
        .copied()
        .unwrap_or(Operator::Add);
    let max = settings.max_magnitude();

    let (left, right) = match operator {
        Operator::Div => division_operands(max, settings.allow_negative(), rng),
        _ if settings.allow_negative() => (rng.gen_range(-max..=max), rng.gen_range(-max..=max)),
        _ => {
            let left = rng.gen_range(0..=max);
            let right = rng.gen_range(0..=max);
            // Subtraction of non-negatives stays non-negative only if the larger one comes first
            if operator == Operator::Sub && left < right {
                (right, left)
            } else {
                (left, right)
            }
        }
    };

    Expression {
        left,
        operator,
        right,
    }
}

/// The divisor is drawn first and the dividend is built as a multiple of it,
/// so the quotient is always an integer. When `max / right` is 0 the quotient
/// range is just `{0}`.
fn division_operands<R: Rng + ?Sized>(max: i64, allow_negative: bool, rng: &mut R) -> (i64, i64) {
    let mut right = rng.gen_range(1..=max);
    let quotient = rng.gen_range(0..=max / right);
    let mut left = quotient * right;

    if allow_negative {
        if rng.gen_bool(0.5) {
            left = -left;
        }
        if rng.gen_bool(0.5) {
            right = -right;
        }
    }

    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn settings(count: i64, max: i64, ops: &[&str], allow_negative: bool) -> Settings {
        let mut settings = Settings::default();
        settings.set_question_count(count).unwrap();
        settings.set_max_magnitude(max).unwrap();
        settings.set_operators(ops).unwrap();
        settings.set_allow_negative(allow_negative);
        settings
    }

    #[test]
    fn generates_configured_number_of_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut settings = Settings::default();
        settings.set_question_count(5).unwrap();

        let quiz = generate(&settings, &mut rng);
        assert_eq!(quiz.len(), 5);
        assert_eq!(quiz.settings(), &settings);
    }

    #[test]
    fn quiz_keeps_the_settings_it_was_built_from() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut settings = Settings::default();
        let quiz = generate(&settings, &mut rng);

        settings.set_question_count(3).unwrap();
        settings.set_operators(&["*"]).unwrap();

        assert_eq!(quiz.len(), 10);
        assert_eq!(quiz.settings().question_count(), 10);
        assert_eq!(quiz.settings().operators(), &Operator::ALL);
    }

    #[test]
    fn only_enabled_operators_are_used() {
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = generate(&settings(100, 10, &["*", "/"], false), &mut rng);
        assert!(quiz
            .questions()
            .iter()
            .all(|q| matches!(q.operator(), Operator::Mul | Operator::Div)));
    }

    #[test]
    fn division_with_tiny_magnitude_terminates() {
        // max = 1 forces right = 1 and quotient in {0, 1}
        let mut rng = StdRng::seed_from_u64(11);
        let quiz = generate(&settings(100, 1, &["/"], false), &mut rng);
        for q in quiz.questions() {
            assert_eq!(q.right(), 1);
            assert!(q.left() == 0 || q.left() == 1);
        }
    }

    #[test]
    fn degenerate_quotient_range_yields_zero_dividend() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let (left, right) = division_operands(3, false, &mut rng);
            if right > 3 / 2 {
                // max / right is 1 here, so left is 0 or right itself
                assert!(left == 0 || left == right);
            }
            assert_eq!(left % right, 0);
        }
    }

    #[test]
    fn negative_division_reaches_every_sign_combination() {
        let mut rng = StdRng::seed_from_u64(42);
        let quiz = generate(&settings(100, 10, &["/"], true), &mut rng);
        let more = generate(&settings(100, 10, &["/"], true), &mut rng);

        let signs: HashSet<(bool, bool)> = quiz
            .questions()
            .iter()
            .chain(more.questions())
            // zero dividends carry no sign, skip them
            .filter(|q| q.left() != 0)
            .map(|q| (q.left() < 0, q.right() < 0))
            .collect();
        assert_eq!(signs.len(), 4);
    }

    #[test]
    fn equal_operands_in_subtraction_give_zero() {
        let mut rng = StdRng::seed_from_u64(9);
        let quiz = generate(&settings(100, 1, &["-"], false), &mut rng);
        let zero = quiz
            .questions()
            .iter()
            .find(|q| q.left() == q.right())
            .expect("max = 1 makes equal operands frequent");
        assert_eq!(zero.value(), 0);
        assert!(quiz.questions().iter().all(|q| q.value() >= 0));
    }

    #[test]
    fn magnitude_boundary_is_reachable() {
        let mut rng = StdRng::seed_from_u64(13);
        let quiz = generate(&settings(100, 3, &["+"], true), &mut rng);
        let operands: Vec<i64> = quiz
            .questions()
            .iter()
            .flat_map(|q| [q.left(), q.right()])
            .collect();
        assert!(operands.contains(&3));
        assert!(operands.contains(&-3));
        assert!(operands.iter().all(|x| x.abs() <= 3));
    }

    fn operator_symbols() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(vec!["+", "-", "*", "/"]), 1..6)
    }

    proptest! {
        #[test]
        fn length_matches_question_count(
            count in 1i64..=100,
            max in 1i64..=1000,
            ops in operator_symbols(),
            allow_negative in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate(&settings(count, max, &ops, allow_negative), &mut rng);
            prop_assert_eq!(quiz.len() as i64, count);
        }

        #[test]
        fn every_division_is_exact(
            max in 1i64..=1000,
            allow_negative in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate(&settings(50, max, &["/"], allow_negative), &mut rng);
            for q in quiz.questions() {
                prop_assert_ne!(q.right(), 0);
                prop_assert_eq!(q.left() % q.right(), 0);
                prop_assert!(q.right().abs() <= max);
                prop_assert!(q.left().abs() <= max);
            }
        }

        #[test]
        fn nothing_negative_when_disallowed(
            max in 1i64..=1000,
            ops in operator_symbols(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate(&settings(50, max, &ops, false), &mut rng);
            for q in quiz.questions() {
                prop_assert!(q.left() >= 0 && q.right() >= 0);
                if q.operator() == Operator::Sub {
                    prop_assert!(q.value() >= 0);
                }
            }
        }

        #[test]
        fn operands_stay_within_magnitude(
            max in 1i64..=1000,
            ops in operator_symbols(),
            allow_negative in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = generate(&settings(50, max, &ops, allow_negative), &mut rng);
            for q in quiz.questions() {
                prop_assert!(q.left().abs() <= max);
                prop_assert!(q.right().abs() <= max);
            }
        }
    }
}
