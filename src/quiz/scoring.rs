use std::fmt::Write;

use crate::quiz::{Quiz, QuizError};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoreCard {
    pub per_question: Vec<bool>,
    pub correct: usize,
}

/// Compares each submitted answer to the exact value of its question.
///
/// `answers` must line up 1:1 with the quiz; anything else is a caller bug and
/// comes back as [`QuizError::LengthMismatch`].
pub fn score(quiz: &Quiz, answers: &[i64]) -> Result<ScoreCard, QuizError> {
    if answers.len() != quiz.len() {
        return Err(QuizError::LengthMismatch {
            expected: quiz.len(),
            actual: answers.len(),
        });
    }

    let per_question: Vec<bool> = quiz
        .questions()
        .iter()
        .zip(answers)
        .map(|(question, answer)| question.value() == *answer)
        .collect();
    let correct = per_question.iter().filter(|ok| **ok).count();

    Ok(ScoreCard {
        per_question,
        correct,
    })
}

pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// `3 / 4 (75.0%)`
pub fn score_line(correct: usize, total: usize) -> String {
    format!("{} / {} ({:.1}%)", correct, total, percentage(correct, total))
}

pub fn build_report(quiz: &Quiz, answers: &[i64], correct: usize) -> String {
    let mut report = String::from("--- Quiz Report ---\n");
    let _ = writeln!(report, "Score: {}", score_line(correct, quiz.len()));

    for (i, (question, answer)) in quiz.questions().iter().zip(answers).enumerate() {
        let _ = writeln!(
            report,
            "{}. {}\n   You entered {}. The correct answer is {}.",
            i + 1,
            question.prompt(),
            answer,
            question.value()
        );
    }
    report
}

/// Running totals across every quiz a user has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    pub attempted: usize,
    pub correct: usize,
}

impl Stats {
    pub fn record(&mut self, card: &ScoreCard) {
        self.attempted += card.per_question.len();
        self.correct += card.correct;
    }

    pub fn reset(&mut self) {
        *self = Stats::default();
    }

    pub fn summary(&self) -> Option<String> {
        if self.attempted == 0 {
            return None;
        }
        Some(format!(
            "Questions attempted: {}\nQuestions answered correctly: {} ({:.1}%)",
            self.attempted,
            self.correct,
            percentage(self.correct, self.attempted)
        ))
    }
}
