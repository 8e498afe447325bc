use std::fmt;

use crate::quiz::{Operator, QuizError};

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_MAX_MAGNITUDE: i64 = 10;

// Keeps a quiz short enough for a chat and products of two operands inside i64.
pub const MAX_QUESTION_COUNT: usize = 100;
pub const MAX_MAGNITUDE_LIMIT: i64 = 1_000_000;

/// Per-user quiz parameters. Every setter validates before mutating, so a
/// rejected value leaves the previous one in place.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    question_count: usize,
    max_magnitude: i64,
    operators: Vec<Operator>,
    allow_negative: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
            operators: Operator::ALL.to_vec(),
            allow_negative: false,
        }
    }
}

impl Settings {
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn max_magnitude(&self) -> i64 {
        self.max_magnitude
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn allow_negative(&self) -> bool {
        self.allow_negative
    }

    pub fn set_question_count(&mut self, count: i64) -> Result<(), QuizError> {
        if count <= 0 {
            return Err(QuizError::InvalidConfig(
                "The quiz must have at least 1 question!".to_string(),
            ));
        }
        match usize::try_from(count) {
            Ok(count) if count <= MAX_QUESTION_COUNT => {
                self.question_count = count;
                Ok(())
            }
            _ => Err(QuizError::InvalidConfig(format!(
                "The quiz can have at most {} questions!",
                MAX_QUESTION_COUNT
            ))),
        }
    }

    pub fn set_max_magnitude(&mut self, magnitude: i64) -> Result<(), QuizError> {
        if magnitude <= 0 {
            return Err(QuizError::InvalidConfig(
                "The maximum number must be positive!".to_string(),
            ));
        }
        if magnitude > MAX_MAGNITUDE_LIMIT {
            return Err(QuizError::InvalidConfig(format!(
                "The maximum number can be at most {}!",
                MAX_MAGNITUDE_LIMIT
            )));
        }
        self.max_magnitude = magnitude;
        Ok(())
    }

    /// Keeps only the legal symbols, in first-seen order and without duplicates.
    pub fn set_operators<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<(), QuizError> {
        let mut operators: Vec<Operator> = Vec::new();
        for op in symbols.iter().filter_map(|s| s.as_ref().parse::<Operator>().ok()) {
            if !operators.contains(&op) {
                operators.push(op);
            }
        }

        if operators.is_empty() {
            return Err(QuizError::InvalidConfig(
                "Please enter one or more allowed operators (+, -, *, /)!".to_string(),
            ));
        }
        self.operators = operators;
        Ok(())
    }

    pub fn set_allow_negative(&mut self, allow_negative: bool) {
        self.allow_negative = allow_negative;
    }

    pub fn operator_symbols(&self) -> String {
        self.operators
            .iter()
            .map(Operator::symbol)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of questions: {}", self.question_count)?;
        writeln!(f, "Maximum number: {}", self.max_magnitude)?;
        writeln!(f, "Operations included: {}", self.operator_symbols())?;
        write!(
            f,
            "Allow negatives: {}",
            if self.allow_negative { "yes" } else { "no" }
        )
    }
}
