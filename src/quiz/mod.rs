pub mod ai_helper;
pub mod generator;
pub mod scoring;
pub mod settings;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("{0}")]
    InvalidConfig(String),

    #[error("expected {expected} answers, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(
        "Operator {0:?} not supported! The only operations supported are + (addition), \
         - (subtraction), * (multiplication), and / (division)!"
    )]
    UnsupportedOperator(String),

    #[error("{left} / {right} does not divide evenly")]
    InexactDivision { left: i64, right: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| QuizError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single two-operand question, e.g. `7 - 3`.
///
/// Division expressions always have a nonzero divisor that evenly divides the
/// dividend, so [`Expression::value`] is exact for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Expression {
    left: i64,
    operator: Operator,
    right: i64,
}

impl Expression {
    pub fn new(left: i64, operator: Operator, right: i64) -> Result<Self, QuizError> {
        if operator == Operator::Div && (right == 0 || left % right != 0) {
            return Err(QuizError::InexactDivision { left, right });
        }
        Ok(Self {
            left,
            operator,
            right,
        })
    }

    pub fn from_symbol(left: i64, symbol: &str, right: i64) -> Result<Self, QuizError> {
        Self::new(left, symbol.parse()?, right)
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn right(&self) -> i64 {
        self.right
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> i64 {
        match self.operator {
            Operator::Add => self.left + self.right,
            Operator::Sub => self.left - self.right,
            Operator::Mul => self.left * self.right,
            Operator::Div => self.left / self.right,
        }
    }

    /// The question as shown to the user: `3 + 4 = ?`
    pub fn prompt(&self) -> String {
        format!("{} = ?", self)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// A generated sequence of questions together with the settings it was built from.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    settings: Settings,
    questions: Vec<Expression>,
}

impl Quiz {
    pub fn new(settings: Settings, questions: Vec<Expression>) -> Self {
        Self {
            settings,
            questions,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn questions(&self) -> &[Expression] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 1-based lookup, matching how questions are numbered in chat.
    pub fn question(&self, number: usize) -> Option<&Expression> {
        number.checked_sub(1).and_then(|i| self.questions.get(i))
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Math Quiz ({} questions):", self.questions.len())?;
        for (i, question) in self.questions.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, question.prompt())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_exact_integers() {
        assert_eq!(Expression::from_symbol(2, "+", 2).unwrap().value(), 4);
        assert_eq!(Expression::from_symbol(3, "-", 5).unwrap().value(), -2);
        assert_eq!(Expression::from_symbol(-4, "*", 6).unwrap().value(), -24);
        assert_eq!(Expression::from_symbol(10, "/", 5).unwrap().value(), 2);
        assert_eq!(Expression::from_symbol(-9, "/", 3).unwrap().value(), -3);
        assert_eq!(Expression::from_symbol(0, "/", -7).unwrap().value(), 0);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert_eq!(
            Expression::from_symbol(1, "%", 2),
            Err(QuizError::UnsupportedOperator("%".to_string()))
        );
        assert!("x".parse::<Operator>().is_err());
    }

    #[test]
    fn division_must_be_exact() {
        assert_eq!(
            Expression::new(7, Operator::Div, 2),
            Err(QuizError::InexactDivision { left: 7, right: 2 })
        );
        assert_eq!(
            Expression::new(0, Operator::Div, 0),
            Err(QuizError::InexactDivision { left: 0, right: 0 })
        );
        // non-division operators don't care about divisibility
        assert!(Expression::new(7, Operator::Sub, 0).is_ok());
    }

    #[test]
    fn rendering() {
        let expr = Expression::new(12, Operator::Div, 4).unwrap();
        assert_eq!(expr.to_string(), "12 / 4");
        assert_eq!(expr.prompt(), "12 / 4 = ?");

        let quiz = Quiz::new(
            Settings::default(),
            vec![expr, Expression::new(1, Operator::Add, 1).unwrap()],
        );
        assert_eq!(
            quiz.to_string(),
            "Math Quiz (2 questions):\n1. 12 / 4 = ?\n2. 1 + 1 = ?\n"
        );
    }

    #[test]
    fn questions_are_numbered_from_one() {
        let quiz = Quiz::new(
            Settings::default(),
            vec![Expression::new(5, Operator::Mul, 2).unwrap()],
        );
        assert_eq!(quiz.question(1).map(Expression::value), Some(10));
        assert!(quiz.question(0).is_none());
        assert!(quiz.question(2).is_none());
    }
}
