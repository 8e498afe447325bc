use rand::Rng;
use thiserror::Error;

use crate::quiz::generator::generate;
use crate::quiz::scoring::{build_report, score, ScoreCard, Stats};
use crate::quiz::{Expression, Quiz, QuizError, Settings};

/// Dialogue state kept per chat by the teloxide storage.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub enum State {
    Idle(Session),
    Answering(Session),
}

// A chat nobody has talked to yet gets default settings.
impl Default for State {
    fn default() -> Self {
        State::Idle(Session::default())
    }
}

impl State {
    pub fn into_session(self) -> Session {
        match self {
            State::Idle(session) | State::Answering(session) => session,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a whole number as your answer!")]
    MalformedAnswer,
}

pub fn parse_answer(text: &str) -> Result<i64, SessionError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| SessionError::MalformedAnswer)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// `number` is 1-based, as shown in chat.
    Next { number: usize, question: Expression },
    Finished(ScoreCard),
}

/// Everything the bot remembers about one user.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Session {
    settings: Settings,
    quiz: Quiz,
    answers: Vec<i64>,
    last_score: Option<usize>,
    stats: Stats,
}

impl Session {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Replaces the current quiz with a new one and forgets the previous answers.
    pub fn start_quiz<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Quiz {
        self.quiz = generate(&self.settings, rng);
        self.answers.clear();
        self.last_score = None;
        &self.quiz
    }

    pub fn current_question(&self) -> Option<&Expression> {
        self.quiz.questions().get(self.answers.len())
    }

    /// Stores the answer to the current question. After the last one the quiz
    /// is scored and added to the running stats.
    pub fn record_answer(&mut self, answer: i64) -> Result<Progress, QuizError> {
        if self.answers.len() >= self.quiz.len() {
            return Err(QuizError::LengthMismatch {
                expected: self.quiz.len(),
                actual: self.answers.len() + 1,
            });
        }
        self.answers.push(answer);

        if let Some(question) = self.current_question() {
            return Ok(Progress::Next {
                number: self.answers.len() + 1,
                question: *question,
            });
        }

        let card = score(&self.quiz, &self.answers)?;
        self.last_score = Some(card.correct);
        self.stats.record(&card);
        Ok(Progress::Finished(card))
    }

    /// Report of the last finished quiz, if there is one.
    pub fn report(&self) -> Option<String> {
        let correct = self.last_score?;
        Some(build_report(&self.quiz, &self.answers, correct))
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.answers.clear();
        self.last_score = None;
    }
}
