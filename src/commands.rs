use log::debug;
use rand::Rng;
use teloxide::utils::command::BotCommands;

use crate::quiz::Expression;
use crate::session::Session;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "snake_case",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "show the greeting and this list.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(description = "show your quiz settings.")]
    ViewSettings,
    #[command(description = "set how many questions a quiz has, e.g. /change_num_questions 5")]
    ChangeNumQuestions(String),
    #[command(description = "set the largest number that can appear, e.g. /change_max_num 20")]
    ChangeMaxNum(String),
    #[command(description = "choose the operations to practise, e.g. /set_operations + - *")]
    SetOperations(String),
    #[command(description = "allow negative numbers and results.")]
    AllowNegatives,
    #[command(description = "keep numbers and results non-negative.")]
    DisallowNegatives,
    #[command(description = "start a new quiz with your settings.")]
    Quiz,
    #[command(description = "show the report of your last quiz.")]
    ViewReport,
    #[command(description = "show your overall statistics.")]
    ViewStats,
    #[command(description = "reset your statistics.")]
    ResetStats,
    #[command(description = "ask ChatGPT to explain a question, e.g. /explain_question 3")]
    ExplainQuestion(String),
}

/// What the handler has to do after a command has been applied to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reply(String),
    QuizStarted,
    Explain(Expression),
}

const GREETING_TEXT: &str =
    "Hi! I'm a math quiz bot. Adjust the settings below, then send /quiz to test yourself.";

pub fn help_text() -> String {
    Command::descriptions().to_string()
}

pub fn execute<R: Rng + ?Sized>(session: &mut Session, command: Command, rng: &mut R) -> Outcome {
    debug!("Executing {:?}", command);

    let reply = match command {
        Command::Start => format!("{}\n\n{}", GREETING_TEXT, help_text()),
        Command::Help => help_text(),
        Command::ViewSettings => format!("Your settings:\n{}", session.settings()),
        Command::ChangeNumQuestions(arg) => match parse_number(&arg) {
            Some(count) => match session.settings_mut().set_question_count(count) {
                Ok(()) => format!(
                    "Number of questions on your quiz changed to {}.",
                    session.settings().question_count()
                ),
                Err(err) => err.to_string(),
            },
            None => "Please enter a whole number, e.g. /change_num_questions 5".to_string(),
        },
        Command::ChangeMaxNum(arg) => match parse_number(&arg) {
            Some(max) => match session.settings_mut().set_max_magnitude(max) {
                Ok(()) => format!(
                    "Maximum number of your quiz changed to {}.",
                    session.settings().max_magnitude()
                ),
                Err(err) => err.to_string(),
            },
            None => "Please enter a whole number, e.g. /change_max_num 20".to_string(),
        },
        Command::SetOperations(arg) => {
            let symbols: Vec<&str> = arg.split_whitespace().collect();
            match session.settings_mut().set_operators(&symbols) {
                Ok(()) => format!(
                    "Operations now included in your quiz: {}",
                    session.settings().operator_symbols()
                ),
                Err(err) => err.to_string(),
            }
        }
        Command::AllowNegatives => {
            session.settings_mut().set_allow_negative(true);
            "Negative numbers are now allowed on your quiz.".to_string()
        }
        Command::DisallowNegatives => {
            session.settings_mut().set_allow_negative(false);
            "Negative numbers are now not allowed on your quiz.".to_string()
        }
        Command::Quiz => {
            session.start_quiz(rng);
            return Outcome::QuizStarted;
        }
        Command::ViewReport => session
            .report()
            .unwrap_or_else(|| "Please write a quiz before viewing the quiz report!".to_string()),
        Command::ViewStats => match session.stats().summary() {
            Some(summary) => format!("Your stats:\n{}", summary),
            None => "You have not written any quizzes yet.".to_string(),
        },
        Command::ResetStats => {
            session.reset_stats();
            "Your stats were successfully reset.".to_string()
        }
        Command::ExplainQuestion(arg) => {
            let question = arg
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|number| session.quiz().question(number));
            match question {
                Some(expression) => return Outcome::Explain(*expression),
                None => "Invalid question number!".to_string(),
            }
        }
    };

    Outcome::Reply(reply)
}

fn parse_number(arg: &str) -> Option<i64> {
    arg.trim().parse().ok()
}
