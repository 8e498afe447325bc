use std::sync::Arc;

use dotenv::dotenv;
use log::{debug, info, warn};
use math_quiz_bot::commands::{self, Command, Outcome};
use math_quiz_bot::config::BotConfig;
use math_quiz_bot::quiz::ai_helper::QuizHelper;
use math_quiz_bot::quiz::scoring::score_line;
use math_quiz_bot::session::{parse_answer, Progress, Session, SessionError, State};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::ChatAction,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type SessionStorage = std::sync::Arc<ErasedStorage<State>>;
type Explainer = Option<Arc<QuizHelper>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dotenv_loaded = dotenv();

    pretty_env_logger::init();
    log::info!("Starting math quiz bot...");
    if let Err(err) = dotenv_loaded {
        debug!("No .env file loaded: {}", err);
    }

    let config = BotConfig::from_env()?;
    let bot = Bot::from_env();

    // Sessions live in memory only and are created on a user's first message
    let storage: SessionStorage = InMemStorage::<State>::new().erase();

    let explainer: Explainer = match &config.chatgpt_api_key {
        Some(key) => match QuizHelper::new(key, config.chatgpt_timeout) {
            Ok(helper) => Some(Arc::new(helper)),
            Err(err) => {
                warn!("Unable to set up ChatGPT, explanations disabled: {}", err);
                None
            }
        },
        None => {
            info!("CHATGPT_API_KEY is not set, explanations disabled");
            None
        }
    };

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Answering(session)].endpoint(receive_answer))
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(dptree::endpoint(unknown_message)),
    )
    .dependencies(dptree::deps![storage, explainer])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    cmd: Command,
    explainer: Explainer,
) -> HandlerResult {
    let mut session = dialogue.get_or_default().await?.into_session();
    let outcome = commands::execute(&mut session, cmd, &mut rand::thread_rng());

    match outcome {
        Outcome::Reply(text) => {
            dialogue.update(State::Idle(session)).await?;
            bot.send_message(msg.chat.id, text).await?;
        }
        Outcome::QuizStarted => {
            info!(
                "Chat {}: quiz of {} questions generated",
                msg.chat.id,
                session.quiz().len()
            );
            bot.send_message(msg.chat.id, "--- Math Quiz ---").await?;
            if let Some(question) = session.current_question() {
                bot.send_message(msg.chat.id, format!("1. {}", question.prompt()))
                    .await?;
            }
            dialogue.update(State::Answering(session)).await?;
        }
        Outcome::Explain(expression) => {
            dialogue.update(State::Idle(session)).await?;
            let Some(helper) = explainer else {
                bot.send_message(
                    msg.chat.id,
                    "Explanations are not available right now, sorry!",
                )
                .await?;
                return Ok(());
            };

            bot.send_message(msg.chat.id, "Thinking ...").await?;
            // Only cosmetic, so a failure here is ignored
            let _ = bot
                .send_chat_action(msg.chat.id, ChatAction::Typing)
                .await;

            let explanation = helper.explain(&expression).await;
            bot.send_message(msg.chat.id, explanation).await?;
        }
    }
    Ok(())
}

async fn receive_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    session: Session,
    msg: Message,
) -> HandlerResult {
    let mut session = session;

    let answer = match msg.text().map(parse_answer) {
        Some(Ok(answer)) => answer,
        Some(Err(err)) => {
            bot.send_message(msg.chat.id, err.to_string()).await?;
            return Ok(());
        }
        None => {
            bot.send_message(msg.chat.id, SessionError::MalformedAnswer.to_string())
                .await?;
            return Ok(());
        }
    };

    let number = session.answered() + 1;
    let progress = session.record_answer(answer)?;
    debug!("Chat {}: answered {} to question {}", msg.chat.id, answer, number);

    bot.send_message(
        msg.chat.id,
        format!("You entered {} for question {}.", answer, number),
    )
    .await?;

    match progress {
        Progress::Next { number, question } => {
            bot.send_message(msg.chat.id, format!("{}. {}", number, question.prompt()))
                .await?;
            dialogue.update(State::Answering(session)).await?;
        }
        Progress::Finished(card) => {
            let total = card.per_question.len();
            info!(
                "Chat {}: quiz completed with {} / {}",
                msg.chat.id, card.correct, total
            );
            bot.send_message(
                msg.chat.id,
                format!(
                    "Quiz completed. Score: {}\nSend /view_report to see the details.",
                    score_line(card.correct, total)
                ),
            )
            .await?;
            dialogue.update(State::Idle(session)).await?;
        }
    }
    Ok(())
}

async fn unknown_message(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, commands::help_text()).await?;
    Ok(())
}
