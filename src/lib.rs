//! Arithmetic quiz engine behind the math quiz Telegram bot.
//!
//! [`quiz`] generates and scores quizzes, [`session`] keeps one user's
//! settings, current quiz and statistics, and [`commands`] maps bot commands
//! onto them. The binary in `main.rs` wires these into a teloxide dispatcher.

pub mod commands;
pub mod config;
pub mod quiz;
pub mod session;
