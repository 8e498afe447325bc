use std::time::Duration;

use chatgpt::client::ChatGPT;
use chatgpt::config::ChatGPTEngine;
use chatgpt::prelude::*;
use chatgpt::types::CompletionResponse;
use log::{debug, warn};

use crate::quiz::Expression;

/// Asks ChatGPT to explain a quiz question. Purely advisory: nothing here
/// affects whether an answer counts as correct.
pub struct QuizHelper {
    chat_gpt: ChatGPT,
}

impl QuizHelper {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let mut chat_gpt = ChatGPT::new(api_key)?;
        chat_gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
        chat_gpt.config.timeout = timeout;

        Ok(Self { chat_gpt })
    }

    /// The explanation text, or `Error: ...` if the completion failed.
    pub async fn explain(&self, expression: &Expression) -> String {
        let prompt = explanation_prompt(expression);
        debug!("Requesting explanation: {:?}", prompt);

        match self.complete(&prompt).await {
            Ok(content) => content,
            Err(err) => {
                warn!("Explanation request failed: {}", err);
                format!("Error: {}", err)
            }
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response: CompletionResponse = self.chat_gpt.send_message(prompt).await?;
        let content = response.message().clone().content;

        debug!("Completion: {:?}", content);

        Ok(content)
    }
}

pub fn explanation_prompt(expression: &Expression) -> String {
    format!(
        "Can you explain why {} = {}?",
        expression,
        expression.value()
    )
}
