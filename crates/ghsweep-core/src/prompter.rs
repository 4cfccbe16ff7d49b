//! Interactive prompt handling.

use std::sync::Mutex;

use anyhow::Result;

/// Trait for interactive terminal prompts.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Prompt for free-text input. An empty answer is allowed.
    fn input(&self, prompt: &str) -> Result<String>;
}

/// Dialoguer-based prompter implementation.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }
}

/// Stub prompter for testing that returns pre-configured answers.
///
/// Every prompt shown is recorded so tests can assert whether the
/// operator was asked anything at all.
#[derive(Debug, Default)]
pub struct StubPrompter {
    /// Pre-configured input answers, consumed front to back.
    pub input_answers: Mutex<Vec<String>>,
    /// Prompts that were shown, in order.
    pub prompts: Mutex<Vec<String>>,
}

impl StubPrompter {
    /// Queue an answer for the next `input` call.
    pub fn push_answer(&self, answer: impl Into<String>) {
        self.input_answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(answer.into());
    }

    /// Prompts shown so far.
    pub fn shown(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Prompter for StubPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(prompt.to_string());
        let mut answers = self
            .input_answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if answers.is_empty() {
            Ok(String::new())
        } else {
            Ok(answers.remove(0))
        }
    }
}
