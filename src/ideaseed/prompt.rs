//! Interactive questions, behind a trait.
//!
//! The core never talks to the terminal directly. The CLI supplies a
//! dialoguer-backed implementation; tests supply a [`ScriptedPrompter`].

use crate::error::{IdeaseedError, Result};
use std::collections::VecDeque;

pub trait Prompter {
    /// Yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Free text, an empty answer falls back to `default` when given.
    fn text(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Hidden input.
    fn password(&mut self, question: &str) -> Result<String>;

    /// Index of the picked choice.
    fn select(&mut self, question: &str, choices: &[&str]) -> Result<usize>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Text(String),
    Select(usize),
}

/// Answers questions from a fixed script and records every question asked.
///
/// Running out of answers, or getting an answer of the wrong kind, is an
/// error so that an unexpected question fails the test that triggered it.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yes(mut self) -> Self {
        self.answers.push_back(Answer::Confirm(true));
        self
    }

    pub fn no(mut self) -> Self {
        self.answers.push_back(Answer::Confirm(false));
        self
    }

    pub fn text(mut self, answer: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Text(answer.into()));
        self
    }

    pub fn choose(mut self, index: usize) -> Self {
        self.answers.push_back(Answer::Select(index));
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> Result<Answer> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| IdeaseedError::Prompt(format!("no scripted answer for {question:?}")))
    }

    fn unexpected(question: &str, answer: Answer) -> IdeaseedError {
        IdeaseedError::Prompt(format!("scripted answer {answer:?} does not fit {question:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        match self.next(question)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(Self::unexpected(question, other)),
        }
    }

    fn text(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match self.next(question)? {
            Answer::Text(text) if text.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(text) => Ok(text),
            other => Err(Self::unexpected(question, other)),
        }
    }

    fn password(&mut self, question: &str) -> Result<String> {
        match self.next(question)? {
            Answer::Text(text) => Ok(text),
            other => Err(Self::unexpected(question, other)),
        }
    }

    fn select(&mut self, question: &str, choices: &[&str]) -> Result<usize> {
        match self.next(question)? {
            Answer::Select(index) if index < choices.len() => Ok(index),
            other => Err(Self::unexpected(question, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_and_records_questions() {
        let mut prompter = ScriptedPrompter::new().yes().text("").choose(1);
        assert!(prompter.confirm("Go?", false).unwrap());
        assert_eq!(Prompter::text(&mut prompter, "Name", Some("fallback")).unwrap(), "fallback");
        assert_eq!(prompter.select("Pick", &["a", "b"]).unwrap(), 1);
        assert_eq!(prompter.asked, vec!["Go?", "Name", "Pick"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn exhausted_script_is_an_error() {
        let mut prompter = ScriptedPrompter::new();
        assert!(matches!(
            prompter.confirm("Surprise?", true),
            Err(IdeaseedError::Prompt(_))
        ));
    }

    #[test]
    fn wrong_answer_kind_is_an_error() {
        let mut prompter = ScriptedPrompter::new().text("hello");
        assert!(prompter.confirm("Go?", true).is_err());
    }
}
