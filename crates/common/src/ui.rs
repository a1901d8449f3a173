//! User interface implementations

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use askbot_runtime::deps::{MessageStyle, ProgressIndicator, UserInterface};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

/// Production UI implementation using dialoguer and indicatif
pub struct RealUserInterface;

impl UserInterface for RealUserInterface {
    fn create_spinner(&self) -> Box<dyn ProgressIndicator> {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(spinner_style);
        }
        Box::new(RealProgressIndicator { pb })
    }

    fn print(&self, message: &str) {
        println!("{message}");
    }

    fn print_styled(&self, message: &str, msg_style: MessageStyle) {
        let styled = match msg_style {
            MessageStyle::Bold => style(message).bold().to_string(),
            MessageStyle::Cyan => style(message).cyan().to_string(),
            MessageStyle::Warning => style(message).yellow().bold().to_string(),
            MessageStyle::Success => style(message).green().bold().to_string(),
        };
        println!("{styled}");
    }

    fn is_interactive(&self) -> bool {
        // dialoguer draws on stderr and reads keys from the terminal
        atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr)
    }

    fn prompt_input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        if !self.is_interactive() {
            show_piped_prompt(prompt, default)?;
            return read_piped_input(&mut io::stdin().lock(), default)
                .context("Failed to get input");
        }

        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);

        if let Some(default_val) = default {
            input = input.default(default_val.to_string());
        }

        input.interact_text().context("Failed to get input")
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !self.is_interactive() {
            let hint = if default { "[Y/n]" } else { "[y/N]" };
            show_piped_prompt(&format!("{prompt} {hint}"), None)?;
            return read_piped_confirm(&mut io::stdin().lock(), default)
                .context("Failed to get confirmation");
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("Failed to get confirmation")
    }
}

fn show_piped_prompt(prompt: &str, default: Option<&str>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match default {
        Some(default) => write!(stdout, "{prompt} [{default}] ")?,
        None => write!(stdout, "{prompt} ")?,
    }
    stdout.flush()?;
    Ok(())
}

/// One line from `reader` without its line ending; end of input is an error
fn read_piped_line(reader: &mut dyn BufRead) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        anyhow::bail!("No answer left on standard input");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Answer to a text prompt when stdin is not a terminal.
///
/// The line is kept verbatim; an empty line selects `default` when there is one.
pub fn read_piped_input(reader: &mut dyn BufRead, default: Option<&str>) -> Result<String> {
    let line = read_piped_line(reader)?;
    match default {
        Some(default) if line.is_empty() => Ok(default.to_string()),
        _ => Ok(line),
    }
}

/// Answer to a yes/no prompt when stdin is not a terminal.
///
/// Lines that are neither empty nor a yes/no answer are asked again.
pub fn read_piped_confirm(reader: &mut dyn BufRead, default: bool) -> Result<bool> {
    loop {
        let line = read_piped_line(reader)?;
        match line.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => println!("Please answer y or n, not '{other}'"),
        }
    }
}

struct RealProgressIndicator {
    pb: ProgressBar,
}

impl ProgressIndicator for RealProgressIndicator {
    fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    fn enable_steady_tick(&self, duration: Duration) {
        self.pb.enable_steady_tick(duration);
    }
}

// Test implementations for mocking

/// A canned reply handed out by [`TestUserInterface`] for the next prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Typed text for an input prompt
    Text(String),
    /// Answer to a yes/no prompt
    Confirm(bool),
    /// Behave as if the user hit Ctrl-C at the prompt
    Interrupt,
}

/// Test UI implementation that captures output and replays scripted answers
#[derive(Default)]
pub struct TestUserInterface {
    /// Every printed line, styled or not
    pub output: Arc<Mutex<Vec<String>>>,
    /// Styled lines with their style
    pub styled_output: Arc<Mutex<Vec<(String, MessageStyle)>>>,
    /// Every prompt shown, in order
    pub prompts: Arc<Mutex<Vec<String>>>,
    answers: Mutex<VecDeque<ScriptedAnswer>>,
}

impl TestUserInterface {
    /// Create an interface with no scripted answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interface that replays `answers` in order
    pub fn with_answers(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Lines printed so far
    pub fn get_output(&self) -> Vec<String> {
        lock(&self.output).clone()
    }

    /// Styled lines printed so far
    pub fn get_styled_output(&self) -> Vec<(String, MessageStyle)> {
        lock(&self.styled_output).clone()
    }

    /// Prompts shown so far
    pub fn get_prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn next_answer(&self, prompt: &str) -> Option<ScriptedAnswer> {
        lock(&self.prompts).push(prompt.to_string());
        lock(&self.answers).pop_front()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn interrupted() -> anyhow::Error {
    anyhow::Error::new(io::Error::new(io::ErrorKind::Interrupted, "read interrupted"))
        .context("Failed to get input")
}

impl UserInterface for TestUserInterface {
    fn create_spinner(&self) -> Box<dyn ProgressIndicator> {
        Box::new(TestProgressIndicator {
            messages: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn print(&self, message: &str) {
        lock(&self.output).push(message.to_string());
    }

    fn print_styled(&self, message: &str, style: MessageStyle) {
        // Add to both styled output and regular output for easier testing
        lock(&self.styled_output).push((message.to_string(), style));
        lock(&self.output).push(message.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn prompt_input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next_answer(prompt) {
            Some(ScriptedAnswer::Text(text)) => Ok(text),
            Some(ScriptedAnswer::Interrupt) => Err(interrupted()),
            Some(other) => anyhow::bail!("Expected a text answer for '{prompt}', got {other:?}"),
            None => Ok(default.unwrap_or("test-value").to_string()),
        }
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        match self.next_answer(prompt) {
            Some(ScriptedAnswer::Confirm(answer)) => Ok(answer),
            Some(ScriptedAnswer::Interrupt) => Err(interrupted()),
            Some(other) => anyhow::bail!("Expected a yes/no answer for '{prompt}', got {other:?}"),
            None => Ok(default),
        }
    }
}

struct TestProgressIndicator {
    messages: Arc<Mutex<Vec<String>>>,
}

impl ProgressIndicator for TestProgressIndicator {
    fn set_message(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }

    fn finish_and_clear(&self) {}

    fn enable_steady_tick(&self, _duration: Duration) {}
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod tests;
