//! Streaming console rendering of chat turns

use crate::progress::reporter::ProgressReporter;
use chef_application::{ChatError, ChatObserver};
use chef_domain::Message;
use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Labels and messages for console output
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn user_label() -> String {
        "You:".cyan().bold().to_string()
    }

    pub fn assistant_label() -> String {
        "Chef:".green().bold().to_string()
    }

    /// The line shown for a failed, rejected or stopped turn.
    pub fn error_line(error: &ChatError) -> String {
        if error.is_cancelled() {
            format!("{}", error.user_message().yellow())
        } else {
            format!("{} {}", "!".red().bold(), error.user_message().red())
        }
    }
}

/// [`ChatObserver`] that streams the answer to stdout as it arrives.
///
/// The spinner runs until the first delta. The `Chef:` label is printed
/// lazily with the first delta so an error never leaves a dangling label.
pub struct ConsoleObserver {
    progress: ProgressReporter,
    echo_question: bool,
    answer_open: AtomicBool,
}

impl ConsoleObserver {
    pub fn new(show_progress: bool) -> Self {
        Self {
            progress: ProgressReporter::new(show_progress),
            echo_question: false,
            answer_open: AtomicBool::new(false),
        }
    }

    /// Print `You: <question>` when a turn starts (the REPL already shows it
    /// at the prompt).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_question = echo;
        self
    }

    /// Tidy up after a turn that ended without a final notification
    /// (cancelled): stop the spinner and end the partial answer line.
    pub fn interrupt(&self) {
        self.progress.clear();
        self.close_answer();
    }

    fn open_answer(&self) {
        if !self.answer_open.swap(true, Ordering::SeqCst) {
            self.progress.clear();
            print!("{} ", ConsoleFormatter::assistant_label());
        }
    }

    fn close_answer(&self) {
        if self.answer_open.swap(false, Ordering::SeqCst) {
            println!();
        }
    }
}

impl ChatObserver for ConsoleObserver {
    fn on_turn_start(&self, question: &str) {
        if self.echo_question {
            println!("{} {}", ConsoleFormatter::user_label(), question);
        }
        self.progress.start("Chef is thinking...");
    }

    fn on_streaming_start(&self) {
        self.progress.update("Chef is writing...");
    }

    fn on_delta(&self, text: &str) {
        self.open_answer();
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }

    fn on_turn_complete(&self, _message: &Message) {
        // Empty answers still get their label.
        self.open_answer();
        self.close_answer();
        println!();
    }

    fn on_turn_failed(&self, error: &ChatError) {
        self.progress.clear();
        self.close_answer();
        eprintln!("{}", ConsoleFormatter::error_line(error));
    }
}
