//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::{ConsoleFormatter, ConsoleObserver};
use chef_application::{ChatError, ChatSession};
use chef_domain::Role;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::debug;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    History,
    Favorites,
    Clear,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.split_whitespace().next().unwrap_or(line) {
            "/quit" | "/exit" | "/q" => Command::Quit,
            "/help" | "/h" | "/?" => Command::Help,
            "/history" => Command::History,
            "/favorites" | "/favs" => Command::Favorites,
            "/clear" => Command::Clear,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: Arc<ChatSession>,
    observer: ConsoleObserver,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(session: Arc<ChatSession>, config: ReplConfig) -> Self {
        Self {
            observer: ConsoleObserver::new(config.show_progress),
            session,
            config,
        }
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(Command::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Chef - your cooking helper        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} {}   {} {}",
            "Model:".dimmed(),
            self.session.params().model,
            "Favorites:".dimmed(),
            self.session.favorites().len()
        );
        println!();
        Self::print_commands();
    }

    fn print_commands() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show this conversation");
        println!("  /favorites        - Reload and list your favorites");
        println!("  /clear            - Clear the screen");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Press Ctrl-C while Chef is answering to stop the answer.");
        println!();
    }

    /// Handle a slash command. Returns true if the REPL should exit.
    fn handle_command(&self, command: Command) -> bool {
        match command {
            Command::Quit => {
                println!("Bye!");
                return true;
            }
            Command::Help => {
                println!();
                Self::print_commands();
            }
            Command::History => self.print_history(),
            Command::Favorites => self.print_favorites(),
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H");
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn print_history(&self) {
        let history = self.session.history();
        println!();
        if history.is_empty() {
            println!("{}", "Nothing said yet.".dimmed());
        }
        for message in &history {
            let label = match message.role() {
                Role::User => ConsoleFormatter::user_label(),
                _ => ConsoleFormatter::assistant_label(),
            };
            println!("{} {}", label, message.content());
            if message.role() == Role::Assistant {
                println!();
            }
        }
        println!();
    }

    fn print_favorites(&self) {
        let count = self.session.refresh_favorites();
        println!();
        if count == 0 {
            println!("{}", "No favorites saved yet.".dimmed());
        } else {
            println!("Favorites ({}):", count);
            for favorite in self.session.favorites() {
                match favorite.note() {
                    Some(note) => {
                        println!("  - {} {}", favorite.name, format!("({})", note).dimmed())
                    }
                    None => println!("  - {}", favorite.name),
                }
            }
        }
        println!();
    }

    async fn process_question(&self, question: &str) {
        let ask = self.session.ask(question, &self.observer);
        tokio::pin!(ask);

        // Ctrl-C while streaming cancels the turn; the ask future then
        // resolves to `Cancelled` and leaves the session idle.
        let result = tokio::select! {
            result = &mut ask => result,
            _ = tokio::signal::ctrl_c() => {
                debug!("Ctrl-C during turn");
                self.session.cancel_active();
                ask.await
            }
        };

        match result {
            Ok(_) => {}
            Err(ChatError::Cancelled) => {
                self.observer.interrupt();
                println!("{}", ConsoleFormatter::error_line(&ChatError::Cancelled));
                println!();
            }
            Err(e) if e.is_rejection() => {
                eprintln!("{}", ConsoleFormatter::error_line(&e));
                println!();
            }
            // Already reported through the observer.
            Err(_) => println!(),
        }
    }
}
