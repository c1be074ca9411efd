//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chef-chat
#[derive(Parser, Debug)]
#[command(name = "chef-chat")]
#[command(author, version, about = "Chat with Chef, a cooking assistant that knows your favorite meals")]
#[command(long_about = r#"
Chef answers cooking questions and suggests meals, taking the favorites you
have saved into account. Answers stream in as they are written.

Without a question, an interactive chat starts. Press Ctrl-C while Chef is
answering to stop the current answer.

The API key is read from $GROQ_API_KEY (see [api] api_key_env).

Configuration files are loaded from (later wins):
1. ~/.config/chef-chat/config.toml   Global config
2. ./chef.toml                       Project-level config
3. --config <path>                   Explicit config file
4. CHEF_* environment variables      e.g. CHEF_GENERATION__MODEL

Example:
  chef-chat "What can I make with leeks and potatoes?"
  chef-chat --model llama-3.1-8b-instant
"#)]
pub struct Cli {
    /// Ask a single question and exit (interactive chat when omitted)
    pub question: Option<String>,

    /// Model to use (overrides [generation] model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Print the answer as an HTML fragment (one-shot mode)
    #[arg(long)]
    pub html: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
