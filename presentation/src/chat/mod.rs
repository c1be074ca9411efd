//! Interactive chat module
//!
//! Provides a readline-based interactive chat with Chef.

mod repl;

pub use repl::ChatRepl;
