//! # supply-cli
//!
//! Argument parsing and the terminal chat loop for the `supply` binary.

pub mod chat;
pub mod cli;

pub use chat::{run_chat, ChatHistory};
pub use cli::{Cli, Commands};
