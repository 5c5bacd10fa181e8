//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tb_core::config::{API_URL_VAR, DATA_DIR_VAR};
use tb_core::task::TaskStatus;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Task board client for the remote tasks API")]
pub struct Cli {
    /// Base URL of the remote API
    #[arg(long, global = true, env = API_URL_VAR)]
    pub api_url: Option<String>,

    /// Directory for the persisted session
    #[arg(long, global = true, env = DATA_DIR_VAR)]
    pub data_dir: Option<PathBuf>,

    /// Print the board as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Show session state and navigation
    Status,
    /// Show the board
    List {
        /// One list in server order instead of columns
        #[arg(long)]
        flat: bool,
    },
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        assigned_to: String,
    },
    /// Edit a task's title and/or description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a task done
    Done { id: String },
    /// Move a task to another column
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
        /// Position in the destination column
        #[arg(long)]
        index: Option<usize>,
    },
    /// Delete a task
    Rm { id: String },
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    raw.parse().map_err(|e: tb_core::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        let cli = Cli::try_parse_from(["taskboard", "move", "abc", "in-progress", "--index", "2"])
            .unwrap();
        match cli.command {
            Command::Move { id, status, index } => {
                assert_eq!(id, "abc");
                assert_eq!(status, TaskStatus::InProgress);
                assert_eq!(index, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["taskboard", "move", "abc", "archived"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "list",
            "--flat",
            "--api-url",
            "http://api.test",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://api.test"));
        assert!(matches!(cli.command, Command::List { flat: true }));
    }
}
