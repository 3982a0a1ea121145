use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bit::Result;

mod add;
mod branch;
mod checkout;
mod commit;
mod init;
mod log;
mod status;

/// A minimal content-addressed version control engine.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Init => init::run(),
            Command::Add { paths } => add::run(paths),
            Command::Commit { message, author } => commit::run(message, author.as_deref()),
            Command::Checkout { create, branch } => checkout::run(branch, *create),
            Command::Branch { delete, name } => branch::run(name.as_deref(), *delete),
            Command::Log { lines } => log::run(*lines),
            Command::Status => status::run(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create the metadata directory, empty objects/refs, HEAD → master.
    Init,
    /// Stage files or, recursively, all files under a directory.
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Build a commit from the current index.
    Commit {
        #[arg(short, long)]
        message: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Switch HEAD to a branch, materializing its tree.
    Checkout {
        /// Create the branch from the current HEAD if it doesn't exist.
        #[arg(short = 'b')]
        create: bool,
        branch: String,
    },
    /// List branches, create one from HEAD, or delete one.
    Branch {
        #[arg(short = 'd')]
        delete: bool,
        name: Option<String>,
    },
    /// Walk the first-parent chain from HEAD, printing up to N commits.
    Log {
        #[arg(short = 'n', long, default_value = "10")]
        lines: usize,
    },
    /// Print staged / unstaged / untracked / deleted paths.
    Status,
}
