use clap::{Parser, Subcommand};
use git_pulse::commands::*;
use git_pulse::core::{
    error::{GitPulseError, Result},
    print_error, print_error_with_paths,
};
use std::env;

#[derive(Parser)]
#[command(name = "git-pulse")]
#[command(about = "Live git repository state: status, branches and change notifications")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show merged status, including ignored files
    Status {
        /// Print status entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// List local branches
    Branches,
    /// Switch to a branch
    Checkout {
        /// Create the branch before switching
        #[arg(short = 'b', long = "create")]
        create_branch: bool,
        /// Discard local changes that block the switch
        #[arg(short, long)]
        force: bool,
        /// Branch name
        name: String,
    },
    /// Stage paths (everything when none are given)
    Add {
        paths: Vec<String>,
    },
    /// Unstage paths (everything when none are given)
    Reset {
        paths: Vec<String>,
    },
    /// Show unstaged changes
    Diff {
        /// Open the configured diff tool instead of printing
        #[arg(long)]
        tool: bool,
        path: Option<String>,
    },
    /// Print repository notifications until interrupted
    Watch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Status { json } => execute_status(json),
        Commands::Branches => execute_branches(),
        Commands::Checkout {
            create_branch,
            force,
            name,
        } => execute_checkout(&name, create_branch, force),
        Commands::Add { paths } => execute_add(&paths),
        Commands::Reset { paths } => execute_reset(&paths),
        Commands::Diff { tool, path } => execute_diff(path, tool),
        Commands::Watch => execute_watch(),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report_error(error: &GitPulseError) {
    match error {
        GitPulseError::NotInGitRepo => print_error("Not in a git repository"),
        GitPulseError::UncommittedChanges { paths } => print_error_with_paths(
            "Your local changes would be overwritten by checkout. Commit or stash them, or use --force:",
            paths,
        ),
        other => print_error(&other.to_string()),
    }
}
