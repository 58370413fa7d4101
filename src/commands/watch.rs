use crate::commands::{current_directory, open_repository, repository_state};
use crate::core::{error::Result, RepositoryEvent, RepositoryState};
use chrono::Local;
use colored::*;
use std::sync::{mpsc, Arc};

/// Print repository notifications until interrupted
pub fn execute_watch() -> Result<()> {
    let current_dir = current_directory()?;
    let repository = repository_state()?;

    let (sender, events) = mpsc::channel();
    repository.subscribe(Arc::new(sender));
    open_repository(&repository, &current_dir)?;

    if let Some(root) = repository.working_directory() {
        println!(
            "\n{} {} {}\n",
            "Watching".white(),
            root.actual().blue(),
            "(Ctrl+C to stop)".bright_black()
        );
    }

    for event in events {
        if let Err(e) = print_event(&repository, &event) {
            log::warn!("Failed to refresh after {event:?}: {e}");
        }
    }

    Ok(())
}

fn print_event(repository: &RepositoryState, event: &RepositoryEvent) -> Result<()> {
    let message = match event {
        RepositoryEvent::RepositoryChanged(None) => {
            // Reading status arms working tree notifications
            let status = repository.status()?;
            format!("repository opened ({} status entries)", status.len())
        }
        RepositoryEvent::RepositoryChanged(Some(paths)) => {
            format!("repository metadata changed ({} path(s))", paths.len())
        }
        RepositoryEvent::StatusChanged => {
            let status = repository.status()?;
            format!("status changed ({} status entries)", status.len())
        }
        RepositoryEvent::CurrentBranchChanged => match repository.current_branch()? {
            Some(branch) => format!("current branch is {}", branch.blue()),
            None => "HEAD detached".to_string(),
        },
        RepositoryEvent::BranchesChanged => {
            format!("branch list changed: {} branch(es)", repository.branches()?.len())
        }
    };

    println!(
        "{} {}",
        format!("[{}]", Local::now().format("%H:%M:%S")).bright_black(),
        message
    );
    Ok(())
}
