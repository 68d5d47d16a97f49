use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError};

use crate::app::api::{self, WriteOutcome, WriteRequest};
use crate::domain::{AppConfig, AppError};

pub(super) fn run_write(
    config: &AppConfig,
    request: WriteRequest,
    yes: bool,
) -> Result<(), AppError> {
    if !yes && !confirm(&prompt_for(&request))? {
        return Err(AppError::Aborted);
    }

    let outcome = api::write(config, request)?;
    print_outcome(&outcome);
    Ok(())
}

fn prompt_for(request: &WriteRequest) -> String {
    match request {
        WriteRequest::Vote { id, approve: true, .. } => format!("Vote FOR proposal #{}?", id),
        WriteRequest::Vote { id, approve: false, .. } => format!("Vote AGAINST proposal #{}?", id),
        WriteRequest::CloseVoting { id } => format!("Close public voting on proposal #{}?", id),
        WriteRequest::ReleaseStage { id } => {
            format!("Release the current stage's funds for proposal #{}?", id)
        }
    }
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => Ok(answer),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
        Err(DialoguerError::IO(err)) => Err(AppError::Io(err)),
    }
}

fn print_outcome(outcome: &WriteOutcome) {
    let proposal = &outcome.view.proposal;
    println!("  Transaction: {}", outcome.receipt.hash);
    println!("  Block: {}", outcome.receipt.block_number);
    println!("  Proposal #{} is now {}", proposal.id, proposal.state);
    println!(
        "  Public votes: {} for / {} against ({}% approval)",
        outcome.view.votes.public.yes, outcome.view.votes.public.no, outcome.view.public_approval
    );
    let progress = &outcome.view.progress;
    println!("  Stages: {}/{} completed", progress.completed, progress.total);
}
