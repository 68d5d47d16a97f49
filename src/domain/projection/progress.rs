use serde::Serialize;

use crate::domain::AppError;
use crate::domain::proposal::{Proposal, Stage, StageState};

/// Completed-stage summary of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageProgress {
    pub completed: usize,
    pub total: usize,
    /// In `[0, 1]`; 0 when the proposal has no stages.
    pub fraction_complete: f64,
}

impl StageProgress {
    pub fn percent(&self) -> u8 {
        (self.fraction_complete * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Count completed stages, rejecting a completed stage after an unfinished one.
pub fn aggregate_stage_progress(stages: &[Stage]) -> Result<StageProgress, AppError> {
    let mut first_unfinished: Option<&Stage> = None;

    for (position, stage) in stages.iter().enumerate() {
        match (stage.state, first_unfinished) {
            (StageState::Completed, Some(earlier)) => {
                return Err(AppError::InconsistentStageOrder {
                    stage: position,
                    reason: format!(
                        "stage {} is Completed while stage {} is {}",
                        position, earlier.index, earlier.state
                    ),
                });
            }
            (StageState::Completed, None) => {}
            (_, None) => first_unfinished = Some(stage),
            (_, Some(_)) => {}
        }
    }

    let total = stages.len();
    let completed = stages.iter().filter(|s| s.state == StageState::Completed).count();
    let fraction_complete = if total == 0 { 0.0 } else { completed as f64 / total as f64 };

    Ok(StageProgress { completed, total, fraction_complete })
}

/// Check stage states against the proposal's stage cursor.
///
/// Stages before `current_stage` are Completed, the current stage is not
/// Completed, and later stages have not started.
pub fn check_stage_alignment(proposal: &Proposal, stages: &[Stage]) -> Result<(), AppError> {
    if stages.len() as u64 != proposal.total_stages {
        return Err(AppError::InconsistentStageOrder {
            stage: stages.len(),
            reason: format!(
                "read {} stages but proposal #{} reports {}",
                stages.len(),
                proposal.id,
                proposal.total_stages
            ),
        });
    }

    for (position, stage) in stages.iter().enumerate() {
        let i = position as u64;
        let aligned = if i < proposal.current_stage {
            stage.state == StageState::Completed
        } else if i == proposal.current_stage {
            stage.state != StageState::Completed
        } else {
            stage.state == StageState::NotStarted
        };

        if !aligned {
            return Err(AppError::InconsistentStageOrder {
                stage: position,
                reason: format!(
                    "stage {} is {} but the current stage is {}",
                    position, stage.state, proposal.current_stage
                ),
            });
        }
    }

    Ok(())
}
