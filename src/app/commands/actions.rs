//! Write commands: vote, close public voting, release a stage.
//!
//! Every write re-reads the proposal, checks eligibility for the connected
//! account, and only then submits. After the transaction is mined the
//! proposal is read again and stored in the caller's board, so the caller
//! sees post-transaction state.

use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::app::commands::{session, snapshot};
use crate::domain::projection::ensure_eligible;
use crate::domain::{Action, AppError, Notification, ProposalBoard, ProposalView};
use crate::ports::{FundingContract, Notifier, TxReceipt, WalletProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    Vote { id: u64, approve: bool, comment: String },
    CloseVoting { id: u64 },
    ReleaseStage { id: u64 },
}

impl WriteRequest {
    pub fn action(&self) -> Action {
        match self {
            WriteRequest::Vote { .. } => Action::Vote,
            WriteRequest::CloseVoting { .. } => Action::CloseVoting,
            WriteRequest::ReleaseStage { .. } => Action::ReleaseStage,
        }
    }

    pub fn proposal_id(&self) -> u64 {
        match self {
            WriteRequest::Vote { id, .. }
            | WriteRequest::CloseVoting { id }
            | WriteRequest::ReleaseStage { id } => *id,
        }
    }

    fn success_message(&self) -> String {
        match self {
            WriteRequest::Vote { .. } => "Your vote has been recorded".to_string(),
            WriteRequest::CloseVoting { id } => {
                format!("Public voting closed for proposal #{}", id)
            }
            WriteRequest::ReleaseStage { id } => {
                format!("Stage funds released for proposal #{}", id)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome {
    pub action: Action,
    pub receipt: TxReceipt,
    pub view: ProposalView,
}

pub fn execute<C, W, N>(
    ctx: &AppContext<C, W, N>,
    board: &mut ProposalBoard,
    request: WriteRequest,
    now: u64,
) -> Result<WriteOutcome, AppError>
where
    C: FundingContract,
    W: WalletProvider,
    N: Notifier,
{
    let id = request.proposal_id();
    let action = request.action();

    let session = session::resolve(ctx)?;
    let (sender, role) = session.require_account()?;
    session::ensure_chain(ctx)?;

    let current = snapshot::load_snapshot(ctx, id)?;
    ensure_eligible(&current.proposal, role, action, now)?;

    let contract = ctx.contract();
    let tx = match &request {
        WriteRequest::Vote { approve, comment, .. } => {
            contract.public_vote_on_proposal(sender, id, *approve, comment)?
        }
        WriteRequest::CloseVoting { .. } => contract.close_public_voting(sender, id)?,
        WriteRequest::ReleaseStage { .. } => contract.release_stage_amount(sender, id)?,
    };
    let receipt = contract.wait_for(&tx)?;
    info!(
        proposal = id,
        %action,
        tx = %receipt.hash,
        block = receipt.block_number,
        "write confirmed"
    );

    let ticket = board.begin_refresh();
    let refreshed = snapshot::load_snapshot(ctx, id)?;
    let view = ProposalView::project(&refreshed, Some(role), now)?;
    board.upsert(ticket, refreshed);
    ctx.notifier()
        .notify(Notification::success(request.success_message()).with_title(action.label()));

    Ok(WriteOutcome { action, receipt, view })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::{ProposalState, StageState};
    use crate::domain::{Role, Severity, UpstreamCategory};
    use crate::testing::fixtures::{proposal, stage};
    use crate::testing::{FakeContract, FakeWallet, RecordedWrite, RecordingNotifier, accounts};

    const NOW: u64 = 1_700_000_000;

    type Ctx = AppContext<FakeContract, FakeWallet, RecordingNotifier>;

    fn voting_ctx(wallet: FakeWallet) -> Ctx {
        let contract = FakeContract::new();
        contract.push(
            proposal(ProposalState::PublicVoting)
                .votes(24, 8)
                .stages(0, 2)
                .end_time(NOW + 3600)
                .build(),
            vec![stage(0, StageState::NotStarted), stage(1, StageState::NotStarted)],
        );
        AppContext::new(contract, wallet, RecordingNotifier::default())
    }

    fn approved_ctx(wallet: FakeWallet) -> Ctx {
        let contract = FakeContract::new();
        contract.push(proposal(ProposalState::Approved).stages(0, 2).build(), vec![
            stage(0, StageState::NotStarted),
            stage(1, StageState::NotStarted),
        ]);
        AppContext::new(contract, wallet, RecordingNotifier::default())
    }

    fn run(ctx: &Ctx, request: WriteRequest, now: u64) -> Result<WriteOutcome, AppError> {
        execute(ctx, &mut ProposalBoard::new(), request, now)
    }

    fn vote(approve: bool) -> WriteRequest {
        WriteRequest::Vote { id: 0, approve, comment: "good idea".to_string() }
    }

    #[test]
    fn public_vote_is_submitted_and_reread() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::citizen()));

        let outcome = run(&ctx, vote(true), NOW).unwrap();
        assert_eq!(outcome.action, Action::Vote);
        assert_eq!(outcome.view.proposal.public_yes_votes, 25);
        assert_eq!(ctx.contract().writes(), vec![RecordedWrite::Vote {
            sender: accounts::citizen(),
            id: 0,
            approve: true,
            comment: "good idea".to_string(),
        }]);

        let notes = ctx.notifier().notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Success);
        assert_eq!(notes[0].message, "Your vote has been recorded");
    }

    #[test]
    fn refreshed_proposal_lands_in_the_board() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::citizen()));
        let mut board = ProposalBoard::new();

        execute(&ctx, &mut board, vote(false), NOW).unwrap();
        assert_eq!(board.get(0).unwrap().proposal.public_no_votes, 9);
    }

    #[test]
    fn admin_cannot_vote_and_nothing_is_sent() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::admin()));

        let err = run(&ctx, vote(true), NOW).unwrap_err();
        assert!(matches!(
            err,
            AppError::IneligibleAction {
                action: Action::Vote,
                role: Role::Admin,
                state: ProposalState::PublicVoting
            }
        ));
        assert!(ctx.contract().writes().is_empty());
        assert!(ctx.notifier().notifications().is_empty());
    }

    #[test]
    fn vote_after_deadline_is_rejected_locally() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::citizen()));
        let err = run(&ctx, vote(false), NOW + 3600).unwrap_err();
        assert!(matches!(err, AppError::IneligibleAction { .. }));
        assert!(ctx.contract().writes().is_empty());
    }

    #[test]
    fn admin_closes_voting() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::admin()));

        let outcome = run(&ctx, WriteRequest::CloseVoting { id: 0 }, NOW).unwrap();
        assert_eq!(outcome.view.proposal.state, ProposalState::Approved);
        assert!(outcome.view.actions.contains(&Action::ReleaseStage));
        assert_eq!(
            ctx.notifier().notifications()[0].message,
            "Public voting closed for proposal #0"
        );
    }

    #[test]
    fn admin_releases_stage_and_cursor_advances() {
        let ctx = approved_ctx(FakeWallet::connected(accounts::admin()));

        let outcome = run(&ctx, WriteRequest::ReleaseStage { id: 0 }, NOW).unwrap();
        let view = outcome.view;
        assert_eq!(view.proposal.state, ProposalState::InProgress);
        assert_eq!(view.proposal.current_stage, 1);
        assert_eq!(view.progress.completed, 1);
    }

    #[test]
    fn release_on_completed_proposal_is_ineligible() {
        let contract = FakeContract::new();
        contract.push(proposal(ProposalState::Completed).stages(2, 2).build(), vec![
            stage(0, StageState::Completed),
            stage(1, StageState::Completed),
        ]);
        let ctx = AppContext::new(
            contract,
            FakeWallet::connected(accounts::admin()),
            RecordingNotifier::default(),
        );

        let err = run(&ctx, WriteRequest::ReleaseStage { id: 0 }, NOW).unwrap_err();
        assert!(matches!(err, AppError::IneligibleAction { action: Action::ReleaseStage, .. }));
        assert!(ctx.contract().writes().is_empty());
    }

    #[test]
    fn disconnected_wallet_is_unauthorized() {
        let ctx = voting_ctx(FakeWallet::disconnected());
        let err = run(&ctx, vote(true), NOW).unwrap_err();
        assert_eq!(err.upstream_category(), Some(UpstreamCategory::Unauthorized));
        assert!(ctx.contract().writes().is_empty());
    }

    #[test]
    fn wrong_chain_blocks_the_write() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::citizen()).on_chain(1))
            .with_expected_chain_id(Some(31337));
        let err = run(&ctx, vote(true), NOW).unwrap_err();
        assert!(matches!(err, AppError::ChainMismatch { .. }));
        assert!(ctx.contract().writes().is_empty());
    }

    #[test]
    fn reverted_transaction_surfaces_reason() {
        let ctx = voting_ctx(FakeWallet::connected(accounts::citizen()));
        ctx.contract().revert_next_write("Already voted");

        let err = run(&ctx, vote(true), NOW).unwrap_err();
        assert_eq!(err.upstream_category(), Some(UpstreamCategory::Reverted));
        assert_eq!(err.to_string(), "Smart contract rejected the transaction: Already voted");
        assert!(ctx.notifier().notifications().is_empty());
    }
}
