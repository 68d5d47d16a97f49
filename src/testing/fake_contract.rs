use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::proposal::{Address, Proposal, ProposalState, RawTuple, Stage, StageState, Wei};
use crate::domain::{AppError, UpstreamCategory};
use crate::ports::{FundingContract, TxHandle, TxReceipt};
use crate::testing::fixtures::{accounts, raw_proposal, raw_stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Vote { sender: Address, id: u64, approve: bool, comment: String },
    CloseVoting { sender: Address, id: u64 },
    ReleaseStage { sender: Address, id: u64 },
}

#[derive(Default)]
struct Chain {
    authorities: BTreeSet<Address>,
    proposals: Vec<(Proposal, Vec<Stage>)>,
    balance: Wei,
    queued_proposal_reads: VecDeque<RawTuple>,
    proposal_reads: usize,
    writes: Vec<RecordedWrite>,
    pending_revert: Option<String>,
    reverted: HashMap<String, String>,
    block: u64,
}

/// In-memory contract that applies writes the way the deployed contract would.
pub struct FakeContract {
    chain: Mutex<Chain>,
}

impl FakeContract {
    pub fn new() -> Self {
        Self { chain: Mutex::new(Chain::default()) }
    }

    pub fn with_balance(self, balance: Wei) -> Self {
        self.chain.lock().unwrap().balance = balance;
        self
    }

    pub fn push(&self, proposal: Proposal, stages: Vec<Stage>) {
        self.chain.lock().unwrap().proposals.push((proposal, stages));
    }

    pub fn add_authority(&self, account: Address) {
        self.chain.lock().unwrap().authorities.insert(account);
    }

    /// Serve `raw` for the next `getProposalInfo` instead of the stored proposal.
    pub fn queue_proposal_read(&self, raw: RawTuple) {
        self.chain.lock().unwrap().queued_proposal_reads.push_back(raw);
    }

    /// The next write is accepted but its receipt reports a revert.
    pub fn revert_next_write(&self, reason: &str) {
        self.chain.lock().unwrap().pending_revert = Some(reason.to_string());
    }

    pub fn proposal_reads(&self) -> usize {
        self.chain.lock().unwrap().proposal_reads
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.chain.lock().unwrap().writes.clone()
    }

    fn submit(
        &self,
        write: RecordedWrite,
        apply: impl FnOnce(&mut Proposal, &mut Vec<Stage>),
        id: u64,
    ) -> Result<TxHandle, AppError> {
        let mut chain = self.chain.lock().unwrap();
        chain.writes.push(write);
        chain.block += 1;
        let hash = format!("0x{:064x}", chain.block);

        if let Some(reason) = chain.pending_revert.take() {
            chain.reverted.insert(hash.clone(), reason);
            return Ok(TxHandle(hash));
        }

        let (proposal, stages) = chain
            .proposals
            .get_mut(id as usize)
            .ok_or_else(|| AppError::upstream(UpstreamCategory::Reverted, None))?;
        apply(proposal, stages);
        Ok(TxHandle(hash))
    }
}

impl Default for FakeContract {
    fn default() -> Self {
        Self::new()
    }
}

impl FundingContract for FakeContract {
    fn proposal_count(&self) -> Result<u64, AppError> {
        Ok(self.chain.lock().unwrap().proposals.len() as u64)
    }

    fn get_proposal_info(&self, id: u64) -> Result<RawTuple, AppError> {
        let mut chain = self.chain.lock().unwrap();
        chain.proposal_reads += 1;
        if let Some(raw) = chain.queued_proposal_reads.pop_front() {
            return Ok(raw);
        }
        chain
            .proposals
            .get(id as usize)
            .map(|(proposal, _)| raw_proposal(proposal))
            .ok_or_else(|| AppError::upstream(UpstreamCategory::Reverted, None))
    }

    fn get_stage_info(&self, id: u64, stage: u64) -> Result<RawTuple, AppError> {
        let chain = self.chain.lock().unwrap();
        chain
            .proposals
            .get(id as usize)
            .and_then(|(_, stages)| stages.get(stage as usize))
            .map(raw_stage)
            .ok_or_else(|| AppError::upstream(UpstreamCategory::Reverted, None))
    }

    fn get_contract_balance(&self) -> Result<Wei, AppError> {
        Ok(self.chain.lock().unwrap().balance)
    }

    fn admin(&self) -> Result<Address, AppError> {
        Ok(accounts::admin())
    }

    fn is_authority(&self, account: &Address) -> Result<bool, AppError> {
        Ok(self.chain.lock().unwrap().authorities.contains(account))
    }

    fn public_vote_on_proposal(
        &self,
        sender: &Address,
        id: u64,
        approve: bool,
        comment: &str,
    ) -> Result<TxHandle, AppError> {
        let write = RecordedWrite::Vote {
            sender: sender.clone(),
            id,
            approve,
            comment: comment.to_string(),
        };
        self.submit(
            write,
            |proposal, _| {
                if approve {
                    proposal.public_yes_votes += 1;
                } else {
                    proposal.public_no_votes += 1;
                }
            },
            id,
        )
    }

    fn close_public_voting(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError> {
        let write = RecordedWrite::CloseVoting { sender: sender.clone(), id };
        self.submit(
            write,
            |proposal, _| {
                proposal.state = if proposal.public_yes_votes > proposal.public_no_votes {
                    ProposalState::Approved
                } else {
                    ProposalState::Rejected
                };
            },
            id,
        )
    }

    fn release_stage_amount(&self, sender: &Address, id: u64) -> Result<TxHandle, AppError> {
        let write = RecordedWrite::ReleaseStage { sender: sender.clone(), id };
        self.submit(
            write,
            |proposal, stages| {
                let current = proposal.current_stage as usize;
                if let Some(stage) = stages.get_mut(current) {
                    stage.state = StageState::Completed;
                }
                proposal.current_stage += 1;
                if let Some(next) = stages.get_mut(current + 1) {
                    next.state = StageState::InProgress;
                }
                proposal.state = if proposal.current_stage == proposal.total_stages {
                    ProposalState::Completed
                } else {
                    ProposalState::InProgress
                };
            },
            id,
        )
    }

    fn wait_for(&self, tx: &TxHandle) -> Result<TxReceipt, AppError> {
        let chain = self.chain.lock().unwrap();
        if let Some(reason) = chain.reverted.get(tx.as_str()) {
            return Err(AppError::upstream(UpstreamCategory::Reverted, Some(reason.clone())));
        }
        Ok(TxReceipt { hash: tx.clone(), block_number: chain.block })
    }
}
