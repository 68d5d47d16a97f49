//! View-model store for the proposals a screen is showing.
//!
//! Refreshes are identified by tickets issued in order. A refresh only lands if
//! no later-issued refresh has landed before it, so the newest request always
//! wins regardless of completion order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::proposal::Wei;
use crate::domain::snapshot::ProposalSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Default)]
pub struct ProposalBoard {
    issued: u64,
    applied: u64,
    snapshots: BTreeMap<u64, ProposalSnapshot>,
    treasury_balance: Option<Wei>,
}

impl ProposalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replace the whole board. Returns `false` if the ticket is stale.
    pub fn apply(
        &mut self,
        ticket: RefreshTicket,
        snapshots: Vec<ProposalSnapshot>,
        treasury_balance: Option<Wei>,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        for snapshot in &snapshots {
            self.warn_on_regression(snapshot);
        }
        self.snapshots = snapshots.into_iter().map(|s| (s.id(), s)).collect();
        self.treasury_balance = treasury_balance;
        true
    }

    /// Replace a single proposal, e.g. after a write was mined.
    pub fn upsert(&mut self, ticket: RefreshTicket, snapshot: ProposalSnapshot) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.warn_on_regression(&snapshot);
        self.snapshots.insert(snapshot.id(), snapshot);
        true
    }

    pub fn get(&self, id: u64) -> Option<&ProposalSnapshot> {
        self.snapshots.get(&id)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &ProposalSnapshot> {
        self.snapshots.values()
    }

    pub fn treasury_balance(&self) -> Option<Wei> {
        self.treasury_balance
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn accept(&mut self, ticket: RefreshTicket) -> bool {
        if ticket.0 <= self.applied {
            debug!(ticket = ticket.0, applied = self.applied, "discarding stale refresh");
            return false;
        }
        self.applied = ticket.0;
        true
    }

    fn warn_on_regression(&self, next: &ProposalSnapshot) {
        let Some(prev) = self.snapshots.get(&next.id()) else {
            return;
        };
        let (a, b) = (&prev.proposal, &next.proposal);
        let regressed = b.public_yes_votes < a.public_yes_votes
            || b.public_no_votes < a.public_no_votes
            || b.authority_yes_votes < a.authority_yes_votes
            || b.authority_no_votes < a.authority_no_votes
            || b.current_stage < a.current_stage;
        if regressed {
            warn!(proposal = b.id, "counters decreased between refreshes; showing the newer read");
        }
        if !a.state.reaches(b.state) {
            warn!(
                proposal = b.id,
                from = %a.state,
                to = %b.state,
                "state moved backwards between refreshes; showing the newer read"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::{ProposalState, StageState};
    use crate::testing::fixtures::{proposal, stage};

    fn snapshot(id: u64, yes: u64) -> ProposalSnapshot {
        ProposalSnapshot::new(
            proposal(ProposalState::PublicVoting).id(id).votes(yes, 0).build(),
            vec![stage(0, StageState::NotStarted)],
        )
        .unwrap()
    }

    #[test]
    fn newest_refresh_wins_when_it_lands_first() {
        let mut board = ProposalBoard::new();
        let older = board.begin_refresh();
        let newer = board.begin_refresh();

        assert!(board.apply(newer, vec![snapshot(0, 10)], Some(Wei(5))));
        assert!(!board.apply(older, vec![snapshot(0, 3)], Some(Wei(1))));

        assert_eq!(board.get(0).unwrap().proposal.public_yes_votes, 10);
        assert_eq!(board.treasury_balance(), Some(Wei(5)));
    }

    #[test]
    fn in_order_refreshes_all_land() {
        let mut board = ProposalBoard::new();
        let first = board.begin_refresh();
        assert!(board.apply(first, vec![snapshot(0, 1), snapshot(1, 2)], None));
        let second = board.begin_refresh();
        assert!(board.apply(second, vec![snapshot(0, 4)], None));

        assert_eq!(board.len(), 1);
        assert_eq!(board.get(0).unwrap().proposal.public_yes_votes, 4);
        assert!(board.get(1).is_none());
    }

    #[test]
    fn upsert_replaces_one_proposal() {
        let mut board = ProposalBoard::new();
        let t = board.begin_refresh();
        board.apply(t, vec![snapshot(0, 1), snapshot(1, 1)], None);

        let t = board.begin_refresh();
        assert!(board.upsert(t, snapshot(1, 7)));
        assert_eq!(board.get(1).unwrap().proposal.public_yes_votes, 7);
        assert_eq!(board.get(0).unwrap().proposal.public_yes_votes, 1);
    }

    #[test]
    fn backwards_state_still_applies_newer_read() {
        let mut board = ProposalBoard::new();
        let in_progress = ProposalSnapshot::new(
            proposal(ProposalState::InProgress).id(0).build(),
            vec![stage(0, StageState::InProgress)],
        )
        .unwrap();
        let t = board.begin_refresh();
        board.apply(t, vec![in_progress], None);

        let t = board.begin_refresh();
        assert!(board.upsert(t, snapshot(0, 1)));
        assert_eq!(board.get(0).unwrap().proposal.state, ProposalState::PublicVoting);
    }

    #[test]
    fn regression_still_applies_newer_read() {
        let mut board = ProposalBoard::new();
        let t = board.begin_refresh();
        board.apply(t, vec![snapshot(0, 9)], None);
        let t = board.begin_refresh();
        assert!(board.apply(t, vec![snapshot(0, 2)], None));
        assert_eq!(board.get(0).unwrap().proposal.public_yes_votes, 2);
    }
}
