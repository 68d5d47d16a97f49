//! Plain-text rendering of command results.

use crate::app::api::{ProposalListing, Session};
use crate::domain::proposal::Address;
use crate::domain::{Action, AdminStatistics, ProposalView, Role};

pub(super) fn print_listing(listing: &ProposalListing) {
    println!("{}", viewer_line(listing.account.as_ref(), listing.role));
    if let Some(balance) = listing.treasury_balance {
        println!("Treasury: {}", balance);
    }

    if listing.proposals.is_empty() {
        println!("No proposals yet.");
        return;
    }

    for view in &listing.proposals {
        let p = &view.proposal;
        println!();
        println!("#{} {} [{}]", p.id, p.description, p.state);
        println!("  Amount: {}  Recipient: {}", p.total_amount, p.recipient.shortened());
        println!(
            "  Public: {}% approval ({} votes)  Stages: {}/{}",
            view.public_approval,
            view.votes.public.total(),
            view.progress.completed,
            view.progress.total
        );
        if !view.actions.is_empty() {
            println!("  Actions: {}", format_actions(&view.actions));
        }
    }
}

pub(super) fn print_proposal(view: &ProposalView) {
    let p = &view.proposal;
    println!("Proposal #{}: {}", p.id, p.description);
    println!("  State: {}", p.state);
    println!("  Recipient: {}", p.recipient);
    println!("  Total amount: {}", p.total_amount);
    println!(
        "  Public votes: {} for / {} against ({}% approval)",
        view.votes.public.yes, view.votes.public.no, view.public_approval
    );
    println!(
        "  Authority votes: {} for / {} against ({}% approval)",
        view.votes.authority.yes, view.votes.authority.no, view.authority_approval
    );
    println!("  Voting ends: {}", view.deadline.describe());
    println!(
        "  Progress: {}/{} stages ({}%)",
        view.progress.completed,
        view.progress.total,
        view.progress.percent()
    );

    for stage in &view.stages {
        let current = stage.index == p.current_stage && p.has_pending_stage();
        let marker = if current { ">" } else { " " };
        println!("  {} Stage {}: {} [{}]", marker, stage.index + 1, stage.amount, stage.state);
        if stage.has_report() {
            println!("      Report: {}", stage.report);
        }
    }

    match view.role {
        Some(role) if view.actions.is_empty() => println!("  No actions available to {}", role),
        Some(role) => println!("  Actions for {}: {}", role, format_actions(&view.actions)),
        None => println!("  Connect an account to act on this proposal"),
    }
}

pub(super) fn print_statistics(stats: &AdminStatistics) {
    println!("Treasury balance: {}", stats.treasury_balance);
    println!("Total funds allocated: {}", stats.total_funds_allocated);
    println!("Proposals: {} total, {} active", stats.total_proposals, stats.active_proposals);

    if !stats.proposals_by_state.is_empty() {
        println!("By state:");
        for entry in &stats.proposals_by_state {
            println!("  {}: {}", entry.state, entry.count);
        }
    }

    if !stats.funds_by_category.is_empty() {
        println!("Funds by category:");
        for share in &stats.funds_by_category {
            println!("  {}: {} ({}%)", share.category, share.amount, share.percent);
        }
    }

    let votes = &stats.vote_distribution;
    println!(
        "Votes: {}% for, {}% against, {}% pending",
        votes.for_pct, votes.against_pct, votes.pending_pct
    );
}

pub(super) fn print_session(session: &Session) {
    println!("{}", viewer_line(session.account.as_ref(), session.role));
    if let Some(chain_id) = session.chain_id {
        println!("Chain: {}", chain_id);
    }
}

fn viewer_line(account: Option<&Address>, role: Option<Role>) -> String {
    match (account, role) {
        (Some(account), Some(role)) => format!("Account: {} ({})", account, role),
        _ => "⚠️  No wallet account connected (read-only)".to_string(),
    }
}

fn format_actions(actions: &[Action]) -> String {
    actions.iter().map(|action| action.label()).collect::<Vec<_>>().join(", ")
}
