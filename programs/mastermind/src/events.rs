//! Protocol events
//!
//! One event per externally observable outcome. Emitted together with
//! the state mutation, so they share the instruction's atomicity.

use anchor_lang::prelude::*;

#[event]
pub struct MatchCreated {
    pub match_id: u64,
    pub creator: Pubkey,
    /// Default pubkey for an open match
    pub invitee: Pubkey,
}

#[event]
pub struct OpponentJoined {
    pub match_id: u64,
    pub opponent: Pubkey,
    pub deposit_deadline_slot: u64,
}

#[event]
pub struct StakeFixed {
    pub match_id: u64,
    pub amount: u64,
}

#[event]
pub struct StakeDeposited {
    pub match_id: u64,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TurnStarted {
    pub match_id: u64,
    pub turn_index: u8,
    pub code_maker: Pubkey,
}

#[event]
pub struct CommitmentPublished {
    pub match_id: u64,
    pub turn_index: u8,
}

#[event]
pub struct GuessSubmitted {
    pub match_id: u64,
    pub turn_index: u8,
    pub guess_index: u8,
}

#[event]
pub struct FeedbackSubmitted {
    pub match_id: u64,
    pub turn_index: u8,
    pub guess_index: u8,
    pub exact: u8,
    pub near: u8,
}

#[event]
pub struct SecretRevealed {
    pub match_id: u64,
    pub turn_index: u8,
    pub dispute_deadline_slot: u64,
}

#[event]
pub struct TurnEnded {
    pub match_id: u64,
    pub turn_index: u8,
    pub points_awarded: u32,
}

#[event]
pub struct MatchSettled {
    pub match_id: u64,
    pub scores: [u32; 2],
    /// Default pubkey on a tie
    pub winner: Pubkey,
}

#[event]
pub struct CheatingPunished {
    pub match_id: u64,
    pub cheater: Pubkey,
    pub payout: u64,
}

#[event]
pub struct AfkReported {
    pub match_id: u64,
    pub reporter: Pubkey,
    pub deadline_slot: u64,
}

#[event]
pub struct MatchDeleted {
    pub match_id: u64,
}
