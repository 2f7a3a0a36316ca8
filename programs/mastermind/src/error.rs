//! Custom error codes
//!
//! Validation failures abort the whole instruction with no state
//! mutation. Cheating and AFK verdicts are protocol outcomes, not
//! errors — they never appear here.

use anchor_lang::prelude::*;

#[error_code]
pub enum MatchError {
    // Not found
    #[msg("Referenced turn does not exist")]
    TurnNotFound = 6000,

    #[msg("Referenced guess does not exist")]
    GuessNotFound = 6001,

    // Unauthorized
    #[msg("Not authorized to perform this action")]
    Unauthorized = 6002,

    #[msg("Caller is not a participant in this match")]
    NotAParticipant = 6003,

    #[msg("Only the match creator may do this")]
    NotMatchCreator = 6004,

    #[msg("Match is reserved for a different opponent")]
    NotInvitedOpponent = 6005,

    #[msg("Creator cannot join their own match")]
    CreatorCannotJoin = 6006,

    #[msg("Only the current codemaker may do this")]
    NotCodeMaker = 6007,

    #[msg("Only the current codebreaker may do this")]
    NotCodeBreaker = 6008,

    // Invalid state
    #[msg("Match is not in a valid status for this action")]
    InvalidMatchStatus = 6009,

    #[msg("Turn is not in a valid state for this action")]
    InvalidTurnState = 6010,

    #[msg("Action refers to a turn that is not the current one")]
    NotCurrentTurn = 6011,

    #[msg("Dispute window is still open")]
    DisputeWindowOpen = 6012,

    #[msg("Dispute window has closed")]
    DisputeWindowClosed = 6013,

    #[msg("Secret has not been revealed yet")]
    SecretNotRevealed = 6014,

    #[msg("Deadline has not been reached yet")]
    DeadlineNotReached = 6015,

    #[msg("No pending AFK report")]
    NoAfkReport = 6016,

    // Invalid parameter
    #[msg("Stake amount must be greater than zero")]
    InvalidStakeAmount = 6017,

    #[msg("Deposit must equal the agreed stake")]
    WrongDepositAmount = 6018,

    #[msg("Code length does not match the configuration")]
    WrongCodeLength = 6019,

    #[msg("Code contains a symbol outside the alphabet")]
    SymbolOutOfRange = 6020,

    #[msg("Feedback values exceed the code length")]
    InvalidFeedback = 6021,

    #[msg("Invalid configuration parameter")]
    InvalidConfig = 6022,

    #[msg("Invited opponent must differ from the creator")]
    InvalidOpponent = 6023,

    // Duplicate operation
    #[msg("Stake has already been set")]
    StakeAlreadySet = 6024,

    #[msg("Caller has already deposited")]
    AlreadyDeposited = 6025,

    #[msg("Commitment has already been published for this turn")]
    CommitmentAlreadyPublished = 6026,

    #[msg("An AFK report is already pending")]
    AfkAlreadyReported = 6027,

    // Infrastructure
    #[msg("SlotHashes sysvar unavailable")]
    SlotHashUnavailable = 6028,

    #[msg("Arithmetic overflow")]
    Overflow = 6029,
}
