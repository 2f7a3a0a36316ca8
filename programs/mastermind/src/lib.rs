//! Mastermind Arena - Wagered Code-Breaking Duels
//!
//! A Solana smart contract arbitrating two-party Mastermind matches
//! without trusting either player: stake escrow, per-turn commit-reveal
//! guessing, feedback dispute arbitration and AFK forfeiture.

use anchor_lang::prelude::*;

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "Mastermind Arena",
    project_url: "https://github.com/mastermind-arena/program",
    contacts: "email:security@mastermind-arena.dev",
    policy: "https://github.com/mastermind-arena/program/blob/main/SECURITY.md"
}

declare_id!("8JD6JtkBzExbDZkpQBvowXngMr9tDqLwf5sGGjBacwK8");

#[program]
pub mod mastermind {
    use super::*;

    /// Initialize the global config (one-time setup)
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::admin::initialize_config(ctx, params)
    }

    /// Create a match anyone may join
    pub fn create_open_match(ctx: Context<CreateMatch>) -> Result<()> {
        instructions::lobby::create_open_match(ctx)
    }

    /// Create a match reserved for a specific opponent
    pub fn create_invited_match(ctx: Context<CreateMatch>, invitee: Pubkey) -> Result<()> {
        instructions::lobby::create_invited_match(ctx, invitee)
    }

    /// Fill the opponent slot of an awaiting match
    pub fn join_match(ctx: Context<JoinMatch>) -> Result<()> {
        instructions::lobby::join_match(ctx)
    }

    /// Fix the wager (creator only, exactly once, > 0)
    pub fn set_stake(ctx: Context<SetStake>, amount: u64) -> Result<()> {
        instructions::lobby::set_stake(ctx, amount)
    }

    /// Escrow the agreed stake; the second deposit opens turn 0
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::lobby::deposit(ctx, amount)
    }

    /// Reclaim a stake after the deposit deadline lapsed
    pub fn request_refund_match_stake(ctx: Context<RequestRefundMatchStake>) -> Result<()> {
        instructions::forfeit::request_refund_match_stake(ctx)
    }

    /// Publish the secret commitment for a turn (codemaker)
    pub fn publish_commitment(
        ctx: Context<TurnAction>,
        turn_index: u8,
        digest: [u8; 32],
    ) -> Result<()> {
        instructions::turn::publish_commitment(ctx, turn_index, digest)
    }

    /// Submit a guess (codebreaker)
    pub fn submit_guess(ctx: Context<TurnAction>, turn_index: u8, code: Vec<u8>) -> Result<()> {
        instructions::turn::submit_guess(ctx, turn_index, code)
    }

    /// Answer the outstanding guess (codemaker's unchecked claim)
    pub fn submit_feedback(
        ctx: Context<TurnAction>,
        turn_index: u8,
        exact: u8,
        near: u8,
    ) -> Result<()> {
        instructions::turn::submit_feedback(ctx, turn_index, exact, near)
    }

    /// Reveal the secret: opens the dispute window, or terminates the
    /// match against a codemaker whose commitment does not check out
    pub fn reveal_secret(
        ctx: Context<TurnSettlement>,
        turn_index: u8,
        secret: Vec<u8>,
        salt: [u8; 16],
    ) -> Result<()> {
        instructions::turn::reveal_secret(ctx, turn_index, secret, salt)
    }

    /// Contest a feedback claim within the dispute window (codebreaker)
    pub fn open_dispute(
        ctx: Context<TurnSettlement>,
        turn_index: u8,
        guess_index: u8,
    ) -> Result<()> {
        instructions::turn::open_dispute(ctx, turn_index, guess_index)
    }

    /// Close an undisputed turn after the window expires (codebreaker)
    pub fn end_turn(ctx: Context<TurnSettlement>, turn_index: u8) -> Result<()> {
        instructions::turn::end_turn(ctx, turn_index)
    }

    /// Accuse the counterpart of stalling; starts the AFK clock
    pub fn report_opponent_afk(ctx: Context<ReportOpponentAfk>) -> Result<()> {
        instructions::forfeit::report_opponent_afk(ctx)
    }

    /// Claim the double-stake forfeit after an uncontested AFK report
    pub fn request_refund_for_afk(ctx: Context<RequestRefundForAfk>) -> Result<()> {
        instructions::forfeit::request_refund_for_afk(ctx)
    }
}
