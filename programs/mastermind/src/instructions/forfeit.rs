//! Timeout and forfeiture instructions: deposit deadline, AFK

use anchor_lang::prelude::*;

use crate::events::{AfkReported, MatchDeleted};
use crate::instructions::shared::pay_out;
use crate::instructions::turn::retire_match;
use crate::state::{Config, Match};

/// Reclaim a stake after the deposit deadline passed with the match
/// never going active.
#[derive(Accounts)]
pub struct RequestRefundMatchStake<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    #[account(mut)]
    pub caller: Signer<'info>,
}

pub fn request_refund_match_stake(ctx: Context<RequestRefundMatchStake>) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let caller = ctx.accounts.caller.key();
    let match_id = ctx.accounts.game_match.id;

    let payouts = ctx
        .accounts
        .game_match
        .claim_deposit_refund(caller, now_slot)?;

    // At most one side ever deposited here, and it is the caller
    pay_out(
        &ctx.accounts.game_match.to_account_info(),
        &ctx.accounts.caller.to_account_info(),
        payouts.total(),
    )?;
    retire_match(&mut ctx.accounts.config)?;

    emit!(MatchDeleted { match_id });
    msg!(
        "Match {} deleted: deposit deadline missed, {} refunded to {}",
        match_id,
        payouts.total(),
        caller
    );

    Ok(())
}

/// Accuse the counterpart of stalling. Starts the AFK clock; any
/// protocol action from the accused clears it.
#[derive(Accounts)]
pub struct ReportOpponentAfk<'info> {
    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    pub reporter: Signer<'info>,
}

pub fn report_opponent_afk(ctx: Context<ReportOpponentAfk>) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let game_match = &mut ctx.accounts.game_match;

    game_match.report_afk(ctx.accounts.reporter.key(), now_slot)?;

    emit!(AfkReported {
        match_id: game_match.id,
        reporter: game_match.afk_reporter,
        deadline_slot: game_match.afk_deadline_slot,
    });
    msg!(
        "Match {}: AFK reported by {}, forfeit claimable after slot {}",
        game_match.id,
        game_match.afk_reporter,
        game_match.afk_deadline_slot
    );

    Ok(())
}

/// Claim the double-stake forfeit after an uncontested AFK report.
#[derive(Accounts)]
pub struct RequestRefundForAfk<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    #[account(mut)]
    pub reporter: Signer<'info>,
}

pub fn request_refund_for_afk(ctx: Context<RequestRefundForAfk>) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let reporter = ctx.accounts.reporter.key();
    let match_id = ctx.accounts.game_match.id;

    let payouts = ctx.accounts.game_match.claim_afk_forfeit(reporter, now_slot)?;

    // Forfeit goes to the reporter in full
    pay_out(
        &ctx.accounts.game_match.to_account_info(),
        &ctx.accounts.reporter.to_account_info(),
        payouts.total(),
    )?;
    retire_match(&mut ctx.accounts.config)?;

    emit!(MatchDeleted { match_id });
    msg!(
        "Match {} deleted: AFK confirmed, {} paid to reporter {}",
        match_id,
        payouts.total(),
        reporter
    );

    Ok(())
}
