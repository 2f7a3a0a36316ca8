//! Lobby instructions: match creation, joining, stake and deposits

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::error::MatchError;
use crate::events::{MatchCreated, OpponentJoined, StakeDeposited, StakeFixed, TurnStarted};
use crate::instructions::shared::seed_from_slot_hashes;
use crate::state::{Config, Match};

/// Create a new match. The match account is sized for the whole game
/// up front: every turn with its full guess capacity.
#[derive(Accounts)]
pub struct CreateMatch<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = creator,
        space = Match::space(&config.rules),
        seeds = [b"match", config.next_match_id.to_le_bytes().as_ref()],
        bump
    )]
    pub game_match: Account<'info, Match>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Create a match anyone may join.
pub fn create_open_match(ctx: Context<CreateMatch>) -> Result<()> {
    create_match(ctx, None)
}

/// Create a match only the invitee may join.
pub fn create_invited_match(ctx: Context<CreateMatch>, invitee: Pubkey) -> Result<()> {
    create_match(ctx, Some(invitee))
}

fn create_match(ctx: Context<CreateMatch>, invitee: Option<Pubkey>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let creator = ctx.accounts.creator.key();

    if let Some(invitee) = invitee {
        require!(invitee != Pubkey::default(), MatchError::InvalidOpponent);
        require!(invitee != creator, MatchError::InvalidOpponent);
    }

    let id = config.next_match_id;
    ctx.accounts.game_match.set_inner(Match::open(
        id,
        creator,
        invitee,
        config.rules,
        ctx.bumps.game_match,
    ));

    config.next_match_id = id.checked_add(1).ok_or(MatchError::Overflow)?;
    config.active_matches = config
        .active_matches
        .checked_add(1)
        .ok_or(MatchError::Overflow)?;

    emit!(MatchCreated {
        match_id: id,
        creator,
        invitee: invitee.unwrap_or_default(),
    });
    msg!("Match {} created by {}", id, creator);

    Ok(())
}

/// Fill the opponent slot of an awaiting match.
#[derive(Accounts)]
pub struct JoinMatch<'info> {
    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    pub joiner: Signer<'info>,
}

pub fn join_match(ctx: Context<JoinMatch>) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let game_match = &mut ctx.accounts.game_match;

    game_match.join(ctx.accounts.joiner.key(), now_slot)?;

    emit!(OpponentJoined {
        match_id: game_match.id,
        opponent: game_match.opponent,
        deposit_deadline_slot: game_match.deposit_deadline_slot,
    });
    msg!(
        "Player {} joined match {}, deposits due by slot {}",
        game_match.opponent,
        game_match.id,
        game_match.deposit_deadline_slot
    );

    Ok(())
}

/// Creator fixes the wager, exactly once.
#[derive(Accounts)]
pub struct SetStake<'info> {
    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    pub creator: Signer<'info>,
}

pub fn set_stake(ctx: Context<SetStake>, amount: u64) -> Result<()> {
    let game_match = &mut ctx.accounts.game_match;

    game_match.fix_stake(ctx.accounts.creator.key(), amount)?;

    emit!(StakeFixed { match_id: game_match.id, amount });
    msg!("Match {} stake fixed at {} lamports", game_match.id, amount);

    Ok(())
}

/// Escrow one participant's stake. The second deposit opens turn 0 with
/// a random initial codemaker.
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    #[account(mut)]
    pub player: Signer<'info>,

    /// CHECK: SlotHashes sysvar for turn-0 randomness
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub slot_hashes: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let both_deposited = ctx.accounts.game_match.credit_deposit(player, amount)?;

    // Move the stake into escrow
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.game_match.to_account_info(),
            },
        ),
        amount,
    )?;

    let match_id = ctx.accounts.game_match.id;
    emit!(StakeDeposited { match_id, player, amount });
    msg!("Player {} deposited {} into match {}", player, amount, match_id);

    if both_deposited {
        let seed = seed_from_slot_hashes(&ctx.accounts.slot_hashes, match_id)?;
        let game_match = &mut ctx.accounts.game_match;
        game_match.open_first_turn(&seed);

        let code_maker = game_match.code_maker_of(0)?;
        emit!(TurnStarted { match_id, turn_index: 0, code_maker });
        msg!("Match {} active, turn 0 codemaker is {}", match_id, code_maker);
    }

    Ok(())
}
