//! Turn protocol instructions: commit, guess, feedback, reveal,
//! dispute, end

use anchor_lang::prelude::*;

use crate::error::MatchError;
use crate::events::{
    CheatingPunished, CommitmentPublished, FeedbackSubmitted, GuessSubmitted, MatchDeleted,
    MatchSettled, SecretRevealed, TurnEnded, TurnStarted,
};
use crate::instructions::shared::apply_payouts;
use crate::state::{
    Config, FeedbackOutcome, Match, RevealOutcome, TurnOutcome, SALT_LEN,
};

/// Non-settling turn actions: commitment, guess, feedback.
#[derive(Accounts)]
pub struct TurnAction<'info> {
    #[account(
        mut,
        seeds = [b"match", game_match.id.to_le_bytes().as_ref()],
        bump = game_match.bump
    )]
    pub game_match: Account<'info, Match>,

    pub player: Signer<'info>,
}

/// Turn actions that can settle the match: reveal, dispute, end.
/// Both participant accounts are needed as payout targets.
#[derive(Accounts)]
pub struct TurnSettlement<'info> {
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

    /// CHECK: validated against the match record
    #[account(
        mut,
        constraint = creator.key() == game_match.creator @ MatchError::NotAParticipant
    )]
    pub creator: AccountInfo<'info>,

    /// CHECK: validated against the match record
    #[account(
        mut,
        constraint = opponent.key() == game_match.opponent @ MatchError::NotAParticipant
    )]
    pub opponent: AccountInfo<'info>,

    pub player: Signer<'info>,
}

pub fn publish_commitment(
    ctx: Context<TurnAction>,
    turn_index: u8,
    digest: [u8; 32],
) -> Result<()> {
    let game_match = &mut ctx.accounts.game_match;
    game_match.publish_commitment(ctx.accounts.player.key(), turn_index, digest)?;

    emit!(CommitmentPublished { match_id: game_match.id, turn_index });
    msg!("Match {} turn {}: commitment published", game_match.id, turn_index);

    Ok(())
}

pub fn submit_guess(ctx: Context<TurnAction>, turn_index: u8, code: Vec<u8>) -> Result<()> {
    let game_match = &mut ctx.accounts.game_match;
    game_match.submit_guess(ctx.accounts.player.key(), turn_index, code)?;

    let guess_index = game_match.turns[turn_index as usize].guesses.len() as u8 - 1;
    emit!(GuessSubmitted { match_id: game_match.id, turn_index, guess_index });
    msg!(
        "Match {} turn {}: guess {} submitted",
        game_match.id,
        turn_index,
        guess_index
    );

    Ok(())
}

pub fn submit_feedback(
    ctx: Context<TurnAction>,
    turn_index: u8,
    exact: u8,
    near: u8,
) -> Result<()> {
    let game_match = &mut ctx.accounts.game_match;
    let outcome =
        game_match.submit_feedback(ctx.accounts.player.key(), turn_index, exact, near)?;

    let guess_index = game_match.turns[turn_index as usize].guesses.len() as u8 - 1;
    emit!(FeedbackSubmitted {
        match_id: game_match.id,
        turn_index,
        guess_index,
        exact,
        near,
    });
    match outcome {
        FeedbackOutcome::NextAttempt => {
            msg!("Match {} turn {}: awaiting next guess", game_match.id, turn_index)
        }
        FeedbackOutcome::Solved => {
            msg!("Match {} turn {}: code guessed, awaiting reveal", game_match.id, turn_index)
        }
        FeedbackOutcome::Exhausted => {
            msg!("Match {} turn {}: attempts exhausted, awaiting reveal", game_match.id, turn_index)
        }
    }

    Ok(())
}

pub fn reveal_secret(
    ctx: Context<TurnSettlement>,
    turn_index: u8,
    secret: Vec<u8>,
    salt: [u8; SALT_LEN],
) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let player = ctx.accounts.player.key();
    let match_id = ctx.accounts.game_match.id;

    let outcome =
        ctx.accounts
            .game_match
            .reveal_secret(player, turn_index, secret, salt, now_slot)?;

    match outcome {
        RevealOutcome::DisputeWindowOpened { deadline_slot } => {
            emit!(SecretRevealed {
                match_id,
                turn_index,
                dispute_deadline_slot: deadline_slot,
            });
            msg!(
                "Match {} turn {}: secret revealed, disputes open until slot {}",
                match_id,
                turn_index,
                deadline_slot
            );
        }
        RevealOutcome::CheatingDetected { payouts } => {
            // Broken commitment: terminal verdict against the codemaker
            apply_payouts(
                &ctx.accounts.game_match.to_account_info(),
                &ctx.accounts.creator,
                &ctx.accounts.opponent,
                &payouts,
            )?;
            retire_match(&mut ctx.accounts.config)?;

            emit!(CheatingPunished { match_id, cheater: player, payout: payouts.total() });
            emit!(MatchDeleted { match_id });
            msg!(
                "Match {} deleted: revealed secret does not match commitment",
                match_id
            );
        }
    }

    Ok(())
}

pub fn open_dispute(ctx: Context<TurnSettlement>, turn_index: u8, guess_index: u8) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let player = ctx.accounts.player.key();
    let match_id = ctx.accounts.game_match.id;

    let outcome =
        ctx.accounts
            .game_match
            .open_dispute(player, turn_index, guess_index, now_slot)?;

    apply_payouts(
        &ctx.accounts.game_match.to_account_info(),
        &ctx.accounts.creator,
        &ctx.accounts.opponent,
        &outcome.payouts,
    )?;
    retire_match(&mut ctx.accounts.config)?;

    let cheater = ctx.accounts.game_match.player(outcome.cheater);
    emit!(CheatingPunished { match_id, cheater, payout: outcome.payouts.total() });
    emit!(MatchDeleted { match_id });
    msg!(
        "Match {} deleted: dispute on turn {} guess {} resolved against {}",
        match_id,
        turn_index,
        guess_index,
        cheater
    );

    Ok(())
}

pub fn end_turn(ctx: Context<TurnSettlement>, turn_index: u8) -> Result<()> {
    let now_slot = Clock::get()?.slot;
    let player = ctx.accounts.player.key();
    let match_id = ctx.accounts.game_match.id;

    let outcome = ctx
        .accounts
        .game_match
        .end_turn(player, turn_index, now_slot)?;

    match outcome {
        TurnOutcome::NextTurn { points, index } => {
            let code_maker = ctx.accounts.game_match.code_maker_of(index)?;
            emit!(TurnEnded { match_id, turn_index, points_awarded: points });
            emit!(TurnStarted { match_id, turn_index: index, code_maker });
            msg!(
                "Match {} turn {} ended (+{} points), turn {} codemaker is {}",
                match_id,
                turn_index,
                points,
                index,
                code_maker
            );
        }
        TurnOutcome::MatchCompleted { points, payouts } => {
            apply_payouts(
                &ctx.accounts.game_match.to_account_info(),
                &ctx.accounts.creator,
                &ctx.accounts.opponent,
                &payouts,
            )?;
            retire_match(&mut ctx.accounts.config)?;

            let game_match = &ctx.accounts.game_match;
            let (creator_points, opponent_points) = game_match.actual_points();
            let winner = match creator_points.cmp(&opponent_points) {
                core::cmp::Ordering::Greater => game_match.creator,
                core::cmp::Ordering::Less => game_match.opponent,
                core::cmp::Ordering::Equal => Pubkey::default(),
            };

            emit!(TurnEnded { match_id, turn_index, points_awarded: points });
            emit!(MatchSettled {
                match_id,
                scores: [creator_points, opponent_points],
                winner,
            });
            msg!(
                "Match {} completed {}:{}, winner {}",
                match_id,
                creator_points,
                opponent_points,
                winner
            );
        }
    }

    Ok(())
}

/// Drop a match from the live count on any terminal transition.
pub(crate) fn retire_match(config: &mut Account<Config>) -> Result<()> {
    config.active_matches = config
        .active_matches
        .checked_sub(1)
        .ok_or(MatchError::Overflow)?;
    Ok(())
}
