//! Admin instructions

use anchor_lang::prelude::*;

use crate::state::{Config, MatchRules};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub code_length: u8,
    pub alphabet_size: u8,
    pub turns_per_match: u8,
    pub guesses_per_turn: u8,
    pub extra_reward_points: u32,
    pub deposit_deadline_slots: u64,
    pub dispute_window_slots: u64,
    pub afk_timeout_slots: u64,
}

/// Initialize the global config (one-time setup). The rules are
/// immutable afterwards; every match snapshots them at creation.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    params: InitializeConfigParams,
) -> Result<()> {
    let InitializeConfigParams {
        code_length,
        alphabet_size,
        turns_per_match,
        guesses_per_turn,
        extra_reward_points,
        deposit_deadline_slots,
        dispute_window_slots,
        afk_timeout_slots,
    } = params;

    let rules = MatchRules {
        code_length,
        alphabet_size,
        turns_per_match,
        guesses_per_turn,
        extra_reward_points,
        deposit_deadline_slots,
        dispute_window_slots,
        afk_timeout_slots,
    };
    rules.validate()?;

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.rules = rules;
    config.next_match_id = 0;
    config.active_matches = 0;
    config.bump = ctx.bumps.config;

    msg!(
        "Config initialized by {}: {} symbols from alphabet of {}, {} turns x {} guesses",
        config.admin,
        code_length,
        alphabet_size,
        turns_per_match,
        guesses_per_turn,
    );

    Ok(())
}
