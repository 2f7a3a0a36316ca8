//! Helpers shared across instruction handlers

use anchor_lang::prelude::*;

use crate::error::MatchError;
use crate::state::Payouts;

/// Move escrowed lamports out of the match account.
pub fn pay_out(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    **from.try_borrow_mut_lamports()? -= amount;
    **to.try_borrow_mut_lamports()? += amount;
    Ok(())
}

/// Apply a terminal settlement to both participant accounts.
pub fn apply_payouts(
    match_info: &AccountInfo,
    creator: &AccountInfo,
    opponent: &AccountInfo,
    payouts: &Payouts,
) -> Result<()> {
    pay_out(match_info, creator, payouts.to_creator)?;
    pay_out(match_info, opponent, payouts.to_opponent)
}

/// Entropy for the turn-0 role assignment: the most recent slot hash,
/// mixed with the match id so concurrent matches in one slot differ.
pub fn seed_from_slot_hashes(slot_hashes: &AccountInfo, match_id: u64) -> Result<[u8; 32]> {
    let data = slot_hashes.try_borrow_data()?;
    require!(data.len() >= 48, MatchError::SlotHashUnavailable);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&data[16..48]);
    for (i, b) in match_id.to_le_bytes().iter().enumerate() {
        seed[i] ^= b;
    }
    Ok(seed)
}
