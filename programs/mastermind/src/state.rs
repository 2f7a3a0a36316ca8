//! Account state definitions and the match/turn state machine
//!
//! All protocol decisions live here as pure methods over the account
//! data: handlers fetch accounts and the current slot, call one method,
//! then apply the returned payouts as lamport transfers. Nothing in this
//! module touches the runtime, so the whole state machine is exercised
//! by native unit tests.

use anchor_lang::prelude::*;

use crate::error::MatchError;
use mastermind_logic::{arbitrate, validate_code, CodeError, SeededRng, Verdict};

/// Hard bound on configurable code length (account space stays bounded).
pub const MAX_CODE_LENGTH: u8 = 16;

/// Hard bound on configurable turns per match.
pub const MAX_TURNS_PER_MATCH: u8 = 16;

/// Hard bound on configurable guesses per turn.
pub const MAX_GUESSES_PER_TURN: u8 = 16;

/// Salt length for secret commitments.
pub const SALT_LEN: usize = 16;

/// Commitment digest: SHA256(code || salt).
///
/// The salt keeps the tiny code space from being brute-forced out of
/// the published digest before reveal.
pub fn commitment_digest(code: &[u8], salt: &[u8; SALT_LEN]) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(code.len() + SALT_LEN);
    preimage.extend_from_slice(code);
    preimage.extend_from_slice(salt);
    solana_sha256_hasher::hash(&preimage).to_bytes()
}

/// Immutable game parameters, snapshotted from Config into every Match
/// at creation so later config changes can never touch a live match.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchRules {
    /// Symbols per code
    pub code_length: u8,
    /// Symbols are drawn from 0..alphabet_size
    pub alphabet_size: u8,
    /// Turns per match (roles swap each turn)
    pub turns_per_match: u8,
    /// Guess attempts per turn
    pub guesses_per_turn: u8,
    /// Codemaker bonus when the code survives every attempt
    pub extra_reward_points: u32,
    /// Slots from join until both stakes must be deposited
    pub deposit_deadline_slots: u64,
    /// Slots the codebreaker has to dispute after a reveal
    pub dispute_window_slots: u64,
    /// Slots from an AFK report until forfeiture may be claimed
    pub afk_timeout_slots: u64,
}

impl MatchRules {
    pub const SPACE: usize = 1 + // code_length
        1 +   // alphabet_size
        1 +   // turns_per_match
        1 +   // guesses_per_turn
        4 +   // extra_reward_points
        8 +   // deposit_deadline_slots
        8 +   // dispute_window_slots
        8;    // afk_timeout_slots

    pub fn validate(&self) -> Result<()> {
        require!(
            self.code_length >= 1 && self.code_length <= MAX_CODE_LENGTH,
            MatchError::InvalidConfig
        );
        require!(self.alphabet_size >= 2, MatchError::InvalidConfig);
        require!(
            self.turns_per_match >= 1 && self.turns_per_match <= MAX_TURNS_PER_MATCH,
            MatchError::InvalidConfig
        );
        require!(
            self.guesses_per_turn >= 1 && self.guesses_per_turn <= MAX_GUESSES_PER_TURN,
            MatchError::InvalidConfig
        );
        require!(self.deposit_deadline_slots > 0, MatchError::InvalidConfig);
        require!(self.dispute_window_slots > 0, MatchError::InvalidConfig);
        require!(self.afk_timeout_slots > 0, MatchError::InvalidConfig);
        Ok(())
    }
}

/// Global configuration account
#[account]
#[derive(Default)]
pub struct Config {
    /// Config owner; the only admin-capable identity
    pub admin: Pubkey,
    /// Rules stamped onto every new match
    pub rules: MatchRules,
    /// Sequential id for the next match
    pub next_match_id: u64,
    /// Live count of non-terminal matches
    pub active_matches: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 +  // admin
        MatchRules::SPACE +
        8 +   // next_match_id
        8 +   // active_matches
        1 +   // bump
        16;   // padding for future fields
}

/// Match state machine
///
/// Only advances forward; Deleted is terminal and reachable from any
/// non-Completed status.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    AwaitingOpponent,
    AwaitingStake,
    AwaitingDeposits,
    Active,
    Completed,
    Deleted,
}

/// Turn state machine
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    AwaitingCommitment,
    AwaitingGuess,
    AwaitingFeedback,
    Suspended,
    Completed,
}

/// One of the two participants. Scores and deposit flags are indexed by
/// this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Creator,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Creator => Side::Opponent,
            Side::Opponent => Side::Creator,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Creator => 0,
            Side::Opponent => 1,
        }
    }
}

/// The codemaker's feedback claim for one guess.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub exact: u8,
    pub near: u8,
}

impl Feedback {
    pub const SPACE: usize = 1 + 1;

    fn as_rule(&self) -> mastermind_logic::Feedback {
        mastermind_logic::Feedback { exact: self.exact, near: self.near }
    }
}

/// One guess and the (possibly still outstanding) feedback claim on it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Guess {
    pub code: Vec<u8>,
    pub feedback: Option<Feedback>,
}

impl Guess {
    pub const fn space(code_length: u8) -> usize {
        4 + code_length as usize + // code
        1 + Feedback::SPACE        // feedback option
    }
}

/// One turn of the match.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Turn {
    /// 0-based position in the match
    pub index: u8,
    pub code_maker: Pubkey,
    pub code_breaker: Pubkey,
    /// SHA256 commitment to the secret code
    pub commitment: [u8; 32],
    pub guesses: Vec<Guess>,
    /// Empty until the commitment check passes
    pub revealed_secret: Vec<u8>,
    pub state: TurnState,
    /// Set when the dispute window opens
    pub dispute_deadline_slot: u64,
}

impl Turn {
    /// A fresh turn awaiting the codemaker's commitment.
    fn opening(index: u8, code_maker: Pubkey, code_breaker: Pubkey) -> Self {
        Self {
            index,
            code_maker,
            code_breaker,
            commitment: [0u8; 32],
            guesses: Vec::new(),
            revealed_secret: Vec::new(),
            state: TurnState::AwaitingCommitment,
            dispute_deadline_slot: 0,
        }
    }

    pub const fn space(rules: &MatchRules) -> usize {
        1 +   // index
        32 +  // code_maker
        32 +  // code_breaker
        32 +  // commitment
        4 + rules.guesses_per_turn as usize * Guess::space(rules.code_length) +
        4 + rules.code_length as usize + // revealed_secret
        1 +   // state
        8     // dispute_deadline_slot
    }

    /// True when the last answered guess matched the whole code.
    fn solved(&self, code_length: u8) -> bool {
        self.guesses
            .last()
            .and_then(|g| g.feedback)
            .map(|f| f.exact == code_length)
            .unwrap_or(false)
    }
}

/// Lamports owed to each participant by a settlement. Every terminal
/// transition produces one of these; its total always equals the pool
/// it drained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payouts {
    pub to_creator: u64,
    pub to_opponent: u64,
}

impl Payouts {
    pub fn total(&self) -> u64 {
        self.to_creator + self.to_opponent
    }
}

/// Result of a feedback claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Guess failed, attempts remain
    NextAttempt,
    /// Code guessed; turn suspended pending reveal
    Solved,
    /// Attempt bound reached; turn suspended pending reveal
    Exhausted,
}

/// Result of a secret reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Commitment verified; codebreaker may dispute until this slot
    DisputeWindowOpened { deadline_slot: u64 },
    /// Commitment broken: codemaker forfeits, match Deleted
    CheatingDetected { payouts: Payouts },
}

/// Result of a dispute: exactly one side is found cheating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisputeOutcome {
    pub cheater: Side,
    pub payouts: Payouts,
}

/// Result of an undisputed turn end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Roles swapped, next turn opened
    NextTurn { points: u32, index: u8 },
    /// Last turn: match Completed and settled
    MatchCompleted { points: u32, payouts: Payouts },
}

/// A wagered match between two players.
#[account]
pub struct Match {
    /// Sequential match id
    pub id: u64,
    pub creator: Pubkey,
    /// Invitee before join (default = open), joined player after
    pub opponent: Pubkey,
    /// Fixed exactly once by the creator, > 0
    pub agreed_stake: u64,
    /// Deposit flags, indexed by Side
    pub deposited: [bool; 2],
    /// Set when the second player joins
    pub deposit_deadline_slot: u64,
    /// Escrowed lamports; zero on every terminal status
    pub pool: u64,
    /// Accumulated codemaker points, indexed by Side
    pub scores: [u32; 2],
    pub status: MatchStatus,
    /// Pending AFK accusation (default pubkey = none)
    pub afk_reporter: Pubkey,
    pub afk_deadline_slot: u64,
    /// Rules snapshotted from Config at creation
    pub rules: MatchRules,
    /// Append-only turn arena; the last entry is the current turn
    pub turns: Vec<Turn>,
    /// PDA bump seed
    pub bump: u8,
}

impl Match {
    pub fn space(rules: &MatchRules) -> usize {
        8 +   // discriminator
        8 +   // id
        32 +  // creator
        32 +  // opponent
        8 +   // agreed_stake
        2 +   // deposited
        8 +   // deposit_deadline_slot
        8 +   // pool
        8 +   // scores
        1 +   // status
        32 +  // afk_reporter
        8 +   // afk_deadline_slot
        MatchRules::SPACE +
        4 + rules.turns_per_match as usize * Turn::space(rules) +
        1 +   // bump
        16    // padding for future fields
    }

    /// A newly created match. `invitee` pins the opponent slot; `None`
    /// leaves the match open to anyone but the creator.
    pub fn open(id: u64, creator: Pubkey, invitee: Option<Pubkey>, rules: MatchRules, bump: u8) -> Self {
        Self {
            id,
            creator,
            opponent: invitee.unwrap_or_default(),
            agreed_stake: 0,
            deposited: [false; 2],
            deposit_deadline_slot: 0,
            pool: 0,
            scores: [0; 2],
            status: MatchStatus::AwaitingOpponent,
            afk_reporter: Pubkey::default(),
            afk_deadline_slot: 0,
            rules,
            turns: Vec::new(),
            bump,
        }
    }

    // ── Participants and views ───────────────────────────────────────

    /// Which side a key plays on. The opponent slot only counts once
    /// the second player has actually joined.
    pub fn side_of(&self, key: Pubkey) -> Option<Side> {
        if key == self.creator {
            Some(Side::Creator)
        } else if key == self.opponent && self.status != MatchStatus::AwaitingOpponent {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn player(&self, side: Side) -> Pubkey {
        match side {
            Side::Creator => self.creator,
            Side::Opponent => self.opponent,
        }
    }

    /// The second player, once joined.
    pub fn second_player(&self) -> Option<Pubkey> {
        match self.status {
            MatchStatus::AwaitingOpponent => None,
            _ => Some(self.opponent),
        }
    }

    /// Codemaker of the given turn.
    pub fn code_maker_of(&self, turn_index: u8) -> Result<Pubkey> {
        let turn = self
            .turns
            .get(turn_index as usize)
            .ok_or(MatchError::TurnNotFound)?;
        Ok(turn.code_maker)
    }

    /// Running scores as (creator, opponent).
    pub fn actual_points(&self) -> (u32, u32) {
        (self.scores[0], self.scores[1])
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, MatchStatus::Completed | MatchStatus::Deleted)
    }

    // ── Lobby: join, stake, deposits ─────────────────────────────────

    /// Second player joins; the deposit deadline starts counting.
    pub fn join(&mut self, caller: Pubkey, now_slot: u64) -> Result<()> {
        require!(
            self.status == MatchStatus::AwaitingOpponent,
            MatchError::InvalidMatchStatus
        );
        require!(caller != self.creator, MatchError::CreatorCannotJoin);
        if self.opponent != Pubkey::default() {
            require!(caller == self.opponent, MatchError::NotInvitedOpponent);
        }

        self.opponent = caller;
        self.status = MatchStatus::AwaitingStake;
        self.deposit_deadline_slot = now_slot
            .checked_add(self.rules.deposit_deadline_slots)
            .ok_or(MatchError::Overflow)?;
        Ok(())
    }

    /// Creator fixes the stake, exactly once.
    pub fn fix_stake(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        require!(caller == self.creator, MatchError::NotMatchCreator);
        match self.status {
            MatchStatus::AwaitingStake => {}
            MatchStatus::AwaitingDeposits | MatchStatus::Active => {
                return Err(MatchError::StakeAlreadySet.into())
            }
            _ => return Err(MatchError::InvalidMatchStatus.into()),
        }
        require!(amount > 0, MatchError::InvalidStakeAmount);

        self.agreed_stake = amount;
        self.status = MatchStatus::AwaitingDeposits;
        Ok(())
    }

    /// Record one participant's deposit. Returns true when both are in
    /// and the first turn should open.
    pub fn credit_deposit(&mut self, caller: Pubkey, amount: u64) -> Result<bool> {
        require!(
            self.status == MatchStatus::AwaitingDeposits,
            MatchError::InvalidMatchStatus
        );
        let side = self.side_of(caller).ok_or(MatchError::NotAParticipant)?;
        require!(amount == self.agreed_stake, MatchError::WrongDepositAmount);
        require!(!self.deposited[side.index()], MatchError::AlreadyDeposited);

        self.deposited[side.index()] = true;
        self.pool = self.pool.checked_add(amount).ok_or(MatchError::Overflow)?;
        Ok(self.deposited[0] && self.deposited[1])
    }

    /// Open turn 0 with a seeded-random initial codemaker. The only
    /// transition not triggered by a direct caller action on a turn.
    pub fn open_first_turn(&mut self, seed: &[u8; 32]) {
        let mut rng = SeededRng::new(seed, self.id);
        let maker = if rng.next_bool() { Side::Creator } else { Side::Opponent };
        self.turns.push(Turn::opening(0, self.player(maker), self.player(maker.other())));
        self.status = MatchStatus::Active;
    }

    // ── Turn protocol ────────────────────────────────────────────────

    fn current_turn_mut(&mut self, turn_index: u8) -> Result<&mut Turn> {
        require!(self.status == MatchStatus::Active, MatchError::InvalidMatchStatus);
        let count = self.turns.len();
        require!((turn_index as usize) < count, MatchError::TurnNotFound);
        require!(turn_index as usize == count - 1, MatchError::NotCurrentTurn);
        Ok(&mut self.turns[turn_index as usize])
    }

    /// Codemaker publishes the secret commitment, exactly once per turn.
    pub fn publish_commitment(
        &mut self,
        caller: Pubkey,
        turn_index: u8,
        digest: [u8; 32],
    ) -> Result<()> {
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_maker, MatchError::NotCodeMaker);
        match turn.state {
            TurnState::AwaitingCommitment => {}
            TurnState::AwaitingGuess | TurnState::AwaitingFeedback => {
                return Err(MatchError::CommitmentAlreadyPublished.into())
            }
            _ => return Err(MatchError::InvalidTurnState.into()),
        }

        turn.commitment = digest;
        turn.state = TurnState::AwaitingGuess;
        self.note_action(caller);
        Ok(())
    }

    /// Codebreaker submits the next guess.
    pub fn submit_guess(&mut self, caller: Pubkey, turn_index: u8, code: Vec<u8>) -> Result<()> {
        let rules = self.rules;
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_breaker, MatchError::NotCodeBreaker);
        require!(turn.state == TurnState::AwaitingGuess, MatchError::InvalidTurnState);
        validate_code(&code, rules.code_length, rules.alphabet_size).map_err(code_error)?;
        require!(
            turn.guesses.len() < rules.guesses_per_turn as usize,
            MatchError::InvalidTurnState
        );

        turn.guesses.push(Guess { code, feedback: None });
        turn.state = TurnState::AwaitingFeedback;
        self.note_action(caller);
        Ok(())
    }

    /// Codemaker answers the outstanding guess. The claim is recorded
    /// unchecked; it only meets ground truth in a dispute.
    pub fn submit_feedback(
        &mut self,
        caller: Pubkey,
        turn_index: u8,
        exact: u8,
        near: u8,
    ) -> Result<FeedbackOutcome> {
        let rules = self.rules;
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_maker, MatchError::NotCodeMaker);
        require!(turn.state == TurnState::AwaitingFeedback, MatchError::InvalidTurnState);
        require!(
            exact <= rules.code_length && near <= rules.code_length,
            MatchError::InvalidFeedback
        );

        let guess = turn.guesses.last_mut().ok_or(MatchError::InvalidTurnState)?;
        guess.feedback = Some(Feedback { exact, near });

        let outcome = if exact == rules.code_length {
            turn.state = TurnState::Suspended;
            FeedbackOutcome::Solved
        } else if turn.guesses.len() == rules.guesses_per_turn as usize {
            turn.state = TurnState::Suspended;
            FeedbackOutcome::Exhausted
        } else {
            turn.state = TurnState::AwaitingGuess;
            FeedbackOutcome::NextAttempt
        };
        self.note_action(caller);
        Ok(outcome)
    }

    /// Codemaker reveals the secret. A digest mismatch — or a secret
    /// that was never a legal code — is a cheating verdict, not an
    /// error: the call succeeds and the match terminates against the
    /// codemaker.
    pub fn reveal_secret(
        &mut self,
        caller: Pubkey,
        turn_index: u8,
        secret: Vec<u8>,
        salt: [u8; SALT_LEN],
        now_slot: u64,
    ) -> Result<RevealOutcome> {
        let rules = self.rules;
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_maker, MatchError::NotCodeMaker);
        require!(turn.state == TurnState::Suspended, MatchError::InvalidTurnState);
        require!(turn.revealed_secret.is_empty(), MatchError::InvalidTurnState);

        let honest = commitment_digest(&secret, &salt) == turn.commitment
            && validate_code(&secret, rules.code_length, rules.alphabet_size).is_ok();
        if !honest {
            let maker_side = self.side_of(caller).ok_or(MatchError::NotAParticipant)?;
            let payouts = self.forfeit_to(maker_side.other());
            return Ok(RevealOutcome::CheatingDetected { payouts });
        }

        let deadline_slot = now_slot
            .checked_add(rules.dispute_window_slots)
            .ok_or(MatchError::Overflow)?;
        turn.revealed_secret = secret;
        turn.dispute_deadline_slot = deadline_slot;
        self.note_action(caller);
        Ok(RevealOutcome::DisputeWindowOpened { deadline_slot })
    }

    /// Codebreaker contests the feedback claim on one guess.
    /// Arbitration always terminates the match against exactly one side.
    pub fn open_dispute(
        &mut self,
        caller: Pubkey,
        turn_index: u8,
        guess_index: u8,
        now_slot: u64,
    ) -> Result<DisputeOutcome> {
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_breaker, MatchError::NotCodeBreaker);
        require!(turn.state == TurnState::Suspended, MatchError::InvalidTurnState);
        require!(!turn.revealed_secret.is_empty(), MatchError::SecretNotRevealed);
        require!(now_slot <= turn.dispute_deadline_slot, MatchError::DisputeWindowClosed);

        let guess = turn
            .guesses
            .get(guess_index as usize)
            .ok_or(MatchError::GuessNotFound)?;
        let claimed = guess.feedback.ok_or(MatchError::InvalidTurnState)?;
        let verdict = arbitrate(&turn.revealed_secret, &guess.code, claimed.as_rule());

        let maker = turn.code_maker;
        let cheater = match verdict {
            // False claim: codemaker cheated
            Verdict::ClaimFalse => self.side_of(maker).ok_or(MatchError::NotAParticipant)?,
            // Honest claim: frivolous dispute, codebreaker forfeits
            Verdict::ClaimHonest => self
                .side_of(maker)
                .ok_or(MatchError::NotAParticipant)?
                .other(),
        };
        let payouts = self.forfeit_to(cheater.other());
        Ok(DisputeOutcome { cheater, payouts })
    }

    /// Codebreaker closes an undisputed turn after the window expires.
    /// Awards the codemaker's points, then swaps roles into the next
    /// turn or settles the completed match.
    pub fn end_turn(&mut self, caller: Pubkey, turn_index: u8, now_slot: u64) -> Result<TurnOutcome> {
        let rules = self.rules;
        let turn = self.current_turn_mut(turn_index)?;
        require!(caller == turn.code_breaker, MatchError::NotCodeBreaker);
        require!(turn.state == TurnState::Suspended, MatchError::InvalidTurnState);
        require!(!turn.revealed_secret.is_empty(), MatchError::SecretNotRevealed);
        require!(now_slot > turn.dispute_deadline_slot, MatchError::DisputeWindowOpen);

        let solved = turn.solved(rules.code_length);
        let points =
            mastermind_logic::turn_points(turn.guesses.len() as u8, solved, rules.extra_reward_points);
        turn.state = TurnState::Completed;
        let maker = turn.code_maker;
        let breaker = turn.code_breaker;
        let next_index = turn.index + 1;

        let maker_side = self.side_of(maker).ok_or(MatchError::NotAParticipant)?;
        self.scores[maker_side.index()] = self.scores[maker_side.index()]
            .checked_add(points)
            .ok_or(MatchError::Overflow)?;
        self.note_action(caller);

        if next_index == rules.turns_per_match {
            self.status = MatchStatus::Completed;
            let payouts = self.final_payouts();
            Ok(TurnOutcome::MatchCompleted { points, payouts })
        } else {
            // Roles swap: this turn's codebreaker makes the next code
            self.turns.push(Turn::opening(next_index, breaker, maker));
            Ok(TurnOutcome::NextTurn { points, index: next_index })
        }
    }

    // ── Timeouts and forfeiture ──────────────────────────────────────

    /// Refund path for a missed deposit deadline. The sole depositor
    /// reclaims their stake; if nobody deposited, either participant
    /// may delete the dead match.
    pub fn claim_deposit_refund(&mut self, caller: Pubkey, now_slot: u64) -> Result<Payouts> {
        require!(
            matches!(
                self.status,
                MatchStatus::AwaitingStake | MatchStatus::AwaitingDeposits
            ),
            MatchError::InvalidMatchStatus
        );
        require!(now_slot > self.deposit_deadline_slot, MatchError::DeadlineNotReached);
        let side = self.side_of(caller).ok_or(MatchError::NotAParticipant)?;

        if self.deposited[side.index()] {
            Ok(self.forfeit_to(side))
        } else {
            // Only the depositing party may claim a refund
            require!(!self.deposited[side.other().index()], MatchError::Unauthorized);
            self.status = MatchStatus::Deleted;
            Ok(Payouts::default())
        }
    }

    /// Manual AFK accusation against the counterpart.
    pub fn report_afk(&mut self, caller: Pubkey, now_slot: u64) -> Result<()> {
        require!(self.status == MatchStatus::Active, MatchError::InvalidMatchStatus);
        self.side_of(caller).ok_or(MatchError::NotAParticipant)?;
        require!(self.afk_reporter == Pubkey::default(), MatchError::AfkAlreadyReported);

        self.afk_reporter = caller;
        self.afk_deadline_slot = now_slot
            .checked_add(self.rules.afk_timeout_slots)
            .ok_or(MatchError::Overflow)?;
        Ok(())
    }

    /// Forfeiture claim after an uncontested AFK report ran out.
    pub fn claim_afk_forfeit(&mut self, caller: Pubkey, now_slot: u64) -> Result<Payouts> {
        require!(self.status == MatchStatus::Active, MatchError::InvalidMatchStatus);
        require!(self.afk_reporter != Pubkey::default(), MatchError::NoAfkReport);
        require!(caller == self.afk_reporter, MatchError::Unauthorized);
        require!(now_slot > self.afk_deadline_slot, MatchError::DeadlineNotReached);

        let side = self.side_of(caller).ok_or(MatchError::NotAParticipant)?;
        Ok(self.forfeit_to(side))
    }

    /// Any protocol action from the accused side voids a pending AFK
    /// report. Callers are authorized participants by the time this
    /// runs, so anyone other than the reporter is the accused.
    fn note_action(&mut self, actor: Pubkey) {
        if self.afk_reporter != Pubkey::default() && actor != self.afk_reporter {
            self.afk_reporter = Pubkey::default();
            self.afk_deadline_slot = 0;
        }
    }

    // ── Settlement ───────────────────────────────────────────────────

    /// Terminal forfeiture: the whole pool goes to the wronged side.
    fn forfeit_to(&mut self, side: Side) -> Payouts {
        self.status = MatchStatus::Deleted;
        let pool = self.pool;
        self.pool = 0;
        match side {
            Side::Creator => Payouts { to_creator: pool, to_opponent: 0 },
            Side::Opponent => Payouts { to_creator: 0, to_opponent: pool },
        }
    }

    /// Settlement of a completed match: winner takes the pool, a tie
    /// returns each stake to its own depositor.
    fn final_payouts(&mut self) -> Payouts {
        let pool = self.pool;
        self.pool = 0;
        match self.scores[0].cmp(&self.scores[1]) {
            core::cmp::Ordering::Greater => Payouts { to_creator: pool, to_opponent: 0 },
            core::cmp::Ordering::Less => Payouts { to_creator: 0, to_opponent: pool },
            core::cmp::Ordering::Equal => Payouts {
                to_creator: self.agreed_stake,
                to_opponent: pool - self.agreed_stake,
            },
        }
    }
}

fn code_error(err: CodeError) -> Error {
    match err {
        CodeError::WrongLength { .. } => MatchError::WrongCodeLength.into(),
        CodeError::SymbolOutOfRange { .. } => MatchError::SymbolOutOfRange.into(),
    }
}
