//! Feedback scoring and dispute arbitration
//!
//! The canonical multiset-intersection rule: exact counts positions
//! where secret and guess agree; near counts right-symbol-wrong-position
//! matches among the remaining positions. Any implementation of this
//! rule must be bit-for-bit reproducible — it is the ground truth a
//! dispute is settled against.

use serde::{Deserialize, Serialize};

/// Feedback on one guess: exact-position matches and symbol-only matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Positions where `secret[i] == guess[i]`.
    pub exact: u8,
    /// Right symbol, wrong position, among unmatched positions.
    pub near: u8,
}

impl Feedback {
    /// True when the guess matched the whole code.
    pub fn solves(&self, code_length: u8) -> bool {
        self.exact == code_length
    }
}

/// Score a guess against a secret.
///
/// Both slices must have the same length; the caller validates codes
/// before scoring. Symbols are opaque bytes — the rule needs no
/// knowledge of the alphabet bound.
pub fn score_guess(secret: &[u8], guess: &[u8]) -> Feedback {
    debug_assert_eq!(secret.len(), guess.len());

    let mut exact = 0u8;
    let mut secret_rest = [0u16; 256];
    let mut guess_rest = [0u16; 256];

    for (&s, &g) in secret.iter().zip(guess.iter()) {
        if s == g {
            exact += 1;
        } else {
            secret_rest[s as usize] += 1;
            guess_rest[g as usize] += 1;
        }
    }

    let mut near = 0u16;
    for (s, g) in secret_rest.iter().zip(guess_rest.iter()) {
        near += (*s).min(*g);
    }

    Feedback { exact, near: near as u8 }
}

/// Outcome of recomputing a disputed feedback claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The codemaker's claim matches ground truth; the dispute was frivolous.
    ClaimHonest,
    /// The codemaker's claim differs from ground truth.
    ClaimFalse,
}

/// Arbitrate a dispute over one guess: recompute feedback from the
/// revealed secret and compare against the codemaker's original claim.
pub fn arbitrate(secret: &[u8], guess: &[u8], claimed: Feedback) -> Verdict {
    if score_guess(secret, guess) == claimed {
        Verdict::ClaimHonest
    } else {
        Verdict::ClaimFalse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_exact_three_near() {
        assert_eq!(score_guess(b"ARBGR", b"BBRAV"), Feedback { exact: 0, near: 3 });
    }

    #[test]
    fn test_tarta_series() {
        assert_eq!(score_guess(b"TARTA", b"BARBA"), Feedback { exact: 3, near: 0 });
        assert_eq!(score_guess(b"TARTA", b"BATCA"), Feedback { exact: 2, near: 1 });
        assert_eq!(score_guess(b"TARTA", b"TARTA"), Feedback { exact: 5, near: 0 });
    }

    #[test]
    fn test_repeated_symbols_count_once() {
        // One A in the secret, three in the guess: only one near match
        assert_eq!(score_guess(b"ABCD", b"EAAA"), Feedback { exact: 0, near: 1 });
        // Exact match consumes the symbol before near counting
        assert_eq!(score_guess(b"AABB", b"AAAA"), Feedback { exact: 2, near: 0 });
    }

    #[test]
    fn test_all_near() {
        assert_eq!(score_guess(b"ABCD", b"DCBA"), Feedback { exact: 0, near: 4 });
    }

    #[test]
    fn test_solves() {
        assert!(score_guess(b"TARTA", b"TARTA").solves(5));
        assert!(!score_guess(b"TARTA", b"BARBA").solves(5));
    }

    #[test]
    fn test_arbitrate_honest_claim() {
        let truth = score_guess(b"TARTA", b"BATCA");
        assert_eq!(arbitrate(b"TARTA", b"BATCA", truth), Verdict::ClaimHonest);
    }

    #[test]
    fn test_arbitrate_false_claim() {
        let lie = Feedback { exact: 1, near: 1 };
        assert_eq!(arbitrate(b"TARTA", b"BATCA", lie), Verdict::ClaimFalse);
    }

    proptest! {
        #[test]
        fn prop_counts_bounded(secret in proptest::collection::vec(0u8..8, 5),
                               guess in proptest::collection::vec(0u8..8, 5)) {
            let fb = score_guess(&secret, &guess);
            prop_assert!(u16::from(fb.exact) + u16::from(fb.near) <= 5);
        }

        #[test]
        fn prop_self_guess_is_all_exact(secret in proptest::collection::vec(0u8..8, 5)) {
            let fb = score_guess(&secret, &secret);
            prop_assert_eq!(fb, Feedback { exact: 5, near: 0 });
        }

        #[test]
        fn prop_near_is_symmetric(secret in proptest::collection::vec(0u8..8, 5),
                                  guess in proptest::collection::vec(0u8..8, 5)) {
            // Swapping secret and guess preserves both counts: the rule
            // is a multiset intersection
            let a = score_guess(&secret, &guess);
            let b = score_guess(&guess, &secret);
            prop_assert_eq!(a, b);
        }
    }
}
