use super::Rank;
use crate::errors::EngineError;
use crate::{MAX_DECKS, MIN_DECKS};

const CARDS_PER_DECK: u16 = 52;

/// Tracks the cards still waiting in the shoe, one counter per rank symbol.
/// J, Q and K are tracked separately even though they share a blackjack
/// value, so a mis-entered court card only affects its own counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    counts: [u16; 13],
    total: u16,
    number_of_decks: u8,
}

/// Result of removing a card. `Exhausted` means the counter was already at
/// zero; the shoe clamps instead of going negative, because the card was
/// most likely mis-entered and the engine has to stay usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum RemoveOutcome {
    Removed,
    Exhausted,
}

impl RemoveOutcome {
    pub fn is_exhausted(&self) -> bool {
        *self == RemoveOutcome::Exhausted
    }
}

impl Shoe {
    /// Creates a full shoe of the given size. The deck count is the only
    /// hard failure in the model.
    pub fn new(number_of_decks: u8) -> Result<Shoe, EngineError> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&number_of_decks) {
            return Err(EngineError::Configuration {
                decks: number_of_decks,
            });
        }
        let per_rank = number_of_decks as u16 * 4;
        Ok(Shoe {
            counts: [per_rank; 13],
            total: number_of_decks as u16 * CARDS_PER_DECK,
            number_of_decks,
        })
    }

    /// Refills the shoe, optionally with a different deck count. Validates
    /// before touching any state so a rejected reset leaves the shoe as-is.
    pub fn reset(&mut self, number_of_decks: u8) -> Result<(), EngineError> {
        *self = Shoe::new(number_of_decks)?;
        Ok(())
    }

    /// Removes one card of the given rank. Clamps at zero and reports
    /// `Exhausted` rather than failing.
    pub fn remove_card(&mut self, rank: Rank) -> RemoveOutcome {
        let index = rank.index();
        if self.counts[index] == 0 {
            return RemoveOutcome::Exhausted;
        }
        self.counts[index] -= 1;
        self.total -= 1;
        RemoveOutcome::Removed
    }

    pub fn remaining_count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    pub fn remaining_total(&self) -> u16 {
        self.total
    }

    pub fn remaining_decks_estimate(&self) -> f64 {
        self.total as f64 / CARDS_PER_DECK as f64
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }
}
