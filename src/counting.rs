use crate::session::shoe::Shoe;
use crate::session::Rank;

/// Hi-Lo tag for a single rank: low cards favor the player once gone, high
/// cards and Aces the opposite.
pub fn hi_lo_tag(rank: Rank) -> i32 {
    match rank.value() {
        2..=6 => 1,
        7..=9 => 0,
        _ => -1,
    }
}

/// Hi-Lo accumulator. The running count is the exact sum of tags for every
/// card registered since the last shoe reset; it deliberately survives
/// `next_hand`, because the count belongs to the shoe, not the round.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountState {
    running: i32,
}

impl CountState {
    pub fn new() -> CountState {
        CountState { running: 0 }
    }

    pub fn observe(&mut self, rank: Rank) {
        self.running += hi_lo_tag(rank);
    }

    pub fn running_count(&self) -> i32 {
        self.running
    }

    /// Running count normalized by the decks still in the shoe, rounded to
    /// one decimal. The denominator is floored at half a deck so the value
    /// stays finite near shoe exhaustion.
    pub fn true_count(&self, shoe: &Shoe) -> f64 {
        let decks = shoe.remaining_decks_estimate().max(0.5);
        let raw = self.running as f64 / decks;
        (raw * 10.0).round() / 10.0
    }

    /// Called on a physical reshuffle only.
    pub fn reset(&mut self) {
        self.running = 0;
    }
}
