use strum::IntoEnumIterator;

use crate::errors::EngineError;
use crate::session::shoe::Shoe;
use crate::session::Rank;

/// Probability that exactly one more card from the current shoe composition
/// pushes the hand past 21.
///
/// A soft hand cannot bust on the immediate next card: whatever is drawn,
/// the Ace drops back to 1 and the total stays at or below 21. An empty
/// shoe yields `InsufficientShoeData`; callers must treat that as "cannot
/// estimate", never as a 0% bust risk.
pub fn bust_probability(
    current_total: u16,
    is_soft: bool,
    shoe: &Shoe,
) -> Result<f64, EngineError> {
    if current_total > 21 {
        return Err(EngineError::InvalidHand {
            reason: "hand total already exceeds 21",
        });
    }
    if shoe.remaining_total() == 0 {
        return Err(EngineError::InsufficientShoeData);
    }
    if is_soft {
        return Ok(0.0);
    }

    let busting: u16 = Rank::iter()
        .filter(|rank| rank.value() as u16 + current_total > 21)
        .map(|rank| shoe.remaining_count(rank))
        .sum();
    Ok(busting as f64 / shoe.remaining_total() as f64)
}

/// Chance that the next card drawn is of the given rank symbol.
pub fn rank_draw_probability(rank: Rank, shoe: &Shoe) -> Result<f64, EngineError> {
    if shoe.remaining_total() == 0 {
        return Err(EngineError::InsufficientShoeData);
    }
    Ok(shoe.remaining_count(rank) as f64 / shoe.remaining_total() as f64)
}
