use super::Rank;

/// The ordered cards dealt to one participant in the current round.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
        }
    }

    pub fn receive_card(&mut self, rank: Rank) {
        self.cards.push(rank);
    }

    /// Takes back the most recently dealt card. Used when a pair is split
    /// and the second card moves to the follow-up hand.
    pub fn pop_card(&mut self) -> Option<Rank> {
        self.cards.pop()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum with every Ace counted as 1.
    fn hard_sum(&self) -> u16 {
        self.cards.iter().map(|rank| rank.value() as u16).sum()
    }

    /// Best total not exceeding 21, counting one Ace as 11 when that fits.
    pub fn best_total(&self) -> u16 {
        let hard = self.hard_sum();
        if self.holds_ace() && hard + 10 <= 21 {
            hard + 10
        } else {
            hard
        }
    }

    /// True while an Ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.holds_ace() && self.hard_sum() + 10 <= 21
    }

    /// Exactly two cards of equal blackjack value. Value, not symbol: a king
    /// and a queen form a pair of tens.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].value() == self.cards[1].value()
    }

    fn holds_ace(&self) -> bool {
        self.cards.iter().any(|rank| *rank == Rank::Ace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for rank in ranks {
            hand.receive_card(*rank);
        }
        hand
    }

    #[test]
    fn ace_counts_as_eleven_until_it_busts() {
        let hand = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(hand.best_total(), 17);
        assert!(hand.is_soft());

        let hand = hand_of(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(hand.best_total(), 16);
        assert!(!hand.is_soft());
    }

    #[test]
    fn two_aces_make_a_soft_twelve() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace]);
        assert_eq!(hand.best_total(), 12);
        assert!(hand.is_soft());
        assert!(hand.is_pair());
    }

    #[test]
    fn pairs_compare_by_value_not_symbol() {
        assert!(hand_of(&[Rank::King, Rank::Queen]).is_pair());
        assert!(hand_of(&[Rank::Eight, Rank::Eight]).is_pair());
        assert!(!hand_of(&[Rank::Eight, Rank::Nine]).is_pair());
        assert!(!hand_of(&[Rank::Eight, Rank::Eight, Rank::Eight]).is_pair());
    }

    #[test]
    fn popped_card_leaves_the_rest_in_order() {
        let mut hand = hand_of(&[Rank::Eight, Rank::Eight]);
        assert_eq!(hand.pop_card(), Some(Rank::Eight));
        assert_eq!(hand.cards(), &[Rank::Eight]);
        hand.clear();
        assert!(hand.is_empty());
        assert_eq!(hand.pop_card(), None);
    }
}
