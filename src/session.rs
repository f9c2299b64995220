pub mod hand;
pub mod shoe;

use strum_macros::EnumIter;

use crate::counting::CountState;
use crate::errors::EngineError;
use crate::strategy::{Recommendation, StrategyTable};
use crate::TableRules;

use self::hand::Hand;
use self::shoe::{RemoveOutcome, Shoe};

/// A card rank as entered at the table. Court cards stay distinct symbols
/// even though they share a blackjack value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Blackjack value: 2..=10, with the Ace at its base value 1. Whether
    /// an Ace plays as 11 is the hand's business, not the card's.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{}", symbol)
    }
}

impl std::str::FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" | "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(()),
        }
    }
}

/// Where an observed card went. The zone only decides which hand the card
/// joins; the shoe and the count always see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Player,
    Dealer,
    Wasted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountsSnapshot {
    pub running_count: i32,
    pub true_count: f64,
    pub remaining_total: u16,
}

/// One table's worth of advisor state: shoe, count, the two hands and the
/// strategy table. The shell owns it as a plain value; there are no
/// process-wide singletons and no interior locking, so a multi-threaded
/// shell must serialize mutations itself.
#[derive(Debug)]
pub struct Session {
    rules: TableRules,
    table: StrategyTable,
    shoe: Shoe,
    counts: CountState,
    player_hand: Hand,
    dealer_hand: Hand,
}

impl Session {
    pub fn new(rules: TableRules) -> Result<Session, EngineError> {
        let shoe = Shoe::new(rules.number_of_decks)?;
        let table = StrategyTable::standard()?;
        Ok(Session {
            rules,
            table,
            shoe,
            counts: CountState::new(),
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
        })
    }

    /// Registers one observed card: depletes the shoe, updates the Hi-Lo
    /// count and appends to the zone's hand, all in one step so shoe and
    /// count can never drift apart. A card past the shoe's supply still
    /// counts; the entry was most likely a typo and the table keeps going.
    pub fn register_card(&mut self, rank: Rank, zone: Zone) -> RemoveOutcome {
        let outcome = self.shoe.remove_card(rank);
        self.counts.observe(rank);
        match zone {
            Zone::Player => self.player_hand.receive_card(rank),
            Zone::Dealer => self.dealer_hand.receive_card(rank),
            Zone::Wasted => {}
        }
        outcome
    }

    /// Clears both hands for the next round. Shoe and count persist: the
    /// cards are still gone from the shoe.
    pub fn next_hand(&mut self) {
        self.player_hand.clear();
        self.dealer_hand.clear();
    }

    /// Physical reshuffle: refills the shoe (optionally with a different
    /// deck count), zeroes the count and clears the hands. A rejected deck
    /// count leaves everything untouched.
    pub fn new_shoe(&mut self, number_of_decks: Option<u8>) -> Result<(), EngineError> {
        let decks = number_of_decks.unwrap_or(self.rules.number_of_decks);
        self.shoe.reset(decks)?;
        self.rules.number_of_decks = decks;
        self.counts.reset();
        self.player_hand.clear();
        self.dealer_hand.clear();
        Ok(())
    }

    /// Drops the second card of a split pair from the player's hand and
    /// returns it, so the shell can bank it for the follow-up hand. Shoe
    /// and count are untouched; the card stays seen.
    pub fn split_player_hand(&mut self) -> Result<Rank, EngineError> {
        if !self.player_hand.is_pair() {
            return Err(EngineError::InvalidHand {
                reason: "only a two-card pair can be split",
            });
        }
        match self.player_hand.pop_card() {
            Some(rank) => Ok(rank),
            None => Err(EngineError::InvalidHand {
                reason: "only a two-card pair can be split",
            }),
        }
    }

    pub fn recommendation(
        &self,
        split_count_so_far: u8,
        is_first_decision: bool,
    ) -> Result<Recommendation, EngineError> {
        let dealer_up = self
            .dealer_hand
            .cards()
            .first()
            .copied()
            .ok_or(EngineError::MissingInput)?;
        self.table.recommend(
            &self.rules,
            &self.player_hand,
            dealer_up,
            &self.counts,
            &self.shoe,
            split_count_so_far,
            is_first_decision,
        )
    }

    pub fn counts(&self) -> CountsSnapshot {
        CountsSnapshot {
            running_count: self.counts.running_count(),
            true_count: self.counts.true_count(&self.shoe),
            remaining_total: self.shoe.remaining_total(),
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }
}
