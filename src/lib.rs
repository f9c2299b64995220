pub mod counting;
pub mod errors;
pub mod probability;
pub mod session;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use counting::CountState;
pub use errors::EngineError;
pub use session::hand::Hand;
pub use session::shoe::{RemoveOutcome, Shoe};
pub use session::{CountsSnapshot, Rank, Session, Zone};
pub use strategy::{Recommendation, StrategyTable};

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;

/// Table rules the advisor is configured with. Everything the resolver needs
/// to decide which actions are even available; the shoe composition and the
/// count live elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct TableRules {
    pub number_of_decks: u8,
    /// Maximum number of re-splits per round (3 means up to 4 hands).
    pub max_resplits: u8,
    pub double_policy: DoublePolicy,
    pub allow_das: bool,
    pub allow_late_surrender: bool,
}

impl Default for TableRules {
    fn default() -> Self {
        TableRules {
            number_of_decks: 1,
            max_resplits: 3,
            double_policy: DoublePolicy::AnyTwo,
            allow_das: true,
            allow_late_surrender: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum DoublePolicy {
    AnyTwo,
    NineTenElevenOnly,
    TenElevenOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::Double => "Double",
            Action::Split => "Split",
            Action::Surrender => "Surrender",
        };
        write!(f, "{}", name)
    }
}
