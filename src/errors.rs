use thiserror::Error;

/// Everything the engine can reject. All of these are values handed back to
/// the shell; none of them should ever take the process down.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("number of decks must be between 1 and 8, got {decks}")]
    Configuration { decks: u8 },
    #[error("strategy table is incomplete: {reason}")]
    IncompleteStrategyTable { reason: &'static str },
    #[error("invalid player hand: {reason}")]
    InvalidHand { reason: &'static str },
    #[error("dealer up-card has not been registered")]
    MissingInput,
    #[error("shoe is empty, draw probabilities are undefined")]
    InsufficientShoeData,
}
