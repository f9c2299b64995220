use blackjack_advisor;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rules: ConfigRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRules {
    pub number_of_decks: u8,
    pub max_resplits: u8,
    pub double_policy: String,
    pub allow_das: bool,
    pub allow_late_surrender: bool,
}

impl TryInto<blackjack_advisor::TableRules> for ConfigRules {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<blackjack_advisor::TableRules, Self::Error> {
        let rules = blackjack_advisor::TableRules {
            number_of_decks: self.number_of_decks,
            max_resplits: self.max_resplits,
            double_policy: self.double_policy.parse()?,
            allow_das: self.allow_das,
            allow_late_surrender: self.allow_late_surrender,
        };

        Ok(rules)
    }
}

/// Reads the content of a given config file and parses it to a Config.
///
/// Panics if any error occurs.
pub fn parse_config_from_file(filename: &str) -> Config {
    let file_content = fs::read_to_string(filename).unwrap();
    serde_yaml::from_str(&file_content).unwrap()
}
