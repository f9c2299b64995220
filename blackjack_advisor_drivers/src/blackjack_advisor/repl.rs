use std::io::{self, BufRead, Write};

use blackjack_advisor::{Rank, Session, TableRules, Zone};

/// True count at which taking insurance against a dealer Ace becomes
/// favorable under Hi-Lo.
const INSURANCE_TRUE_COUNT: f64 = 3.0;

/// Line-oriented card entry loop. The shell owns the split counter and the
/// first-decision flag; the engine only ever sees validated ranks.
pub fn run(rules: TableRules) -> Result<(), String> {
    let mut session = Session::new(rules).map_err(|error| error.to_string())?;
    let mut splits: u8 = 0;

    println!(
        "Blackjack advisor. {} deck(s) in the shoe. Type `help` for commands.",
        rules.number_of_decks
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|error| error.to_string())?;

        let mut line = String::new();
        let bytes = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|error| error.to_string())?;
        if bytes == 0 {
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (command, argument) = match tokens.as_slice() {
            [] => continue,
            [command] => (*command, None),
            [command, argument, ..] => (*command, Some(*argument)),
        };

        match command {
            "p" | "player" => register(&mut session, argument, Zone::Player),
            "d" | "dealer" => register(&mut session, argument, Zone::Dealer),
            "w" | "waste" => register(&mut session, argument, Zone::Wasted),
            "rec" | "advise" => advise(&session, splits),
            "counts" => print_counts(&session),
            "split" => match session.split_player_hand() {
                Ok(banked) => {
                    splits += 1;
                    println!(
                        "Split #{}. Banked one {} for the follow-up hand; enter the drawn card with `p <rank>`.",
                        splits, banked
                    );
                }
                Err(error) => println!("{}", error),
            },
            "next" => {
                session.next_hand();
                splits = 0;
                println!("Next hand. Count and shoe carry over.");
            }
            "shoe" => {
                let decks = match argument.map(str::parse::<u8>) {
                    None => None,
                    Some(Ok(decks)) => Some(decks),
                    Some(Err(_)) => {
                        println!("Usage: shoe [decks]");
                        continue;
                    }
                };
                match session.new_shoe(decks) {
                    Ok(()) => {
                        splits = 0;
                        println!(
                            "Fresh shoe with {} deck(s). Count reset.",
                            session.rules().number_of_decks
                        );
                    }
                    Err(error) => println!("{}", error),
                }
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command `{}`. Type `help` for commands.", command),
        }
    }

    Ok(())
}

fn register(session: &mut Session, argument: Option<&str>, zone: Zone) {
    let rank = match argument.and_then(|token| token.parse::<Rank>().ok()) {
        Some(rank) => rank,
        None => {
            println!("Expected a card rank: 2-10, J, Q, K or A.");
            return;
        }
    };
    if session.register_card(rank, zone).is_exhausted() {
        log::warn!("all {}s are already out of the shoe", rank);
        println!(
            "Warning: every {} has already been seen. Check the entry or reshuffle with `shoe`.",
            rank
        );
    }
}

fn advise(session: &Session, splits: u8) {
    let is_first_decision = session.player_hand().cards().len() == 2 && splits == 0;
    match session.recommendation(splits, is_first_decision) {
        Ok(recommendation) => {
            println!(
                "Hand {} ({}): {}",
                format_hand(session),
                session.player_hand().best_total(),
                recommendation.action
            );
            if let Some(probability) = recommendation.bust_probability {
                println!(
                    "Warning: {:.0}% chance of busting on the next card.",
                    probability * 100.0
                );
            }
            let counts = session.counts();
            if session.dealer_hand().cards().first() == Some(&Rank::Ace)
                && counts.true_count >= INSURANCE_TRUE_COUNT
            {
                println!(
                    "Consider insurance: true count {:.1}.",
                    counts.true_count
                );
            }
        }
        Err(error) => println!("{}", error),
    }
}

fn print_counts(session: &Session) {
    let counts = session.counts();
    println!(
        "Running count: {}  True count: {:.1}  Cards left: {} ({:.1} decks)",
        counts.running_count,
        counts.true_count,
        counts.remaining_total,
        session.shoe().remaining_decks_estimate()
    );
}

fn format_hand(session: &Session) -> String {
    session
        .player_hand()
        .cards()
        .iter()
        .map(|rank| rank.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn print_help() {
    println!("Commands:");
    println!("  p <rank>      register a card dealt to you (2-10, J, Q, K, A)");
    println!("  d <rank>      register a dealer card (first one is the up-card)");
    println!("  w <rank>      register a card seen elsewhere at the table");
    println!("  rec           recommend an action for the current hand");
    println!("  split         record a split of the current pair");
    println!("  counts        show running/true count and cards left");
    println!("  next          clear the hands for the next round");
    println!("  shoe [decks]  reshuffle, optionally changing the deck count");
    println!("  quit          leave");
}
