use blackjack_advisor::TableRules;
use blackjack_advisor_drivers::parse_config_from_file;
use clap::Parser;

mod repl;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_advisor.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of decks in the shoe, overriding the config file
    #[arg(short, long)]
    decks: Option<u8>,
}

fn main() {
    env_logger::init();
    let args = CommandLineArgs::parse();

    let mut rules = load_rules(&args.config);
    if let Some(decks) = args.decks {
        rules.number_of_decks = decks;
    }

    if let Err(message) = repl::run(rules) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn load_rules(config: &str) -> TableRules {
    if config == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().expect("Cannot find home directory");
        let config_file_path = home_dir.join(".blackjack_advisor.yml");
        if !config_file_path.exists() {
            log::info!(
                "no config file at {}, using default table rules",
                config_file_path.display()
            );
            return TableRules::default();
        }
        if config_file_path.is_dir() {
            panic!("This should be a path rather than a directory");
        }
        let path = String::from(config_file_path.to_str().unwrap());
        parse_config_from_file(&path)
            .rules
            .try_into()
            .expect("Config file contains invalid table rules")
    } else {
        parse_config_from_file(config)
            .rules
            .try_into()
            .expect("Config file contains invalid table rules")
    }
}
