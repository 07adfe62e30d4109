// Standalone replay tool for territory bot debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay every game in the log
//   --game <id>            Replay a single game
//   --verbose              Show detailed output for each tick
//   --config <path>        Path to Bot.toml (default: Bot.toml)

use std::env;
use std::process;

use territory_bot::config::Config;
use territory_bot::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Territory Bot Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay every game in the log");
    eprintln!("  --game <id>             Replay a single game");
    eprintln!("  --verbose               Show detailed output for each tick");
    eprintln!("  --config <path>         Path to Bot.toml (default: Bot.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay territory_debug.jsonl --all");
    eprintln!("  replay territory_debug.jsonl --game g-42 --verbose");
}

enum Mode {
    All,
    Game(String),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(0);
    }
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let log_file = &args[1];
    let mut config_path = "Bot.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--game" => {
                let Some(id) = args.get(i + 1) else {
                    eprintln!("Error: --game requires an argument");
                    process::exit(1);
                };
                mode = Some(Mode::Game(id.clone()));
                i += 1;
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                };
                config_path = path.clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all or --game");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    let results = match mode {
        Mode::All => engine.replay_all(&entries),
        Mode::Game(id) => engine.replay_one(&entries, &id),
    };

    match results {
        Ok(results) => engine.print_report(&results),
        Err(e) => {
            eprintln!("Error during replay: {}", e);
            process::exit(1);
        }
    }
}
