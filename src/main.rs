use std::path::PathBuf;
use std::process::ExitCode;

use wordlens::config::AppConfig;
use wordlens::core::resolver::MatchStage;
use wordlens::LexiconEngine;

const USAGE: &str = "usage: wordlens [FEED] <WORD> [CONTEXT...]";

fn main() -> ExitCode {
    let (config, source) = AppConfig::load();
    let _log_guard = wordlens::core::logging::init(&config.log_dir());
    log::info!("{} v{} starting", wordlens::NAME, wordlens::VERSION);
    source.log();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((feed, word, context)) = parse_args(&args, config.lexicon.feed_path.as_ref()) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let engine = LexiconEngine::new(config.engine_config());
    match engine.load_feed(&feed) {
        Ok(report) if !report.skipped.is_empty() => {
            eprintln!(
                "warning: skipped {} malformed record(s) in {}",
                report.skipped.len(),
                feed.display()
            );
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("error: lexicon unavailable: {e}");
            return ExitCode::FAILURE;
        }
    }

    match engine.lookup(&word, &context) {
        Some(found) => {
            print!("{} [{}", found.entry.headword, found.stage);
            if found.stage == MatchStage::Fuzzy {
                print!(" {:.2}", found.similarity);
            }
            println!("]");
            if let Some(definition) = found.definition() {
                println!("  {} {}", definition.part_of_speech, definition.meaning);
                if let Some(secondary) = &definition.secondary_meaning {
                    println!("  ({secondary})");
                }
            }
            ExitCode::SUCCESS
        }
        None => {
            println!("{word}: not found");
            let suggestions = engine.suggest(&word, config.resolver.suggestion_limit);
            if !suggestions.is_empty() {
                let words: Vec<&str> = suggestions.iter().map(|s| s.headword.as_str()).collect();
                println!("  did you mean: {}", words.join(", "));
            }
            ExitCode::from(1)
        }
    }
}

/// Split arguments into `(feed, word, context)`. The feed may be omitted
/// when the config names one.
fn parse_args(args: &[String], default_feed: Option<&PathBuf>) -> Option<(PathBuf, String, String)> {
    match (args, default_feed) {
        ([feed, word, context @ ..], _) if default_feed.is_none() || is_feed(feed) => {
            Some((PathBuf::from(feed), word.clone(), context.join(" ")))
        }
        ([word, context @ ..], Some(feed)) => Some((feed.clone(), word.clone(), context.join(" "))),
        _ => None,
    }
}

fn is_feed(arg: &str) -> bool {
    let path = PathBuf::from(arg);
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "jsonl" | "ndjson")
    )
}
