// wordforge-generate: Write the words of a pattern definition.
//
// Reads a JSON pattern definition and writes every word whose length lies
// in the requested range, one per line, to stdout or a file.
//
// Usage:
//   wordforge-generate [OPTIONS] PATTERN.json
//
// Options:
//   --min N               Minimum word length (default 0)
//   --max N               Maximum word length (default 99)
//   -n, --limit N         Stop after N words
//   -o, --output FILE     Write to FILE instead of stdout
//   -h, --help            Print help

use std::io;
use std::path::Path;

use tracing::info;
use wordforge_cli::{fatal, parse_number, parse_range, single_path, take_value, write_wordlist};
use wordforge_pattern::TransformRegistry;

fn main() {
    wordforge_cli::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if wordforge_cli::wants_help(&args) {
        println!("wordforge-generate: Write the words of a pattern definition.");
        println!();
        println!("Usage: wordforge-generate [OPTIONS] PATTERN.json");
        println!();
        println!("Options:");
        println!("  --min N               Minimum word length (default 0)");
        println!("  --max N               Maximum word length (default 99)");
        println!("  -n, --limit N         Stop after N words");
        println!("  -o, --output FILE     Write to FILE instead of stdout");
        println!("  -h, --help            Print this help");
        println!();
        println!("Set WORDFORGE_LOG=debug for progress logging on stderr.");
        return;
    }

    let (range, args) = parse_range(&args).unwrap_or_else(|e| fatal(&e));
    let (limit, args) = take_value(&args, "--limit", Some("-n")).unwrap_or_else(|e| fatal(&e));
    let (output, args) = take_value(&args, "--output", Some("-o")).unwrap_or_else(|e| fatal(&e));
    let limit: Option<u64> = parse_number(limit.as_deref(), "--limit").unwrap_or_else(|e| fatal(&e));
    let path = single_path(&args, "pattern definition").unwrap_or_else(|e| fatal(&e));

    let registry = TransformRegistry::default();
    let pattern = wordforge_cli::load_pattern(&path, &registry).unwrap_or_else(|e| fatal(&e));
    let words = pattern.words(range);

    let result = match &output {
        Some(out_path) => {
            let file = wordforge_cli::create_output(Path::new(out_path))
                .unwrap_or_else(|e| fatal(&format!("failed to create {out_path}: {e}")));
            write_wordlist(words, file, limit)
        }
        None => write_wordlist(words, io::stdout().lock(), limit),
    };

    match result {
        Ok(written) => info!(written, output = output.as_deref().unwrap_or("-"), "wordlist written"),
        Err(e) => fatal(&e.to_string()),
    }
}
