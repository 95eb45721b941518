// wordforge-transform: Apply transforms to words from stdin.
//
// Reads words from stdin (one per non-blank line) and writes the result of
// applying the named transforms in sequence.
//
// Usage:
//   wordforge-transform [OPTIONS] NAME...
//
// Options:
//   --expand              Keep each word alongside its variants
//   --list                Print the available transform names
//   -h, --help            Print help

use std::io;

use wordforge_cli::{fatal, has_flag, read_items, write_wordlist};
use wordforge_pattern::{LengthRange, Pattern, TransformRegistry};

fn main() {
    wordforge_cli::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if wordforge_cli::wants_help(&args) {
        println!("wordforge-transform: Apply transforms to words from stdin.");
        println!();
        println!("Usage: wordforge-transform [OPTIONS] NAME...");
        println!();
        println!("Options:");
        println!("  --expand              Keep each word alongside its variants");
        println!("  --list                Print the available transform names");
        println!("  -h, --help            Print this help");
        return;
    }

    let registry = TransformRegistry::default();
    if has_flag(&args, &["--list"]) {
        for name in registry.names() {
            println!("{name}");
        }
        return;
    }

    let keep_originals = has_flag(&args, &["--expand"]);
    let names: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if names.is_empty() {
        fatal("no transform names given (see --list)");
    }

    let items = read_items(io::stdin().lock())
        .unwrap_or_else(|e| fatal(&format!("error reading stdin: {e}")));
    if items.is_empty() {
        return;
    }

    let mut pattern = Pattern::leaf(items).unwrap_or_else(|e| fatal(&e.to_string()));
    for name in names {
        pattern = if keep_originals {
            pattern.expand_named(&registry, name)
        } else {
            pattern.alter_named(&registry, name)
        }
        .unwrap_or_else(|e| fatal(&e.to_string()));
    }

    if let Err(e) = write_wordlist(pattern.words(LengthRange::unbounded()), io::stdout().lock(), None) {
        fatal(&e.to_string());
    }
}
