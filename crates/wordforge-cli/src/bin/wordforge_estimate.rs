// wordforge-estimate: Count the words of a pattern definition.
//
// Prints the exact number of words whose length lies in the requested
// range, without generating them.
//
// Usage:
//   wordforge-estimate [OPTIONS] PATTERN.json
//
// Options:
//   --min N               Minimum word length (default 0)
//   --max N               Maximum word length (default 99)
//   --histogram           Also print "LENGTH<TAB>COUNT" for each length in range
//   -h, --help            Print help

use std::io::{self, Write};

use wordforge_cli::{fatal, has_flag, parse_range, single_path};
use wordforge_pattern::{TransformRegistry, length_histogram};

fn main() {
    wordforge_cli::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if wordforge_cli::wants_help(&args) {
        println!("wordforge-estimate: Count the words of a pattern definition.");
        println!();
        println!("Usage: wordforge-estimate [OPTIONS] PATTERN.json");
        println!();
        println!("Options:");
        println!("  --min N               Minimum word length (default 0)");
        println!("  --max N               Maximum word length (default 99)");
        println!("  --histogram           Also print LENGTH<TAB>COUNT for each length in range");
        println!("  -h, --help            Print this help");
        return;
    }

    let show_histogram = has_flag(&args, &["--histogram"]);
    let args: Vec<String> = args.into_iter().filter(|a| a != "--histogram").collect();
    let (range, args) = parse_range(&args).unwrap_or_else(|e| fatal(&e));
    let path = single_path(&args, "pattern definition").unwrap_or_else(|e| fatal(&e));

    let registry = TransformRegistry::default();
    let pattern = wordforge_cli::load_pattern(&path, &registry).unwrap_or_else(|e| fatal(&e));
    let histogram = length_histogram(&pattern).unwrap_or_else(|e| fatal(&e.to_string()));
    let total = histogram.count_in(range).unwrap_or_else(|e| fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if show_histogram {
        for (len, count) in histogram.iter().filter(|(len, _)| range.contains(*len)) {
            let _ = writeln!(out, "{len}\t{count}");
        }
    }
    let _ = writeln!(out, "{total}");
}
