// wordforge-cli: shared utilities for CLI tools.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordforge_pattern::definition::PatternDef;
use wordforge_pattern::{LengthRange, Pattern, PatternError, TransformRegistry};

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "WORDFORGE_LOG";

/// Length bounds used when `--min` / `--max` are not given.
pub const DEFAULT_MIN_LEN: i64 = 0;
pub const DEFAULT_MAX_LEN: i64 = 99;

/// Install the stderr log subscriber, filtered by `WORDFORGE_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read one item per non-blank line, in order.
///
/// Line endings (`\n` or `\r\n`) are stripped; other whitespace is kept,
/// since it can be part of a candidate.
pub fn read_items<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        items.push(line.to_string());
    }
    Ok(items)
}

/// Read items from a file with [`read_items`].
pub fn load_items(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    read_items(BufReader::new(file))
}

/// Parse a JSON pattern definition file and build its pattern.
///
/// Relative `file` entries are resolved against the definition's directory.
pub fn load_pattern(path: &Path, registry: &TransformRegistry) -> Result<Pattern, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let def = PatternDef::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e))?;

    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let loader = |item_path: &Path| -> io::Result<Vec<String>> {
        let resolved = if item_path.is_absolute() {
            item_path.to_path_buf()
        } else {
            base.join(item_path)
        };
        debug!(path = %resolved.display(), "loading items");
        load_items(&resolved)
    };

    def.build(registry, &loader)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Error type for [`write_wordlist`].
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("failed to write wordlist: {0}")]
    Io(#[from] io::Error),
}

/// Write words one per line, stopping after `limit` words if given.
///
/// Returns the number of words written. A failing word aborts the write
/// after flushing everything before it.
pub fn write_wordlist<I, W>(words: I, out: W, limit: Option<u64>) -> Result<u64, WriteError>
where
    I: IntoIterator<Item = Result<String, PatternError>>,
    W: Write,
{
    let mut out = BufWriter::new(out);
    let mut written = 0u64;
    let mut words = words.into_iter();
    while limit.is_none_or(|max| written < max) {
        let Some(word) = words.next() else {
            break;
        };
        let word = match word {
            Ok(word) => word,
            Err(e) => {
                out.flush()?;
                return Err(e.into());
            }
        };
        writeln!(out, "{word}")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Create an output file, creating missing parent directories.
pub fn create_output(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Remove `--long=VALUE`, `--long VALUE` or `SHORT VALUE` from the args.
///
/// Returns `(value, remaining_args)`; the last occurrence wins.
pub fn take_value(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || short.is_some_and(|s| arg == s) {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Parse `--min` / `--max` into a validated range.
///
/// Negative bounds and `min > max` are rejected with the pattern engine's
/// range error.
pub fn parse_range(args: &[String]) -> Result<(LengthRange, Vec<String>), String> {
    let (min, args) = take_value(args, "--min", None)?;
    let (max, args) = take_value(&args, "--max", None)?;
    let min = parse_number(min.as_deref(), "--min")?.unwrap_or(DEFAULT_MIN_LEN);
    let max = parse_number(max.as_deref(), "--max")?.unwrap_or(DEFAULT_MAX_LEN);
    let range = LengthRange::try_from((min, max)).map_err(|e| e.to_string())?;
    Ok((range, args))
}

/// Parse an optional numeric flag value.
pub fn parse_number<T: std::str::FromStr>(value: Option<&str>, flag: &str) -> Result<Option<T>, String> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| format!("{flag} expects a number, got {v:?}"))
        })
        .transpose()
}

/// Check whether any of `names` appears in the args.
pub fn has_flag(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|a| names.contains(&a.as_str()))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    has_flag(args, &["--help", "-h"])
}

/// The single positional argument left after flag parsing.
pub fn single_path(args: &[String], what: &str) -> Result<PathBuf, String> {
    match args {
        [path] if !path.starts_with('-') => Ok(PathBuf::from(path)),
        [] => Err(format!("missing {what}")),
        _ => Err(format!("expected one {what}, got: {}", args.join(" "))),
    }
}
