// Composite builders layered on concat / union / leaf

use std::fmt;
use std::str::FromStr;

use crate::PatternError;
use crate::node::{EMPTY, Pattern, concat, union};

/// Concatenate patterns left to right.
///
/// Fails with `InvalidPattern` when `patterns` is empty.
pub fn concat_all<'a, I>(patterns: I) -> Result<Pattern, PatternError>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    fold(patterns, concat, "concat_all")
}

/// Union of patterns, enumerated left to right.
///
/// Fails with `InvalidPattern` when `patterns` is empty.
pub fn union_all<'a, I>(patterns: I) -> Result<Pattern, PatternError>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    fold(patterns, union, "union_all")
}

fn fold<'a, I>(
    patterns: I,
    combine: fn(&Pattern, &Pattern) -> Pattern,
    what: &str,
) -> Result<Pattern, PatternError>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    let mut iter = patterns.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| PatternError::InvalidPattern(format!("{what} needs at least one pattern")))?;
    Ok(iter.fold(first.clone(), |acc, p| combine(&acc, p)))
}

/// `pattern` concatenated with itself `times` times.
///
/// `repeat(p, 0)` is [`EMPTY`].
pub fn repeat(pattern: &Pattern, times: usize) -> Pattern {
    if times == 0 {
        return EMPTY.clone();
    }
    let mut out = pattern.clone();
    for _ in 1..times {
        out = concat(&out, pattern);
    }
    out
}

/// Concatenate patterns with a literal separator between neighbours.
pub fn interleave<'a, I>(separator: &str, patterns: I) -> Result<Pattern, PatternError>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    let sep = Pattern::literal(separator);
    let mut iter = patterns.into_iter();
    let first = iter.next().ok_or_else(|| {
        PatternError::InvalidPattern("interleave needs at least one pattern".to_string())
    })?;
    Ok(iter.fold(first.clone(), |acc, p| concat(&concat(&acc, &sep), p)))
}

// ---------------------------------------------------------------------------
// Birthday patterns
// ---------------------------------------------------------------------------

/// Default birth years for [`birthday`]: 1980 through 2004.
pub const DEFAULT_YEARS: std::ops::RangeInclusive<i32> = 1980..=2004;

/// Rendering of a calendar date as digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `MMDD`, e.g. `0315`
    MonthDay,
    /// `YYMMDD`, e.g. `900315`
    ShortYearMonthDay,
    /// `YYYYMMDD`, e.g. `19900315`
    YearMonthDay,
    /// `DDMM`, e.g. `1503`
    DayMonth,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        DateFormat::MonthDay,
        DateFormat::ShortYearMonthDay,
        DateFormat::YearMonthDay,
        DateFormat::DayMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::MonthDay => "MMDD",
            DateFormat::ShortYearMonthDay => "YYMMDD",
            DateFormat::YearMonthDay => "YYYYMMDD",
            DateFormat::DayMonth => "DDMM",
        }
    }

    pub fn render(self, year: i32, month: u32, day: u32) -> String {
        match self {
            DateFormat::MonthDay => format!("{month:02}{day:02}"),
            DateFormat::ShortYearMonthDay => {
                format!("{:02}{month:02}{day:02}", year.rem_euclid(100))
            }
            DateFormat::YearMonthDay => format!("{year:04}{month:02}{day:02}"),
            DateFormat::DayMonth => format!("{day:02}{month:02}"),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| PatternError::InvalidPattern(format!("unknown date format: {s}")))
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Leaf of every valid date in `years`, rendered in each of `formats`.
///
/// Dates are ordered by year, month and day; each date is rendered in
/// every format before moving to the next date. Renderings that repeat
/// across years (such as `MMDD`) keep only their first occurrence.
pub fn birthday<Y>(years: Y, formats: &[DateFormat]) -> Result<Pattern, PatternError>
where
    Y: IntoIterator<Item = i32>,
{
    if formats.is_empty() {
        return Err(PatternError::InvalidPattern(
            "birthday needs at least one date format".to_string(),
        ));
    }
    let mut items = Vec::new();
    for year in years {
        for month in 1..=12 {
            for day in 1..=days_in_month(year, month) {
                for format in formats {
                    items.push(format.render(year, month, day));
                }
            }
        }
    }
    Pattern::leaf(items)
}

/// [`birthday`] over [`DEFAULT_YEARS`] in every [`DateFormat`].
pub fn default_birthday() -> Result<Pattern, PatternError> {
    birthday(DEFAULT_YEARS, &DateFormat::ALL)
}
