//! Token -> instant resolution.
//!
//! A [`FormatTag`] selects one of three paths:
//! * a catalog layout or epoch scale (see [`crate::core::layout`]),
//! * a literal strftime pattern when the tag is not in the catalog,
//! * the guess engine when the tag is empty or `guess`.
//!
//! The guess engine is an ordered rule table.  The first rule whose regex
//! matches the token is the only one consulted; its candidate tags are tried
//! in declaration order and the first successful parse wins.

use std::{fmt, sync::LazyLock};

use chrono::{Datelike, NaiveDate, TimeZone};
use regex::Regex;

use crate::core::{
    error::ResolveError,
    layout::{self, Instant, Layout},
};

/// Identifier for a parsing rule as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatTag {
    raw: String,
    target: Target,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
    Guess,
    Named(&'static Layout),
    Literal,
}

impl FormatTag {
    /// Catalog names match case-insensitively; anything else is kept verbatim
    /// as a strftime pattern.
    pub fn new(tag: impl Into<String>) -> Self {
        let raw: String = tag.into();
        let key = raw.trim();
        let target = if key.is_empty() || key.eq_ignore_ascii_case("guess") {
            Target::Guess
        } else if let Some(l) = layout::lookup(key) {
            Target::Named(l)
        } else {
            Target::Literal
        };
        Self { raw, target }
    }

    #[must_use]
    pub fn guess() -> Self {
        Self::new("")
    }

    #[inline]
    #[must_use]
    pub fn is_guess(&self) -> bool {
        self.target == Target::Guess
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self.target {
            Target::Guess => "guess",
            Target::Named(l) => l.tag,
            Target::Literal => &self.raw,
        }
    }
}

impl Default for FormatTag {
    fn default() -> Self {
        Self::guess()
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve one token under `tag`.
pub fn resolve(tag: &FormatTag, token: &str) -> Result<Instant, ResolveError> {
    match tag.target {
        Target::Guess => guess(token),
        Target::Named(l) => l.parse(token),
        Target::Literal => {
            layout::parse_pattern(&tag.raw, token).ok_or_else(|| ResolveError::LayoutMismatch {
                layout: tag.raw.clone(),
                token: token.to_owned(),
            })
        }
    }
}

// --- Guess Engine ---

struct GuessRule {
    re: Regex,
    candidates: &'static [&'static str],
}

static GUESS_RULES: LazyLock<[GuessRule; 5]> = LazyLock::new(|| {
    let rule = |re: &str, candidates| GuessRule {
        re: Regex::new(re).expect("static regex"),
        candidates,
    };
    [
        // bare 10-19 digit numbers are epochs before anything else
        rule(
            r"^\d{10,19}(?:\.\d+)?$",
            &["unix", "unix-milli", "unix-micro"],
        ),
        rule(
            r"^\d{4}",
            &["rfc3339", "rfc3339nano", "datetime", "dateonly"],
        ),
        rule(
            r"[A-Za-z]{3,4}|[+-]\d{4}",
            &[
                "unixdate",
                "rubydate",
                "rfc822",
                "rfc822z",
                "rfc850",
                "rfc1123",
                "rfc1123z",
                "rfc3339",
                "rfc3339nano",
                "ansic",
                "stamp",
                "stampmilli",
                "stampmicro",
                "stampnano",
            ],
        ),
        rule(
            r"\d{2}:\d{2}:\d{2}",
            &[
                "datetime", "timeonly", "ansic", "unixdate", "rubydate", "rfc850", "rfc1123",
                "rfc1123z",
            ],
        ),
        rule(r"\d{1,2}:\d{2}(AM|PM)", &["kitchen"]),
    ]
});

/// Guess the layout of `token` from its shape.
pub fn guess(token: &str) -> Result<Instant, ResolveError> {
    GUESS_RULES
        .iter()
        .find(|r| r.re.is_match(token))
        .and_then(|r| {
            r.candidates
                .iter()
                .find_map(|tag| layout::lookup(tag)?.parse(token).ok())
        })
        .ok_or_else(|| ResolveError::UnknownFormat(token.to_owned()))
}

// --- Leading-Token Extraction ---

/// Find the shortest whitespace-delimited prefix of `line` that resolves
/// under `tag`; the remaining fields, single-space joined, are the label.
pub fn extract_leading_instant(
    line: &str,
    tag: &FormatTag,
) -> Result<(Instant, String), ResolveError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let mut prefix = String::with_capacity(line.len());

    for (n, field) in fields.iter().enumerate() {
        if n > 0 {
            prefix.push(' ');
        }
        prefix.push_str(field);
        if let Ok(t) = resolve(tag, &prefix) {
            return Ok((t, fields[n + 1..].join(" ")));
        }
    }
    Err(ResolveError::NoTimestampFound(line.to_owned()))
}

/// Layouts without a year resolve to year 0; anchor those to `year`.
///
/// Feb 29 becomes Mar 1 when `year` is not a leap year.  `year` itself must
/// be representable; configuration checks that.
#[must_use]
pub fn default_year(t: Instant, year: i32) -> Instant {
    if t.year() != 0 {
        return t;
    }
    t.with_year(year)
        .or_else(|| {
            let march = NaiveDate::from_ymd_opt(year, 3, 1)?.and_time(t.time());
            t.offset().from_local_datetime(&march).single()
        })
        .unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Timelike, Utc};

    #[test]
    fn tag_targets() {
        assert!(FormatTag::new("").is_guess());
        assert!(FormatTag::new("GUESS").is_guess());
        assert_eq!(FormatTag::new("RFC3339").as_str(), "rfc3339");
        assert_eq!(FormatTag::new("%d/%m/%Y").as_str(), "%d/%m/%Y");
    }

    #[test]
    fn guess_matches_explicit_resolution() {
        let cases = [
            ("1136239445", "unix"),
            ("2006-01-02T15:04:05Z", "rfc3339"),
            ("2006-01-02T15:04:05.999999999-07:00", "rfc3339nano"),
            ("2006-01-02 15:04:05", "datetime"),
            ("2006-01-02", "dateonly"),
            ("Mon Jan  2 15:04:05 2006", "ansic"),
            ("Mon Jan  2 15:04:05 MST 2006", "unixdate"),
            ("Mon Jan 02 15:04:05 -0700 2006", "rubydate"),
            ("02 Jan 06 15:04 MST", "rfc822"),
            ("02 Jan 06 15:04 -0700", "rfc822z"),
            ("Monday, 02-Jan-06 15:04:05 MST", "rfc850"),
            ("Mon, 02 Jan 2006 15:04:05 MST", "rfc1123"),
            ("Mon, 02 Jan 2006 15:04:05 -0700", "rfc1123z"),
            ("3:04PM", "kitchen"),
            ("Jan  2 15:04:05", "stamp"),
            ("Jan  2 15:04:05.000", "stampmilli"),
            ("Jan  2 15:04:05.000000", "stampmicro"),
            ("Jan  2 15:04:05.000000000", "stampnano"),
            ("15:04:05", "timeonly"),
        ];
        for (token, tag) in cases {
            let want = resolve(&FormatTag::new(tag), token)
                .unwrap_or_else(|e| panic!("{tag}: {e}"));
            let got = guess(token).unwrap_or_else(|e| panic!("guess {token}: {e}"));
            assert_eq!(got, want, "{token}");
        }
    }

    #[test]
    fn guess_keeps_numeric_offsets() {
        let t = guess("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(t.offset(), &FixedOffset::west_opt(7 * 3600).unwrap());
    }

    #[test]
    fn numbers_are_seconds_first() {
        // 13 digits still fit as seconds, so the milli candidate is never reached
        let t = guess("1136239445000").unwrap();
        assert_eq!(t.timestamp(), 1_136_239_445_000);
        // too large for seconds -> falls through to milliseconds
        let t = guess("1136239445000000").unwrap();
        assert_eq!(t.timestamp(), 1_136_239_445_000);
    }

    #[test]
    fn guess_unknown() {
        assert!(matches!(
            guess("not-a-date"),
            Err(ResolveError::UnknownFormat(_))
        ));
        assert!(matches!(guess("12"), Err(ResolveError::UnknownFormat(_))));
    }

    #[test]
    fn literal_pattern() {
        let tag = FormatTag::new("%d/%m/%Y %H:%M");
        let t = resolve(&tag, "24/12/2025 18:30").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2025, 12, 24, 18, 30, 0).unwrap());
        assert!(resolve(&tag, "2025-12-24").is_err());
    }

    #[test]
    fn extract_splits_label() {
        let tag = FormatTag::new("timeonly");
        let (t, label) = extract_leading_instant("09:04:30 B", &tag).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (9, 4, 30));
        assert_eq!(label, "B");

        let (_, label) = extract_leading_instant("09:04:30", &tag).unwrap();
        assert_eq!(label, "");
    }

    #[test]
    fn extract_multi_field_layout() {
        let tag = FormatTag::new("stamp");
        let (t, label) =
            extract_leading_instant("Jan  2 15:04:05 sshd   accepted key", &tag).unwrap();
        assert_eq!((t.month(), t.day()), (1, 2));
        assert_eq!(label, "sshd accepted key");
    }

    #[test]
    fn extract_shortest_prefix_wins() {
        // under guessing a bare date already parses, so the clock joins the label
        let (t, label) =
            extract_leading_instant("2006-01-02 15:04:05 api", &FormatTag::guess()).unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(label, "15:04:05 api");
    }

    #[test]
    fn extract_without_timestamp() {
        assert!(matches!(
            extract_leading_instant("=== banner ===", &FormatTag::guess()),
            Err(ResolveError::NoTimestampFound(_))
        ));
        assert!(matches!(
            extract_leading_instant("", &FormatTag::guess()),
            Err(ResolveError::NoTimestampFound(_))
        ));
    }

    #[test]
    fn year_default_only_touches_year_zero() {
        let stamp = resolve(&FormatTag::new("stamp"), "Mar  4 05:06:07").unwrap();
        let t = default_year(stamp, 2026);
        assert_eq!((t.year(), t.month(), t.day()), (2026, 3, 4));

        let full = Utc.with_ymd_and_hms(2020, 5, 6, 0, 0, 0).unwrap().fixed_offset();
        assert_eq!(default_year(full, 2026), full);
    }

    #[test]
    fn leap_day_rolls_over_in_common_years() {
        let leap = resolve(&FormatTag::new("stamp"), "Feb 29 10:00:00.25").unwrap();

        let t = default_year(leap, 2026);
        assert_eq!(t.to_rfc3339(), "2026-03-01T10:00:00.250+00:00");

        let t = default_year(leap, 2028);
        assert_eq!(t.to_rfc3339(), "2028-02-29T10:00:00.250+00:00");
    }
}
