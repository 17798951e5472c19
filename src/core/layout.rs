//! Static catalog of named time layouts.
//!
//! Every entry is either a strftime pattern understood by `chrono` or an
//! epoch scale.  Patterns are parsed by [`parse_pattern`], which fills in the
//! fields a layout leaves out:
//! * no year            -> year 0 (callers substitute the current year)
//! * no date            -> 0000-01-01
//! * no time of day     -> midnight
//! * no offset          -> UTC
//!
//! A fractional part is accepted after any seconds field, and weekday names
//! only have to be spelled right.

use std::sync::LazyLock;

use chrono::{
    DateTime, FixedOffset, Utc,
    format::{self, ParseErrorKind, Parsed, StrftimeItems},
};
use regex::Regex;

use crate::core::error::ResolveError;

/// An absolute point in time together with the offset it was read in.
pub type Instant = DateTime<FixedOffset>;

/// How a layout reads its zone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Zone {
    /// Numeric offset (`%z` family) or none at all.
    Offset,
    /// Alphabetic abbreviation such as `MST`, taken as offset 0.
    Abbreviation,
}

/// Parsing rule behind a format tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    Pattern {
        parse: &'static str,
        print: &'static str,
        zone: Zone,
    },
    /// Decimal number of units since the Unix epoch.
    Epoch { micros_per_unit: u32 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    pub tag: &'static str,
    pub rule: Rule,
}

const fn pattern(tag: &'static str, p: &'static str) -> Layout {
    printed(tag, p, p)
}

const fn printed(tag: &'static str, parse: &'static str, print: &'static str) -> Layout {
    Layout {
        tag,
        rule: Rule::Pattern {
            parse,
            print,
            zone: Zone::Offset,
        },
    }
}

const fn abbreviated(tag: &'static str, parse: &'static str, print: &'static str) -> Layout {
    Layout {
        tag,
        rule: Rule::Pattern {
            parse,
            print,
            zone: Zone::Abbreviation,
        },
    }
}

const fn epoch(tag: &'static str, micros_per_unit: u32) -> Layout {
    Layout {
        tag,
        rule: Rule::Epoch { micros_per_unit },
    }
}

/// Every named layout, in the order `timebar formats` lists them.
pub static CATALOG: [Layout; 21] = [
    printed("ansic", "%a %b %e %H:%M:%S%.f %Y", "%a %b %e %H:%M:%S %Y"),
    abbreviated(
        "unixdate",
        "%a %b %e %H:%M:%S%.f %Z %Y",
        "%a %b %e %H:%M:%S %Z %Y",
    ),
    printed(
        "rubydate",
        "%a %b %d %H:%M:%S%.f %z %Y",
        "%a %b %d %H:%M:%S %z %Y",
    ),
    abbreviated("rfc822", "%d %b %y %H:%M %Z", "%d %b %y %H:%M %Z"),
    pattern("rfc822z", "%d %b %y %H:%M %z"),
    abbreviated(
        "rfc850",
        "%A, %d-%b-%y %H:%M:%S%.f %Z",
        "%A, %d-%b-%y %H:%M:%S %Z",
    ),
    abbreviated(
        "rfc1123",
        "%a, %d %b %Y %H:%M:%S%.f %Z",
        "%a, %d %b %Y %H:%M:%S %Z",
    ),
    printed(
        "rfc1123z",
        "%a, %d %b %Y %H:%M:%S%.f %z",
        "%a, %d %b %Y %H:%M:%S %z",
    ),
    printed(
        "rfc3339",
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M:%S%:z",
    ),
    printed(
        "rfc3339nano",
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ),
    pattern("kitchen", "%l:%M%p"),
    printed("stamp", "%b %e %H:%M:%S%.f", "%b %e %H:%M:%S"),
    printed("stampmilli", "%b %e %H:%M:%S%.f", "%b %e %H:%M:%S%.3f"),
    printed("stampmicro", "%b %e %H:%M:%S%.f", "%b %e %H:%M:%S%.6f"),
    printed("stampnano", "%b %e %H:%M:%S%.f", "%b %e %H:%M:%S%.9f"),
    printed("datetime", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"),
    pattern("dateonly", "%Y-%m-%d"),
    printed("timeonly", "%H:%M:%S%.f", "%H:%M:%S"),
    epoch("unix", 1_000_000),
    epoch("unix-milli", 1_000),
    epoch("unix-micro", 1),
];

/// Case-insensitive catalog lookup.
#[must_use]
pub fn lookup(tag: &str) -> Option<&'static Layout> {
    CATALOG.iter().find(|l| l.tag.eq_ignore_ascii_case(tag))
}

// A numeric offset where an abbreviation was expected.
static NUMERIC_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]\d{2}:?\d{2}\b").expect("static regex"));

impl Layout {
    /// Parse `token` strictly against this layout.
    pub fn parse(&self, token: &str) -> Result<Instant, ResolveError> {
        match self.rule {
            Rule::Epoch { micros_per_unit } => parse_epoch(token, micros_per_unit),
            Rule::Pattern { parse, zone, .. } => {
                if zone == Zone::Abbreviation && NUMERIC_OFFSET.is_match(token) {
                    return Err(self.mismatch(token));
                }
                parse_pattern(parse, token).ok_or_else(|| self.mismatch(token))
            }
        }
    }

    /// Render `t` the way this layout writes it.
    #[must_use]
    pub fn format(&self, t: &Instant) -> String {
        match self.rule {
            Rule::Epoch { micros_per_unit } => {
                t.timestamp_micros()
                    .div_euclid(i64::from(micros_per_unit))
                    .to_string()
            }
            Rule::Pattern {
                print,
                zone: Zone::Abbreviation,
                ..
            } => t.with_timezone(&Utc).format(print).to_string(),
            Rule::Pattern { print, .. } => t.format(print).to_string(),
        }
    }

    fn mismatch(&self, token: &str) -> ResolveError {
        ResolveError::LayoutMismatch {
            layout: self.tag.to_owned(),
            token: token.to_owned(),
        }
    }
}

fn parse_epoch(token: &str, micros_per_unit: u32) -> Result<Instant, ResolveError> {
    let value = lexical_core::parse::<f64>(token.as_bytes())
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ResolveError::MalformedEpoch(token.to_owned()))?;

    // saturating; anything past i64 is rejected below
    #[allow(clippy::cast_possible_truncation)]
    let micros = (value * f64::from(micros_per_unit)) as i64;
    DateTime::from_timestamp_micros(micros)
        .map(|t| t.fixed_offset())
        .ok_or_else(|| ResolveError::EpochOutOfRange(token.to_owned()))
}

/// Fields a pattern may leave out, and what to splice in for them:
/// (pattern prefix, token prefix, pattern suffix, token suffix).
const COMPLETIONS: [(&str, &str, &str, &str); 3] = [
    ("%Y ", "0000 ", "", ""),
    ("%Y-%m-%d ", "0000-01-01 ", "", ""),
    ("", "", " %H:%M:%S", " 00:00:00"),
];

/// Parse `token` against a strftime `pattern`, completing missing fields.
///
/// Returns `None` on any mismatch: wrong shape, out-of-range component, or
/// leftover input.
#[must_use]
pub fn parse_pattern(pattern: &str, token: &str) -> Option<Instant> {
    match parse_exact(pattern, token) {
        Ok(t) => return Some(t),
        Err(ParseErrorKind::NotEnough) => {}
        Err(_) => return None,
    }
    COMPLETIONS.iter().find_map(|(pp, tp, ps, ts)| {
        parse_exact(&format!("{pp}{pattern}{ps}"), &format!("{tp}{token}{ts}")).ok()
    })
}

fn parse_exact(pattern: &str, token: &str) -> Result<Instant, ParseErrorKind> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, token, StrftimeItems::new(pattern)).map_err(|e| e.kind())?;
    // weekday names are checked for shape only, never against the date
    parsed.weekday = None;
    parsed
        .to_datetime()
        .or_else(|_| {
            parsed
                .to_naive_datetime_with_offset(0)
                .map(|n| n.and_utc().fixed_offset())
        })
        .map_err(|e| e.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> Instant {
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .unwrap()
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("RFC3339").unwrap().tag, "rfc3339");
        assert_eq!(lookup("Unix-Milli").unwrap().tag, "unix-milli");
        assert!(lookup("%Y").is_none());
    }

    #[test]
    fn every_layout_round_trips() {
        let t = reference();
        for layout in &CATALOG {
            let text = layout.format(&t);
            let back = layout
                .parse(text.trim())
                .unwrap_or_else(|e| panic!("{}: {e}", layout.tag));
            // compare at the layout's own resolution
            assert_eq!(layout.format(&back), text, "layout {}", layout.tag);
        }
    }

    #[test]
    fn full_layouts_keep_the_instant() {
        let t = reference();
        for tag in ["ansic", "rubydate", "rfc1123z", "rfc3339", "datetime", "unix"] {
            let layout = lookup(tag).unwrap();
            let back = layout.parse(&layout.format(&t)).unwrap();
            if tag == "ansic" || tag == "datetime" {
                // no offset in the layout: wall clock read as UTC
                assert_eq!(back.naive_utc(), t.naive_local(), "{tag}");
            } else {
                assert_eq!(back, t, "{tag}");
            }
        }
    }

    #[test]
    fn missing_fields_are_completed() {
        let t = parse_pattern("%H:%M:%S", "09:04:30").unwrap();
        assert_eq!(t.to_rfc3339(), "0000-01-01T09:04:30+00:00");

        let t = parse_pattern("%b %e %H:%M:%S", "Feb 29 10:00:00").unwrap();
        assert_eq!(t.to_rfc3339(), "0000-02-29T10:00:00+00:00");

        let t = parse_pattern("%Y-%m-%d", "2024-03-01").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn rfc3339_accepts_zulu_and_fractions() {
        let rfc = lookup("rfc3339").unwrap();
        let z = rfc.parse("2006-01-02T15:04:05Z").unwrap();
        let frac = rfc.parse("2006-01-02T15:04:05.5+00:00").unwrap();
        assert_eq!((frac - z).num_milliseconds(), 500);
    }

    #[test]
    fn abbreviation_layouts_reject_numeric_offsets() {
        let rfc1123 = lookup("rfc1123").unwrap();
        assert!(rfc1123.parse("Mon, 02 Jan 2006 15:04:05 MST").is_ok());
        assert!(matches!(
            rfc1123.parse("Mon, 02 Jan 2006 15:04:05 -0700"),
            Err(ResolveError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn layout_mismatch_on_trailing_or_missing_input() {
        let dt = lookup("datetime").unwrap();
        assert!(dt.parse("2006-01-02 15:04:05 extra").is_err());
        assert!(dt.parse("2006-01-02 15:04").is_err());
        assert!(dt.parse("2006-13-02 15:04:05").is_err());
    }

    #[test]
    fn weekday_is_not_checked_against_the_date() {
        // 2006-01-02 was a Monday
        let ansic = lookup("ansic").unwrap().parse("Tue Jan  2 15:04:05 2006").unwrap();
        assert_eq!(ansic.to_rfc3339(), "2006-01-02T15:04:05+00:00");

        let z = lookup("rfc1123z")
            .unwrap()
            .parse("Tue, 02 Jan 2006 15:04:05 -0700")
            .unwrap();
        assert_eq!(z, reference());

        let rfc850 = lookup("rfc850").unwrap();
        assert!(rfc850.parse("Friday, 02-Jan-06 15:04:05 MST").is_ok());
        assert!(rfc850.parse("Fryday, 02-Jan-06 15:04:05 MST").is_err());
    }

    #[test]
    fn fractional_seconds_are_accepted_after_any_seconds_field() {
        let dt = lookup("datetime")
            .unwrap()
            .parse("2006-01-02 15:04:05.123")
            .unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 123);

        let t = lookup("timeonly").unwrap().parse("09:04:30.5").unwrap();
        assert_eq!(t.to_rfc3339(), "0000-01-01T09:04:30.500+00:00");

        for (tag, token) in [
            ("ansic", "Mon Jan  2 15:04:05.999 2006"),
            ("unixdate", "Mon Jan  2 15:04:05.1 MST 2006"),
            ("rubydate", "Mon Jan 02 15:04:05.25 -0700 2006"),
            ("rfc1123", "Mon, 02 Jan 2006 15:04:05.000001 MST"),
        ] {
            assert!(lookup(tag).unwrap().parse(token).is_ok(), "{tag}: {token}");
        }
    }

    #[test]
    fn epoch_scales() {
        let unix = lookup("unix").unwrap();
        let milli = lookup("unix-milli").unwrap();
        assert_eq!(
            unix.parse("1136239445").unwrap(),
            Utc.timestamp_opt(1_136_239_445, 0).unwrap()
        );
        assert_eq!(
            milli.parse("1136239445000").unwrap(),
            Utc.timestamp_opt(1_136_239_445, 0).unwrap()
        );
        let half = unix.parse("1700000000.5").unwrap();
        assert_eq!(half.timestamp_subsec_micros(), 500_000);
    }

    #[test]
    fn epoch_failures() {
        let unix = lookup("unix").unwrap();
        assert!(matches!(
            unix.parse("12ab"),
            Err(ResolveError::MalformedEpoch(_))
        ));
        assert!(matches!(
            unix.parse("1e300"),
            Err(ResolveError::EpochOutOfRange(_))
        ));
    }
}
