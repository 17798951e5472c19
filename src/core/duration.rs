//! Go-style duration strings: `5m`, `1h30m`, `1.5h`, `250ms`.

use chrono::TimeDelta;

use crate::core::error::ConfigError;

const NANOS_PER: [(&str, u128); 9] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
    ("d", 86_400_000_000_000),
];

/// Parse a signed sequence of `<number><unit>` components.
///
/// A bare `0` is accepted; every other number needs a unit.
pub fn parse_duration(s: &str) -> Result<TimeDelta, ConfigError> {
    let bad = || ConfigError::InvalidDuration(s.to_owned());
    let text = s.trim();

    let (negative, mut rest) = match text.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(bad());
    }

    let mut nanos: u128 = 0;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(bad)?;
        let (number, tail) = rest.split_at(num_len);
        let unit_len = tail.find(|c: char| c.is_ascii_digit() || c == '.').unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let scale = NANOS_PER
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, n)| *n)
            .ok_or_else(bad)?;
        nanos = nanos
            .checked_add(component(number, scale).ok_or_else(bad)?)
            .ok_or_else(bad)?;
        rest = tail;
    }

    let nanos = i64::try_from(nanos).map_err(|_| bad())?;
    Ok(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

/// `whole.frac` scaled by `scale` nanoseconds, fraction truncated.
fn component(number: &str, scale: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(scale)?;

    let mut unit = scale;
    for d in frac.bytes() {
        if !d.is_ascii_digit() {
            return None;
        }
        unit /= 10;
        value = value.checked_add(u128::from(d - b'0') * unit)?;
    }
    Some(value)
}
