//! Geometry helpers: terminal size plumbing + bar budget.

use terminal_size::{Width, terminal_size};

use crate::core::constants::{DEFAULT_BAR_LENGTH, MIN_BAR_LENGTH, ROW_CHROME};

/// Current terminal width (80 fallback when not attached to one).
#[inline]
#[must_use]
pub fn terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| usize::from(w))
}

/// Characters left for the longest bar once a row's prefix is laid out.
///
/// `stamp_width` and `count_width` are the widest timestamp and count column.
/// Never more than [`DEFAULT_BAR_LENGTH`], never less than [`MIN_BAR_LENGTH`].
#[inline]
#[must_use]
pub fn bar_budget(term_width: usize, stamp_width: usize, count_width: usize) -> usize {
    let prefix = ROW_CHROME + stamp_width + count_width;
    term_width
        .saturating_sub(prefix + 1)
        .clamp(MIN_BAR_LENGTH, DEFAULT_BAR_LENGTH)
}

/// Number of decimal digits needed to print `n`.
#[inline]
#[must_use]
pub fn digits(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_fits_terminal() {
        // 20-char stamps, 3-digit counts: prefix 30, one spare column
        assert_eq!(bar_budget(80, 20, 3), 49);
        assert_eq!(bar_budget(200, 20, 3), DEFAULT_BAR_LENGTH);
        assert_eq!(bar_budget(20, 20, 3), MIN_BAR_LENGTH);
    }

    #[test]
    fn digit_counts() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(123_456), 6);
    }
}
