//! A collection of constants.

/// Bar length used when neither the user nor the terminal says otherwise
pub const DEFAULT_BAR_LENGTH: usize = 60;
/// A bar budget is never squeezed below this many characters
pub const MIN_BAR_LENGTH: usize = 10;

/// Default bucket width, in Go-style duration syntax
pub const DEFAULT_INTERVAL: &str = "5m";
/// Default display time zone
pub const DEFAULT_ZONE: &str = "UTC";

/// Legend entries kept before the tail is folded into [`OTHER_LABEL`]
pub const DEFAULT_SERIES_CAP: usize = 8;
/// Synthetic label collecting the collapsed tail of the legend
pub const OTHER_LABEL: &str = "(Other)";

/// One glyph per series, in declared series order (wraps around).
pub const GLYPHS: [char; 8] = ['|', '#', '*', '+', '=', '~', 'o', 'x'];
/// Glyph used when styling is off
pub const PLAIN_GLYPH: char = '|';

/// `[ ` + ` ]` around the bucket start, the gap and the two spaces before the bar
pub const ROW_CHROME: usize = 2 + 2 + 1 + 2;

/// Environment variable holding the `tracing` filter directive
pub const LOG_ENV: &str = "TIMEBAR_LOG";

/// Reader buffer, 1 MiB
pub const BUF_CAP: usize = 1 << 20;
