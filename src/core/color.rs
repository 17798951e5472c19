//! Zero-alloc ANSI colour codes + per-series glyph/colour assignment.

use std::{fmt, str::FromStr};

use crate::core::{
    constants::{GLYPHS, PLAIN_GLYPH},
    error::ConfigError,
};

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnsiCode(&'static str);

impl AnsiCode {
    pub const fn red() -> Self {
        Self("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self("\x1b[37m")
    }
    pub const fn orange() -> Self {
        Self("\x1b[38;2;210;135;10m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self("\x1b[0m")
    }

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Series colours, in declared series order (wraps around with the glyphs).
pub const PALETTE: [AnsiCode; 8] = [
    AnsiCode::green(),
    AnsiCode::yellow(),
    AnsiCode::blue(),
    AnsiCode::magenta(),
    AnsiCode::cyan(),
    AnsiCode::red(),
    AnsiCode::orange(),
    AnsiCode::white(),
];

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}

// --- Style ---

/// `--color` mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    Never,
    Always,
    #[default]
    Auto,
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            _ => Err(ConfigError::InvalidStyle(s.to_owned())),
        }
    }
}

/// What the renderer may use, decided once aggregation is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Paint {
    /// one glyph per series
    pub styled: bool,
    /// ANSI colours on top of the glyphs
    pub colored: bool,
}

impl Style {
    /// `Auto` only styles when there is more than one series, and only colours
    /// on a terminal.
    #[must_use]
    pub fn paint(self, series: usize, tty: bool) -> Paint {
        match self {
            Self::Never => Paint::default(),
            Self::Always => Paint {
                styled: true,
                colored: true,
            },
            Self::Auto => {
                let styled = series > 1;
                Paint {
                    styled,
                    colored: styled && tty,
                }
            }
        }
    }
}

/// Glyph + optional colour for one series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pen {
    pub glyph: char,
    pub color: Option<AnsiCode>,
}

impl Pen {
    /// `n` copies of the glyph, coloured if the pen has a colour.
    #[must_use]
    pub fn stroke(&self, n: usize) -> String {
        if n == 0 {
            return String::new();
        }
        let run: String = std::iter::repeat_n(self.glyph, n).collect();
        match &self.color {
            Some(c) => colorize(c, &run),
            None => run,
        }
    }
}

impl Paint {
    /// Pen for the series at position `index` in display order.
    #[must_use]
    pub fn pen(self, index: usize) -> Pen {
        if !self.styled {
            return Pen {
                glyph: PLAIN_GLYPH,
                color: None,
            };
        }
        Pen {
            glyph: GLYPHS[index % GLYPHS.len()],
            color: self.colored.then(|| PALETTE[index % PALETTE.len()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_from_str() {
        assert_eq!("Never".parse::<Style>().unwrap(), Style::Never);
        assert_eq!("auto".parse::<Style>().unwrap(), Style::Auto);
        assert!(matches!(
            "sometimes".parse::<Style>(),
            Err(ConfigError::InvalidStyle(_))
        ));
    }

    #[test]
    fn auto_styles_only_multi_series() {
        assert_eq!(Style::Auto.paint(1, true), Paint::default());
        assert_eq!(
            Style::Auto.paint(2, false),
            Paint {
                styled: true,
                colored: false
            }
        );
        assert!(Style::Auto.paint(3, true).colored);
        assert_eq!(Style::Never.paint(5, true), Paint::default());
        assert!(Style::Always.paint(1, false).colored);
    }

    #[test]
    fn pens_cycle_through_glyphs() {
        let paint = Style::Auto.paint(2, false);
        assert_eq!(paint.pen(0).glyph, '|');
        assert_eq!(paint.pen(1).glyph, '#');
        assert_eq!(paint.pen(GLYPHS.len()).glyph, '|');
        assert_eq!(Paint::default().pen(3).glyph, PLAIN_GLYPH);
    }

    #[test]
    fn stroke_wraps_colour() {
        let pen = Style::Always.paint(2, true).pen(0);
        assert_eq!(pen.stroke(3), "\x1b[32m|||\x1b[0m");
        assert_eq!(pen.stroke(0), "");
    }
}
