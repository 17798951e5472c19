//! Run-time configuration object + fluent builder.

use chrono::{Datelike, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::core::{
    color::Style,
    constants::{DEFAULT_INTERVAL, DEFAULT_SERIES_CAP, DEFAULT_ZONE},
    duration::parse_duration,
    error::ConfigError,
    layout::Instant,
    resolve::{FormatTag, default_year, resolve},
};

/// Immutable parameters for one run, validated up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub format: FormatTag,
    pub interval: TimeDelta,
    pub zone: Tz,
    /// substituted into timestamps that carry no year
    pub year: i32,
    /// `None` sizes the longest bar from the terminal
    pub bar_length: Option<usize>,
    pub style: Style,
    pub from: Option<Instant>,
    pub to: Option<Instant>,
    pub max_series: usize,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Year default, then conversion into the display zone.
    #[must_use]
    pub fn localize(&self, t: Instant) -> Instant {
        default_year(t, self.year)
            .with_timezone(&self.zone)
            .fixed_offset()
    }
}

/// Fluent builder; all parsing and validation happens in `build`.
#[derive(Debug)]
pub struct ConfigBuilder {
    format: String,
    interval: String,
    zone: String,
    year: Option<i32>,
    bar_length: Option<usize>,
    style: String,
    from: Option<String>,
    to: Option<String>,
    max_series: usize,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            format: String::new(),
            interval: DEFAULT_INTERVAL.to_owned(),
            zone: DEFAULT_ZONE.to_owned(),
            year: None,
            bar_length: None,
            style: "auto".to_owned(),
            from: None,
            to: None,
            max_series: DEFAULT_SERIES_CAP,
        }
    }

    #[inline]
    #[must_use]
    pub fn format(mut self, f: impl Into<String>) -> Self {
        self.format = f.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn interval(mut self, i: impl Into<String>) -> Self {
        self.interval = i.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn zone(mut self, z: impl Into<String>) -> Self {
        self.zone = z.into();
        self
    }
    /// Pin the year used for year-less timestamps (defaults to now).
    #[inline]
    #[must_use]
    pub fn year(mut self, y: i32) -> Self {
        self.year = Some(y);
        self
    }
    #[inline]
    #[must_use]
    pub fn bar_length(mut self, l: Option<usize>) -> Self {
        self.bar_length = l;
        self
    }
    #[inline]
    #[must_use]
    pub fn style(mut self, s: impl Into<String>) -> Self {
        self.style = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn from_opt(mut self, s: &Option<String>) -> Self {
        if let Some(t) = s {
            self.from = Some(t.clone());
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn to_opt(mut self, s: &Option<String>) -> Self {
        if let Some(t) = s {
            self.to = Some(t.clone());
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn max_series(mut self, n: usize) -> Self {
        self.max_series = n;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let zone: Tz = self
            .zone
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownTimeZone(self.zone.clone()))?;

        let interval = parse_duration(&self.interval)?;
        if interval.num_microseconds().is_none_or(|us| us <= 0) {
            return Err(ConfigError::NonPositiveInterval(self.interval));
        }

        let style = self.style.parse::<Style>()?;
        if self.bar_length == Some(0) {
            return Err(ConfigError::InvalidBarLength);
        }
        if self.max_series == 0 {
            return Err(ConfigError::InvalidSeriesCap);
        }

        let year = self
            .year
            .unwrap_or_else(|| Utc::now().with_timezone(&zone).year());
        if year == 0 || NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(ConfigError::InvalidYear(year));
        }

        let mut cfg = Config {
            format: FormatTag::new(self.format),
            interval,
            zone,
            year,
            bar_length: self.bar_length,
            style,
            from: None,
            to: None,
            max_series: self.max_series,
        };
        cfg.from = bound(&cfg, "from", self.from)?;
        cfg.to = bound(&cfg, "to", self.to)?;

        if let (Some(from), Some(to)) = (cfg.from, cfg.to) {
            if from > to {
                return Err(ConfigError::InvalidRange {
                    from: from.to_rfc3339(),
                    to: to.to_rfc3339(),
                });
            }
        }
        Ok(cfg)
    }
}

/// Range bounds go through the same resolver and year policy as the data.
fn bound(
    cfg: &Config,
    which: &'static str,
    value: Option<String>,
) -> Result<Option<Instant>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match resolve(&cfg.format, value.trim()) {
        Ok(t) => Ok(Some(cfg.localize(t))),
        Err(source) => Err(ConfigError::InvalidRangeBound {
            which,
            value,
            source,
        }),
    }
}

/// Ergonomic `?` on a builder chain.
impl From<ConfigBuilder> for Result<Config, ConfigError> {
    fn from(b: ConfigBuilder) -> Self {
        b.build()
    }
}
