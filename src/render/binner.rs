//! Dense, bidirectionally growing time buckets.
//!
//! Instants may arrive in any order.  The first one anchors `base` (truncated
//! to the bucket width); later ones outside the covered span grow the bucket
//! deque on whichever side they fall, moving `base` back by whole widths when
//! growing to the left.  The resulting layout does not depend on arrival
//! order.
//!
//! ```rust
//! # use chrono::{TimeDelta, TimeZone, Utc};
//! # use timebar::render::Bins;
//! let mut bins = Bins::new(TimeDelta::minutes(5));
//! let t = Utc.with_ymd_and_hms(2026, 1, 1, 9, 2, 0).unwrap().fixed_offset();
//! bins.add(t, "api");
//! bins.add(t - TimeDelta::minutes(10), "db");
//! let hist = bins.finish(8);
//! assert_eq!(hist.buckets().len(), 3);
//! ```

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::core::{
    layout::Instant,
    series::{SeriesSet, relabel},
};

/// Per-series counts inside one time slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bucket {
    counts: BTreeMap<String, u64>,
}

impl Bucket {
    fn add(&mut self, label: &str, n: u64) {
        if let Some(c) = self.counts.get_mut(label) {
            *c += n;
        } else {
            self.counts.insert(label.to_owned(), n);
        }
    }

    #[inline]
    #[must_use]
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Stateful aggregation over one run.
#[derive(Debug)]
pub struct Bins {
    width: TimeDelta,
    width_us: i64,
    base: Option<Instant>,
    buckets: VecDeque<Bucket>,
    series: SeriesSet,
    seen: Option<(Instant, Instant)>,
    total: u64,
}

impl Bins {
    /// `width` must be at least one microsecond; configuration guarantees it.
    #[must_use]
    pub fn new(width: TimeDelta) -> Self {
        let width_us = width.num_microseconds().unwrap_or(i64::MAX).max(1);
        Self {
            width,
            width_us,
            base: None,
            buckets: VecDeque::new(),
            series: SeriesSet::new(),
            seen: None,
            total: 0,
        }
    }

    /// Count one occurrence of `label` at `t`.  Never fails.
    pub fn add(&mut self, t: Instant, label: &str) {
        let idx = self.cover(t);
        self.buckets[idx].add(label, 1);
        self.series.add(label, 1);
        self.total += 1;
        self.seen = Some(match self.seen {
            None => (t, t),
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
        });
    }

    /// Grow the sequence until `t` falls inside it, returning its index.
    pub fn cover(&mut self, t: Instant) -> usize {
        let Some(base) = self.base else {
            self.base = Some(truncate(t, self.width_us));
            self.buckets.push_back(Bucket::default());
            return 0;
        };

        let offset = i128::from(t.timestamp_micros()) - i128::from(base.timestamp_micros());
        let idx = offset.div_euclid(i128::from(self.width_us));

        if idx < 0 {
            let grow = usize::try_from(-idx).unwrap_or(usize::MAX);
            self.buckets.reserve(grow);
            for _ in 0..grow {
                self.buckets.push_front(Bucket::default());
            }
            self.base = Some(shift(base, idx * i128::from(self.width_us)));
            0
        } else {
            let idx = usize::try_from(idx).unwrap_or(usize::MAX);
            if idx >= self.buckets.len() {
                self.buckets.resize(idx + 1, Bucket::default());
            }
            idx
        }
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<Instant> {
        self.base
    }

    /// Stop ingesting: collapse the legend to `max_series` entries and
    /// freeze the layout.
    #[must_use]
    pub fn finish(self, max_series: usize) -> Histogram {
        let (series, buckets): (SeriesSet, Vec<Bucket>) = match self.series.survivors(max_series) {
            None => (self.series, self.buckets.into()),
            Some(keep) => {
                let buckets = self
                    .buckets
                    .into_iter()
                    .map(|b| {
                        let mut merged = Bucket::default();
                        for (label, n) in &b.counts {
                            merged.add(relabel(&keep, label), *n);
                        }
                        merged
                    })
                    .collect();
                (self.series.collapsed(&keep), buckets)
            }
        };
        Histogram {
            width: self.width,
            base: self.base,
            buckets,
            series,
            seen: self.seen,
            total: self.total,
        }
    }
}

/// Finished aggregation, read-only.
#[derive(Debug)]
pub struct Histogram {
    width: TimeDelta,
    base: Option<Instant>,
    buckets: Vec<Bucket>,
    series: SeriesSet,
    seen: Option<(Instant, Instant)>,
    total: u64,
}

impl Histogram {
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[inline]
    #[must_use]
    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<Instant> {
        self.base
    }

    /// Earliest and latest instant counted.
    #[inline]
    #[must_use]
    pub fn observed(&self) -> Option<(Instant, Instant)> {
        self.seen
    }

    /// Start of bucket `i`.
    #[must_use]
    pub fn start_of(&self, i: usize) -> Option<Instant> {
        let base = self.base?;
        let steps = i128::try_from(i).ok()?;
        Some(shift(base, steps * i128::from(self.width.num_microseconds()?)))
    }

    /// Buckets overlapping `[from, to]` (either end open), with their start.
    #[must_use]
    pub fn rows(&self, from: Option<Instant>, to: Option<Instant>) -> Vec<(Instant, &Bucket)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(i, b)| Some((self.start_of(i)?, b)))
            .filter(|(start, _)| {
                from.is_none_or(|f| {
                    start
                        .checked_add_signed(self.width)
                        .is_none_or(|end| end > f)
                })
            })
            .filter(|(start, _)| to.is_none_or(|t| *start <= t))
            .collect()
    }
}

/// Floor `t` to a multiple of `width_us` since the epoch, in `t`'s own offset.
fn truncate(t: Instant, width_us: i64) -> Instant {
    let shift_us = i128::from(t.offset().local_minus_utc()) * 1_000_000;
    let local = i128::from(t.timestamp_micros()) + shift_us;
    let floored = local - local.rem_euclid(i128::from(width_us));
    at_micros(floored - shift_us, *t.offset()).unwrap_or(t)
}

fn shift(t: Instant, delta_us: i128) -> Instant {
    at_micros(i128::from(t.timestamp_micros()) + delta_us, *t.offset()).unwrap_or(t)
}

fn at_micros(us: i128, offset: FixedOffset) -> Option<Instant> {
    let us = i64::try_from(us).ok()?;
    DateTime::from_timestamp_micros(us).map(|t| t.with_timezone(&offset))
}
