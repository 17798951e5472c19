//! Distinct series labels and legend collapsing.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::constants::OTHER_LABEL;

/// Labels seen during ingestion with their running totals.
///
/// Iteration is lexicographic, which is also the display order.  The empty
/// label stands for "no label".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesSet {
    totals: BTreeMap<String, u64>,
}

impl SeriesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, n: u64) {
        if let Some(total) = self.totals.get_mut(label) {
            *total += n;
        } else {
            self.totals.insert(label.to_owned(), n);
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    #[must_use]
    pub fn total(&self, label: &str) -> u64 {
        self.totals.get(label).copied().unwrap_or(0)
    }

    /// A lone unlabeled series needs no legend.
    #[must_use]
    pub fn shows_legend(&self) -> bool {
        !(self.is_empty() || (self.len() == 1 && self.totals.contains_key("")))
    }

    /// Labels that survive a collapse to `cap` entries, or `None` when the set
    /// already fits.
    ///
    /// Ranking is by total, descending, ties broken lexicographically; the
    /// first `cap - 1` are kept and everything else folds into [`OTHER_LABEL`].
    #[must_use]
    pub fn survivors(&self, cap: usize) -> Option<BTreeSet<String>> {
        if self.len() <= cap {
            return None;
        }
        let mut ranked: Vec<(&String, u64)> = self.totals.iter().map(|(l, n)| (l, *n)).collect();
        ranked.sort_by(|(la, a), (lb, b)| b.cmp(a).then_with(|| la.cmp(lb)));
        Some(
            ranked
                .into_iter()
                .take(cap.saturating_sub(1))
                .map(|(l, _)| l.clone())
                .collect(),
        )
    }

    /// Re-aggregate totals after a collapse.
    #[must_use]
    pub fn collapsed(&self, survivors: &BTreeSet<String>) -> Self {
        let mut out = Self::new();
        for (label, n) in &self.totals {
            out.add(relabel(survivors, label), *n);
        }
        out
    }
}

/// Where `label` lands after a collapse keeping `survivors`.
#[inline]
#[must_use]
pub fn relabel<'a>(survivors: &BTreeSet<String>, label: &'a str) -> &'a str {
    if survivors.contains(label) {
        label
    } else {
        OTHER_LABEL
    }
}
