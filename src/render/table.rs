//! Text output: header, legend and one bar row per bucket.

use std::io::{self, Write};

use chrono::SecondsFormat;
use chrono_tz::Tz;

use crate::{
    core::{
        bounds::{bar_budget, digits},
        color::{Paint, Pen},
        config::Config,
        layout::Instant,
    },
    render::{
        bars::{allocate, bucket_length},
        binner::Histogram,
    },
};

#[inline]
fn stamp(t: &Instant, zone: &Tz) -> String {
    t.with_timezone(zone)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render `hist` as text.
///
/// `term_width` only matters when the config leaves the bar length open.
///
/// # Errors
/// Propagates any write failure from `out`.
pub fn render<W: Write>(
    out: &mut W,
    hist: &Histogram,
    cfg: &Config,
    paint: Paint,
    term_width: usize,
) -> io::Result<()> {
    writeln!(out, "Total = {}", hist.total())?;
    let Some((seen_lo, seen_hi)) = hist.observed() else {
        return Ok(());
    };
    if hist.total() == 0 {
        return Ok(());
    }

    let lo = cfg.from.unwrap_or(seen_lo);
    let hi = cfg.to.unwrap_or(seen_hi);
    writeln!(
        out,
        "Range = {} ~ {}",
        stamp(&lo, &cfg.zone),
        stamp(&hi, &cfg.zone)
    )?;

    let series = hist.series();
    let labels: Vec<&str> = series.labels().collect();
    let pens: Vec<Pen> = (0..labels.len()).map(|i| paint.pen(i)).collect();

    if series.shows_legend() {
        write!(out, "Legend:")?;
        for (label, pen) in labels.iter().zip(&pens) {
            let name = if label.is_empty() { "(no label)" } else { label };
            write!(out, "  {} {name} ({})", pen.stroke(1), series.total(label))?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    let rows: Vec<(String, Vec<u64>, u64)> = hist
        .rows(cfg.from, cfg.to)
        .into_iter()
        .map(|(start, bucket)| {
            let counts: Vec<u64> = labels.iter().map(|l| bucket.count(l)).collect();
            (stamp(&start, &cfg.zone), counts, bucket.total())
        })
        .collect();

    let max_total = rows.iter().map(|(_, _, n)| *n).max().unwrap_or(0);
    let stamp_w = rows.iter().map(|(s, _, _)| s.len()).max().unwrap_or(0);
    let count_w = digits(max_total);
    let budget = cfg
        .bar_length
        .unwrap_or_else(|| bar_budget(term_width, stamp_w, count_w));

    let mut bar = String::with_capacity(budget * 2);
    for (start, counts, total) in &rows {
        bar.clear();
        let length = bucket_length(budget, *total, max_total);
        for (pen, n) in pens.iter().zip(allocate(counts, length)) {
            bar.push_str(&pen.stroke(n));
        }
        write!(out, "[ {start:<stamp_w$} ] {total:>count_w$}")?;
        if bar.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "  {bar}")?;
        }
    }
    Ok(())
}
