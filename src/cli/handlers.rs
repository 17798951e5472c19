use std::{
    fs::File,
    io::{self, BufWriter, IsTerminal, Write},
    time::Instant,
};

use chrono::{FixedOffset, TimeZone, Timelike};
use tracing::debug;

use crate::{
    core::{
        bounds::terminal_width,
        config::Config,
        data::Pipeline,
        error::TimebarError,
        layout::{self, CATALOG},
    },
    render::render,
};

use super::parse::PlotArgs;

pub fn plot(a: PlotArgs) -> Result<(), TimebarError> {
    let cfg = Config::builder()
        .format(a.format)
        .interval(a.interval)
        .zone(a.location)
        .bar_length(a.bar_length)
        .style(a.color)
        .from_opt(&a.from)
        .to_opt(&a.to)
        .max_series(a.max_series)
        .build()?;
    debug!(
        format = %cfg.format,
        interval = %cfg.interval,
        zone = %cfg.zone,
        year = cfg.year,
        "configured"
    );

    let t_ingest = Instant::now();
    let mut pipeline = Pipeline::new(&cfg);
    let mut read_stdin = false;
    for path in &a.files {
        if path == "-" {
            read_stdin = true;
            pipeline.feed(io::stdin().lock())?;
            continue;
        }
        let file = File::open(path).map_err(|source| TimebarError::Open {
            path: path.clone(),
            source,
        })?;
        pipeline.feed(file)?;
    }
    if !read_stdin && (a.files.is_empty() || !io::stdin().is_terminal()) {
        pipeline.feed(io::stdin().lock())?;
    }
    let (lines, skipped) = (pipeline.lines(), pipeline.skipped());
    let hist = pipeline.finish();
    let dur_ingest = t_ingest.elapsed().as_micros();

    let stdout = io::stdout();
    let paint = cfg.style.paint(hist.series().len(), stdout.is_terminal());
    let t_render = Instant::now();
    let mut out = BufWriter::new(stdout.lock());
    render(&mut out, &hist, &cfg, paint, terminal_width())?;
    out.flush()?;

    debug!(
        lines,
        skipped,
        buckets = hist.buckets().len(),
        series = hist.series().len(),
        ingest_us = dur_ingest,
        render_us = t_render.elapsed().as_micros(),
        "done"
    );
    Ok(())
}

/// 2006-01-02 15:04:05.123456789 -07:00, the instant every example shows.
fn reference_instant() -> Option<layout::Instant> {
    FixedOffset::west_opt(7 * 3600)?
        .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
        .single()?
        .with_nanosecond(123_456_789)
}

/// Print every named layout next to the reference instant rendered with it.
pub fn formats() -> Result<(), TimebarError> {
    let t = reference_instant().ok_or_else(|| io::Error::other("reference instant"))?;
    let width = CATALOG.iter().map(|l| l.tag.len()).max().unwrap_or(0);

    let mut out = io::stdout().lock();
    writeln!(out, "Named formats (empty --format guesses):")?;
    for l in &CATALOG {
        writeln!(out, "  {:<width$}  {}", l.tag, l.format(&t))?;
    }
    writeln!(
        out,
        "\nAnything else is a strftime pattern, e.g. --format '%d/%m/%Y %H:%M'"
    )?;
    Ok(())
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "timebar";
    println!(
        "
Example invocations
-------------------
• Guess the format   : {bin} /var/log/app.log
• From a pipe        : journalctl -o short-iso | {bin} -i 1h
• Named format       : {bin} -f rfc3339 --gap 30s access.log
• Epoch milliseconds : {bin} -f unix-milli events.txt
• Custom pattern     : {bin} -f '%d/%m/%Y %H:%M:%S' export.csv
• Time zone          : {bin} --loc Europe/Berlin -i 1d app.log
• Fixed window       : {bin} -f datetime --from '2026-01-01 00:00:00' \\
                         --to '2026-01-01 06:00:00' app.log
• Colored series     : {bin} --color always --max-series 4 app.log
• Debug mode         : {bin} --debug app.log
"
    );
}
