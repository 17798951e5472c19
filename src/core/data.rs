//! Line-oriented ingest: read, resolve the leading timestamp, bin.

use std::io::{BufRead, BufReader, Read};

use tracing::trace;

use crate::{
    core::{config::Config, constants::BUF_CAP, resolve::extract_leading_instant},
    render::{Bins, Histogram},
};

/// One run's worth of input, fed from any number of sources in order.
#[derive(Debug)]
pub struct Pipeline<'a> {
    cfg: &'a Config,
    bins: Bins,
    lines: u64,
    skipped: u64,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(cfg: &'a Config) -> Self {
        Self {
            cfg,
            bins: Bins::new(cfg.interval),
            lines: 0,
            skipped: 0,
        }
    }

    /// Count one line; lines without a usable timestamp are skipped.
    pub fn feed_line(&mut self, line: &str) {
        self.lines += 1;
        let line = line.trim();
        match extract_leading_instant(line, &self.cfg.format) {
            Ok((t, label)) => self.bins.add(self.cfg.localize(t), &label),
            Err(e) => {
                self.skipped += 1;
                trace!(line = self.lines, error = %e, "skipping line");
            }
        }
    }

    /// Drain `src` line by line.  Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    /// Any read failure from `src`.
    pub fn feed<R: Read>(&mut self, src: R) -> std::io::Result<()> {
        let mut rdr = BufReader::with_capacity(BUF_CAP, src);
        let mut buf = Vec::<u8>::with_capacity(256);
        loop {
            buf.clear();
            if rdr.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.ends_with(b"\n") {
                buf.pop();
            }
            if buf.ends_with(b"\r") {
                buf.pop();
            }
            self.feed_line(&String::from_utf8_lossy(&buf));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    #[inline]
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Pad to the explicit display range (only when something was counted)
    /// and freeze.
    #[must_use]
    pub fn finish(mut self) -> Histogram {
        if self.bins.total() > 0 {
            for bound in [self.cfg.from, self.cfg.to].into_iter().flatten() {
                self.bins.cover(bound);
            }
        }
        self.bins.finish(self.cfg.max_series)
    }
}
