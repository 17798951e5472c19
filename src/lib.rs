//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    color::{Paint, Style},
    config::{Config, ConfigBuilder},
    data::Pipeline,
    error::{ConfigError, ResolveError, TimebarError},
    layout::Instant,
    resolve::FormatTag,
};

pub use crate::render::{Bins, Histogram, render};

/// Bucket every line of `src` and write the chart to `out`.
///
/// Uses `cfg.style` as if `out` were not a terminal and sizes an open bar
/// length for an 80-column display.
///
/// # Errors
/// Read failures from `src`, write failures to `out`.
pub fn plot_reader<R, W>(src: R, out: &mut W, cfg: &Config) -> Result<(), TimebarError>
where
    R: std::io::Read,
    W: std::io::Write,
{
    let mut pipeline = Pipeline::new(cfg);
    pipeline.feed(src)?;
    let hist = pipeline.finish();
    let paint = cfg.style.paint(hist.series().len(), false);
    render(out, &hist, cfg, paint, 80)?;
    Ok(())
}
