//! Parsing, configuration and ingest: everything that happens before drawing.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod duration;
pub mod error;
pub mod layout;
pub mod resolve;
pub mod series;

// re-export frequently-used items for convenience
pub use color::{Paint, Style};
pub use config::{Config, ConfigBuilder};
pub use data::Pipeline;
pub use duration::parse_duration;
pub use error::{ConfigError, ResolveError, TimebarError};
pub use layout::{CATALOG, Instant, Layout};
pub use resolve::{FormatTag, extract_leading_instant, guess, resolve};
pub use series::SeriesSet;
