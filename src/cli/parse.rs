use clap::{Args, Parser, Subcommand};

use crate::core::constants::{DEFAULT_INTERVAL, DEFAULT_SERIES_CAP, DEFAULT_ZONE};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "timebar",
    version,
    about = "Bucket timestamped lines into fixed intervals and chart them per label",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the named time formats with an example of each
    Formats,
    /// Print example invocations
    Examples,
}

/// `timebar [OPTIONS] [FILE]...`
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Input files, read in order (`-` or none for stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Named format, epoch scale or strftime pattern (empty: guess)
    #[arg(short, long, default_value = "")]
    pub format: String,

    /// Bucket width, e.g. 30s, 5m, 1h30m
    #[arg(short, long, visible_alias = "gap", default_value = DEFAULT_INTERVAL)]
    pub interval: String,

    /// Characters in the longest bar (default: fit the terminal, at most 60)
    #[arg(short = 'l', long)]
    pub bar_length: Option<usize>,

    /// IANA time zone used for bucketing and display
    #[arg(
        short = 'z',
        long,
        visible_aliases = ["loc", "time-zone"],
        default_value = DEFAULT_ZONE
    )]
    pub location: String,

    /// never | always | auto
    #[arg(long, default_value = "auto")]
    pub color: String,

    /// Start of the display range (same format as the input)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the display range (same format as the input)
    #[arg(long)]
    pub to: Option<String>,

    /// Series shown in the legend before the rest fold into "(Other)"
    #[arg(long, default_value_t = DEFAULT_SERIES_CAP)]
    pub max_series: usize,

    /// Debug logging plus timing diagnostics
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_and_aliases() {
        let cli = Cli::try_parse_from(["timebar", "--gap", "1h", "--loc", "Asia/Tokyo", "a.log"])
            .unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.plot.interval, "1h");
        assert_eq!(cli.plot.location, "Asia/Tokyo");
        assert_eq!(cli.plot.files, ["a.log"]);
        assert_eq!(cli.plot.format, "");
        assert_eq!(cli.plot.max_series, DEFAULT_SERIES_CAP);
        assert_eq!(cli.plot.bar_length, None);
    }

    #[test]
    fn subcommands() {
        let cli = Cli::try_parse_from(["timebar", "formats"]).unwrap();
        assert!(matches!(cli.cmd, Some(Command::Formats)));
        let cli = Cli::try_parse_from(["timebar", "--time-zone", "UTC", "-l", "20"]).unwrap();
        assert_eq!(cli.plot.bar_length, Some(20));
    }
}
