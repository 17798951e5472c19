mod handlers;
pub mod logging;
pub mod parse;

use clap::Parser;
pub use parse::Cli;

use crate::core::error::TimebarError;

pub fn run() -> Result<(), TimebarError> {
    let cli = parse::Cli::parse();
    logging::init(cli.plot.debug);
    match cli.cmd {
        None => handlers::plot(cli.plot),
        Some(parse::Command::Formats) => handlers::formats(),
        Some(parse::Command::Examples) => {
            handlers::examples();
            Ok(())
        }
    }
}
