use clap::Parser;
use marketdash::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
