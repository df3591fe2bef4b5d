use clap::Parser;
use minibourse::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
