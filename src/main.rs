use clap::Parser;
use d1_config::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => cli::resolve::run(&cli.global, args),
        Command::Generate(args) => cli::generate::run(&cli.global, args),
    }
}
