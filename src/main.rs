//! Syntax Zaz CLI entry point.

use clap::Parser;
use syntax_zaz::cli::{self, Cli, Commands, EXIT_ERROR};
use syntax_zaz::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match &cli.command {
        Commands::Scan(args) => cli::run_scan(args),
        Commands::Explain(args) => cli::run_explain(args),
        Commands::Messages => cli::run_messages(),
        Commands::Watch(args) => cli::run_watch(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
