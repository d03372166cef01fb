use std::process;

use clap::Parser;
use colored::Colorize;
use commonmer::{cli::Args, config::Config, run};
use tracing_subscriber::EnvFilter;

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.quiet);

    let config = Config::new(&args).unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Help menu:".blue().bold(),
            "$ commonmer --help".bold()
        );
        eprintln!();
        process::exit(1);
    });

    if !args.quiet {
        eprintln!("{}: {}", "k-length".bold(), config.k.to_string().blue().bold());
        eprintln!(
            "{}: {}",
            "sources".bold(),
            config.sources.len().to_string().blue().bold()
        );
        eprintln!("{}: {}", "output".bold(), config.output.to_string().underline().blue());
        eprintln!();
    }

    match run::run(&config) {
        Ok(common) => {
            if !args.quiet {
                eprintln!(
                    "{}: {} ({} of {} sources folded)",
                    "common k-mers".bold(),
                    common.len().to_string().blue().bold(),
                    common.sources_folded(),
                    config.sources.len()
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    }
}
