//! Basic common k-mer search.
//!
//! Finds the k-mers shared by every genome given on the command line and writes
//! them to stdout as TSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_common -- genome_a.fna genome_b.fna genome_c.fna
//! ```

use std::env;
use std::io;
use std::process;

use commonmer::builder::CommonKmerFinder;
use commonmer::output::OutputFormat;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <genome>...", args[0]);
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  genome  Sequence files, folded in the order given");
        eprintln!();
        eprintln!("Set K to change the k-mer length (default: 11).");
        process::exit(1);
    }

    let k: usize = env::var("K")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(11);

    let finder = match CommonKmerFinder::new().k(k) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("Invalid k-mer length: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    match finder.write_to_writer(
        args[1..].iter().map(String::as_str),
        stdout.lock(),
        OutputFormat::Tsv,
    ) {
        Ok(common) => eprintln!(
            "{} common {k}-mers across {} genome(s){}",
            common.len(),
            common.sources_folded(),
            if common.exhausted() {
                " (stopped early)"
            } else {
                ""
            }
        ),
        Err(e) => {
            eprintln!("Error finding common k-mers: {e}");
            process::exit(1);
        }
    }
}
