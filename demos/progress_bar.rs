//! Common k-mer search with progress reporting and cancellation.
//!
//! Prints a progress line after each genome is folded. Set `MAX_GENOMES` to
//! cancel the run once that many genomes have been folded.
//!
//! # Usage
//!
//! ```bash
//! MAX_GENOMES=10 cargo run --example progress_bar -- genomes/*.fna
//! ```

use std::env;
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use commonmer::builder::CommonKmerFinder;
use commonmer::error::CommonmerError;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <genome>...", args[0]);
        eprintln!();
        eprintln!("Demonstrates progress reporting while folding genomes.");
        process::exit(1);
    }

    let max_genomes: Option<usize> = env::var("MAX_GENOMES").ok().and_then(|s| s.parse().ok());

    let cancel = Arc::new(AtomicBool::new(false));
    let trigger = Arc::clone(&cancel);
    let start = Instant::now();

    let finder = CommonKmerFinder::new()
        .cancel_flag(cancel)
        .on_progress(move |progress| {
            eprint!(
                "\r  Genomes: {:>4}/{:<4} ({:>5.1}%)  |  Bases: {:>10}  |  Common: {:>10}",
                progress.sources_folded,
                progress.sources_total,
                progress.fraction() * 100.0,
                format_bases(progress.bases_processed),
                progress.common_kmers
            );
            let _ = io::stderr().flush();

            if max_genomes.is_some_and(|max| progress.sources_folded >= max) {
                trigger.store(true, Ordering::Relaxed);
            }
        });

    let result = finder.find(args[1..].iter().map(String::as_str));
    eprintln!();

    let common = match result {
        Ok(common) => common,
        Err(CommonmerError::Cancelled { sources_folded }) => {
            eprintln!("Stopped after {sources_folded} genome(s) as requested.");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    eprintln!("\n=== Results ===");
    eprintln!("Common k-mers:    {}", common.len());
    eprintln!("Genomes folded:   {}", common.sources_folded());
    eprintln!("Stopped early:    {}", common.exhausted());
    eprintln!("Processing time:  {:.2?}", start.elapsed());

    // Show the most frequent shared k-mers
    let mut sorted: Vec<_> = common.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    eprintln!("\nTop 10 common k-mers:");
    for (kmer, frequency) in sorted.into_iter().take(10) {
        eprintln!("  {}: {frequency}", String::from_utf8_lossy(kmer));
    }
}

/// Format a base count with SI prefix (K, M, G).
#[allow(clippy::cast_precision_loss)]
fn format_bases(bases: u64) -> String {
    if bases >= 1_000_000_000 {
        format!("{:.2}G", bases as f64 / 1_000_000_000.0)
    } else if bases >= 1_000_000 {
        format!("{:.2}M", bases as f64 / 1_000_000.0)
    } else if bases >= 1_000 {
        format!("{:.2}K", bases as f64 / 1_000.0)
    } else {
        format!("{bases}")
    }
}
