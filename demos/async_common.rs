//! Async common k-mer search.
//!
//! Runs the search on Tokio's blocking pool, which is how the library is meant
//! to be called from inside an async service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example async_common --features async -- genome_a.fna genome_b.fna
//! ```
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled.

#[cfg(feature = "async")]
use commonmer::{async_api::find_async, builder::CommonKmerFinder, input::Input};

#[cfg(feature = "async")]
#[tokio::main]
async fn main() {
    use std::env;
    use std::process;

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <genome>...", args[0]);
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  genome  Sequence files, folded in the order given");
        process::exit(1);
    }

    let sources: Vec<Input> = args[1..].iter().map(|s| Input::from(s.as_str())).collect();
    eprintln!("Folding {} genome(s) (async mode)...", sources.len());

    let common = match find_async(CommonKmerFinder::new(), sources).await {
        Ok(Ok(common)) => common,
        Ok(Err(e)) => {
            eprintln!("Error finding common k-mers: {e}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Search task failed: {e}");
            process::exit(1);
        }
    };

    eprintln!("Found {} common k-mers", common.len());

    println!("kmer\tfrequency");
    for (kmer, frequency) in common.iter() {
        println!("{}\t{frequency}", String::from_utf8_lossy(kmer));
    }
}

#[cfg(not(feature = "async"))]
fn main() {
    eprintln!("This example requires the 'async' feature.");
    eprintln!("Run with: cargo run --example async_common --features async -- <genome>...");
    std::process::exit(1);
}
