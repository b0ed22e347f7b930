use std::process::ExitCode;

use clap::Parser;
use dama::{perft, CheckersEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count move-sequence tree leaves", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3)]
    rows: usize,

    #[arg(short, long, default_value_t = 6)]
    depth: u32,

    /// Disable the legal move cache
    #[arg(long)]
    no_cache: bool,
}

fn main() -> ExitCode {
    dama::init();
    let args = Args::parse();

    println!(
        "Running perft on {} rows per player at depth {}",
        args.rows, args.depth
    );

    let engine = match CheckersEngine::new(args.rows, !args.no_cache) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        match perft(&engine, depth) {
            Ok(nodes) => {
                let duration = start.elapsed();
                println!(
                    "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
                    depth,
                    nodes,
                    duration.as_millis(),
                    nodes as f64 / (duration.as_micros().max(1) as f64)
                );
            }
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
