//! Fixed-depth exhaustive search, single-threaded and partitioned
//!
//! Runs the same root search twice and prints both results so the effect of
//! root partitioning can be checked: the best score and the total node count
//! must agree.
//!
//! Usage: fixed_depth <rows> <columns> <depth> [workers]

use dots_and_boxes::board::Board;
use dots_and_boxes::dispatch::{combine_outcomes, run_fixed_depth};
use dots_and_boxes::simple_profiler;
use dots_and_boxes::types::Side;
use std::env;
use std::time::Instant;

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args.len() > 5 {
        eprintln!("Usage: {} <rows> <columns> <depth> [workers]", args[0]);
        eprintln!("Example: {} 2 2 8 4", args[0]);
        std::process::exit(1);
    }

    let rows: usize = args[1].parse().expect("Rows must be a number");
    let columns: usize = args[2].parse().expect("Columns must be a number");
    let depth: u32 = args[3].parse().expect("Depth must be a number");
    let workers: usize = args
        .get(4)
        .map(|w| w.parse().expect("Workers must be a number"))
        .unwrap_or_else(rayon::current_num_threads);

    let board = match Board::new(rows, columns) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n═══════════════════════════════════════════════════════════");
    println!("        FIXED DEPTH SEARCH");
    println!("═══════════════════════════════════════════════════════════");
    println!("Board:    {}x{} ({} edges)", rows, columns, board.edge_count());
    println!("Depth:    {}", depth);
    println!("Workers:  {}", workers);
    println!("═══════════════════════════════════════════════════════════\n");

    for (label, worker_count) in [("Single", 1), ("Parallel", workers)] {
        simple_profiler::reset();
        let started = Instant::now();
        let outcomes = match run_fixed_depth(&board, worker_count, Side::Player, depth) {
            Ok(outcomes) => outcomes,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

        for (index, outcome) in outcomes.iter().enumerate() {
            println!("  [{}] worker {}: score {:?}, nodes {}", label, index, outcome.best, outcome.nodes);
        }

        let total = combine_outcomes(&outcomes, Side::Player);
        println!(
            "{:<9} best: {:?}  nodes: {}  time: {}ms\n",
            label,
            total.best,
            total.nodes,
            started.elapsed().as_millis()
        );
        simple_profiler::print_report(started.elapsed().as_millis() as u64);
    }
}
