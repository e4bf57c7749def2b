//! Time-boxed dots and boxes search
//!
//! Usage: dots-and-boxes [rows columns [seconds [workers]]]
//!
//! Values not given on the command line come from Boxes.toml.

use dots_and_boxes::board::Board;
use dots_and_boxes::config::Config;
use dots_and_boxes::dispatch::{aggregate, run_timed};
use dots_and_boxes::report::RunReporter;
use dots_and_boxes::search::Timer;
use dots_and_boxes::simple_profiler;
use log::info;
use std::env;
use std::time::Instant;

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> Option<T> {
    args.get(index).map(|raw| {
        raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: {} must be a non-negative integer, got: {}", name, raw);
            std::process::exit(1);
        })
    })
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 2 || args.len() > 5 {
        eprintln!("Usage: {} [rows columns [seconds [workers]]]", args[0]);
        std::process::exit(1);
    }

    let mut config = Config::load_or_default();
    if let Some(rows) = parse_arg(&args, 1, "rows") {
        config.grid.rows = rows;
    }
    if let Some(columns) = parse_arg(&args, 2, "columns") {
        config.grid.columns = columns;
    }
    if let Some(seconds) = parse_arg(&args, 3, "seconds") {
        config.search.time_budget_secs = seconds;
    }
    if let Some(workers) = parse_arg(&args, 4, "workers") {
        config.search.workers = workers;
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let board = match Board::new(config.grid.rows, config.grid.columns) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Searching {}x{} board for {}s with {} workers",
        config.grid.rows, config.grid.columns, config.search.time_budget_secs, config.search.workers
    );

    let reporter = RunReporter::new(config.report.enabled, &config.report.log_file_path);
    let started = Instant::now();
    let timer = Timer::from_secs(config.search.time_budget_secs);

    let reports = match run_timed(&board, config.search.workers, config.search.first_side, timer) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for report in &reports {
        let score = report
            .high_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unresolved".to_string());
        println!("Worker {} score: {}", report.index, score);
        println!("Worker {} nodes searched: {}", report.index, report.nodes);
        reporter.log_worker(
            config.grid.rows,
            config.grid.columns,
            config.search.time_budget_secs,
            report,
        );
    }

    let summary = aggregate(&reports, config.search.first_side);
    info!(
        "Best score: {:?}, total nodes: {}, depth reached: {}..{}",
        summary.best_score, summary.total_nodes, summary.shallowest, summary.deepest
    );

    simple_profiler::print_report(started.elapsed().as_millis() as u64);
}
