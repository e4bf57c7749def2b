//! Simple profiling macros using thread-local storage
//!
//! This module provides lightweight profiling without changing function signatures.
//! Enable with environment variable: DOTS_PROFILE=1, or call `force_enable()`.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

thread_local! {
    static MOVE_GEN_TIME: RefCell<u64> = RefCell::new(0);
    static MOVE_GEN_COUNT: RefCell<usize> = RefCell::new(0);

    static APPLY_MOVE_TIME: RefCell<u64> = RefCell::new(0);
    static APPLY_MOVE_COUNT: RefCell<usize> = RefCell::new(0);

    static UNDO_MOVE_TIME: RefCell<u64> = RefCell::new(0);
    static UNDO_MOVE_COUNT: RefCell<usize> = RefCell::new(0);

    static EVALUATE_TIME: RefCell<u64> = RefCell::new(0);
    static EVALUATE_COUNT: RefCell<usize> = RefCell::new(0);

    static BUDGET_CUTOFFS: RefCell<usize> = RefCell::new(0);
}

// Global aggregators
static GLOBAL_MOVE_GEN_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_MOVE_GEN_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_APPLY_MOVE_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_APPLY_MOVE_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_UNDO_MOVE_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_UNDO_MOVE_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_EVALUATE_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_EVALUATE_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_BUDGET_CUTOFFS: AtomicUsize = AtomicUsize::new(0);

static PROFILE_ENV_SET: OnceLock<bool> = OnceLock::new();
static PROFILE_FORCED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILE_FORCED.load(Ordering::Relaxed)
        || *PROFILE_ENV_SET.get_or_init(|| std::env::var("DOTS_PROFILE").is_ok())
}

/// Turns profiling on for the rest of the process, regardless of DOTS_PROFILE
pub fn force_enable() {
    PROFILE_FORCED.store(true, Ordering::Relaxed);
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "move_gen" => {
                MOVE_GEN_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                MOVE_GEN_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "apply_move" => {
                APPLY_MOVE_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                APPLY_MOVE_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "undo_move" => {
                UNDO_MOVE_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                UNDO_MOVE_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            // Nested: a node's time includes its whole subtree
            "evaluate" => {
                EVALUATE_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                EVALUATE_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

/// Records a node that stopped iterating because the budget ran out
#[inline]
pub fn record_budget_cutoff() {
    if is_profiling_enabled() {
        BUDGET_CUTOFFS.with(|c| *c.borrow_mut() += 1);
    }
}

/// Flushes this thread's counters into the global totals
/// Call once per worker before it exits
pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    fn drain_time(cell: &'static std::thread::LocalKey<RefCell<u64>>, into: &AtomicU64) {
        cell.with(|t| {
            into.fetch_add(*t.borrow(), Ordering::Relaxed);
            *t.borrow_mut() = 0;
        });
    }

    fn drain_count(cell: &'static std::thread::LocalKey<RefCell<usize>>, into: &AtomicUsize) {
        cell.with(|c| {
            into.fetch_add(*c.borrow(), Ordering::Relaxed);
            *c.borrow_mut() = 0;
        });
    }

    drain_time(&MOVE_GEN_TIME, &GLOBAL_MOVE_GEN_TIME);
    drain_count(&MOVE_GEN_COUNT, &GLOBAL_MOVE_GEN_COUNT);
    drain_time(&APPLY_MOVE_TIME, &GLOBAL_APPLY_MOVE_TIME);
    drain_count(&APPLY_MOVE_COUNT, &GLOBAL_APPLY_MOVE_COUNT);
    drain_time(&UNDO_MOVE_TIME, &GLOBAL_UNDO_MOVE_TIME);
    drain_count(&UNDO_MOVE_COUNT, &GLOBAL_UNDO_MOVE_COUNT);
    drain_time(&EVALUATE_TIME, &GLOBAL_EVALUATE_TIME);
    drain_count(&EVALUATE_COUNT, &GLOBAL_EVALUATE_COUNT);
    drain_count(&BUDGET_CUTOFFS, &GLOBAL_BUDGET_CUTOFFS);
}

/// Merged call counts per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileCounts {
    pub move_gen: usize,
    pub apply_move: usize,
    pub undo_move: usize,
    pub evaluate: usize,
    pub budget_cutoffs: usize,
}

/// Reads the merged global call counts
pub fn counts() -> ProfileCounts {
    ProfileCounts {
        move_gen: GLOBAL_MOVE_GEN_COUNT.load(Ordering::Relaxed),
        apply_move: GLOBAL_APPLY_MOVE_COUNT.load(Ordering::Relaxed),
        undo_move: GLOBAL_UNDO_MOVE_COUNT.load(Ordering::Relaxed),
        evaluate: GLOBAL_EVALUATE_COUNT.load(Ordering::Relaxed),
        budget_cutoffs: GLOBAL_BUDGET_CUTOFFS.load(Ordering::Relaxed),
    }
}

fn print_category(label: &str, time_ns: u64, count: usize, total_ns: u64) {
    let ms = time_ns as f64 / 1_000_000.0;
    let pct = if total_ns > 0 { 100.0 * time_ns as f64 / total_ns as f64 } else { 0.0 };
    let avg_ns = if count > 0 { time_ns as f64 / count as f64 } else { 0.0 };

    eprintln!("{}:", label);
    eprintln!("  Time:     {:.2}ms ({:.1}%)", ms, pct);
    eprintln!("  Calls:    {}", count);
    eprintln!("  Avg:      {:.1}ns/call\n", avg_ns);
}

/// Prints the merged totals to stderr
///
/// # Arguments
/// * `total_time_ms` - Wall-clock time of the run, summed over workers
pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    print_category(
        "Evaluate (inclusive)",
        GLOBAL_EVALUATE_TIME.load(Ordering::Relaxed),
        GLOBAL_EVALUATE_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    print_category(
        "Move Generation",
        GLOBAL_MOVE_GEN_TIME.load(Ordering::Relaxed),
        GLOBAL_MOVE_GEN_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    print_category(
        "Apply Move",
        GLOBAL_APPLY_MOVE_TIME.load(Ordering::Relaxed),
        GLOBAL_APPLY_MOVE_COUNT.load(Ordering::Relaxed),
        total_ns,
    );
    print_category(
        "Undo Move",
        GLOBAL_UNDO_MOVE_TIME.load(Ordering::Relaxed),
        GLOBAL_UNDO_MOVE_COUNT.load(Ordering::Relaxed),
        total_ns,
    );

    eprintln!("Budget cutoffs: {}", GLOBAL_BUDGET_CUTOFFS.load(Ordering::Relaxed));
    eprintln!("═══════════════════════════════════════════════════════════\n");
}

/// Clears the merged totals between runs
pub fn reset() {
    GLOBAL_MOVE_GEN_TIME.store(0, Ordering::Relaxed);
    GLOBAL_MOVE_GEN_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_APPLY_MOVE_TIME.store(0, Ordering::Relaxed);
    GLOBAL_APPLY_MOVE_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_UNDO_MOVE_TIME.store(0, Ordering::Relaxed);
    GLOBAL_UNDO_MOVE_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_EVALUATE_TIME.store(0, Ordering::Relaxed);
    GLOBAL_EVALUATE_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_BUDGET_CUTOFFS.store(0, Ordering::Relaxed);
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
