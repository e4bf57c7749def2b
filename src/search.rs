// Depth-limited minimax over the dots and boxes game tree
//
// Plain minimax without pruning. The player side maximizes, the opponent
// minimizes, and leaves score `player points - opponent points` regardless of
// whose turn it is. Sides strictly alternate; closing a box does not grant an
// extra move.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::moves::{apply, generate_moves, undo};
use crate::profile;
use crate::simple_profiler;
use crate::types::{Move, Side};

/// Read-only stop condition polled before every child expansion
pub trait Budget {
    fn is_exhausted(&self) -> bool;
}

/// Wall-clock budget: a start instant and a whole-second duration
///
/// Copied into every worker; holds no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
    duration: Duration,
}

impl Timer {
    fn start(duration: Duration) -> Self {
        Timer {
            start: Instant::now(),
            duration,
        }
    }

    /// Starts a budget of `secs` whole seconds now
    pub fn from_secs(secs: u64) -> Self {
        Self::start(Duration::from_secs(secs))
    }

    /// Elapsed time is truncated to whole seconds before comparing
    pub fn has_elapsed(&self) -> bool {
        self.start.elapsed().as_secs() >= self.duration.as_secs()
    }
}

impl Budget for Timer {
    fn is_exhausted(&self) -> bool {
        self.has_elapsed()
    }
}

/// Budget that never runs out, for fixed-depth exhaustive searches
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Budget for Unbounded {
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Result of searching a set of first-ply moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootOutcome {
    /// Best value for the root side, `None` if no move was resolved in time
    pub best: Option<i32>,
    /// Number of `evaluate` invocations below the root
    pub nodes: u64,
}

/// Minimax value of `board` with `side` to move
///
/// # Arguments
/// * `board` - Position to search; restored to its input state on return
/// * `side` - Side to move at this node
/// * `depth` - Plies left before the score differential is returned
/// * `budget` - Polled before each child; once exhausted the node stops early
/// * `nodes` - Incremented once per invocation
///
/// # Returns
/// * `Option<i32>` - Best value found, or `None` when the budget ran out before
///   any child was resolved
pub fn evaluate<B: Budget>(
    board: &mut Board,
    side: Side,
    depth: u32,
    budget: &B,
    nodes: &mut u64,
) -> Option<i32> {
    *nodes += 1;

    profile!("evaluate", {
        if depth == 0 {
            return Some(board.differential());
        }

        let moves = generate_moves(board);
        if moves.is_empty() {
            return Some(board.differential());
        }

        expand(board, &moves, side, depth, budget, nodes)
    })
}

/// Tries each move for `side` and folds the child values by max or min
fn expand<B: Budget>(
    board: &mut Board,
    moves: &[Move],
    side: Side,
    depth: u32,
    budget: &B,
    nodes: &mut u64,
) -> Option<i32> {
    let mut best: Option<i32> = None;

    for &mv in moves {
        if budget.is_exhausted() {
            simple_profiler::record_budget_cutoff();
            break;
        }

        apply(board, mv, side);
        let child = evaluate(board, side.opposite(), depth - 1, budget, nodes);
        undo(board, mv);

        if let Some(value) = child {
            best = Some(match best {
                Some(current) => side.prefer(current, value),
                None => value,
            });
        }
    }

    best
}

/// Searches only the given first-ply moves
///
/// `depth` counts the root ply. For `depth >= 1` and the full move list this
/// returns the same value as `evaluate(board, side, depth, ..)` and one fewer
/// node. At depth 0 nothing is searched and the result is unresolved.
pub fn search_root<B: Budget>(
    board: &mut Board,
    moves: &[Move],
    side: Side,
    depth: u32,
    budget: &B,
) -> RootOutcome {
    let mut nodes = 0;
    let best = if depth == 0 || moves.is_empty() {
        None
    } else {
        expand(board, moves, side, depth, budget, &mut nodes)
    };

    RootOutcome { best, nodes }
}
