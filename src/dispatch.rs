// Root partitioning across worker threads
//
// The first-ply move list is cut into contiguous groups. Each group gets its
// own board clone and runs on its own thread of a dedicated rayon pool sized
// to the group count. Workers share nothing mutable; each result is written
// once into its slot and read after the scope joins.

use log::info;

use crate::board::Board;
use crate::driver::{Worker, WorkerReport};
use crate::moves::generate_moves;
use crate::search::{search_root, RootOutcome, Timer, Unbounded};
use crate::simple_profiler;
use crate::types::{Move, Side};

/// Combined view over all worker reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub workers: usize,
    pub best_score: Option<i32>,
    pub total_nodes: u64,
    pub deepest: u32,
    pub shallowest: u32,
}

/// Splits `moves` into groups of `ceil(len / workers)` in generation order
///
/// The last group holds the remainder, so fewer than `workers` groups come
/// back when the split is uneven. An empty move list yields no groups.
pub fn partition(moves: &[Move], workers: usize) -> Result<Vec<Vec<Move>>, String> {
    if workers == 0 {
        return Err("Worker count must be at least 1".to_string());
    }
    if moves.is_empty() {
        return Ok(Vec::new());
    }

    let group_size = moves.len().div_ceil(workers);
    Ok(moves.chunks(group_size).map(|group| group.to_vec()).collect())
}

fn build_pool(threads: usize) -> Result<rayon::ThreadPool, String> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("boxes-worker-{}", i))
        .build()
        .map_err(|e| format!("Failed to build worker pool: {}", e))
}

/// Runs `job` once per group, one pool thread per group
fn run_partitioned<T, F>(groups: Vec<Vec<Move>>, job: F) -> Result<Vec<T>, String>
where
    T: Send,
    F: Fn(usize, Vec<Move>) -> T + Sync,
{
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let pool = build_pool(groups.len())?;
    let mut slots: Vec<Option<T>> = (0..groups.len()).map(|_| None).collect();

    pool.scope(|s| {
        let job = &job;
        for ((index, moves), slot) in groups.into_iter().enumerate().zip(slots.iter_mut()) {
            s.spawn(move |_| {
                *slot = Some(job(index, moves));
            });
        }
    });

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or_else(|| format!("Worker {} produced no result", index)))
        .collect()
}

/// Runs time-boxed iterative deepening over the root moves of `board`
///
/// # Arguments
/// * `board` - Reference position, cloned into every worker
/// * `workers` - Requested number of move groups
/// * `side` - Side that plays the first-ply moves
/// * `timer` - Deadline shared by value with every worker
///
/// # Returns
/// * `Result<Vec<WorkerReport>, String>` - One report per group, by group index
pub fn run_timed(board: &Board, workers: usize, side: Side, timer: Timer) -> Result<Vec<WorkerReport>, String> {
    let groups = partition(&generate_moves(board), workers)?;
    info!(
        "Dispatching {} root moves over {} workers",
        groups.iter().map(Vec::len).sum::<usize>(),
        groups.len()
    );

    run_partitioned(groups, |index, moves| {
        Worker::new(index, board.clone(), moves, side, timer).run()
    })
}

/// Runs an uninterruptible search of fixed depth, partitioned like `run_timed`
///
/// `depth` counts the first ply. The best over all outcomes and the sum of
/// their node counts do not depend on `workers`.
pub fn run_fixed_depth(board: &Board, workers: usize, side: Side, depth: u32) -> Result<Vec<RootOutcome>, String> {
    let groups = partition(&generate_moves(board), workers)?;
    run_partitioned(groups, |index, moves| {
        let mut local = board.clone();
        let outcome = search_root(&mut local, &moves, side, depth, &Unbounded);
        simple_profiler::merge_thread_local();
        info!("Worker {}: depth {} (score: {:?}, nodes: {})", index, depth, outcome.best, outcome.nodes);
        outcome
    })
}

/// Folds per-partition outcomes into the value of the whole root
pub fn combine_outcomes(outcomes: &[RootOutcome], side: Side) -> RootOutcome {
    RootOutcome {
        best: fold_best(outcomes.iter().map(|o| o.best), side),
        nodes: outcomes.iter().map(|o| o.nodes).sum(),
    }
}

fn fold_best(values: impl Iterator<Item = Option<i32>>, side: Side) -> Option<i32> {
    values.flatten().reduce(|current, value| side.prefer(current, value))
}

/// Aggregates worker reports after join
pub fn aggregate(reports: &[WorkerReport], side: Side) -> Summary {
    Summary {
        workers: reports.len(),
        best_score: fold_best(reports.iter().map(|r| r.high_score), side),
        total_nodes: reports.iter().map(|r| r.nodes).sum(),
        deepest: reports.iter().map(|r| r.depth_reached).max().unwrap_or(0),
        shallowest: reports.iter().map(|r| r.depth_reached).min().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn numbered_moves(count: usize) -> Vec<Move> {
        (0..count).map(|i| Move::new(i, 0, Direction::Right)).collect()
    }

    #[test]
    fn test_partition_rejects_zero_workers() {
        assert!(partition(&numbered_moves(4), 0).is_err());
    }

    #[test]
    fn test_partition_keeps_remainder_group() {
        let moves = numbered_moves(12);
        let groups = partition(&moves, 5).unwrap();
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 3]);

        let groups = partition(&numbered_moves(10), 3).unwrap();
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_partition_is_contiguous_and_complete() {
        let moves = numbered_moves(7);
        let groups = partition(&moves, 2).unwrap();
        let flattened: Vec<Move> = groups.into_iter().flatten().collect();
        assert_eq!(flattened, moves);
    }

    #[test]
    fn test_more_workers_than_moves() {
        let groups = partition(&numbered_moves(3), 8).unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_empty_move_list_yields_no_groups() {
        assert!(partition(&[], 4).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_sums_nodes_and_takes_best() {
        let report = |index, high_score, nodes, depth_reached| WorkerReport {
            index,
            root_moves: 1,
            high_score,
            nodes,
            depth_reached,
            passes: depth_reached,
            elapsed_ms: 0,
        };
        let reports = vec![report(0, Some(-2), 10, 4), report(1, None, 5, 0), report(2, Some(1), 7, 3)];

        let summary = aggregate(&reports, Side::Player);
        assert_eq!(summary.best_score, Some(1));
        assert_eq!(summary.total_nodes, 22);
        assert_eq!(summary.deepest, 4);
        assert_eq!(summary.shallowest, 0);

        assert_eq!(aggregate(&reports, Side::Opponent).best_score, Some(-2));
    }
}
