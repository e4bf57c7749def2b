// Time-boxed iterative deepening for one worker
//
// Each pass searches every assigned first-ply move one ply deeper than the
// last. Passes repeat until the timer runs out; there is no depth cap and no
// convergence check, so a pass cut short by the deadline may still raise the
// best score with a partially resolved value.

use log::{debug, info};
use serde::Serialize;
use std::time::Instant;

use crate::board::Board;
use crate::moves::{apply, undo};
use crate::search::{evaluate, Timer};
use crate::simple_profiler;
use crate::types::{Move, Side};

/// Final statistics of one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub index: usize,
    pub root_moves: usize,
    /// Best root score seen over all passes, `None` if no pass resolved a move
    pub high_score: Option<i32>,
    pub nodes: u64,
    /// Deepest limit whose pass finished before the deadline
    pub depth_reached: u32,
    pub passes: u32,
    pub elapsed_ms: u64,
}

/// Owns a private board and a slice of the root moves
pub struct Worker {
    index: usize,
    board: Board,
    moves: Vec<Move>,
    side: Side,
    timer: Timer,
}

impl Worker {
    /// Creates a worker
    ///
    /// # Arguments
    /// * `index` - Position of this worker's move group in the partition
    /// * `board` - Private copy of the reference board
    /// * `moves` - First-ply moves assigned to this worker
    /// * `side` - Side that plays the first-ply moves
    /// * `timer` - Shared deadline, copied by value
    pub fn new(index: usize, board: Board, moves: Vec<Move>, side: Side, timer: Timer) -> Self {
        Worker {
            index,
            board,
            moves,
            side,
            timer,
        }
    }

    /// Runs passes at depth 1, 2, 3, ... until the timer elapses
    pub fn run(mut self) -> WorkerReport {
        let started = Instant::now();
        info!(
            "Worker {}: searching {} root moves for {}",
            self.index,
            self.moves.len(),
            self.side.as_str()
        );

        let reply_side = self.side.opposite();
        let mut high_score: Option<i32> = None;
        let mut nodes: u64 = 0;
        let mut depth: u32 = 1;
        let mut depth_reached = 0;
        let mut passes = 0;

        while !self.timer.has_elapsed() {
            for &mv in &self.moves {
                if self.timer.has_elapsed() {
                    break;
                }

                apply(&mut self.board, mv, self.side);
                let score = evaluate(&mut self.board, reply_side, depth, &self.timer, &mut nodes);
                undo(&mut self.board, mv);

                if let Some(value) = score {
                    high_score = Some(match high_score {
                        Some(current) => self.side.prefer(current, value),
                        None => value,
                    });
                }
            }

            passes += 1;
            if !self.timer.has_elapsed() {
                depth_reached = depth;
                debug!(
                    "Worker {}: depth {} done (best: {:?}, nodes: {})",
                    self.index, depth, high_score, nodes
                );
            }
            depth = depth.saturating_add(1);
        }

        simple_profiler::merge_thread_local();

        let report = WorkerReport {
            index: self.index,
            root_moves: self.moves.len(),
            high_score,
            nodes,
            depth_reached,
            passes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            "Worker {}: finished (score: {:?}, nodes: {}, depth: {}, time: {}ms)",
            report.index, report.high_score, report.nodes, report.depth_reached, report.elapsed_ms
        );
        report
    }
}
