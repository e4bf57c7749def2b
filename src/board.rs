// Board state for dots and boxes
//
// Every box keeps its own copy of its four edges. A shared edge lives in two
// box records and the move applicator keeps both copies in step. Box owners and
// the two point counters are maintained incrementally on each edge write.

use crate::geometry;
use crate::types::{BoxCoord, Direction, EdgeState, Side};

/// Four edge slots plus the side that closed the box, if it is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoxState {
    edges: [EdgeState; 4],
    completed_by: Option<Side>,
}

impl BoxState {
    pub fn edge(&self, direction: Direction) -> EdgeState {
        self.edges[direction.index()]
    }

    pub fn completed_by(&self) -> Option<Side> {
        self.completed_by
    }

    /// True iff all four edges are drawn
    pub fn is_complete(&self) -> bool {
        self.edges.iter().all(|edge| !edge.is_empty())
    }

    /// Writes one slot and recomputes the owner from the mark just written
    fn fill(&mut self, direction: Direction, state: EdgeState) {
        self.edges[direction.index()] = state;
        self.completed_by = if self.is_complete() { state.side() } else { None };
    }
}

/// Fixed-size grid of boxes with running point totals for both sides
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    columns: usize,
    boxes: Vec<BoxState>,
    player_points: i32,
    opponent_points: i32,
}

impl Board {
    /// Creates an empty board
    ///
    /// # Returns
    /// * `Result<Board, String>` - The board, or an error for a zero dimension
    pub fn new(rows: usize, columns: usize) -> Result<Self, String> {
        if rows == 0 || columns == 0 {
            return Err(format!(
                "Invalid grid geometry: {}x{} (rows and columns must be positive)",
                rows, columns
            ));
        }

        Ok(Board {
            rows,
            columns,
            boxes: vec![BoxState::default(); rows * columns],
            player_points: 0,
            opponent_points: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, at: BoxCoord) -> usize {
        assert!(
            at.row < self.rows && at.column < self.columns,
            "box ({}, {}) outside {}x{} board",
            at.row,
            at.column,
            self.rows,
            self.columns
        );
        at.row * self.columns + at.column
    }

    pub fn box_at(&self, at: BoxCoord) -> &BoxState {
        &self.boxes[self.index(at)]
    }

    pub fn edge(&self, at: BoxCoord, direction: Direction) -> EdgeState {
        self.box_at(at).edge(direction)
    }

    pub fn is_complete(&self, at: BoxCoord) -> bool {
        self.box_at(at).is_complete()
    }

    /// Box across the given edge of `at`, if inside the grid
    pub fn neighbor(&self, at: BoxCoord, direction: Direction) -> Option<BoxCoord> {
        geometry::neighbor(self.rows, self.columns, at, direction)
    }

    /// Sets one edge slot of one box
    ///
    /// Only the addressed box is touched; mirroring onto the neighbor is the
    /// caller's job.
    ///
    /// # Returns
    /// * `Option<Side>` - The box owner before the write
    pub fn set_edge(&mut self, at: BoxCoord, direction: Direction, state: EdgeState) -> Option<Side> {
        let idx = self.index(at);
        let previous = self.boxes[idx].completed_by;
        self.boxes[idx].fill(direction, state);
        previous
    }

    /// Moves a point between the counters after `set_edge` changed a box owner
    pub fn score_delta(&mut self, at: BoxCoord, previously_completed_by: Option<Side>) {
        let now = self.box_at(at).completed_by;
        if now == previously_completed_by {
            return;
        }

        if let Some(side) = previously_completed_by {
            *self.points_mut(side) -= 1;
        }
        if let Some(side) = now {
            *self.points_mut(side) += 1;
        }
    }

    fn points_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Player => &mut self.player_points,
            Side::Opponent => &mut self.opponent_points,
        }
    }

    /// Boxes currently owned by `side`
    pub fn score(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_points,
            Side::Opponent => self.opponent_points,
        }
    }

    /// Player points minus opponent points, whoever is to move
    pub fn differential(&self) -> i32 {
        self.player_points - self.opponent_points
    }

    /// Counts closed boxes by scanning the grid
    pub fn completed_boxes(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_complete()).count()
    }

    /// Number of distinct edges on this grid
    pub fn edge_count(&self) -> usize {
        geometry::edge_count(self.rows, self.columns)
    }

    /// Number of edges not drawn yet
    pub fn undrawn_edges(&self) -> usize {
        let mut count = 0;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let b = &self.boxes[row * self.columns + column];
                if row == 0 && b.edge(Direction::Top).is_empty() {
                    count += 1;
                }
                if column == 0 && b.edge(Direction::Left).is_empty() {
                    count += 1;
                }
                if b.edge(Direction::Right).is_empty() {
                    count += 1;
                }
                if b.edge(Direction::Bottom).is_empty() {
                    count += 1;
                }
            }
        }
        count
    }
}
