// Move generation and application
//
// A move names an edge through the box it was generated from. Applying it
// writes the mark into that box and, when the edge is interior, into the
// neighbor's opposite slot, then settles the score for both boxes.

use crate::board::Board;
use crate::profile;
use crate::types::{BoxCoord, Direction, EdgeState, Move, Side};

/// Lists every undrawn edge exactly once
///
/// Scan order is row-major, then top/left/right/bottom inside each box.
/// Top edges are only emitted from row 0 and left edges only from column 0;
/// every other top/left edge is the bottom/right edge of an earlier box.
pub fn generate_moves(board: &Board) -> Vec<Move> {
    profile!("move_gen", {
        let mut moves = Vec::new();
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let square = board.box_at(BoxCoord::new(row, column));

                if row == 0 && square.edge(Direction::Top).is_empty() {
                    moves.push(Move::new(row, column, Direction::Top));
                }
                if column == 0 && square.edge(Direction::Left).is_empty() {
                    moves.push(Move::new(row, column, Direction::Left));
                }
                if square.edge(Direction::Right).is_empty() {
                    moves.push(Move::new(row, column, Direction::Right));
                }
                if square.edge(Direction::Bottom).is_empty() {
                    moves.push(Move::new(row, column, Direction::Bottom));
                }
            }
        }
        moves
    })
}

/// Writes `state` to the edge named by `mv` in both boxes that share it
fn fill(board: &mut Board, mv: Move, state: EdgeState) {
    let previous = board.set_edge(mv.at, mv.direction, state);
    board.score_delta(mv.at, previous);

    if let Some(other) = board.neighbor(mv.at, mv.direction) {
        let mirrored = mv.direction.opposite();
        let previous = board.set_edge(other, mirrored, state);
        board.score_delta(other, previous);
    }
}

/// Draws the edge for `side`
///
/// The edge must be undrawn; generator-supplied moves always are.
pub fn apply(board: &mut Board, mv: Move, side: Side) {
    profile!("apply_move", {
        debug_assert!(
            board.edge(mv.at, mv.direction).is_empty(),
            "apply on drawn edge {}",
            mv
        );
        fill(board, mv, side.mark());
    })
}

/// Erases the edge drawn by a previous `apply` of the same move
pub fn undo(board: &mut Board, mv: Move) {
    profile!("undo_move", {
        debug_assert!(
            !board.edge(mv.at, mv.direction).is_empty(),
            "undo on undrawn edge {}",
            mv
        );
        fill(board, mv, EdgeState::Empty);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Canonical identity of a physical edge, independent of which box named it
    fn physical_edge(board: &Board, mv: Move) -> (BoxCoord, Direction) {
        match (mv.direction, board.neighbor(mv.at, mv.direction)) {
            (Direction::Top, Some(above)) => (above, Direction::Bottom),
            (Direction::Left, Some(left)) => (left, Direction::Right),
            _ => (mv.at, mv.direction),
        }
    }

    #[test]
    fn test_fresh_board_move_count() {
        for (rows, columns) in [(1, 1), (1, 2), (2, 2), (3, 4), (15, 20)] {
            let board = Board::new(rows, columns).unwrap();
            let moves = generate_moves(&board);
            assert_eq!(moves.len(), 2 * rows * columns + rows + columns);
        }
    }

    #[test]
    fn test_no_physical_edge_emitted_twice() {
        let board = Board::new(3, 4).unwrap();
        let moves = generate_moves(&board);
        let unique: HashSet<_> = moves.iter().map(|&mv| physical_edge(&board, mv)).collect();
        assert_eq!(unique.len(), moves.len());
    }

    #[test]
    fn test_generation_order_is_row_major() {
        let board = Board::new(1, 2).unwrap();
        let moves = generate_moves(&board);
        assert_eq!(
            moves,
            vec![
                Move::new(0, 0, Direction::Top),
                Move::new(0, 0, Direction::Left),
                Move::new(0, 0, Direction::Right),
                Move::new(0, 0, Direction::Bottom),
                Move::new(0, 1, Direction::Top),
                Move::new(0, 1, Direction::Right),
                Move::new(0, 1, Direction::Bottom),
            ]
        );
    }

    #[test]
    fn test_apply_mirrors_into_neighbor() {
        let mut board = Board::new(2, 2).unwrap();
        apply(&mut board, Move::new(0, 0, Direction::Right), Side::Opponent);
        assert_eq!(board.edge(BoxCoord::new(0, 0), Direction::Right), EdgeState::Opponent);
        assert_eq!(board.edge(BoxCoord::new(0, 1), Direction::Left), EdgeState::Opponent);

        apply(&mut board, Move::new(0, 0, Direction::Bottom), Side::Player);
        assert_eq!(board.edge(BoxCoord::new(1, 0), Direction::Top), EdgeState::Player);
    }

    #[test]
    fn test_drawn_edge_disappears_from_both_boxes_scan() {
        let mut board = Board::new(2, 2).unwrap();
        let before = generate_moves(&board).len();
        apply(&mut board, Move::new(0, 0, Direction::Right), Side::Player);
        let after = generate_moves(&board);
        assert_eq!(after.len(), before - 1);
        assert_eq!(board.undrawn_edges(), after.len());
    }

    #[test]
    fn test_shared_edge_can_close_two_boxes() {
        let mut board = Board::new(1, 2).unwrap();
        for mv in generate_moves(&board) {
            if mv != Move::new(0, 0, Direction::Right) {
                apply(&mut board, mv, Side::Opponent);
            }
        }
        assert_eq!(board.completed_boxes(), 0);

        apply(&mut board, Move::new(0, 0, Direction::Right), Side::Player);
        assert_eq!(board.score(Side::Player), 2);
        assert_eq!(board.score(Side::Opponent), 0);

        undo(&mut board, Move::new(0, 0, Direction::Right));
        assert_eq!(board.score(Side::Player), 0);
        assert_eq!(board.completed_boxes(), 0);
    }

    #[test]
    fn test_apply_then_undo_restores_board() {
        let reference = Board::new(2, 3).unwrap();
        let mut board = reference.clone();
        let moves = generate_moves(&board);
        let mut side = Side::Player;
        for &mv in &moves {
            apply(&mut board, mv, side);
            side = side.opposite();
        }
        assert_eq!(board.completed_boxes(), 6);
        assert_eq!(board.score(Side::Player) + board.score(Side::Opponent), 6);

        for &mv in moves.iter().rev() {
            undo(&mut board, mv);
        }
        assert_eq!(board, reference);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "apply on drawn edge")]
    fn test_double_apply_is_contract_violation() {
        let mut board = Board::new(1, 1).unwrap();
        let mv = Move::new(0, 0, Direction::Top);
        apply(&mut board, mv, Side::Player);
        apply(&mut board, mv, Side::Opponent);
    }
}
