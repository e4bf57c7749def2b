// Dots and Boxes core value types
// Sides, edge marks, edge directions and moves shared by every search layer

use serde::Deserialize;

/// One of the two competing sides
/// `Player` is the maximizing side, `Opponent` the minimizing one
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Returns the side that moves next
    pub fn opposite(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Returns the mark this side leaves on an edge it draws
    pub fn mark(&self) -> EdgeState {
        match self {
            Side::Player => EdgeState::Player,
            Side::Opponent => EdgeState::Opponent,
        }
    }

    /// Picks the preferable of two evaluations for this side
    /// Keeps `current` on ties so earlier moves win
    pub fn prefer(&self, current: i32, candidate: i32) -> i32 {
        match self {
            Side::Player if candidate > current => candidate,
            Side::Opponent if candidate < current => candidate,
            _ => current,
        }
    }

    /// Converts side to string representation for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// Fill state of a single edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeState {
    Player,
    Opponent,
    #[default]
    Empty,
}

impl EdgeState {
    pub fn is_empty(&self) -> bool {
        *self == EdgeState::Empty
    }

    /// The side that drew this edge, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            EdgeState::Player => Some(Side::Player),
            EdgeState::Opponent => Some(Side::Opponent),
            EdgeState::Empty => None,
        }
    }
}

/// The four edges of a box, in move generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Left,
    Right,
    Bottom,
}

impl Direction {
    /// Returns all directions in generation order
    pub fn all() -> [Direction; 4] {
        [Direction::Top, Direction::Left, Direction::Right, Direction::Bottom]
    }

    /// Slot index inside a box record
    pub fn index(&self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Bottom => 3,
        }
    }

    /// The same physical edge as seen from the neighboring box
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
        }
    }
}

/// Grid position of a box
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct BoxCoord {
    pub row: usize,
    pub column: usize,
}

impl BoxCoord {
    pub fn new(row: usize, column: usize) -> Self {
        BoxCoord { row, column }
    }
}

/// A single undrawn edge, named by the box it was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub at: BoxCoord,
    pub direction: Direction,
}

impl Move {
    pub fn new(row: usize, column: usize, direction: Direction) -> Self {
        Move {
            at: BoxCoord::new(row, column),
            direction,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}", self.at.row, self.at.column, self.direction.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_side_alternates() {
        assert_eq!(Side::Player.opposite(), Side::Opponent);
        assert_eq!(Side::Opponent.opposite().opposite(), Side::Opponent);
    }

    #[test]
    fn test_prefer_maximizes_for_player_and_minimizes_for_opponent() {
        assert_eq!(Side::Player.prefer(1, 3), 3);
        assert_eq!(Side::Player.prefer(3, 1), 3);
        assert_eq!(Side::Opponent.prefer(1, 3), 1);
        assert_eq!(Side::Opponent.prefer(3, -2), -2);
    }

    #[test]
    fn test_direction_opposite_is_involution() {
        for dir in Direction::all() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_mark_round_trips_to_side() {
        assert_eq!(Side::Player.mark().side(), Some(Side::Player));
        assert_eq!(Side::Opponent.mark().side(), Some(Side::Opponent));
        assert_eq!(EdgeState::Empty.side(), None);
    }
}
