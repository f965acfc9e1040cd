use core::str::FromStr;

use crate::*;

/// Four-way movement intent shared by every input source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Down, Self::Right, Self::Up, Self::Left];

    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Label carried by the on-screen control buttons (`data-move`).
    pub const fn label(self) -> &'static str {
        use Direction::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }

    /// Maps a `KeyboardEvent.key` value, anything other than the arrow keys is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        use Direction::*;
        match key {
            "ArrowUp" => Some(Up),
            "ArrowDown" => Some(Down),
            "ArrowLeft" => Some(Left),
            "ArrowRight" => Some(Right),
            _ => None,
        }
    }

    pub fn from_control_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.label() == label)
    }

    /// Moves `coords` by `distance` cells, `None` when that leaves `bounds`.
    pub fn offset(self, coords: Coord2, distance: i8, bounds: Coord2) -> Option<Coord2> {
        let (dx, dy) = self.delta();
        apply_delta(coords, (dx * distance, dy * distance), bounds)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_control_label(s)
            .or_else(|| Self::from_key(s))
            .ok_or(GameError::UnknownDirection)
    }
}
