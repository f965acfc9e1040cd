/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_stays_in_bounds() {
        assert_eq!(apply_delta((1, 1), (1, 0), (3, 3)), Some((2, 1)));
        assert_eq!(apply_delta((2, 1), (1, 0), (3, 3)), None);
        assert_eq!(apply_delta((0, 1), (-1, 0), (3, 3)), None);
        assert_eq!(apply_delta((1, 0), (0, -2), (3, 3)), None);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(20, 20), 400);
        assert_eq!(mult(255, 255), 65025);
    }
}
