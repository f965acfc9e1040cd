#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;

pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use memory::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod controller;
mod engine;
mod error;
mod generator;
mod input;
mod memory;
mod render;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub size: Coord2,
}

impl MazeConfig {
    /// Smallest side that still leaves one carvable interior cell.
    pub const MIN_SIDE: Coord = 3;

    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((size_x, size_y): Coord2) -> Self {
        let clamped = (
            size_x.clamp(Self::MIN_SIDE, Coord::MAX),
            size_y.clamp(Self::MIN_SIDE, Coord::MAX),
        );
        if clamped != (size_x, size_y) {
            log::warn!(
                "Maze size {:?} too small, clamped to {:?}",
                (size_x, size_y),
                clamped
            );
        }
        Self::new_unchecked(clamped)
    }

    /// Derives the grid from a drawing surface by floor-dividing by the tile size.
    pub fn from_surface(width: u32, height: u32, tile: u32) -> Result<Self> {
        if tile == 0 {
            return Err(GameError::InvalidTileSize);
        }
        let cols = (width / tile).min(Coord::MAX.into()) as Coord;
        let rows = (height / tile).min(Coord::MAX.into()) as Coord;
        Ok(Self::new((cols, rows)))
    }

    pub const fn start(&self) -> Coord2 {
        (1, 1)
    }

    pub const fn goal(&self) -> Coord2 {
        (self.size.0.saturating_sub(2), self.size.1.saturating_sub(2))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Whether `coords` is inside the grid and off the outer border.
    pub const fn is_interior(&self, (x, y): Coord2) -> bool {
        x > 0 && y > 0 && x < self.size.0.saturating_sub(1) && y < self.size.1.saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MazeGrid {
    cells: Array2<MazeCell>,
}

impl MazeGrid {
    /// A grid of the given size with every cell a wall.
    pub fn filled(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_cells(cells: Array2<MazeCell>) -> Result<Self> {
        let (x, y) = cells.dim();
        if x > Coord::MAX.into() || y > Coord::MAX.into() {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<MazeCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Out-of-bounds coordinates count as walls.
    pub fn is_path(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(MazeCell::is_path)
    }

    pub fn path_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_path()).count() as CellCount
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, MazeCell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn iter_path_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        let size = self.size();
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.offset(coords, 1, size))
            .filter(move |&pos| self.is_path(pos))
    }

    /// Every path cell reachable from `from` through 4-directional path moves.
    pub fn reachable_from(&self, from: Coord2) -> Array2<bool> {
        let mut seen: Array2<bool> = Array2::default(self.cells.dim());
        if !self.is_path(from) {
            return seen;
        }

        seen[from.to_nd_index()] = true;
        let mut to_visit = VecDeque::from([from]);
        while let Some(coords) = to_visit.pop_front() {
            for next in self.iter_path_neighbors(coords) {
                if !seen[next.to_nd_index()] {
                    seen[next.to_nd_index()] = true;
                    to_visit.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_reachable(&self, from: Coord2, to: Coord2) -> bool {
        self.contains(to) && self.reachable_from(from)[to.to_nd_index()]
    }

    pub(crate) fn carve(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = MazeCell::Path;
    }
}

impl Index<Coord2> for MazeGrid {
    type Output = MazeCell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}
