use crate::*;
pub use backtracker::*;

mod backtracker;

pub trait MazeGenerator {
    fn generate(self, config: MazeConfig) -> MazeGrid;
}
