use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Randomized depth-first carving into a perfect maze.
///
/// Cells on odd coordinates are rooms, the cells between them are walls that get knocked down while walking. The walk
/// uses an explicit stack so grid size never affects recursion depth.
#[derive(Clone, Debug, PartialEq)]
pub struct BacktrackerGenerator {
    seed: u64,
    start: Coord2,
}

impl BacktrackerGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }

    fn checked_start(&self, config: MazeConfig) -> Coord2 {
        let (x, y) = self.start;
        if config.is_interior(self.start) && x % 2 == 1 && y % 2 == 1 {
            self.start
        } else {
            log::warn!(
                "Start {:?} is not an odd interior cell, fallback to {:?}",
                self.start,
                config.start()
            );
            config.start()
        }
    }
}

impl MazeGenerator for BacktrackerGenerator {
    fn generate(self, config: MazeConfig) -> MazeGrid {
        use rand::prelude::*;

        let mut grid = MazeGrid::filled(config.size);
        let mut visited: Array2<bool> = Array2::default(config.size.to_nd_index());
        let start = self.checked_start(config);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut directions = Direction::ALL;
        let mut stack = Vec::from([start]);
        visited[start.to_nd_index()] = true;

        while let Some(current) = stack.pop() {
            grid.carve(current);
            directions.shuffle(&mut rng);

            for direction in directions {
                let Some(next) = direction.offset(current, 2, config.size) else {
                    continue;
                };
                if !config.is_interior(next) || visited[next.to_nd_index()] {
                    continue;
                }

                // both lookups were bounds checked by the jump above
                if let Some(between) = direction.offset(current, 1, config.size) {
                    grid.carve(between);
                }
                grid.carve(next);
                visited[next.to_nd_index()] = true;
                stack.push(next);
            }
        }

        link_goal(&mut grid, config.goal());

        log::debug!(
            "Generated {:?} maze from {:?}, {} path cells",
            config.size,
            start,
            grid.path_count()
        );
        grid
    }
}

/// Forces the goal open and, when it sits on an even row or column the walk never reaches, carves a dead-end spur
/// back to the nearest room.
fn link_goal(grid: &mut MazeGrid, goal: Coord2) {
    grid.carve(goal);

    let (mut x, mut y) = goal;
    if x % 2 == 0 && x > 1 {
        x -= 1;
        grid.carve((x, y));
    }
    if y % 2 == 0 && y > 1 {
        y -= 1;
        grid.carve((x, y));
    }
}
