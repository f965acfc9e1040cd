use crate::*;

/// Localized text shown when the player first reaches the goal.
pub const WIN_MESSAGE: &str = "💚 Kamu berhasil!";

pub trait WinNotifier {
    fn notify_win(&mut self, message: &str);
}

impl<F: FnMut(&str)> WinNotifier for F {
    fn notify_win(&mut self, message: &str) {
        self(message)
    }
}

/// Owns the maze for one session and is the only thing that moves the player.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeController {
    engine: MazeEngine,
    renderer: MazeRenderer,
}

impl MazeController {
    pub fn new(engine: MazeEngine, renderer: MazeRenderer) -> Self {
        Self { engine, renderer }
    }

    /// Sizes the grid from the surface, carves it and places player and goal.
    pub fn generate(seed: u64, surface_size: (u32, u32), style: MazeStyle) -> Result<Self> {
        let (width, height) = surface_size;
        let config = MazeConfig::from_surface(width, height, style.tile)?;
        let grid = BacktrackerGenerator::new(seed, config.start()).generate(config);
        let engine = MazeEngine::new(grid)?;
        Ok(Self::new(engine, MazeRenderer::new(style)))
    }

    pub fn engine(&self) -> &MazeEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &MazeRenderer {
        &self.renderer
    }

    pub fn redraw(&self, surface: &mut impl Surface) {
        self.renderer.draw_engine(&self.engine, surface);
    }

    /// Applies one directional intent. Rejected moves leave both state and surface untouched.
    pub fn handle(
        &mut self,
        direction: Direction,
        surface: &mut impl Surface,
        notifier: &mut impl WinNotifier,
    ) -> MoveOutcome {
        let outcome = self.engine.step(direction);
        if outcome.has_update() {
            self.redraw(surface);
        }
        if outcome == MoveOutcome::Won {
            log::info!("maze solved at {:?}", self.engine.player());
            notifier.notify_win(WIN_MESSAGE);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::RecordingSurface;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn solve_path(engine: &MazeEngine) -> Vec<Direction> {
        use alloc::collections::VecDeque;
        use ndarray::Array2;

        let size = engine.size();
        let mut came_from: Array2<Option<(Coord2, Direction)>> =
            Array2::from_elem(size.to_nd_index(), None);
        let mut to_visit = VecDeque::from([engine.player()]);
        while let Some(coords) = to_visit.pop_front() {
            if coords == engine.goal() {
                break;
            }
            for direction in Direction::ALL {
                let Some(next) = direction.offset(coords, 1, size) else {
                    continue;
                };
                if engine.grid().is_path(next)
                    && next != engine.player()
                    && came_from[next.to_nd_index()].is_none()
                {
                    came_from[next.to_nd_index()] = Some((coords, direction));
                    to_visit.push_back(next);
                }
            }
        }

        let mut path = Vec::new();
        let mut at = engine.goal();
        while let Some((prev, direction)) = came_from[at.to_nd_index()] {
            path.push(direction);
            at = prev;
        }
        path.reverse();
        path
    }

    #[test]
    fn generated_controller_matches_surface() {
        let controller =
            MazeController::generate(11, (600, 600), MazeStyle::default()).unwrap();
        assert_eq!(controller.engine().size(), (20, 20));
        assert_eq!(controller.engine().player(), (1, 1));
        assert_eq!(controller.engine().goal(), (18, 18));
        assert!(controller.engine().grid().is_path((18, 18)));
    }

    #[test]
    fn zero_tile_is_rejected() {
        let style = MazeStyle {
            tile: 0,
            ..MazeStyle::default()
        };
        assert_eq!(
            MazeController::generate(1, (600, 600), style),
            Err(GameError::InvalidTileSize)
        );
    }

    #[test]
    fn blocked_move_does_not_redraw() {
        let mut controller =
            MazeController::generate(3, (300, 300), MazeStyle::default()).unwrap();
        let mut surface = RecordingSurface::default();
        let mut wins = 0;
        let mut notifier = |_: &str| wins += 1;

        // (1, 0) and (0, 1) are border walls
        for direction in [Direction::Up, Direction::Left] {
            let outcome = controller.handle(direction, &mut surface, &mut notifier);
            assert_eq!(outcome, MoveOutcome::Blocked);
        }

        assert!(surface.calls.is_empty());
        assert_eq!(controller.engine().player(), (1, 1));
        assert_eq!(wins, 0);
    }

    #[test]
    fn walking_to_goal_redraws_each_step_and_notifies_once() {
        let mut controller =
            MazeController::generate(21, (450, 330), MazeStyle::default()).unwrap();
        let path = solve_path(controller.engine());
        assert!(!path.is_empty());

        let mut surface = RecordingSurface::default();
        let mut messages = Vec::new();
        let mut notifier = |message: &str| messages.push(String::from(message));

        for &direction in &path {
            assert!(controller.handle(direction, &mut surface, &mut notifier).has_update());
        }
        assert_eq!(surface.clear_count(), path.len());
        assert_eq!(controller.engine().player(), controller.engine().goal());

        // step off and back on: movement continues, no second notification
        let last = *path.last().unwrap();
        let back = last.opposite();
        assert_eq!(controller.handle(back, &mut surface, &mut notifier), MoveOutcome::Moved);
        assert_eq!(controller.handle(last, &mut surface, &mut notifier), MoveOutcome::Moved);

        drop(notifier);
        assert_eq!(messages, [WIN_MESSAGE]);
    }
}
