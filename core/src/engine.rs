use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Exploring,
    Won,
}

impl EngineState {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Moved,
    /// First arrival on the goal, later visits report `Moved`.
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Blocked => false,
            Self::Moved | Self::Won => true,
        }
    }
}

/// Player position on a generated grid. The grid never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeEngine {
    grid: MazeGrid,
    player: Coord2,
    goal: Coord2,
    state: EngineState,
}

impl MazeEngine {
    /// Places the player on `(1, 1)` and the goal on `(cols - 2, rows - 2)`.
    pub fn new(grid: MazeGrid) -> Result<Self> {
        let config = MazeConfig::new_unchecked(grid.size());
        Self::with_positions(grid, config.start(), config.goal())
    }

    pub fn with_positions(grid: MazeGrid, player: Coord2, goal: Coord2) -> Result<Self> {
        if !grid.is_path(player) || !grid.is_path(goal) {
            return Err(GameError::InvalidCoords);
        }
        let state = if player == goal {
            EngineState::Won
        } else {
            EngineState::Exploring
        };
        Ok(Self {
            grid,
            player,
            goal,
            state,
        })
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether a step in `direction` would land on a path cell.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.target(direction).is_some()
    }

    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let Some(next) = self.target(direction) else {
            log::trace!("{:?} from {:?} blocked", direction, self.player);
            return MoveOutcome::Blocked;
        };

        self.player = next;
        log::trace!("moved {:?} to {:?}", direction, next);

        if next == self.goal && !self.state.is_won() {
            self.state = EngineState::Won;
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }

    fn target(&self, direction: Direction) -> Option<Coord2> {
        direction
            .offset(self.player, 1, self.grid.size())
            .filter(|&next| self.grid.is_path(next))
    }
}
