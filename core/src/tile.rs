/// State of one maze cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MazeCell {
    #[default]
    Wall,
    Path,
}

impl MazeCell {
    pub const fn is_path(self) -> bool {
        matches!(self, Self::Path)
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}
