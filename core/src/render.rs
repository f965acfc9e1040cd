use crate::*;

/// 2D drawing target. Coordinates are in surface pixels.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64);

    /// Draws `glyph` horizontally centred on `x` with its baseline at `y`.
    fn fill_glyph(&mut self, glyph: &str, font: &str, x: f64, y: f64);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MazeStyle {
    pub tile: u32,
    pub wall_color: &'static str,
    pub path_color: &'static str,
    pub player_glyph: &'static str,
    pub goal_glyph: &'static str,
    pub font: &'static str,
}

impl Default for MazeStyle {
    fn default() -> Self {
        Self {
            tile: 30,
            wall_color: "#a9dfbf",
            path_color: "#ffffff",
            player_glyph: "👦",
            goal_glyph: "💚",
            font: "30px Arial",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MazeRenderer {
    style: MazeStyle,
}

impl MazeRenderer {
    pub fn new(style: MazeStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &MazeStyle {
        &self.style
    }

    pub fn surface_size(&self, (cols, rows): Coord2) -> (f64, f64) {
        let tile = f64::from(self.style.tile);
        (f64::from(cols) * tile, f64::from(rows) * tile)
    }

    /// Full redraw, there is no partial update.
    pub fn draw(&self, grid: &MazeGrid, player: Coord2, goal: Coord2, surface: &mut impl Surface) {
        let style = &self.style;
        let tile = f64::from(style.tile);
        let (width, height) = self.surface_size(grid.size());

        surface.clear(width, height);
        for ((x, y), cell) in grid.iter_cells() {
            let color = match cell {
                MazeCell::Wall => style.wall_color,
                MazeCell::Path => style.path_color,
            };
            surface.fill_rect(color, f64::from(x) * tile, f64::from(y) * tile, tile, tile);
        }

        for (glyph, (x, y)) in [(style.player_glyph, player), (style.goal_glyph, goal)] {
            surface.fill_glyph(
                glyph,
                style.font,
                f64::from(x) * tile + tile / 2.0,
                f64::from(y) * tile + tile / 1.5,
            );
        }
    }

    pub fn draw_engine(&self, engine: &MazeEngine, surface: &mut impl Surface) {
        self.draw(engine.grid(), engine.player(), engine.goal(), surface);
    }
}
