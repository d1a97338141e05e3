//! Board model and slide mechanics for the inertia puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: the closed set of things a board square can hold.
//! - `Position` and `Direction`: coordinates and the eight unit moves.
//! - `Grid`: the immutable board, with its collectibles indexed at construction.
//! - `Level`: a grid plus a validated start position.
//! - `slide`: the single simulation primitive every search strategy shares.
use crate::error::LevelError;
use std::collections::BTreeSet;
use std::fmt;

/// Represents the content of one square on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Open floor; the agent slides across it.
    #[default]
    Empty,
    /// Blocks movement; the agent halts on the square before it.
    Wall,
    /// The agent moves onto it and halts.
    Stop,
    /// The agent moves onto it and is destroyed.
    Hazard,
    /// Gathered when passed over; never halts movement.
    Collectible,
}

impl Cell {
    /// Converts the cell to its character in the text level format.
    ///
    /// # Examples
    ///
    /// ```
    /// use inertia_solver::engine::Cell;
    /// assert_eq!(Cell::Wall.to_char(), '#');
    /// assert_eq!(Cell::Collectible.to_char(), '*');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Stop => 'o',
            Cell::Hazard => 'x',
            Cell::Collectible => '*',
        }
    }

    /// Parses a cell character. The start marker `@` is not a cell and returns `None`.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'o' => Some(Cell::Stop),
            'x' => Some(Cell::Hazard),
            '*' => Some(Cell::Collectible),
            _ => None,
        }
    }

    /// Can the agent never enter this cell?
    pub fn is_blocking(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Does entering this cell end the slide?
    pub fn halts_slide(self) -> bool {
        matches!(self, Cell::Stop | Cell::Hazard)
    }
}

/// A board coordinate. `x` is the column, `y` the row.
///
/// Ordering is by `x`, then `y`; fingerprints rely on it being total and stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight directions the agent can be launched in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All directions in expansion order. Strategies that return the first path found
    /// (DFS, Greedy ties, the targeted BFS) depend on this order being fixed.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit vector as `(dx, dy)`, with `y` growing downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
            Direction::UpLeft => '↖',
            Direction::UpRight => '↗',
            Direction::DownLeft => '↙',
            Direction::DownRight => '↘',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable identity of a collectible: the coordinate it was placed on when the grid was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub Position);

impl CollectibleId {
    pub fn position(self) -> Position {
        self.0
    }
}

impl fmt::Display for CollectibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.x, self.0.y)
    }
}

/// The static board: a `rows` x `cols` array of cells stored row-major.
///
/// A grid never changes once built. Collectibles are indexed at construction, in row-major
/// order, and their identities are never reused; gathering one is tracked by the searcher or
/// the live session, not by editing the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    collectibles: Vec<CollectibleId>,
}

impl Grid {
    /// Builds a grid from row-major cells.
    ///
    /// # Errors
    /// `LevelError::BadDimensions` if either dimension is zero or `cells.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, LevelError> {
        if rows == 0 || cols == 0 || cells.len() != rows * cols {
            return Err(LevelError::BadDimensions {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        let collectibles = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Collectible)
            .map(|(i, _)| CollectibleId(Position::new(i % cols, i / cols)))
            .collect();
        Ok(Grid {
            rows,
            cols,
            cells,
            collectibles,
        })
    }

    /// Builds a grid from a vector of rows. All rows must be the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, LevelError> {
        let cols = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        if height == 0 {
            return Err(LevelError::EmptyLevel);
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LevelError::RaggedRow {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        Grid::new(height, cols, rows.into_iter().flatten().collect())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Returns the cell at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.y * self.cols + pos.x])
        } else {
            None
        }
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is out of bounds.
    pub fn cell(&self, pos: Position) -> Cell {
        assert!(self.in_bounds(pos), "position {} is outside the grid", pos);
        self.cells[pos.y * self.cols + pos.x]
    }

    /// All collectibles on the board, in row-major order.
    pub fn collectibles(&self) -> &[CollectibleId] {
        &self.collectibles
    }

    /// The neighbouring position one step in `direction`, if it is on the board.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let next = Position::new(x, y);
        self.in_bounds(next).then_some(next)
    }

    /// Iterates over rows as slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
}

/// A grid together with the agent's starting position.
///
/// This is the boundary where `InvalidStart` is caught: once a `Level` exists, searches can
/// assume the start is a legal square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    start: Position,
}

impl Level {
    /// Validates and pairs a grid with a start position.
    ///
    /// # Errors
    /// * `LevelError::StartOutOfBounds` if `start` is off the board.
    /// * `LevelError::InvalidStart` if `start` is on a Wall or a Hazard.
    pub fn new(grid: Grid, start: Position) -> Result<Self, LevelError> {
        match grid.get(start) {
            None => Err(LevelError::StartOutOfBounds(start)),
            Some(cell @ (Cell::Wall | Cell::Hazard)) => Err(LevelError::InvalidStart(start, cell)),
            Some(_) => Ok(Level { grid, start }),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player_position(&self) -> Position {
        self.start
    }

    /// The full target set: every collectible on the board.
    pub fn collectible_cells(&self) -> BTreeSet<CollectibleId> {
        self.grid.collectibles().iter().copied().collect()
    }
}

/// Result of launching the agent from `start` in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome {
    pub start: Position,
    pub end: Position,
    /// Every collectible the agent passed over, including the one it came to rest on.
    pub collected_along: BTreeSet<CollectibleId>,
    pub hazard_hit: bool,
}

impl SlideOutcome {
    /// True when the agent could not leave `start` at all.
    pub fn is_no_move(&self) -> bool {
        self.end == self.start
    }

    /// Whether this transition may enter a search frontier.
    pub fn is_viable(&self) -> bool {
        !self.hazard_hit && !self.is_no_move()
    }
}

/// Simulates one launch of the agent.
///
/// The agent steps one cell at a time in `direction`:
/// - a Wall or the board edge ahead stops it on its current cell;
/// - a Collectible is recorded and the slide continues;
/// - a Stop is entered and the slide ends there;
/// - a Hazard is entered, `hazard_hit` is set, and the slide ends there.
///
/// Each step moves strictly further along one axis, so a slide takes at most
/// `max(rows, cols)` steps.
///
/// # Examples
/// ```
/// use inertia_solver::engine::{slide, Direction, Position};
/// use inertia_solver::utils::level_from_str_array;
///
/// let level = level_from_str_array(&["@.*.#"]).unwrap();
/// let out = slide(level.grid(), level.player_position(), Direction::Right);
/// assert_eq!(out.end, Position::new(3, 0));
/// assert_eq!(out.collected_along.len(), 1);
/// assert!(!out.hazard_hit);
/// ```
pub fn slide(grid: &Grid, start: Position, direction: Direction) -> SlideOutcome {
    let mut end = start;
    let mut collected_along = BTreeSet::new();
    let mut hazard_hit = false;

    while let Some(next) = grid.step(end, direction) {
        match grid.cell(next) {
            Cell::Wall => break,
            Cell::Empty => end = next,
            Cell::Collectible => {
                end = next;
                collected_along.insert(CollectibleId(next));
            }
            Cell::Stop => {
                end = next;
                break;
            }
            Cell::Hazard => {
                end = next;
                hazard_hit = true;
                break;
            }
        }
    }

    SlideOutcome {
        start,
        end,
        collected_along,
        hazard_hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::level_from_str_array;

    #[test]
    fn test_cell_char_round_trip() {
        for cell in [Cell::Empty, Cell::Wall, Cell::Stop, Cell::Hazard, Cell::Collectible] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('@'), None);
        assert_eq!(Cell::from_char('?'), None);
        assert!(Cell::Wall.is_blocking());
        assert!(Cell::Stop.halts_slide() && Cell::Hazard.halts_slide());
        assert!(!Cell::Collectible.halts_slide());
    }

    #[test]
    fn test_grid_rejects_bad_dimensions() {
        assert!(matches!(
            Grid::new(2, 2, vec![Cell::Empty; 3]),
            Err(LevelError::BadDimensions { rows: 2, cols: 2, cells: 3 })
        ));
        assert!(Grid::new(0, 3, Vec::new()).is_err());
    }

    #[test]
    fn test_grid_from_rows_ragged() {
        let result = Grid::from_rows(vec![vec![Cell::Empty; 3], vec![Cell::Empty; 2]]);
        assert_eq!(
            result,
            Err(LevelError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_collectibles_indexed_row_major() {
        let level = level_from_str_array(&["@.*", "*..", "..*"]).unwrap();
        let ids: Vec<Position> = level
            .grid()
            .collectibles()
            .iter()
            .map(|id| id.position())
            .collect();
        assert_eq!(
            ids,
            vec![Position::new(2, 0), Position::new(0, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn test_step_respects_bounds() {
        let level = level_from_str_array(&["@..", "...", "..."]).unwrap();
        let grid = level.grid();
        assert_eq!(grid.step(Position::new(0, 0), Direction::Up), None);
        assert_eq!(grid.step(Position::new(0, 0), Direction::UpLeft), None);
        assert_eq!(
            grid.step(Position::new(0, 0), Direction::DownRight),
            Some(Position::new(1, 1))
        );
        assert_eq!(grid.step(Position::new(2, 2), Direction::Right), None);
    }

    #[test]
    fn test_level_rejects_start_on_wall() {
        let grid = Grid::from_rows(vec![vec![Cell::Wall, Cell::Empty]]).unwrap();
        assert_eq!(
            Level::new(grid.clone(), Position::new(0, 0)),
            Err(LevelError::InvalidStart(Position::new(0, 0), Cell::Wall))
        );
        assert_eq!(
            Level::new(grid.clone(), Position::new(5, 0)),
            Err(LevelError::StartOutOfBounds(Position::new(5, 0)))
        );
        assert!(Level::new(grid, Position::new(1, 0)).is_ok());
    }

    #[test]
    fn test_slide_stops_before_wall() {
        let level = level_from_str_array(&["@...#."]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::Right);
        assert_eq!(out.end, Position::new(3, 0));
        assert!(!out.hazard_hit);
        assert!(out.collected_along.is_empty());
    }

    #[test]
    fn test_slide_stops_at_edge() {
        let level = level_from_str_array(&["....", ".@..", "....", "...."]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::DownRight);
        assert_eq!(out.end, Position::new(3, 3));
    }

    #[test]
    fn test_slide_collects_without_halting() {
        let level = level_from_str_array(&["@*.*."]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::Right);
        assert_eq!(out.end, Position::new(4, 0));
        let collected: Vec<_> = out.collected_along.iter().map(|c| c.position()).collect();
        assert_eq!(collected, vec![Position::new(1, 0), Position::new(3, 0)]);
    }

    #[test]
    fn test_slide_halts_on_stop() {
        let level = level_from_str_array(&["@.o.."]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::Right);
        assert_eq!(out.end, Position::new(2, 0));
        assert!(out.is_viable());
    }

    #[test]
    fn test_slide_hits_hazard() {
        let level = level_from_str_array(&["@*x.*"]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::Right);
        assert_eq!(out.end, Position::new(2, 0));
        assert!(out.hazard_hit);
        assert_eq!(out.collected_along.len(), 1);
        assert!(!out.is_viable());
    }

    #[test]
    fn test_slide_no_move_against_wall() {
        let level = level_from_str_array(&["#@", ".."]).unwrap();
        let out = slide(level.grid(), level.player_position(), Direction::Left);
        assert!(out.is_no_move());
        assert!(!out.is_viable());
        let out = slide(level.grid(), level.player_position(), Direction::Up);
        assert!(out.is_no_move());
    }

    #[test]
    fn test_slide_terminates_from_every_cell() {
        let level = level_from_str_array(&[
            "@..#..*",
            ".o..x..",
            "..*...#",
            "#...o..",
            "..x..*.",
        ])
        .unwrap();
        let grid = level.grid();
        let bound = grid.rows().max(grid.cols());
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                let pos = Position::new(x, y);
                if grid.cell(pos).is_blocking() {
                    continue;
                }
                for dir in Direction::ALL {
                    let out = slide(grid, pos, dir);
                    assert!(grid.in_bounds(out.end));
                    assert!(!grid.cell(out.end).is_blocking());
                    assert!(pos.manhattan(out.end) <= 2 * bound);
                }
            }
        }
    }
}
