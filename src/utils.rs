use crate::engine::{Cell, Grid, Level, Position};
use crate::error::LevelError;
use std::fmt;

/// Character marking the agent's start square. The square itself is `Cell::Empty`.
pub const START_CHAR: char = '@';

/// Parses an array of string slices into a `Level`.
///
/// Each string slice is one row, starting from row 0 at the top. Every row must have
/// the same number of characters.
///
/// Valid characters are:
/// - '.': `Cell::Empty`
/// - '#': `Cell::Wall`
/// - 'o': `Cell::Stop`
/// - 'x': `Cell::Hazard`
/// - '*': `Cell::Collectible`
/// - '@': the start position (an Empty cell); exactly one is required.
///
/// # Returns
/// * `Ok(Level)` if parsing and start validation succeed.
/// * `Err(LevelError)` for an empty input, rows of differing width, an unrecognized
///   character, or a missing or duplicated start marker.
///
/// # Examples
/// ```
/// use inertia_solver::utils::level_from_str_array;
/// use inertia_solver::engine::{Cell, Position};
///
/// let level = level_from_str_array(&[
///     "@.#",
///     "*ox",
/// ]).unwrap();
/// assert_eq!(level.player_position(), Position::new(0, 0));
/// assert_eq!(level.grid().cell(Position::new(2, 0)), Cell::Wall);
/// assert_eq!(level.grid().cell(Position::new(1, 1)), Cell::Stop);
/// assert_eq!(level.collectible_cells().len(), 1);
///
/// assert!(level_from_str_array(&["@?"]).is_err());
/// assert!(level_from_str_array(&["..."]).is_err()); // no start
/// ```
pub fn level_from_str_array(s: &[&str]) -> Result<Level, LevelError> {
    if s.is_empty() {
        return Err(LevelError::EmptyLevel);
    }

    let mut start: Option<Position> = None;
    let mut rows = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::with_capacity(row_str.len());
        for (c, ch) in row_str.chars().enumerate() {
            if ch == START_CHAR {
                let here = Position::new(c, r);
                if let Some(first) = start {
                    return Err(LevelError::DuplicateStart { first, second: here });
                }
                start = Some(here);
                row.push(Cell::Empty);
                continue;
            }
            let cell = Cell::from_char(ch).ok_or(LevelError::UnrecognizedCharacter {
                ch,
                row: r,
                col: c,
            })?;
            row.push(cell);
        }
        rows.push(row);
    }

    let grid = Grid::from_rows(rows)?;
    let start = start.ok_or(LevelError::MissingStart)?;
    Level::new(grid, start)
}

/// Parses a level from file contents: one row per line, surrounding whitespace trimmed,
/// blank lines skipped.
pub fn level_from_str(text: &str) -> Result<Level, LevelError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    level_from_str_array(&lines)
}

impl fmt::Display for Level {
    /// Writes the level back in the text format accepted by `level_from_str`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.player_position();
        for (y, row) in self.grid().iter_rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if start == Position::new(x, y) {
                    write!(f, "{}", START_CHAR)?;
                } else {
                    write!(f, "{}", cell.to_char())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str_array_valid() {
        let level = level_from_str_array(&["#.*..", "o@x..", "....*"]).unwrap();
        let grid = level.grid();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(level.player_position(), Position::new(1, 1));
        assert_eq!(grid.cell(Position::new(1, 1)), Cell::Empty);
        assert_eq!(grid.cell(Position::new(0, 0)), Cell::Wall);
        assert_eq!(grid.cell(Position::new(0, 1)), Cell::Stop);
        assert_eq!(grid.cell(Position::new(2, 1)), Cell::Hazard);
        assert_eq!(level.collectible_cells().len(), 2);
    }

    #[test]
    fn test_level_from_str_array_invalid_char() {
        let result = level_from_str_array(&["@.Z"]);
        assert_eq!(
            result,
            Err(LevelError::UnrecognizedCharacter { ch: 'Z', row: 0, col: 2 })
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unrecognized character 'Z'"));
    }

    #[test]
    fn test_level_from_str_array_ragged() {
        let result = level_from_str_array(&["@..", ".."]);
        assert_eq!(
            result,
            Err(LevelError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_level_from_str_array_start_markers() {
        assert_eq!(level_from_str_array(&["..", ".."]), Err(LevelError::MissingStart));
        assert_eq!(
            level_from_str_array(&["@.", ".@"]),
            Err(LevelError::DuplicateStart {
                first: Position::new(0, 0),
                second: Position::new(1, 1),
            })
        );
    }

    #[test]
    fn test_level_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert_eq!(level_from_str_array(&rows), Err(LevelError::EmptyLevel));
    }

    #[test]
    fn test_level_from_str_skips_blank_lines() {
        let text = "\n  @.*  \n\n  #.x\n";
        let level = level_from_str(text).unwrap();
        assert_eq!(level.grid().rows(), 2);
        assert_eq!(level.grid().cols(), 3);
    }

    #[test]
    fn test_display_matches_input() {
        let rows = ["#.*..", "o@x..", "....*"];
        let level = level_from_str_array(&rows).unwrap();
        assert_eq!(level.to_string(), rows.join("\n"));
    }
}
