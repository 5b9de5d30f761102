//! The heat-loss map the crucible travels over.

use std::fmt;
use std::str::FromStr;

use crate::error::{MalformedInput, Result};
use crate::puzzle::Position;

/// Marks the impassable ring around the map.
const SENTINEL: u8 = u8::MAX;

/// An immutable rectangular grid of per-block costs in `0..=9`.
///
/// Cells are stored row-major with one sentinel cell of padding on every
/// side, so a lookup one step past any edge lands on the sentinel instead of
/// needing its own bounds branch. `(0, 0)` is the top-left block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    min_cost: u8,
}

impl CostGrid {
    /// Build a grid from rows of digit characters.
    ///
    /// A trailing `\r` on each row and blank rows at the end are ignored.
    /// Anything else that is not a digit, or rows of unequal length, reject
    /// the whole grid.
    pub fn from_rows<Rows, Row>(rows: Rows) -> Result<Self>
    where
        Rows: IntoIterator<Item = Row>,
        Row: AsRef<str>,
    {
        let mut parsed: Vec<Vec<u8>> = Vec::new();
        for (line, row) in rows.into_iter().enumerate() {
            let row = row.as_ref().trim_end_matches('\r');
            let mut digits = Vec::with_capacity(row.len());
            for (column, found) in row.chars().enumerate() {
                let digit = found.to_digit(10).ok_or(MalformedInput::InvalidCell {
                    line: line + 1,
                    column: column + 1,
                    found,
                })?;
                digits.push(digit as u8);
            }
            parsed.push(digits);
        }

        while parsed.last().is_some_and(|row| row.is_empty()) {
            parsed.pop();
        }

        let width = match parsed.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(MalformedInput::EmptyGrid.into()),
        };
        if let Some((line, row)) = parsed
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(MalformedInput::RaggedRow {
                line: line + 1,
                expected: width,
                found: row.len(),
            }
            .into());
        }

        let height = parsed.len();
        let padded_width = width + 2;
        let mut cells = vec![SENTINEL; padded_width * (height + 2)];
        for (y, row) in parsed.iter().enumerate() {
            let start = (y + 1) * padded_width + 1;
            cells[start..start + width].copy_from_slice(row);
        }

        Ok(Self::with_cells(width, height, cells))
    }

    fn with_cells(width: usize, height: usize, cells: Vec<u8>) -> Self {
        let min_cost = cells
            .iter()
            .copied()
            .filter(|&cost| cost != SENTINEL)
            .min()
            .unwrap_or(0);
        Self {
            width,
            height,
            cells,
            min_cost,
        }
    }

    /// Index into the padded storage, or `None` beyond the sentinel ring.
    fn idx(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x.checked_add(1)?).ok()?;
        let y = usize::try_from(position.y.checked_add(1)?).ok()?;
        (x < self.width + 2 && y < self.height + 2).then_some(y * (self.width + 2) + x)
    }

    /// Heat loss incurred by entering `position`, or `None` off the map.
    pub fn cost(&self, position: Position) -> Option<u32> {
        self.idx(position)
            .map(|idx| self.cells[idx])
            .filter(|&cost| cost != SENTINEL)
            .map(u32::from)
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.cost(position).is_some()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The lava pool: top-left block.
    pub fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// The machine parts factory: bottom-right block.
    pub fn target(&self) -> Position {
        Position::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    /// Cheapest block anywhere on the map.
    pub fn min_cost(&self) -> u32 {
        u32::from(self.min_cost)
    }

    /// Clone with a single block's cost replaced.
    ///
    /// Returns `None` when `position` is off the map or `cost` is not a digit.
    pub fn with_cost(&self, position: Position, cost: u8) -> Option<Self> {
        if !self.in_bounds(position) || cost > 9 {
            return None;
        }
        let mut cells = self.cells.clone();
        cells[self.idx(position)?] = cost;
        Some(Self::with_cells(self.width, self.height, cells))
    }
}

impl FromStr for CostGrid {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_rows(s.lines())
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cost = self.cost(Position::new(x, y)).ok_or(fmt::Error)?;
                write!(f, "{cost}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_and_lookup() {
        let grid: CostGrid = "241\n321\n".parse().unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cost(Position::new(0, 0)), Some(2));
        assert_eq!(grid.cost(Position::new(2, 1)), Some(1));
        assert_eq!(grid.target(), Position::new(2, 1));
        assert_eq!(grid.min_cost(), 1);
    }

    #[test]
    fn test_sentinel_ring_and_beyond() {
        let grid: CostGrid = "12\n34".parse().unwrap();

        for position in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(2, 1),
            Position::new(1, 2),
            Position::new(-1, -1),
            Position::new(2, 2),
        ] {
            assert_eq!(grid.cost(position), None, "{position:?}");
            assert!(!grid.in_bounds(position));
        }
        // past the sentinel ring as well
        assert_eq!(grid.cost(Position::new(7, 0)), None);
        assert_eq!(grid.cost(Position::new(-5, -5)), None);
    }

    #[test]
    fn test_carriage_returns_and_trailing_blank_lines() {
        let grid: CostGrid = "12\r\n34\r\n\n\n".parse().unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_string(), "12\n34\n");
    }

    #[test]
    fn test_rejects_non_digit() {
        let err = "123\n4x6".parse::<CostGrid>().unwrap_err();
        assert_eq!(
            err,
            Error::MalformedInput(MalformedInput::InvalidCell {
                line: 2,
                column: 2,
                found: 'x',
            })
        );
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = "123\n45\n678".parse::<CostGrid>().unwrap_err();
        assert_eq!(
            err,
            Error::MalformedInput(MalformedInput::RaggedRow {
                line: 2,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_blank_line_inside_grid_is_ragged() {
        let err = "12\n\n34".parse::<CostGrid>().unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedInput(MalformedInput::RaggedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_input() {
        for input in ["", "\n\n", "\r\n"] {
            assert_eq!(
                input.parse::<CostGrid>().unwrap_err(),
                Error::MalformedInput(MalformedInput::EmptyGrid)
            );
        }
    }

    #[test]
    fn test_with_cost() {
        let grid: CostGrid = "12\n34".parse().unwrap();
        let raised = grid.with_cost(Position::new(0, 0), 9).unwrap();

        assert_eq!(raised.cost(Position::new(0, 0)), Some(9));
        assert_eq!(raised.min_cost(), 2);
        // the original is untouched
        assert_eq!(grid.cost(Position::new(0, 0)), Some(1));

        assert!(grid.with_cost(Position::new(2, 0), 1).is_none());
        assert!(grid.with_cost(Position::new(1, 1), 10).is_none());
    }
}
