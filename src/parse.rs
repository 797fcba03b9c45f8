use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::{Block, Cell, Grid, GroupId};

impl Grid {
    /// Build a grid from its rows, without the wall border.
    ///
    /// `#` is a wall, `1` to `9` a block of that color and anything else is
    /// empty. Each block starts out as a group of its own.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let first = rows.first().context("Empty level")?.as_ref();
        let width = first.chars().count();
        ensure!(width > 0, "Empty first row");

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut groups = 0u8;
        for (row, i) in rows.iter().zip(1..) {
            let row = row.as_ref();
            ensure!(
                row.chars().count() == width,
                "Width mismatch on line {i}, expecting width {width}",
            );
            for ch in row.chars() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '1'..='9' => {
                        groups = groups.checked_add(1).context("Too many blocks")?;
                        Cell::Block(Block {
                            color: ch as u8 - b'0',
                            group: GroupId(groups),
                        })
                    }
                    _ => Cell::Empty,
                };
                cells.push(cell);
            }
        }

        Self::from_interior(rows.len(), width, cells)
    }
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    /// Parse a level. It ends at the first blank line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines().take_while(|line| !line.is_empty()).collect::<Vec<_>>();
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;

    #[test]
    fn border_is_synthesized() {
        let grid = "1 1".parse::<Grid>().unwrap();
        assert_eq!((grid.height(), grid.width()), (3, 5));
        assert_eq!(grid.groups(), 2);
        for c in 0..5 {
            assert_eq!(grid[Vec2(0, c)], Cell::Wall);
            assert_eq!(grid[Vec2(2, c)], Cell::Wall);
        }
        assert_eq!(grid[Vec2(1, 2)], Cell::Empty);
    }

    #[test]
    fn stops_at_blank_line() {
        let grid = "1.\n#2\n\nignored".parse::<Grid>().unwrap();
        assert_eq!(grid.height(), 4);
        assert_eq!(grid[Vec2(2, 1)], Cell::Wall);
    }

    #[test]
    fn rejects_malformed_levels() {
        assert!("".parse::<Grid>().is_err());
        assert!("\n1".parse::<Grid>().is_err());
        assert!("11\n1".parse::<Grid>().is_err());
    }

    #[test]
    fn initial_touching_blocks_are_merged() {
        let grid = "11\n21".parse::<Grid>().unwrap();
        assert_eq!(grid.groups(), 2);
        assert_eq!(grid[Vec2(2, 2)].block().unwrap().group, GroupId(1));
        assert_eq!(grid[Vec2(2, 1)].block().unwrap().group, GroupId(2));
    }
}
