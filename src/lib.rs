use std::ops::{Index, IndexMut};

use anyhow::{bail, ensure, Context, Result};
use arrayvec::ArrayVec;

mod fmt;
mod parse;
mod physics;
pub mod solve;

pub use physics::Blocked;

/// Color of blocks which never merge with anything.
pub const NEUTRAL: u8 = 0;
pub const MAX_COLOR: u8 = 9;

/// Identifier of a rigid group of blocks. Ids of a grid are always `1..=groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u8);

/// Row and column, counting the wall border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec2(pub u8, pub u8);

impl Vec2 {
    // Never called on the border, so it cannot leave the grid.
    fn step(self, dir: Direction) -> Vec2 {
        let (dr, dc) = dir.delta();
        Vec2(self.0.wrapping_add_signed(dr), self.1.wrapping_add_signed(dc))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block {
    pub color: u8,
    pub group: GroupId,
}

impl Block {
    pub fn is_chromatic(&self) -> bool {
        self.color != NEUTRAL
    }
}

impl Cell {
    pub fn block(&self) -> Option<Block> {
        match *self {
            Cell::Block(block) => Some(block),
            Cell::Empty | Cell::Wall => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Right = 0,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];
    /// The only directions a player may push in.
    pub const HORIZONTAL: [Self; 2] = [Self::Left, Self::Right];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    fn delta(self) -> (i8, i8) {
        const DELTAS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        DELTAS[self as usize]
    }
}

/// A puzzle configuration.
///
/// The grid is surrounded by a one-cell wall border. Equality covers group
/// numbering, which is kept canonical by the merge pass.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grid {
    height: u8,
    width: u8,
    groups: u8,
    cells: Box<[Cell]>,
}

impl Index<Vec2> for Grid {
    type Output = Cell;
    fn index(&self, pos: Vec2) -> &Self::Output {
        &self.cells[self.offset(pos)]
    }
}
impl IndexMut<Vec2> for Grid {
    fn index_mut(&mut self, pos: Vec2) -> &mut Self::Output {
        let idx = self.offset(pos);
        &mut self.cells[idx]
    }
}

impl Grid {
    /// Build a grid from its interior cells in row-major order. The wall
    /// border is added around them and touching same-colored groups are
    /// merged.
    pub fn from_interior(
        height: usize,
        width: usize,
        interior: impl IntoIterator<Item = Cell>,
    ) -> Result<Self> {
        ensure!(height > 0 && width > 0, "Empty grid");
        ensure!(
            height <= u8::MAX as usize - 2 && width <= u8::MAX as usize - 2,
            "Grid of {height}x{width} is too large",
        );

        let (height, width) = (height as u8 + 2, width as u8 + 2);
        let mut grid = Grid {
            height,
            width,
            groups: 0,
            cells: vec![Cell::Wall; height as usize * width as usize].into(),
        };

        let mut interior = interior.into_iter();
        let mut used = [false; u8::MAX as usize + 1];
        for pos in grid.interior() {
            let cell = interior.next().context("Too few cells")?;
            if let Cell::Block(block) = cell {
                ensure!(block.color <= MAX_COLOR, "Invalid color {}", block.color);
                ensure!(block.group.0 > 0, "Group ids start from 1");
                used[block.group.0 as usize] = true;
                grid.groups = grid.groups.max(block.group.0);
            }
            grid[pos] = cell;
        }
        ensure!(interior.next().is_none(), "Too many cells");
        if let Some(missing) = (1..=grid.groups).find(|&g| !used[g as usize]) {
            bail!("Group {missing} has no blocks");
        }

        // Each group must be a single 4-connected piece.
        let mut visited = vec![false; grid.cells.len()];
        let mut seen = [false; u8::MAX as usize + 1];
        for pos in grid.interior() {
            let Cell::Block(block) = grid[pos] else { continue };
            if visited[grid.offset(pos)] {
                continue;
            }
            let group = block.group;
            ensure!(!seen[group.0 as usize], "Group {} is not connected", group.0);
            seen[group.0 as usize] = true;
            grid.mark_region(pos, &mut visited, |b| b.group == group);
        }

        grid.merge_touching();
        Ok(grid)
    }

    /// Height including the border.
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Width including the border.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn groups(&self) -> usize {
        self.groups as usize
    }

    /// All cells with their positions in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Vec2, Cell)> + '_ {
        let idx_iter = std::iter::successors(Some(Vec2(0, 0)), |&Vec2(r, c)| {
            Some(if c + 1 < self.width {
                Vec2(r, c + 1)
            } else {
                Vec2(r + 1, 0)
            })
        });
        idx_iter.zip(self.cells.iter().copied())
    }

    fn offset(&self, pos: Vec2) -> usize {
        pos.0 as usize * self.width as usize + pos.1 as usize
    }

    /// Positions inside the border, row by row.
    fn interior(&self) -> impl Iterator<Item = Vec2> {
        let (height, width) = (self.height, self.width);
        (1..height - 1).flat_map(move |r| (1..width - 1).map(move |c| Vec2(r, c)))
    }

    /// Whether every color present forms a single connected region.
    ///
    /// Group ids are not enough here: two blocks of one color may share a
    /// group through a neutral or differently colored block without touching.
    pub fn is_solved(&self) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut seen = ArrayVec::<u8, { MAX_COLOR as usize }>::new();
        for pos in self.interior() {
            let Cell::Block(block) = self[pos] else { continue };
            if !block.is_chromatic() || visited[self.offset(pos)] {
                continue;
            }
            if seen.contains(&block.color) {
                // Second region of one color.
                return false;
            }
            seen.push(block.color);
            let color = block.color;
            self.mark_region(pos, &mut visited, |b| b.color == color);
        }
        true
    }

    /// Flood fill from `start` through blocks accepted by `joins`.
    fn mark_region(&self, start: Vec2, visited: &mut [bool], joins: impl Fn(&Block) -> bool) {
        let mut stack = vec![start];
        visited[self.offset(start)] = true;
        while let Some(pos) = stack.pop() {
            for dir in Direction::ALL {
                let next = pos.step(dir);
                let idx = self.offset(next);
                if !visited[idx] && matches!(self[next], Cell::Block(b) if joins(&b)) {
                    visited[idx] = true;
                    stack.push(next);
                }
            }
        }
    }
}
