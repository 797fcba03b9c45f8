use std::fmt::{self, Write};

use crate::solve::Move;
use crate::{Cell, Direction, Grid, Vec2};

impl Cell {
    /// Whether no divider is drawn between `self` and `other`.
    fn joins(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Empty, Cell::Empty) | (Cell::Wall, Cell::Wall) => true,
            (Cell::Block(a), Cell::Block(b)) => a.group == b.group,
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(2 * self.width as usize - 1);
        writeln!(f, "+{border}+")?;
        for r in 0..self.height {
            f.write_char('|')?;
            for c in 0..self.width {
                let cell = self[Vec2(r, c)];
                cell.fmt(f)?;
                if c + 1 < self.width {
                    let joined = cell.joins(&self[Vec2(r, c + 1)]);
                    f.write_char(if joined { ' ' } else { '|' })?;
                }
            }
            f.write_str("|\n")?;

            if r + 1 == self.height {
                continue;
            }
            f.write_char('|')?;
            for c in 0..self.width {
                let cell = self[Vec2(r, c)];
                let down = cell.joins(&self[Vec2(r + 1, c)]);
                f.write_char(if down { ' ' } else { '-' })?;
                if c + 1 < self.width {
                    let corner = down
                        && cell.joins(&self[Vec2(r, c + 1)])
                        && cell.joins(&self[Vec2(r + 1, c + 1)]);
                    f.write_char(if corner { '·' } else { '+' })?;
                }
            }
            f.write_str("|\n")?;
        }
        writeln!(f, "+{border}+")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => ' '.fmt(f),
            Cell::Wall => '#'.fmt(f),
            Cell::Block(block) => block.color.fmt(f),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => "R".fmt(f),
            Direction::Down => "D".fmt(f),
            Direction::Left => "L".fmt(f),
            Direction::Up => "U".fmt(f),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group.0, self.dir)
    }
}
