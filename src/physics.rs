use std::fmt;

use crate::{Block, Cell, Direction, Grid, GroupId, Vec2};

/// A push ran into a wall. The grid is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blocked;

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("push blocked by a wall")
    }
}

impl std::error::Error for Blocked {}

impl Grid {
    /// Push `group` one cell sideways, together with every block in its way,
    /// then let everything fall and merge touching groups of the same color.
    ///
    /// # Panics
    ///
    /// Panics if `dir` is vertical or `group` does not exist.
    pub fn push_group(&mut self, group: GroupId, dir: Direction) -> Result<(), Blocked> {
        assert!(dir.is_horizontal(), "groups can only be pushed sideways");
        assert!(
            (1..=self.groups).contains(&group.0),
            "no group {} among {}",
            group.0,
            self.groups,
        );

        let start = self
            .interior()
            .find(|&pos| matches!(self[pos], Cell::Block(b) if b.group == group))
            .expect("Group ids are contiguous");
        if !self.try_push(start, dir) {
            return Err(Blocked);
        }
        self.settle();
        self.merge_touching();
        Ok(())
    }

    /// Move everything grabbed from `start` one cell towards `dir`, or
    /// nothing at all.
    fn try_push(&mut self, start: Vec2, dir: Direction) -> bool {
        // TODO: Reuse the buffer across pushes of one settle sweep.
        let mut grabbed = Vec::new();
        let moved = self.grab(start, dir, &mut grabbed);
        for (pos, block) in grabbed {
            let dest = if moved { pos.step(dir) } else { pos };
            debug_assert_eq!(self[dest], Cell::Empty);
            self[dest] = Cell::Block(block);
        }
        moved
    }

    /// Lift every block that has to move along with `start`, recording where
    /// it came from. Returns false as soon as a wall is hit; the caller puts
    /// the recorded blocks back in that case.
    fn grab(&mut self, start: Vec2, dir: Direction, grabbed: &mut Vec<(Vec2, Block)>) -> bool {
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            // Reached twice.
            let Cell::Block(block) = self[pos] else { continue };
            self[pos] = Cell::Empty;
            grabbed.push((pos, block));

            for d in Direction::ALL {
                let next = pos.step(d);
                match self[next] {
                    Cell::Wall if d == dir => return false,
                    // Pushed along.
                    Cell::Block(_) if d == dir => stack.push(next),
                    // Same group sticks together.
                    Cell::Block(other) if other.group == block.group => stack.push(next),
                    _ => {}
                }
            }
        }
        true
    }

    /// Let every block fall as far as it can.
    ///
    /// One top-down sweep is enough: a block dropping into a lower row is
    /// visited again when the sweep reaches that row.
    pub(crate) fn settle(&mut self) {
        for pos in self.interior() {
            if let Cell::Block(_) = self[pos] {
                self.try_push(pos, Direction::Down);
            }
        }
    }

    /// Merge groups of same-colored blocks which touch each other, then
    /// renumber groups so that ids stay `1..=groups`.
    pub(crate) fn merge_touching(&mut self) {
        let mut merged = false;
        for pos in self.interior() {
            for dir in [Direction::Right, Direction::Down] {
                let Cell::Block(block) = self[pos] else { break };
                if !block.is_chromatic() {
                    break;
                }
                if let Cell::Block(other) = self[pos.step(dir)] {
                    if other.color == block.color && other.group != block.group {
                        self.regroup(pos.step(dir), other.group, block.group);
                        merged = true;
                    }
                }
            }
        }
        if merged {
            self.compact_groups();
        }
    }

    fn regroup(&mut self, start: Vec2, from: GroupId, to: GroupId) {
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            match &mut self[pos] {
                Cell::Block(block) if block.group == from => block.group = to,
                _ => continue,
            }
            stack.extend(Direction::ALL.map(|dir| pos.step(dir)));
        }
    }

    /// Close the gaps left by merged groups, keeping the relative order of
    /// the surviving ids.
    fn compact_groups(&mut self) {
        let mut used = vec![false; self.groups as usize + 1];
        for cell in self.cells.iter() {
            if let Cell::Block(block) = cell {
                used[block.group.0 as usize] = true;
            }
        }

        let mut next = 0;
        let renumbered = used
            .iter()
            .map(|&present| {
                if present {
                    next += 1;
                }
                GroupId(next)
            })
            .collect::<Vec<_>>();

        for cell in self.cells.iter_mut() {
            if let Cell::Block(block) = cell {
                block.group = renumbered[block.group.0 as usize];
            }
        }
        self.groups = next;
    }
}
