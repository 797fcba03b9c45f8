use std::fmt::Write;

use anyhow::{ensure, Context};
use jelly_solver::{solve, Grid};

use crate::common::*;

mod common;

fn main() {
    run_tests("solve", |map| {
        let grid = map.parse::<Grid>().context("Invalid map")?;

        let result = solve::bfs(grid.clone(), || {});
        let mut got = format!("{map}\n\n{SEPARATOR}");
        match result.solution {
            None => writeln!(got, "No solution").unwrap(),
            Some(solution) => {
                // Validate.
                ensure!(
                    solution.states.first() == Some(&grid),
                    "Solution does not start from the level"
                );
                let mut state = grid;
                for (mv, next) in solution.moves.iter().zip(&solution.states[1..]) {
                    state.push_group(mv.group, mv.dir).context("Invalid move")?;
                    ensure!(state == *next, "Move {mv} does not lead to the next state");
                }
                ensure!(state.is_solved(), "Invalid solution");

                writeln!(got, "{} moves", solution.moves.len()).unwrap();
                if !solution.moves.is_empty() {
                    let moves = solution
                        .moves
                        .iter()
                        .map(|mv| mv.to_string())
                        .collect::<Vec<_>>();
                    writeln!(got, "{}", moves.join(" ")).unwrap();
                }
            }
        }
        writeln!(got, "Expanded {} states", result.expanded).unwrap();

        Ok(got)
    });
}
