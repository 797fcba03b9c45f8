use anyhow::{ensure, Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use jelly_solver::{solve, Grid};
use tracing_subscriber::EnvFilter;

/// The only argument is the level file.
fn level_path(args: impl IntoIterator<Item = String>) -> Result<String> {
    let args = args.into_iter().collect::<Vec<_>>();
    ensure!(args.len() == 2, "Usage: jelly-solver <level.txt>");
    Ok(args[1].clone())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = level_path(std::env::args())?;
    let level = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to open input file ({path})"))?;
    let grid = level.parse::<Grid>().context("Failed to read level")?;

    let pb = ProgressBar::new_spinner().with_style(ProgressStyle::with_template(
        "{spinner} {human_pos} states expanded [{elapsed}]",
    )?);
    let result = solve::bfs(grid, || pb.inc(1));
    pb.finish_and_clear();

    let Some(solution) = result.solution else {
        println!("No solution found! (expanded {} states)", result.expanded);
        return Ok(());
    };

    println!(
        "Found a solution in {} steps (expanded {} states).",
        solution.moves.len(),
        result.expanded,
    );
    for (state, i) in solution.states.iter().zip(0usize..) {
        println!();
        match i.checked_sub(1).map(|j| solution.moves[j]) {
            Some(mv) => println!("{} {mv}", style(format!("Step {i}:")).bold()),
            None => println!("{}", style(format!("Step {i}:")).bold()),
        }
        print!("{state}");
    }
    Ok(())
}
