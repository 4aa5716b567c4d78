use anyhow::{ensure, Context};
use slide_maze::{solve, Grid};

use crate::common::*;

mod common;

fn main() {
    run_tests("solve", |content| {
        let map = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let grid = map.parse::<Grid>().context("Invalid map")?;

        let Some(route) = solve::solve(&grid, || {})? else {
            return Ok(format!("{map}\n\n{SEPARATOR}No path found.\n"));
        };

        // Validate by replaying every slide.
        let mut pos = route.start;
        for (step, i) in route.steps.iter().zip(1..) {
            let to = grid.slide(pos, step.dir).destination();
            ensure!(to == Some(step.to), "Step {i} does not replay: {step}");
            pos = step.to;
        }
        ensure!(pos == grid.finish(), "Route ends at {pos}, not the finish");

        Ok(format!("{map}\n\n{SEPARATOR}{route}"))
    });
}
