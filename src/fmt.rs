use std::fmt;

use crate::solve::{Route, Step};
use crate::{Direction, Grid, Marker, Pos, SlideOutcome};

/// Positions print one-based, as `(row,column)`.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0 as u32 + 1, self.1 as u32 + 1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Open => f.write_str("."),
            Marker::Blocked => f.write_str("0"),
            Marker::Start => f.write_str("S"),
            Marker::Finish => f.write_str("F"),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cells(self, None, f)
    }
}

/// A grid with the mover drawn as `@`.
#[derive(Debug, Clone, Copy)]
pub struct MoverView<'a> {
    grid: &'a Grid,
    mover: Pos,
}

impl<'a> MoverView<'a> {
    pub fn new(grid: &'a Grid, mover: Pos) -> Self {
        Self { grid, mover }
    }
}

impl fmt::Display for MoverView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cells(self.grid, Some(self.mover), f)
    }
}

fn fmt_cells(grid: &Grid, mover: Option<Pos>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (pos, marker) in grid.cells() {
        if pos.1 == 0 && pos.0 != 0 {
            f.write_str("\n")?;
        }
        if Some(pos) == mover {
            f.write_str("@")?;
        } else {
            write!(f, "{marker}")?;
        }
    }
    f.write_str("\n")
}

impl fmt::Display for SlideOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideOutcome::Stopped(pos) => write!(f, "stopped at {pos}"),
            SlideOutcome::ReachedFinish(pos) => write!(f, "reached finish at {pos}"),
            SlideOutcome::Blocked => f.write_str("blocked"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move {} to: {}", self.dir, self.to)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start at: {}", self.start)?;
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        writeln!(f, "Completed!")
    }
}
