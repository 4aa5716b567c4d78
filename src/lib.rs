use std::ops::Index;

use arrayvec::ArrayVec;
use derive_more::Display;
use tracing::debug;

mod fmt;
mod parse;
pub mod solve;

pub use fmt::MoverView;

#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
pub enum Error {
    #[display("Position {pos} is outside the {height}x{width} grid")]
    OutOfBounds { pos: Pos, height: u16, width: u16 },
    #[display("Missing {endpoint} in the map")]
    MissingEndpoint { endpoint: Endpoint },
    #[display("Multiple {endpoint} markers, at {first} and {second}")]
    DuplicateEndpoint {
        endpoint: Endpoint,
        first: Pos,
        second: Pos,
    },
    #[display("Row {line} has {found} cells, expecting width {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("Map of {height}x{width} cells exceeds 65535 cells per side")]
    TooLarge { height: usize, width: usize },
    #[display("No route recorded for finish {finish}")]
    NoRouteRecorded { finish: Pos },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endpoint {
    #[display("start (S)")]
    Start,
    #[display("finish (F)")]
    Finish,
}

/// A `(row, column)` cell coordinate, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub u16, pub u16);

impl Pos {
    /// One cell over in `dir`, or `None` if that underflows or overflows the coordinate space.
    /// Grid extents are not checked.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        Some(Pos(
            self.0.checked_add_signed(dr)?,
            self.1.checked_add_signed(dc)?,
        ))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    #[default]
    Open,
    Blocked,
    Start,
    Finish,
}

impl Marker {
    pub fn is_open(self) -> bool {
        self != Self::Blocked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up = 0,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Expansion order. Earlier directions win ties between equally short routes.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn delta(self) -> (i16, i16) {
        const DELTAS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DELTAS[self as usize]
    }

    pub fn label(self) -> &'static str {
        const LABELS: [&str; 4] = ["up", "down", "left", "right"];
        LABELS[self as usize]
    }
}

/// Where a single slide ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideOutcome {
    /// Moved at least one cell and came to rest against the edge or a blocked cell.
    Stopped(Pos),
    /// Entered the finish cell, which ends the slide immediately.
    ReachedFinish(Pos),
    /// The first step is already off the grid or blocked.
    Blocked,
}

impl SlideOutcome {
    pub fn destination(self) -> Option<Pos> {
        match self {
            Self::Stopped(pos) | Self::ReachedFinish(pos) => Some(pos),
            Self::Blocked => None,
        }
    }
}

/// An immutable maze with exactly one start and one finish.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: u16,
    width: u16,
    cells: Box<[Marker]>,
    start: Pos,
    finish: Pos,
}

impl Index<Pos> for Grid {
    type Output = Marker;
    fn index(&self, pos: Pos) -> &Self::Output {
        match self.idx(pos) {
            Some(idx) => &self.cells[idx],
            None => panic!("{}", self.out_of_bounds(pos)),
        }
    }
}

impl Grid {
    /// Builds a grid from rows of markers, locating the endpoints.
    pub fn from_rows(rows: Vec<Vec<Marker>>) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let (Ok(h), Ok(w)) = (u16::try_from(height), u16::try_from(width)) else {
            return Err(Error::TooLarge { height, width });
        };

        let mut start = None;
        let mut finish = None;
        let mut cells = Vec::with_capacity(height * width);
        for (row, markers) in rows.into_iter().enumerate() {
            if markers.len() != width {
                return Err(Error::RaggedRow {
                    line: row + 1,
                    expected: width,
                    found: markers.len(),
                });
            }
            for (col, marker) in markers.into_iter().enumerate() {
                let pos = Pos(row as u16, col as u16);
                let (slot, endpoint) = match marker {
                    Marker::Start => (&mut start, Endpoint::Start),
                    Marker::Finish => (&mut finish, Endpoint::Finish),
                    Marker::Open | Marker::Blocked => {
                        cells.push(marker);
                        continue;
                    }
                };
                if let Some(first) = slot.replace(pos) {
                    return Err(Error::DuplicateEndpoint {
                        endpoint,
                        first,
                        second: pos,
                    });
                }
                cells.push(marker);
            }
        }

        let grid = Grid {
            height: h,
            width: w,
            cells: cells.into(),
            start: start.ok_or(Error::MissingEndpoint {
                endpoint: Endpoint::Start,
            })?,
            finish: finish.ok_or(Error::MissingEndpoint {
                endpoint: Endpoint::Finish,
            })?,
        };
        debug!(
            height = grid.height,
            width = grid.width,
            start = ?grid.start,
            finish = ?grid.finish,
            "grid built"
        );
        Ok(grid)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of cells, which also bounds the number of distinct slide destinations.
    pub fn area(&self) -> usize {
        self.height as usize * self.width as usize
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn finish(&self) -> Pos {
        self.finish
    }

    pub fn marker_at(&self, pos: Pos) -> Result<Marker, Error> {
        self.idx(pos)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Whether a mover may enter `pos`. Cells outside the grid are never open.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.marker_at(pos).is_ok_and(Marker::is_open)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Marker)> + '_ {
        let idx_iter = std::iter::successors(Some(Pos(0, 0)), |&Pos(r, c)| {
            if c + 1 < self.width {
                Some(Pos(r, c + 1))
            } else {
                r.checked_add(1).map(|r| Pos(r, 0))
            }
        });
        idx_iter.zip(self.cells.iter().copied())
    }

    /// Slides from `origin` in `dir` until the next cell is off the grid or blocked,
    /// stopping early on the finish.
    pub fn slide(&self, origin: Pos, dir: Direction) -> SlideOutcome {
        let mut cur = origin;
        while let Some(next) = cur.step(dir).filter(|&pos| self.is_open(pos)) {
            cur = next;
            if self[cur] == Marker::Finish {
                return SlideOutcome::ReachedFinish(cur);
            }
        }
        if cur == origin {
            SlideOutcome::Blocked
        } else {
            SlideOutcome::Stopped(cur)
        }
    }

    /// All non-blocked slides from `pos`, in [`Direction::ALL`] order.
    pub fn slides(&self, pos: Pos) -> ArrayVec<(Direction, Pos), 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| Some((dir, self.slide(pos, dir).destination()?)))
            .collect()
    }

    fn idx(&self, pos: Pos) -> Option<usize> {
        (pos.0 < self.height && pos.1 < self.width)
            .then(|| pos.0 as usize * self.width as usize + pos.1 as usize)
    }

    fn out_of_bounds(&self, pos: Pos) -> Error {
        Error::OutOfBounds {
            pos,
            height: self.height,
            width: self.width,
        }
    }
}
