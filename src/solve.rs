use tracing::{debug, trace};

use crate::{Direction, Error, Grid, Pos};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// The slide that first discovered `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Pos,
    pub to: Pos,
    pub dir: Direction,
}

/// One line of a route: slide `dir` and land on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub dir: Direction,
    pub to: Pos,
}

impl From<MoveRecord> for Step {
    fn from(record: MoveRecord) -> Self {
        Step {
            dir: record.dir,
            to: record.to,
        }
    }
}

/// A reconstructed start-to-finish route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub start: Pos,
    pub steps: Vec<Step>,
}

/// Every position discovered by one search, keyed in discovery order.
/// The start maps to `None`.
#[derive(Debug, Clone, Default)]
pub struct MoveRecords(IndexMap<Pos, Option<MoveRecord>>);

impl MoveRecords {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_discovered(&self, pos: Pos) -> bool {
        self.0.contains_key(&pos)
    }

    /// The move that first reached `pos`; `None` for the start or an undiscovered position.
    pub fn get(&self, pos: Pos) -> Option<&MoveRecord> {
        self.0.get(&pos)?.as_ref()
    }

    pub fn discovery_order(&self) -> impl Iterator<Item = Pos> + '_ {
        self.0.keys().copied()
    }
}

#[derive(Debug, Clone)]
pub enum SearchResult {
    Found { records: MoveRecords, finish: Pos },
    NotFound,
}

/// Breadth-first search over slide moves. `on_step` is called once per expanded position.
pub fn search(grid: &Grid, start: Pos, finish: Pos, mut on_step: impl FnMut()) -> SearchResult {
    // Insertion order doubles as the FIFO frontier; `cursor` is its head.
    let mut records = IndexMap::with_capacity_and_hasher(grid.area(), Default::default());
    records.insert(start, None); // Sentinel.

    let mut cursor = 0;
    while let Some((&pos, _)) = records.get_index(cursor) {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        on_step();

        if pos == finish {
            debug!(expanded = cursor, discovered = records.len(), "reached finish");
            return SearchResult::Found {
                records: MoveRecords(records),
                finish,
            };
        }

        for (dir, to) in grid.slides(pos) {
            #[cfg(feature = "coz")]
            coz::progress!("Slide");

            trace!(from = ?pos, ?dir, ?to, "slide");
            records
                .entry(to)
                .or_insert(Some(MoveRecord { from: pos, to, dir }));
        }
        cursor += 1;
    }

    debug!(discovered = records.len(), "search exhausted");
    SearchResult::NotFound
}

/// Walks the records back from `finish` to `start` and returns the steps in travel order.
pub fn reconstruct(records: &MoveRecords, start: Pos, finish: Pos) -> Result<Vec<Step>, Error> {
    let no_route = || Error::NoRouteRecorded { finish };

    let last = *records.0.get(&finish).ok_or_else(no_route)?;
    let mut chain = std::iter::successors(last, |record| records.get(record.from).copied())
        .collect::<Vec<_>>();

    let origin = chain.last().map_or(finish, |record| record.from);
    if origin != start {
        return Err(no_route());
    }

    chain.reverse();
    Ok(chain.into_iter().map(Step::from).collect())
}

/// Searches `grid` from its start to its finish. `Ok(None)` means no route exists.
pub fn solve(grid: &Grid, on_step: impl FnMut()) -> Result<Option<Route>, Error> {
    let start = grid.start();
    match search(grid, start, grid.finish(), on_step) {
        SearchResult::Found { records, finish } => {
            let steps = reconstruct(&records, start, finish)?;
            debug!(moves = steps.len(), "route reconstructed");
            Ok(Some(Route { start, steps }))
        }
        SearchResult::NotFound => Ok(None),
    }
}
