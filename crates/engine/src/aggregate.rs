use rayon::prelude::*;

use crate::merge::merge;
use crate::model::{CellKey, CellOutcome, PuzzleGrid, QuerySpec, SolutionMap, GRID_CELLS};

/// Key and query for every cell, row outer, column inner.
pub fn cell_queries(grid: &PuzzleGrid) -> Vec<(CellKey, QuerySpec)> {
    let mut cells = Vec::with_capacity(GRID_CELLS);
    for (r, row) in grid.rows().iter().enumerate() {
        for (c, column) in grid.columns().iter().enumerate() {
            cells.push((CellKey::new(r, c, row, column), merge(row, column)));
        }
    }
    cells
}

/// Resolve every cell in order and collect the outcomes.
pub fn aggregate<F>(grid: &PuzzleGrid, mut resolve: F) -> SolutionMap
where
    F: FnMut(&CellKey, &QuerySpec) -> CellOutcome,
{
    let mut solution = SolutionMap::default();
    for (key, query) in cell_queries(grid) {
        let outcome = resolve(&key, &query);
        solution.insert(key, outcome);
    }
    debug_assert!(solution.is_complete());
    solution
}

/// Resolve all cells concurrently, one worker per cell.
///
/// Outcomes are gathered only after every cell has answered; each cell
/// writes its own key, so no cell can disturb another.
pub fn aggregate_parallel<F>(grid: &PuzzleGrid, resolve: F) -> SolutionMap
where
    F: Fn(&CellKey, &QuerySpec) -> CellOutcome + Sync,
{
    let cells = cell_queries(grid);
    let run = |cells: Vec<(CellKey, QuerySpec)>| -> Vec<(CellKey, CellOutcome)> {
        cells
            .into_par_iter()
            .map(|(key, query)| {
                let outcome = resolve(&key, &query);
                (key, outcome)
            })
            .collect()
    };

    let outcomes = match rayon::ThreadPoolBuilder::new().num_threads(GRID_CELLS).build() {
        Ok(pool) => pool.install(|| run(cells)),
        Err(e) => {
            log::warn!("cannot build solver thread pool, using the global pool: {e}");
            run(cells)
        }
    };

    let mut solution = SolutionMap::default();
    for (key, outcome) in outcomes {
        solution.insert(key, outcome);
    }
    debug_assert!(solution.is_complete());
    solution
}
