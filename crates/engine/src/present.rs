//! Text rendering of a solved grid.
//!
//! Two modes, picked by the display count:
//! - `n == 1`: the grid as an aligned table, one entity per cell.
//! - `n > 1`: one line per cell with up to `n` candidates.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::error::ConfigError;
use crate::model::{AbsentReason, CellOutcome, PuzzleGrid, SolutionMap, GRID_SIDE};

/// Shown in list mode for a cell without candidates.
pub const NO_MATCH: &str = "unable to match this combination of categories :(";

/// Shown in grid mode for a cell without candidates.
pub const PLACEHOLDER: &str = "-";

/// Spaces between table columns.
const GUTTER: usize = 3;

/// Validated number of candidates to show per cell. Always ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCount(usize);

impl DisplayCount {
    pub const SINGLE: DisplayCount = DisplayCount(1);

    pub fn new(n: i64) -> Result<Self, ConfigError> {
        match usize::try_from(n) {
            Ok(count) if count >= 1 => Ok(Self(count)),
            _ => Err(ConfigError::InvalidDisplayCount(n)),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn is_single(self) -> bool {
        self.0 == 1
    }
}

impl Default for DisplayCount {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Write the solution in the mode selected by `count`.
pub fn render<W: Write>(
    out: &mut W,
    grid: &PuzzleGrid,
    solution: &SolutionMap,
    count: DisplayCount,
) -> io::Result<()> {
    if count.is_single() {
        render_grid(out, grid, solution)
    } else {
        render_list(out, solution, count.get())
    }
}

/// At most `n` leading candidates of a cell.
pub fn leading_candidates(outcome: &CellOutcome, n: usize) -> &[String] {
    let candidates = outcome.candidates();
    &candidates[..candidates.len().min(n)]
}

fn render_list<W: Write>(out: &mut W, solution: &SolutionMap, n: usize) -> io::Result<()> {
    for (key, outcome) in solution.iter() {
        match outcome {
            CellOutcome::Matched(_) => {
                writeln!(out, "{key}: [{}]", leading_candidates(outcome, n).join(", "))?;
            }
            CellOutcome::Absent(AbsentReason::Unsupported(kind)) => {
                writeln!(out, "{key}: {NO_MATCH} (category {kind} is not supported yet)")?;
            }
            CellOutcome::Absent(_) => writeln!(out, "{key}: {NO_MATCH}")?,
        }
    }
    Ok(())
}

/// Header lists the row constraints; each body line starts with a column
/// constraint and holds the first candidate for (row, that column).
fn render_grid<W: Write>(out: &mut W, grid: &PuzzleGrid, solution: &SolutionMap) -> io::Result<()> {
    let mut table: Vec<Vec<String>> = Vec::with_capacity(GRID_SIDE + 1);

    let mut header = vec![" ".to_string()];
    header.extend(grid.rows().iter().map(|c| c.label()));
    table.push(header);

    for (col_idx, column) in grid.columns().iter().enumerate() {
        let mut line = vec![column.label()];
        for row_idx in 0..GRID_SIDE {
            let entity = solution
                .get(row_idx, col_idx)
                .and_then(|(_, outcome)| outcome.first())
                .unwrap_or(PLACEHOLDER);
            line.push(entity.to_string());
        }
        table.push(line);
    }

    write_aligned(out, &table)
}

fn write_aligned<W: Write>(out: &mut W, table: &[Vec<String>]) -> io::Result<()> {
    let columns = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for line in table {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    for line in table {
        let mut text = String::new();
        for (i, cell) in line.iter().enumerate() {
            text.push_str(cell);
            if i + 1 < line.len() {
                let pad = widths[i] - UnicodeWidthStr::width(cell.as_str()) + GUTTER;
                text.push_str(&" ".repeat(pad));
            }
        }
        writeln!(out, "{text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::kind::CategoryKind;
    use crate::model::CategoryConstraint;
    use proptest::prelude::*;

    fn c(kind: CategoryKind, value: &str) -> CategoryConstraint {
        CategoryConstraint::new(kind, value)
    }

    fn sample_grid() -> PuzzleGrid {
        PuzzleGrid::new(
            [
                c(CategoryKind::Type, "Fire"),
                c(CategoryKind::Type, "Water"),
                c(CategoryKind::Generation, "3"),
            ],
            [
                c(CategoryKind::Type, "Fire"),
                c(CategoryKind::Legendary, "true"),
                c(CategoryKind::Move, "Surf"),
            ],
            "2026-10-19",
        )
    }

    fn render_to_string(grid: &PuzzleGrid, solution: &SolutionMap, n: i64) -> String {
        let mut buf = Vec::new();
        render(&mut buf, grid, solution, DisplayCount::new(n).unwrap()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn display_count_rejects_non_positive() {
        assert_eq!(DisplayCount::new(0), Err(ConfigError::InvalidDisplayCount(0)));
        assert_eq!(DisplayCount::new(-3), Err(ConfigError::InvalidDisplayCount(-3)));
        assert_eq!(DisplayCount::new(5).unwrap().get(), 5);
        assert!(DisplayCount::default().is_single());
    }

    #[test]
    fn grid_mode_table() {
        let grid = sample_grid();
        let solution = aggregate(&grid, |key, _| match (key.row, key.column) {
            (_, 2) => CellOutcome::Absent(AbsentReason::Unsupported("move".into())),
            (0, 0) => CellOutcome::Matched(vec!["charmander".into(), "vulpix".into()]),
            (r, c) => CellOutcome::Matched(vec![format!("e{r}{c}")]),
        });
        let text = render_to_string(&grid, &solution, 1);
        let expected = concat!(
            "                  type(Fire)   type(Water)   generation(3)\n",
            "type(Fire)        charmander   e10           e20\n",
            "legendary(true)   e01          e11           e21\n",
            "move(Surf)        -            -             -\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn grid_mode_always_three_body_rows() {
        let grid = sample_grid();
        let solution = aggregate(&grid, |_, _| CellOutcome::Absent(AbsentReason::NoCandidates));
        let text = render_to_string(&grid, &solution, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].split_whitespace().count(), 3);
        for line in &lines[1..] {
            assert_eq!(line.split_whitespace().filter(|w| *w == PLACEHOLDER).count(), 3);
        }
    }

    #[test]
    fn list_mode_truncates_and_marks_absent() {
        let grid = sample_grid();
        let solution = aggregate(&grid, |key, _| match (key.row, key.column) {
            (0, 0) => CellOutcome::Matched(["a", "b", "c", "d"].map(String::from).to_vec()),
            (0, 2) => CellOutcome::Absent(AbsentReason::Unsupported("move".into())),
            (1, 1) => CellOutcome::Absent(AbsentReason::MatchFailed("timeout".into())),
            _ => CellOutcome::Matched(vec!["x".into()]),
        });
        let text = render_to_string(&grid, &solution, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.contains(&"type(Fire),type(Fire): [a, b, c]"));
        assert!(lines.contains(&"type(Fire),legendary(true): [x]"));
        assert!(lines.contains(
            &"type(Fire),move(Surf): unable to match this combination of categories :( (category move is not supported yet)"
        ));
        assert!(lines.contains(
            &"type(Water),legendary(true): unable to match this combination of categories :("
        ));
        assert!(!text.contains("timeout"));
    }

    proptest! {
        #[test]
        fn truncation_never_exceeds_available(available in 0usize..20, n in 1usize..30) {
            let ids: Vec<String> = (0..available).map(|i| format!("e{i}")).collect();
            let outcome = if ids.is_empty() {
                CellOutcome::Absent(AbsentReason::NoCandidates)
            } else {
                CellOutcome::Matched(ids.clone())
            };
            let shown = leading_candidates(&outcome, n);
            prop_assert_eq!(shown.len(), available.min(n));
            prop_assert_eq!(shown, &ids[..shown.len()]);
        }
    }
}
