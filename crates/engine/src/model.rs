use std::collections::BTreeMap;
use std::fmt;

use crate::kind::CategoryKind;

/// Rows and columns per grid side. The puzzle is always 3×3.
pub const GRID_SIDE: usize = 3;

/// Cells per grid.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// One row or column header of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryConstraint {
    pub kind: CategoryKind,
    pub value: String,
    pub excluded_variants: Vec<String>,
}

impl CategoryConstraint {
    pub fn new(kind: CategoryKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            excluded_variants: Vec::new(),
        }
    }

    /// `kind(value)`
    pub fn label(&self) -> String {
        format!("{}({})", self.kind, self.value)
    }
}

impl Default for CategoryConstraint {
    /// Placeholder for a square the source left out.
    fn default() -> Self {
        Self::new(CategoryKind::Other(String::new()), "")
    }
}

impl fmt::Display for CategoryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

/// The daily puzzle: three row constraints, three column constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleGrid {
    rows: [CategoryConstraint; GRID_SIDE],
    columns: [CategoryConstraint; GRID_SIDE],
    date: String,
}

impl PuzzleGrid {
    pub fn new(
        rows: [CategoryConstraint; GRID_SIDE],
        columns: [CategoryConstraint; GRID_SIDE],
        date: impl Into<String>,
    ) -> Self {
        Self {
            rows,
            columns,
            date: date.into(),
        }
    }

    pub fn rows(&self) -> &[CategoryConstraint; GRID_SIDE] {
        &self.rows
    }

    pub fn columns(&self) -> &[CategoryConstraint; GRID_SIDE] {
        &self.columns
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

// ---------------------------------------------------------------------------
// Cell identity
// ---------------------------------------------------------------------------

/// Identity of one grid cell.
///
/// Ordering and equality are positional first, so two cells whose headers
/// read the same text never collide. `Display` yields the textual key
/// `kind(value),kind(value)`, row constraint first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: usize,
    pub column: usize,
    label: String,
}

impl CellKey {
    pub fn new(
        row: usize,
        column: usize,
        row_constraint: &CategoryConstraint,
        column_constraint: &CategoryConstraint,
    ) -> Self {
        Self {
            row,
            column,
            label: format!("{row_constraint},{column_constraint}"),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Values queried for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindQuery {
    /// The entity holds this value.
    Single(String),
    /// The entity holds both values of the same kind (row first).
    Dual([String; 2]),
}

impl KindQuery {
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Dual(values) => values,
        }
    }
}

/// Query for one cell: kind → one or two values.
///
/// Built only by [`crate::merge::merge`], which guarantees one entry for a
/// same-kind pair and two entries otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    entries: Vec<(CategoryKind, KindQuery)>,
}

impl QuerySpec {
    pub(crate) fn dual(kind: CategoryKind, first: String, second: String) -> Self {
        Self {
            entries: vec![(kind, KindQuery::Dual([first, second]))],
        }
    }

    pub(crate) fn pair(first: (CategoryKind, String), second: (CategoryKind, String)) -> Self {
        Self {
            entries: vec![
                (first.0, KindQuery::Single(first.1)),
                (second.0, KindQuery::Single(second.1)),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: &CategoryKind) -> Option<&KindQuery> {
        self.entries.iter().find(|(k, _)| k == kind).map(|(_, q)| q)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKind, &KindQuery)> {
        self.entries.iter().map(|(k, q)| (k, q))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &CategoryKind> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (kind, query)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}:[{}]", query.values().join(","))?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a cell has no candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The matcher does not know this kind.
    Unsupported(String),
    /// Any other matcher failure; the detail is logged, not shown per cell.
    MatchFailed(String),
    /// The matcher answered with an empty list.
    NoCandidates,
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(kind) => write!(f, "category {kind} is not supported yet"),
            Self::MatchFailed(_) => write!(f, "unknown error when querying entities"),
            Self::NoCandidates => write!(f, "no entity satisfies both categories"),
        }
    }
}

/// Result of resolving one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// Candidates in the matcher's own order. Never empty.
    Matched(Vec<String>),
    Absent(AbsentReason),
}

impl CellOutcome {
    /// Candidates, or an empty slice when absent.
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Matched(ids) => ids,
            Self::Absent(_) => &[],
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.candidates().first().map(String::as_str)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }
}

// ---------------------------------------------------------------------------
// Solution
// ---------------------------------------------------------------------------

/// Outcome per cell for one solve pass.
#[derive(Debug, Clone, Default)]
pub struct SolutionMap {
    cells: BTreeMap<CellKey, CellOutcome>,
}

impl SolutionMap {
    pub(crate) fn insert(&mut self, key: CellKey, outcome: CellOutcome) {
        let previous = self.cells.insert(key, outcome);
        debug_assert!(previous.is_none(), "cell resolved twice");
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True once every cell of the grid has an outcome.
    pub fn is_complete(&self) -> bool {
        self.cells.len() == GRID_CELLS
    }

    pub fn get(&self, row: usize, column: usize) -> Option<(&CellKey, &CellOutcome)> {
        self.cells
            .iter()
            .find(|(key, _)| key.row == row && key.column == column)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &CellOutcome)> {
        self.cells.iter()
    }

    pub fn absent_count(&self) -> usize {
        self.cells.values().filter(|o| o.is_absent()).count()
    }
}
