//! `dailydoku-engine` — solver core for the daily 3×3 category grid.
//!
//! Pure engine crate: receives a parsed puzzle and a matching capability,
//! returns a solution map and renders it. No CLI or network dependencies.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod grid;
pub mod kind;
pub mod merge;
pub mod model;
pub mod present;
pub mod resolve;

pub use aggregate::{aggregate, aggregate_parallel};
pub use catalog::Catalog;
pub use error::{CatalogError, ConfigError, GridError};
pub use kind::{CategoryKind, KindTable};
pub use model::{
    AbsentReason, CategoryConstraint, CellKey, CellOutcome, KindQuery, PuzzleGrid, QuerySpec,
    SolutionMap,
};
pub use present::{render, DisplayCount};
pub use resolve::{CellResolver, MatchError, Matcher};
