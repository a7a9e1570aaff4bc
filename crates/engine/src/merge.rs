use crate::model::{CategoryConstraint, QuerySpec};

/// Combine a row and a column constraint into one query.
///
/// Same kind: one entry holding both values, row value first
/// (`type(Fire)` × `type(Flying)` asks for Fire/Flying dual types).
/// Equal values are kept twice. Different kinds: one entry per kind.
pub fn merge(row: &CategoryConstraint, column: &CategoryConstraint) -> QuerySpec {
    if row.kind == column.kind {
        QuerySpec::dual(row.kind.clone(), row.value.clone(), column.value.clone())
    } else {
        QuerySpec::pair(
            (row.kind.clone(), row.value.clone()),
            (column.kind.clone(), column.value.clone()),
        )
    }
}
