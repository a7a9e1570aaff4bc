use std::collections::HashSet;
use std::sync::Mutex;

use dailydoku_engine::grid::parse_payload;
use dailydoku_engine::{
    aggregate, aggregate_parallel, render, AbsentReason, CategoryKind, CellOutcome, CellResolver,
    DisplayCount, KindQuery, KindTable, MatchError, Matcher, PuzzleGrid, QuerySpec,
};

const PUZZLE: &str = r#"{
    "x1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] },
    "x2": { "type": "POKEMON_TYPE", "obj": "Water", "excludedForms": [] },
    "x3": { "type": "GENERATION", "obj": "3", "excludedForms": [] },
    "y1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] },
    "y2": { "type": "LEGENDARY", "obj": "true", "excludedForms": [] },
    "y3": { "type": "POKEMON_MOVE", "obj": "Surf", "excludedForms": [] },
    "date": "2026-10-19"
}"#;

/// Rejects `move`, answers everything else with one id per call and
/// records every query it sees.
struct NoMoves {
    seen: Mutex<Vec<QuerySpec>>,
}

impl NoMoves {
    fn new() -> Self {
        Self { seen: Mutex::new(Vec::new()) }
    }
}

impl Matcher for NoMoves {
    fn find(&self, query: &QuerySpec) -> Result<Vec<String>, MatchError> {
        self.seen.lock().unwrap().push(query.clone());
        if query.get(&CategoryKind::Move).is_some() {
            return Err(MatchError::UnsupportedKind("move".into()));
        }
        Ok(vec![query.to_string(), "spare".into()])
    }
}

fn scenario_grid() -> PuzzleGrid {
    let payload = parse_payload(PUZZLE).unwrap();
    PuzzleGrid::from_payload(&payload, &KindTable::default())
}

// -------------------------------------------------------------------------
// Merge
// -------------------------------------------------------------------------

#[test]
fn scenario_queries() {
    let matcher = NoMoves::new();
    let resolver = CellResolver::new(&matcher);
    aggregate(&scenario_grid(), |key, query| resolver.resolve(key, query));

    let seen = matcher.seen.lock().unwrap();
    assert_eq!(seen.len(), 9);

    // (row1, col1): same kind, both values kept
    assert_eq!(seen[0].len(), 1);
    assert_eq!(
        seen[0].get(&CategoryKind::Type),
        Some(&KindQuery::Dual(["Fire".into(), "Fire".into()]))
    );

    // (row1, col2): independent kinds
    assert_eq!(seen[1].len(), 2);
    assert_eq!(seen[1].get(&CategoryKind::Type).unwrap().values(), ["Fire"]);
    assert_eq!(seen[1].get(&CategoryKind::Legendary).unwrap().values(), ["true"]);

    // (row3, col3)
    assert_eq!(seen[8].len(), 2);
    assert_eq!(seen[8].get(&CategoryKind::Generation).unwrap().values(), ["3"]);
    assert_eq!(seen[8].get(&CategoryKind::Move).unwrap().values(), ["Surf"]);
}

// -------------------------------------------------------------------------
// Partial failure
// -------------------------------------------------------------------------

#[test]
fn unsupported_column_leaves_six_cells_resolved() {
    let matcher = NoMoves::new();
    let resolver = CellResolver::new(&matcher);
    let solution = aggregate(&scenario_grid(), |key, query| resolver.resolve(key, query));

    assert_eq!(solution.len(), 9);
    assert_eq!(solution.absent_count(), 3);
    for (key, outcome) in solution.iter() {
        if key.column == 2 {
            assert_eq!(
                outcome,
                &CellOutcome::Absent(AbsentReason::Unsupported("move".into())),
                "{key}"
            );
        } else {
            assert!(!outcome.is_absent(), "{key}");
        }
    }
}

#[test]
fn parallel_matches_sequential() {
    let matcher = NoMoves::new();
    let resolver = CellResolver::new(&matcher);
    let grid = scenario_grid();

    let sequential = aggregate(&grid, |key, query| resolver.resolve(key, query));
    let parallel = aggregate_parallel(&grid, |key, query| resolver.resolve(key, query));

    assert_eq!(parallel.len(), 9);
    let seq: Vec<_> = sequential.iter().collect();
    let par: Vec<_> = parallel.iter().collect();
    assert_eq!(seq, par);
}

#[test]
fn keys_are_unique_per_position() {
    let solution = aggregate(&scenario_grid(), |_, _| {
        CellOutcome::Absent(AbsentReason::NoCandidates)
    });
    let positions: HashSet<(usize, usize)> =
        solution.iter().map(|(k, _)| (k.row, k.column)).collect();
    assert_eq!(positions.len(), 9);
    assert_eq!(solution.get(0, 0).unwrap().0.to_string(), "type(Fire),type(Fire)");
    assert_eq!(solution.get(2, 2).unwrap().0.to_string(), "generation(3),move(Surf)");
}

// -------------------------------------------------------------------------
// Rendering
// -------------------------------------------------------------------------

#[test]
fn grid_render_marks_unsupported_cells() {
    let matcher = NoMoves::new();
    let resolver = CellResolver::new(&matcher);
    let grid = scenario_grid();
    let solution = aggregate(&grid, |key, query| resolver.resolve(key, query));

    let mut out = Vec::new();
    render(&mut out, &grid, &solution, DisplayCount::SINGLE).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("type(Fire)") && lines[0].contains("generation(3)"));
    assert!(lines[3].starts_with("move(Surf)"));
    assert_eq!(lines[3].split_whitespace().skip(1).collect::<Vec<_>>(), ["-", "-", "-"]);
    assert!(lines[1].contains("{type:[Fire,Fire]}"));
}

#[test]
fn list_render_truncates_to_count() {
    let matcher = NoMoves::new();
    let resolver = CellResolver::new(&matcher);
    let grid = scenario_grid();
    let solution = aggregate(&grid, |key, query| resolver.resolve(key, query));

    for n in [2, 5] {
        let mut out = Vec::new();
        render(&mut out, &grid, &solution, DisplayCount::new(n).unwrap()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains(
            "type(Fire),legendary(true): [{type:[Fire], legendary:[true]}, spare]"
        ));
        assert_eq!(text.matches("category move is not supported yet").count(), 3);
    }
}
