//! Puzzle payload wire format and grid construction.
//!
//! The daily endpoint returns six squares, `x1..x3` for the rows and
//! `y1..y3` for the columns, plus a date:
//!
//! ```json
//! { "x1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] }, …,
//!   "date": "2026-10-19" }
//! ```
//!
//! Individual missing or `null` fields default to empty. A body that is not a JSON
//! object of this shape, or one with no categories at all, is an error.

use serde::{Deserialize, Deserializer};

use crate::error::GridError;
use crate::kind::KindTable;
use crate::model::{CategoryConstraint, PuzzleGrid};

/// `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One category square as sent by the puzzle source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategorySquare {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub obj: String,
    #[serde(deserialize_with = "null_as_default")]
    pub excluded_forms: Vec<String>,
}

impl CategorySquare {
    fn is_blank(&self) -> bool {
        self.kind.trim().is_empty()
    }

    fn to_constraint(&self, kinds: &KindTable) -> CategoryConstraint {
        CategoryConstraint {
            kind: kinds.translate(self.kind.trim()),
            value: self.obj.clone(),
            excluded_variants: self.excluded_forms.clone(),
        }
    }
}

/// The daily puzzle response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PuzzlePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub x1: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub x2: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub x3: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub y1: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub y2: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub y3: CategorySquare,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

impl PuzzlePayload {
    fn squares(&self) -> [&CategorySquare; 6] {
        [&self.x1, &self.x2, &self.x3, &self.y1, &self.y2, &self.y3]
    }
}

/// Parse a puzzle body. Fails on anything that is not a puzzle object.
pub fn parse_payload(text: &str) -> Result<PuzzlePayload, GridError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| GridError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(GridError::Malformed(format!(
            "expected a JSON object, found {}",
            json_type_name(&value)
        )));
    }
    let payload: PuzzlePayload =
        serde_json::from_value(value).map_err(|e| GridError::Malformed(e.to_string()))?;

    if payload.squares().iter().all(|s| s.is_blank()) {
        return Err(GridError::EmptyGrid);
    }
    let blank = payload.squares().iter().filter(|s| s.is_blank()).count();
    if blank > 0 {
        log::warn!("puzzle payload is missing {blank} of 6 categories");
    }
    Ok(payload)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl PuzzleGrid {
    /// Build the grid, translating source kind names through `kinds`.
    pub fn from_payload(payload: &PuzzlePayload, kinds: &KindTable) -> Self {
        PuzzleGrid::new(
            [
                payload.x1.to_constraint(kinds),
                payload.x2.to_constraint(kinds),
                payload.x3.to_constraint(kinds),
            ],
            [
                payload.y1.to_constraint(kinds),
                payload.y2.to_constraint(kinds),
                payload.y3.to_constraint(kinds),
            ],
            payload.date.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::CategoryKind;

    const SAMPLE: &str = r#"{
        "x1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] },
        "x2": { "type": "POKEMON_TYPE", "obj": "Water", "excludedForms": ["Mega"] },
        "x3": { "type": "GENERATION", "obj": "3", "excludedForms": [] },
        "y1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] },
        "y2": { "type": "LEGENDARY", "obj": "true", "excludedForms": [] },
        "y3": { "type": "POKEMON_MOVE", "obj": "Surf", "excludedForms": [] },
        "date": "2026-10-19"
    }"#;

    #[test]
    fn rows_and_columns_keep_source_order() {
        let payload = parse_payload(SAMPLE).unwrap();
        let grid = PuzzleGrid::from_payload(&payload, &KindTable::default());

        let rows: Vec<String> = grid.rows().iter().map(|c| c.label()).collect();
        let cols: Vec<String> = grid.columns().iter().map(|c| c.label()).collect();
        assert_eq!(rows, ["type(Fire)", "type(Water)", "generation(3)"]);
        assert_eq!(cols, ["type(Fire)", "legendary(true)", "move(Surf)"]);
        assert_eq!(grid.date(), "2026-10-19");
        assert_eq!(grid.rows()[1].excluded_variants, ["Mega"]);
    }

    #[test]
    fn partial_payload_uses_placeholders() {
        let text = r#"{ "x1": { "type": "POKEMON_TYPE", "obj": "Fire" }, "date": "d" }"#;
        let payload = parse_payload(text).unwrap();
        let grid = PuzzleGrid::from_payload(&payload, &KindTable::default());
        assert_eq!(grid.rows()[0].kind, CategoryKind::Type);
        assert!(grid.rows()[0].excluded_variants.is_empty());
        assert_eq!(grid.columns()[2], CategoryConstraint::default());
    }

    #[test]
    fn null_excluded_forms_reads_as_empty() {
        let text = r#"{
            "x1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": null },
            "date": "d"
        }"#;
        let payload = parse_payload(text).unwrap();
        assert!(payload.x1.excluded_forms.is_empty());
        assert_eq!(payload.x1.obj, "Fire");
    }

    #[test]
    fn null_square_and_date_read_as_empty() {
        let text = SAMPLE
            .replace(
                r#"{ "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": [] },
        "y2""#,
                r#"null,
        "y2""#,
            )
            .replace(r#""2026-10-19""#, "null");
        let payload = parse_payload(&text).unwrap();
        let grid = PuzzleGrid::from_payload(&payload, &KindTable::default());
        assert_eq!(grid.columns()[0], CategoryConstraint::default());
        assert_eq!(grid.columns()[1].label(), "legendary(true)");
        assert_eq!(grid.rows()[0].label(), "type(Fire)");
        assert_eq!(grid.date(), "");
    }

    #[test]
    fn null_kind_and_value_read_as_empty() {
        let text = r#"{ "x1": { "type": "GENERATION", "obj": null }, "y1": { "type": null } }"#;
        let payload = parse_payload(text).unwrap();
        assert_eq!(payload.x1.obj, "");
        assert_eq!(payload.y1.kind, "");
    }

    #[test]
    fn wrong_nested_type_is_still_malformed() {
        let text = r#"{
            "x1": { "type": "POKEMON_TYPE", "obj": "Fire", "excludedForms": "Mega" }
        }"#;
        assert!(matches!(parse_payload(text), Err(GridError::Malformed(_))));
    }

    #[test]
    fn unknown_source_kind_is_representable() {
        let text = SAMPLE.replace("POKEMON_MOVE", "POKEMON_COLOR");
        let payload = parse_payload(&text).unwrap();
        let grid = PuzzleGrid::from_payload(&payload, &KindTable::default());
        assert_eq!(grid.columns()[2].kind, CategoryKind::Other("POKEMON_COLOR".into()));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_payload("<html>503</html>").unwrap_err();
        assert!(matches!(err, GridError::Malformed(_)));
    }

    #[test]
    fn non_object_is_malformed() {
        let err = parse_payload("[1, 2, 3]").unwrap_err();
        assert_eq!(
            err,
            GridError::Malformed("expected a JSON object, found an array".into())
        );
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let err = parse_payload(r#"{ "x1": "POKEMON_TYPE" }"#).unwrap_err();
        assert!(matches!(err, GridError::Malformed(_)));
    }

    #[test]
    fn empty_object_is_rejected() {
        assert_eq!(parse_payload("{}").unwrap_err(), GridError::EmptyGrid);
    }
}
