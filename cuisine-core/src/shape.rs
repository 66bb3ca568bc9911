//! Structural validation of recipe JSON before anything renders it.
//!
//! The backend's payload shape is outside this client's control and has
//! drifted before, so every recipe-bearing response is parsed here into a
//! [`Recipe`] or rejected as a whole. Fields are checked in a fixed order and
//! the first defect wins; a partially valid recipe is never returned.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::types::{Recipe, RecipesResult};

/// JSON type names used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Integer,
    UnsignedInteger,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// What `value` actually is, for "found ..." in errors.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(n) if n.is_u64() || n.is_i64() => JsonKind::Integer,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Integer => "integer",
            JsonKind::UnsignedInteger => "non-negative integer",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{path}: missing required field (expected {expected})")]
    MissingField { path: String, expected: JsonKind },

    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: JsonKind,
        found: JsonKind,
    },
}

impl ShapeError {
    /// Path of the offending field, e.g. `time` or `recipes[2].tools[0]`.
    pub fn path(&self) -> &str {
        match self {
            ShapeError::MissingField { path, .. } | ShapeError::WrongType { path, .. } => path,
        }
    }

    pub fn expected(&self) -> JsonKind {
        match self {
            ShapeError::MissingField { expected, .. } | ShapeError::WrongType { expected, .. } => {
                *expected
            }
        }
    }
}

/// Which key wraps a recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{"recipes": [...]}` from list, search and filter
    Recipes,
    /// `{"favorites": [...]}`; `recipes` is accepted as well
    Favorites,
}

impl Envelope {
    fn keys(&self) -> &'static [&'static str] {
        match self {
            Envelope::Recipes => &["recipes"],
            Envelope::Favorites => &["favorites", "recipes"],
        }
    }
}

/// Parse a single recipe object.
pub fn parse_recipe(value: &Value) -> Result<Recipe, ShapeError> {
    parse_recipe_at(value, "")
}

/// Parse a recipe list envelope, validating every element.
pub fn parse_recipes_result(value: &Value, envelope: Envelope) -> Result<RecipesResult, ShapeError> {
    let root = expect_object(value, "")?;
    let (key, list) = envelope
        .keys()
        .iter()
        .find_map(|key| root.get(*key).map(|list| (*key, list)))
        .ok_or_else(|| ShapeError::MissingField {
            path: envelope.keys()[0].to_string(),
            expected: JsonKind::Array,
        })?;

    let items = match list {
        Value::Array(items) => items,
        other => {
            return Err(ShapeError::WrongType {
                path: key.to_string(),
                expected: JsonKind::Array,
                found: JsonKind::of(other),
            })
        }
    };

    let recipes = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_recipe_at(item, &format!("{}[{}]", key, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecipesResult { recipes })
}

/// Parse the body of `POST /api/v1/recipes`, which nests the created recipe
/// under `recipe`.
pub fn parse_created_recipe(value: &Value) -> Result<Recipe, ShapeError> {
    let root = expect_object(value, "")?;
    let recipe = root.get("recipe").ok_or_else(|| ShapeError::MissingField {
        path: "recipe".to_string(),
        expected: JsonKind::Object,
    })?;
    parse_recipe_at(recipe, "recipe")
}

fn parse_recipe_at(value: &Value, prefix: &str) -> Result<Recipe, ShapeError> {
    let fields = Fields {
        map: expect_object(value, prefix)?,
        prefix,
    };

    let id = fields.integer("id")?;
    let name = fields.string("name")?;
    let time = fields.minutes("time")?;
    let difficulty = fields.string("difficulty")?;
    let description = fields.string("description")?;
    let ingredients = fields.string_array("ingredients")?;
    let taste = fields.string_array("taste")?;
    let tools = fields.string_array("tools")?;
    let cuisine = fields.string("cuisine")?;
    let image_url = fields.optional_string("image_url")?;

    Ok(Recipe {
        id,
        name,
        description,
        time,
        cuisine,
        difficulty,
        image_url,
        tools,
        ingredients,
        taste,
    })
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ShapeError> {
    value.as_object().ok_or_else(|| ShapeError::WrongType {
        path: if path.is_empty() { "$".to_string() } else { path.to_string() },
        expected: JsonKind::Object,
        found: JsonKind::of(value),
    })
}

struct Fields<'a> {
    map: &'a Map<String, Value>,
    prefix: &'a str,
}

impl Fields<'_> {
    fn required(&self, field: &str, expected: JsonKind) -> Result<&Value, ShapeError> {
        self.map.get(field).ok_or_else(|| ShapeError::MissingField {
            path: join_path(self.prefix, field),
            expected,
        })
    }

    fn wrong_type(&self, field: &str, expected: JsonKind, found: &Value) -> ShapeError {
        ShapeError::WrongType {
            path: join_path(self.prefix, field),
            expected,
            found: JsonKind::of(found),
        }
    }

    fn integer(&self, field: &str) -> Result<i64, ShapeError> {
        let value = self.required(field, JsonKind::Integer)?;
        value
            .as_i64()
            .ok_or_else(|| self.wrong_type(field, JsonKind::Integer, value))
    }

    fn minutes(&self, field: &str) -> Result<u32, ShapeError> {
        let value = self.required(field, JsonKind::UnsignedInteger)?;
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.wrong_type(field, JsonKind::UnsignedInteger, value))
    }

    fn string(&self, field: &str) -> Result<String, ShapeError> {
        let value = self.required(field, JsonKind::String)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field, JsonKind::String, value))
    }

    /// Absent and `null` both mean "no value"; anything else must be a string.
    /// Absent, null and blank strings all read as `None`.
    fn optional_string(&self, field: &str) -> Result<Option<String>, ShapeError> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(field, JsonKind::String, other)),
        }
    }

    fn string_array(&self, field: &str) -> Result<Vec<String>, ShapeError> {
        let value = self.required(field, JsonKind::Array)?;
        let items = value
            .as_array()
            .ok_or_else(|| self.wrong_type(field, JsonKind::Array, value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ShapeError::WrongType {
                        path: format!("{}[{}]", join_path(self.prefix, field), i),
                        expected: JsonKind::String,
                        found: JsonKind::of(item),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_recipe() -> Value {
        json!({
            "id": 7,
            "name": "Egg Fried Rice",
            "description": "Fry the rice, add the egg.",
            "time": 20,
            "cuisine": "Chinese",
            "difficulty": "easy",
            "image_url": "https://img.example/rice.jpg",
            "tools": ["wok"],
            "ingredients": ["egg", "rice"],
            "taste": ["savory"]
        })
    }

    #[test]
    fn test_parse_valid_recipe() {
        let recipe = parse_recipe(&valid_recipe()).unwrap();
        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.time, 20);
        assert_eq!(recipe.ingredients, vec!["egg", "rice"]);
        assert_eq!(recipe.image_url.as_deref(), Some("https://img.example/rice.jpg"));
    }

    #[test]
    fn test_image_url_is_optional() {
        let mut value = valid_recipe();
        value.as_object_mut().unwrap().remove("image_url");
        assert_eq!(parse_recipe(&value).unwrap().image_url, None);

        value["image_url"] = Value::Null;
        assert_eq!(parse_recipe(&value).unwrap().image_url, None);

        value["image_url"] = json!("");
        assert_eq!(parse_recipe(&value).unwrap().image_url, None);

        value["image_url"] = json!(42);
        let err = parse_recipe(&value).unwrap_err();
        assert_eq!(err.path(), "image_url");
    }

    #[test]
    fn test_missing_time_is_rejected() {
        let mut value = valid_recipe();
        value.as_object_mut().unwrap().remove("time");
        let err = parse_recipe(&value).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingField {
                path: "time".to_string(),
                expected: JsonKind::UnsignedInteger
            }
        );
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let err = parse_recipe(&json!({"id": 1, "name": "X"})).unwrap_err();
        assert_eq!(err.path(), "time");
        assert_eq!(err.to_string(), "time: missing required field (expected non-negative integer)");
    }

    #[test]
    fn test_field_order_is_fixed() {
        // Both difficulty and tools are wrong; difficulty is checked first
        let mut value = valid_recipe();
        value["difficulty"] = json!(3);
        value["tools"] = json!("wok");
        assert_eq!(parse_recipe(&value).unwrap_err().path(), "difficulty");
    }

    #[test]
    fn test_wrong_types() {
        let mut value = valid_recipe();
        value["id"] = json!("7");
        assert_eq!(
            parse_recipe(&value).unwrap_err(),
            ShapeError::WrongType {
                path: "id".to_string(),
                expected: JsonKind::Integer,
                found: JsonKind::String
            }
        );

        let mut value = valid_recipe();
        value["time"] = json!(-5);
        assert_eq!(parse_recipe(&value).unwrap_err().path(), "time");

        let mut value = valid_recipe();
        value["time"] = json!(12.5);
        assert_eq!(
            parse_recipe(&value).unwrap_err().to_string(),
            "time: expected non-negative integer, found number"
        );
    }

    #[test]
    fn test_legacy_comma_string_ingredients_rejected() {
        let mut value = valid_recipe();
        value["ingredients"] = json!("egg, rice");
        let err = parse_recipe(&value).unwrap_err();
        assert_eq!(err.path(), "ingredients");
        assert_eq!(err.expected(), JsonKind::Array);
    }

    #[test]
    fn test_non_string_array_element() {
        let mut value = valid_recipe();
        value["taste"] = json!(["sweet", null]);
        assert_eq!(parse_recipe(&value).unwrap_err().path(), "taste[1]");
    }

    #[test]
    fn test_not_an_object() {
        let err = parse_recipe(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path(), "$");
    }

    #[test]
    fn test_empty_envelope_is_valid() {
        let result = parse_recipes_result(&json!({"recipes": []}), Envelope::Recipes).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_envelope_errors() {
        let err = parse_recipes_result(&json!([]), Envelope::Recipes).unwrap_err();
        assert_eq!(err.path(), "$");

        let err = parse_recipes_result(&json!({"results": []}), Envelope::Recipes).unwrap_err();
        assert_eq!(err.path(), "recipes");

        let err = parse_recipes_result(&json!({"recipes": {}}), Envelope::Recipes).unwrap_err();
        assert_eq!(
            err,
            ShapeError::WrongType {
                path: "recipes".to_string(),
                expected: JsonKind::Array,
                found: JsonKind::Object
            }
        );
    }

    #[test]
    fn test_one_bad_element_rejects_the_list() {
        let mut broken = valid_recipe();
        broken.as_object_mut().unwrap().remove("cuisine");
        let value = json!({"recipes": [valid_recipe(), broken]});
        let err = parse_recipes_result(&value, Envelope::Recipes).unwrap_err();
        assert_eq!(err.path(), "recipes[1].cuisine");
    }

    #[test]
    fn test_favorites_envelope() {
        let value = json!({"favorites": [valid_recipe()]});
        let result = parse_recipes_result(&value, Envelope::Favorites).unwrap();
        assert_eq!(result.recipes.len(), 1);

        let value = json!({"recipes": []});
        assert!(parse_recipes_result(&value, Envelope::Favorites).is_ok());

        // Plain listings don't accept the favorites key
        let value = json!({"favorites": []});
        assert!(parse_recipes_result(&value, Envelope::Recipes).is_err());
    }

    #[test]
    fn test_created_recipe() {
        let value = json!({"message": "Recipe created", "recipe": valid_recipe()});
        assert_eq!(parse_created_recipe(&value).unwrap().id, 7);

        let err = parse_created_recipe(&json!({"recipe": {"id": 1}})).unwrap_err();
        assert_eq!(err.path(), "recipe.name");
    }
}
