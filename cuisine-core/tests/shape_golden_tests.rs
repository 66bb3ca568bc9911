//! Golden file tests for recipe payload validation.
//!
//! Each JSON file under `fixtures/shape/` holds a payload, which envelope to
//! parse it with, and either the recipe names it should yield or the exact
//! error it should be rejected with.

use cuisine_core::shape::{parse_recipe, parse_recipes_result, Envelope};
use cuisine_core::{RecipesResult, ShapeError};
use glob::glob;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct TestCase {
    /// "recipes", "favorites" or "recipe"
    envelope: String,
    payload: Value,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Expected {
    #[serde(default)]
    names: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

fn parse(case: &TestCase) -> Result<RecipesResult, ShapeError> {
    match case.envelope.as_str() {
        "recipes" => parse_recipes_result(&case.payload, Envelope::Recipes),
        "favorites" => parse_recipes_result(&case.payload, Envelope::Favorites),
        "recipe" => parse_recipe(&case.payload).map(|r| RecipesResult { recipes: vec![r] }),
        other => panic!("Unknown envelope in fixture: {}", other),
    }
}

fn load_test_cases(subdir: &str) -> Vec<(String, TestCase)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/shape")
        .join(subdir)
        .join("*.json");
    let pattern_str = pattern.to_string_lossy();

    let mut cases = Vec::new();
    for entry in glob(&pattern_str).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read glob entry");
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    assert!(!cases.is_empty(), "No fixtures found for {}", pattern_str);
    cases
}

#[test]
fn test_valid_payloads() {
    for (name, case) in load_test_cases("valid") {
        println!("Testing: {}", name);

        let result =
            parse(&case).unwrap_or_else(|e| panic!("{} should parse, got error: {}", name, e));
        let names: Vec<String> = result.recipes.into_iter().map(|r| r.name).collect();
        let expected = case
            .expected
            .names
            .unwrap_or_else(|| panic!("{} is missing expected.names", name));
        assert_eq!(names, expected, "Recipe names mismatch for {}", name);
    }
}

#[test]
fn test_invalid_payloads() {
    for (name, case) in load_test_cases("invalid") {
        println!("Testing: {}", name);

        let expected = case
            .expected
            .error
            .clone()
            .unwrap_or_else(|| panic!("{} is missing expected.error", name));
        match parse(&case) {
            Ok(result) => panic!("{} should be rejected, parsed {:?}", name, result),
            Err(e) => assert_eq!(e.to_string(), expected, "Error mismatch for {}", name),
        }
    }
}
