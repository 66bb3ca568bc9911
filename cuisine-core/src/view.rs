//! What a results page shows, and its plain-text rendering.

use std::fmt;

use crate::error::ApiError;
use crate::time_format::format_cooking_time;
use crate::types::{Recipe, RecipesResult};

pub const NO_RECIPES_FOUND: &str = "No recipes found";
pub const IMAGE_PLACEHOLDER: &str = "[no image]";

/// User-facing error categories. Never carries raw payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The backend sent something we couldn't make sense of
    SomethingWentWrong,
    LoginRequired,
    Unavailable(String),
}

impl ViewError {
    pub fn from_api_error(error: &ApiError) -> Self {
        match error {
            ApiError::Shape(_) | ApiError::InvalidJson(_) => ViewError::SomethingWentWrong,
            ApiError::Auth(_) => ViewError::LoginRequired,
            ApiError::Network(e) => ViewError::Unavailable(e.to_string()),
            ApiError::NotFound(message) => ViewError::Unavailable(message.clone()),
            ApiError::Status { status, message } => {
                ViewError::Unavailable(format!("HTTP {}: {}", status, message))
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            ViewError::SomethingWentWrong => "Oops! Something went wrong".to_string(),
            ViewError::LoginRequired => "Please log in to access this page".to_string(),
            ViewError::Unavailable(message) => format!("Could not load recipes: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Loading,
    Empty,
    Recipes(RecipesResult),
    Error(ViewError),
}

impl ResultView {
    /// Convert a fetch outcome into what the page should show. Zero recipes
    /// is its own state, not an error.
    pub fn from_result(result: Result<RecipesResult, ApiError>) -> Self {
        match result {
            Ok(result) if result.is_empty() => ResultView::Empty,
            Ok(result) => ResultView::Recipes(result),
            Err(e) => {
                tracing::warn!(error = %e, "recipe fetch failed");
                ResultView::Error(ViewError::from_api_error(&e))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::Error(_))
    }

    pub fn render(&self) -> String {
        match self {
            ResultView::Loading => "Loading...".to_string(),
            ResultView::Empty => NO_RECIPES_FOUND.to_string(),
            ResultView::Recipes(result) => render_list(&result.recipes),
            ResultView::Error(e) => e.message(),
        }
    }
}

/// One line per recipe: id, name, cooking time, cuisine, difficulty.
pub struct RecipeList<'a>(pub &'a [Recipe]);

impl fmt::Display for RecipeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for recipe in self.0 {
            writeln!(
                f,
                "#{:<4} {}  ({}, {}, {})",
                recipe.id,
                recipe.name,
                format_cooking_time(Some(recipe.time)),
                recipe.cuisine,
                recipe.difficulty
            )?;
        }
        Ok(())
    }
}

/// Full recipe page.
pub struct RecipeDetail<'a>(pub &'a Recipe);

impl fmt::Display for RecipeDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        let image = recipe
            .image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(IMAGE_PLACEHOLDER);

        writeln!(f, "{}", recipe.name)?;
        writeln!(f, "{}", image)?;
        writeln!(f)?;
        writeln!(f, "Time:        {}", format_cooking_time(Some(recipe.time)))?;
        writeln!(f, "Cuisine:     {}", recipe.cuisine)?;
        writeln!(f, "Difficulty:  {}", recipe.difficulty)?;
        writeln!(f, "Taste:       {}", join_or_dash(&recipe.taste))?;
        writeln!(f, "Tools:       {}", join_or_dash(&recipe.tools))?;
        writeln!(f)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &recipe.ingredients {
            writeln!(f, "  - {}", ingredient)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", recipe.description)
    }
}

pub fn render_list(recipes: &[Recipe]) -> String {
    RecipeList(recipes).to_string()
}

pub fn render_detail(recipe: &Recipe) -> String {
    RecipeDetail(recipe).to_string()
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
