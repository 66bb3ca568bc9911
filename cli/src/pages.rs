//! Terminal renditions of the app's pages.

use anyhow::{Context, Result};
use clap::ValueEnum;
use cuisine_core::filters::{self, codec, FilterField, Navigation, SEARCH_ROUTE};
use cuisine_core::http::HttpClient;
use cuisine_core::types::{SUGGESTED_CUISINES, SUGGESTED_TASTES, TIME_OPTIONS};
use cuisine_core::view::{render_detail, ViewError};
use cuisine_core::{
    ApiClient, FavoriteAdded, FavoriteRemoval, FilterFormController, FilterPage, IngredientList,
    ResultView,
};

/// Edits to apply on top of the URL's filters before submitting.
#[derive(Debug, Default)]
pub struct FilterEdits {
    pub time: Option<u32>,
    pub cuisine: Option<String>,
    pub taste: Option<String>,
    pub ingredients: Vec<String>,
    pub remove_ingredients: Vec<String>,
    /// Applied pill to drop instead of submitting edits
    pub remove_filter: Option<String>,
    /// Applied ingredient pill to drop instead of submitting edits
    pub remove_applied_ingredient: Option<String>,
    pub clear: bool,
}

pub async fn recipes<C: HttpClient>(api: &ApiClient<C>) -> Result<()> {
    print_view(&ResultView::from_result(api.list_recipes().await));
    Ok(())
}

pub async fn search<C: HttpClient>(api: &ApiClient<C>, text: &str) -> Result<()> {
    let query = codec::encode_search(text);
    if query.is_empty() {
        println!("{}", SEARCH_ROUTE);
    } else {
        println!("{}?{}", SEARCH_ROUTE, query);
    }
    println!();
    print_view(&ResultView::from_result(api.search(text).await));
    Ok(())
}

/// Mount the filter page on `query`, apply the edits through the form
/// controller, navigate, and show the results.
pub async fn filter<C: HttpClient>(
    api: &ApiClient<C>,
    query: &str,
    edits: FilterEdits,
) -> Result<()> {
    let mut controller = FilterFormController::mount(query);
    let navigation = plan_navigation(&mut controller, &edits)?;

    println!("{}", navigation.to_url());

    let mut page = FilterPage::mount(&navigation.query);
    let pills = page.controller().applied().pills();
    if !pills.is_empty() {
        println!("Filters Applied:");
        for (field, label) in pills {
            println!("  [{}] {}", field.as_str(), label);
        }
    }
    println!();

    let view = page.load(api).await;
    print_view(view);
    Ok(())
}

/// Turn the requested edits into a navigation. Pill removals and clearing
/// act on the applied filters and ignore anything staged.
fn plan_navigation(
    controller: &mut FilterFormController,
    edits: &FilterEdits,
) -> Result<Navigation> {
    if edits.clear {
        return Ok(controller.clear_all());
    }
    if let Some(name) = &edits.remove_filter {
        let field = FilterField::from_str(name).with_context(|| {
            format!(
                "Unknown filter {:?}; expected time, cuisine, taste or ingredients",
                name
            )
        })?;
        return Ok(controller.remove_applied_filter(field));
    }
    if let Some(ingredient) = &edits.remove_applied_ingredient {
        return Ok(controller.remove_applied_ingredient(ingredient));
    }

    if let Some(time) = edits.time {
        controller.set_time(Some(time));
    }
    if let Some(cuisine) = &edits.cuisine {
        controller.set_cuisine(Some(cuisine));
    }
    if let Some(taste) = &edits.taste {
        controller.set_taste(Some(taste));
    }
    for ingredient in &edits.remove_ingredients {
        controller.remove_ingredient(ingredient);
    }
    for ingredient in &edits.ingredients {
        if !controller.add_ingredient(ingredient) {
            tracing::debug!(ingredient = %ingredient, "ingredient skipped");
        }
    }
    Ok(controller.submit())
}

/// Show one recipe. When logged in, also show whether it is a favorite.
pub async fn recipe<C: HttpClient>(api: &ApiClient<C>, id: i64) -> Result<()> {
    match api.get_recipe(id).await {
        Ok(recipe) => {
            print!("{}", render_detail(&recipe));
            if let Some(favorite) = favorite_status(api, id).await {
                println!();
                println!("Favorite: {}", if favorite { "yes" } else { "no" });
            }
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "recipe fetch failed");
            println!("{}", ViewError::from_api_error(&e).message());
        }
    }
    Ok(())
}

/// `None` when logged out or the favorites couldn't be loaded.
async fn favorite_status<C: HttpClient>(api: &ApiClient<C>, id: i64) -> Option<bool> {
    if !api.auth().is_logged_in() {
        return None;
    }
    match api.favorites().await {
        Ok(result) => Some(result.recipes.iter().any(|r| r.id == id)),
        Err(e) => {
            tracing::warn!(id, error = %e, "favorite status unavailable");
            None
        }
    }
}

pub async fn favorites<C: HttpClient>(api: &ApiClient<C>) -> Result<()> {
    print_view(&ResultView::from_result(api.favorites().await));
    Ok(())
}

pub async fn add_favorite<C: HttpClient>(api: &ApiClient<C>, recipe_id: i64) -> Result<()> {
    match api.add_favorite(recipe_id).await.context("Failed to add favorite")? {
        FavoriteAdded::Added => println!("Recipe {} added to favorites", recipe_id),
        FavoriteAdded::AlreadyPresent => println!("Recipe {} is already a favorite", recipe_id),
    }
    Ok(())
}

pub async fn remove_favorite<C: HttpClient>(api: &ApiClient<C>, recipe_id: i64) -> Result<()> {
    match api
        .remove_favorite(recipe_id)
        .await
        .context("Failed to remove favorite")?
    {
        FavoriteRemoval::Removed => println!("Recipe {} removed from favorites", recipe_id),
        FavoriteRemoval::NotFavorited => println!("Recipe {} was not a favorite", recipe_id),
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuggestField {
    Ingredient,
    Cuisine,
    Taste,
    Time,
}

/// Choices the filter form offers for `field` that match `input`.
///
/// Ingredients go through the form's autocomplete, which hides ones already
/// selected. The other fields are plain case-insensitive substring matches.
pub fn suggest(field: SuggestField, input: &str, selected: &IngredientList) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    let matching = |options: &[&str]| -> Vec<String> {
        options
            .iter()
            .filter(|o| o.to_lowercase().contains(&needle))
            .map(|o| o.to_string())
            .collect()
    };

    match field {
        SuggestField::Ingredient => filters::suggest(input, selected)
            .into_iter()
            .map(str::to_string)
            .collect(),
        SuggestField::Cuisine => matching(SUGGESTED_CUISINES),
        SuggestField::Taste => matching(SUGGESTED_TASTES),
        SuggestField::Time => TIME_OPTIONS
            .iter()
            .map(|t| t.to_string())
            .filter(|t| t.contains(&needle))
            .collect(),
    }
}

fn print_view(view: &ResultView) {
    print!("{}", view.render());
    if !matches!(view, ResultView::Recipes(_)) {
        println!();
    }
}
