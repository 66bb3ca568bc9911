//! Filter state for the recipe filter route and its URL representation.
//!
//! The URL is the single source of truth for which filters are applied.
//! [`codec`] maps between [`FilterState`] and the query string, and
//! [`controller::FilterFormController`] keeps pending form edits apart from
//! what the URL says.

pub mod codec;
pub mod controller;
pub mod ingredients;

pub use codec::{decode, decode_search, encode, encode_search};
pub use controller::{FilterFormController, FormPhase, Navigation};
pub use ingredients::{suggest, IngredientList, INGREDIENT_CATALOG};

/// Route the filter page lives at.
pub const FILTER_ROUTE: &str = "/recipes/filter";

/// Route the search results page lives at.
pub const SEARCH_ROUTE: &str = "/recipes/search";

/// The filters a user wants applied. Every field is optional; an unset field
/// means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Upper bound on cooking time, in minutes
    pub time: Option<u32>,
    pub cuisine: Option<String>,
    pub taste: Option<String>,
    pub ingredients: IngredientList,
}

/// One removable filter "pill".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Time,
    Cuisine,
    Taste,
    Ingredients,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::Time,
        FilterField::Cuisine,
        FilterField::Taste,
        FilterField::Ingredients,
    ];

    /// Query parameter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Time => "time",
            FilterField::Cuisine => "cuisine",
            FilterField::Taste => "taste",
            FilterField::Ingredients => "ingredients",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "time" => Some(FilterField::Time),
            "cuisine" => Some(FilterField::Cuisine),
            "taste" => Some(FilterField::Taste),
            "ingredients" => Some(FilterField::Ingredients),
            _ => None,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(mut self, minutes: u32) -> Self {
        self.time = Some(minutes);
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = non_blank(cuisine);
        self
    }

    pub fn with_taste(mut self, taste: &str) -> Self {
        self.taste = non_blank(taste);
        self
    }

    pub fn with_ingredient(mut self, ingredient: &str) -> Self {
        self.ingredients.add(ingredient);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.cuisine.is_none()
            && self.taste.is_none()
            && self.ingredients.is_empty()
    }

    pub fn has(&self, field: FilterField) -> bool {
        match field {
            FilterField::Time => self.time.is_some(),
            FilterField::Cuisine => self.cuisine.is_some(),
            FilterField::Taste => self.taste.is_some(),
            FilterField::Ingredients => !self.ingredients.is_empty(),
        }
    }

    /// Drop one filter entirely, leaving the others untouched.
    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::Time => self.time = None,
            FilterField::Cuisine => self.cuisine = None,
            FilterField::Taste => self.taste = None,
            FilterField::Ingredients => self.ingredients = IngredientList::new(),
        }
    }

    /// Human-readable pills for the "Filters Applied" list, in query order.
    pub fn pills(&self) -> Vec<(FilterField, String)> {
        let mut pills = Vec::new();
        if let Some(time) = self.time {
            pills.push((FilterField::Time, format!("≤ {} mins", time)));
        }
        if let Some(cuisine) = &self.cuisine {
            pills.push((FilterField::Cuisine, cuisine.clone()));
        }
        if let Some(taste) = &self.taste {
            pills.push((FilterField::Taste, taste.clone()));
        }
        if !self.ingredients.is_empty() {
            pills.push((
                FilterField::Ingredients,
                self.ingredients.as_slice().join(", "),
            ));
        }
        pills
    }
}

/// The trimmed value, or `None` if blank. Empty selections mean "unset".
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
