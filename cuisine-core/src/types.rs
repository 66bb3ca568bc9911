use serde::{Deserialize, Serialize};

/// Cuisines offered by the filter form. Other values are passed through untouched.
pub const SUGGESTED_CUISINES: &[&str] = &[
    "Chinese", "Italian", "German", "French", "American", "Indian", "Mexican", "Japanese",
];

/// Tastes offered by the filter form.
pub const SUGGESTED_TASTES: &[&str] = &[
    "sweet", "rich", "sour", "fresh", "savory", "spicy", "aromatic", "creamy", "crisp", "tangy",
    "buttery",
];

/// Cooking time choices (upper bound, minutes) offered by the filter form.
pub const TIME_OPTIONS: &[u32] = &[
    15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 70, 80, 90, 100, 110, 120,
];

/// A recipe as rendered by the client.
///
/// Only ever constructed from JSON via [`crate::shape::parse_recipe`], so every
/// required field is known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Cooking time in minutes
    pub time: u32,
    pub cuisine: String,
    /// Free-form, usually one of easy / medium / hard
    pub difficulty: String,
    /// `None` when the backend has no image, or an empty one
    pub image_url: Option<String>,
    pub tools: Vec<String>,
    pub ingredients: Vec<String>,
    pub taste: Vec<String>,
}

/// Envelope returned by the list, search, filter and favorites endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipesResult {
    pub recipes: Vec<Recipe>,
}

impl RecipesResult {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Body for `POST /api/v1/recipes`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub time: u32,
    pub cuisine: String,
    pub difficulty: String,
    pub tools: Vec<String>,
    pub ingredients: Vec<String>,
    pub taste: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddFavoriteRequest {
    pub recipe_id: i64,
}

/// Generic `{message}` body the backend attaches to most non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

/// Response of `GET /api/v1/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "user_id")]
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    /// 409 from the backend; the username or email is taken
    AlreadyExists { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAdded {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteRemoval {
    Removed,
    NotFavorited,
}
