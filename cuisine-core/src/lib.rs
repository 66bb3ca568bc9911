pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod filters;
pub mod http;
pub mod page;
pub mod shape;
pub mod time_format;
pub mod types;
pub mod view;

pub use api::ApiClient;
pub use auth::{AuthContext, FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_STORAGE_KEY};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, AuthError, FetchError};
pub use filters::{
    FilterField, FilterFormController, FilterState, FormPhase, IngredientList, Navigation,
};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use page::{FilterPage, RequestTag, RequestTracker};
pub use shape::{parse_recipe, parse_recipes_result, Envelope, ShapeError};
pub use time_format::format_cooking_time;
pub use types::{
    FavoriteAdded, FavoriteRemoval, LoginRequest, NewRecipe, Recipe, RecipesResult,
    RegisterOutcome, RegisterRequest, UserProfile,
};
pub use view::{ResultView, ViewError};
