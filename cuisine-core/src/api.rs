//! Typed client for the recipe backend's `/api/v1` endpoints.
//!
//! Every response carrying recipes is run through [`crate::shape`] before it
//! is handed back, so callers only ever see fully validated [`Recipe`]s.

use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::error::{ApiError, AuthError};
use crate::filters::{codec, FilterState};
use crate::http::{join_url, ApiRequest, ApiResponse, HttpClient, Method};
use crate::shape::{self, Envelope};
use crate::types::{
    AddFavoriteRequest, FavoriteAdded, FavoriteRemoval, LoginRequest, LoginResponse, MessageBody,
    NewRecipe, Recipe, RecipesResult, RegisterOutcome, RegisterRequest, UserProfile,
};

pub const API_PREFIX: &str = "/api/v1";

/// Whether an endpoint needs a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Token sent when present
    Optional,
    /// Fails with [`AuthError::MissingToken`] before any request
    Required,
}

pub struct ApiClient<C: HttpClient> {
    http: C,
    base_url: String,
    auth: AuthContext,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, base_url: &str, auth: AuthContext) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path (relative to `/api/v1`) plus an encoded query.
    pub fn url(&self, path: &str, query: &str) -> String {
        let url = join_url(&self.base_url, &format!("{}{}", API_PREFIX, path));
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let response = self
            .send(Method::Post, "/auth/register", "", Some(to_json(request)?), Access::Optional)
            .await?;
        match response.status {
            201 => Ok(RegisterOutcome::Created),
            409 => Ok(RegisterOutcome::AlreadyExists {
                message: error_message(&response),
            }),
            _ => Err(status_error(&response)),
        }
    }

    /// Log in and store the returned token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = to_json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .send(Method::Post, "/auth/login", "", Some(body), Access::Optional)
            .await?;

        match response.status {
            200 => {
                let parsed: LoginResponse = serde_json::from_str(&response.body)
                    .map_err(|e| ApiError::InvalidJson(e.to_string()))?;
                let token = parsed
                    .access_token
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        AuthError::LoginFailed("response carried no access token".to_string())
                    })?;
                self.auth.set_token(&token)?;
                tracing::debug!(username, "logged in");
                Ok(())
            }
            401 => Err(AuthError::LoginFailed(error_message(&response)).into()),
            _ => Err(status_error(&response)),
        }
    }

    /// Tell the backend we're leaving, then drop the local token.
    ///
    /// The server call is best-effort; the token is cleared whatever it says.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(token) = self.auth.get_token()? {
            let request =
                ApiRequest::new(Method::Post, self.url("/auth/logout", "")).bearer(token);
            match self.http.execute(request).await {
                Ok(response) if response.is_success() => {}
                Ok(response) => {
                    tracing::warn!(status = response.status, "logout rejected by server")
                }
                Err(e) => tracing::warn!(error = %e, "logout request failed"),
            }
        }
        self.auth.clear_token()
    }

    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .send(Method::Get, "/users/me", "", None, Access::Required)
            .await?;
        expect_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidJson(e.to_string()))
    }

    pub async fn list_recipes(&self) -> Result<RecipesResult, ApiError> {
        self.fetch_recipes("/recipes", "", Envelope::Recipes, Access::Optional)
            .await
    }

    /// Search recipe names. Blank text yields no results without a request.
    pub async fn search(&self, text: &str) -> Result<RecipesResult, ApiError> {
        let query = codec::encode_search(text);
        if query.is_empty() {
            tracing::debug!("blank search, skipping request");
            return Ok(RecipesResult::default());
        }
        self.fetch_recipes("/recipes/search", &query, Envelope::Recipes, Access::Optional)
            .await
    }

    /// Fetch the recipes matching a filter state. An empty state lists everything.
    pub async fn filter(&self, state: &FilterState) -> Result<RecipesResult, ApiError> {
        self.filter_query(&codec::encode(state)).await
    }

    /// Like [`Self::filter`] but takes an already encoded query string.
    pub async fn filter_query(&self, query: &str) -> Result<RecipesResult, ApiError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        self.fetch_recipes("/recipes/filter", query, Envelope::Recipes, Access::Optional)
            .await
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe, ApiError> {
        let response = self
            .send(Method::Get, &format!("/recipes/{}", id), "", None, Access::Optional)
            .await?;
        expect_success(&response)?;
        Ok(shape::parse_recipe(&parse_body(&response)?)?)
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        let response = self
            .send(Method::Post, "/recipes", "", Some(to_json(recipe)?), Access::Optional)
            .await?;
        expect_success(&response)?;
        Ok(shape::parse_created_recipe(&parse_body(&response)?)?)
    }

    pub async fn favorites(&self) -> Result<RecipesResult, ApiError> {
        self.fetch_recipes("/favorites", "", Envelope::Favorites, Access::Required)
            .await
    }

    pub async fn add_favorite(&self, recipe_id: i64) -> Result<FavoriteAdded, ApiError> {
        let body = to_json(&AddFavoriteRequest { recipe_id })?;
        let response = self
            .send(Method::Post, "/favorites", "", Some(body), Access::Required)
            .await?;
        match response.status {
            201 => Ok(FavoriteAdded::Added),
            200 => Ok(FavoriteAdded::AlreadyPresent),
            _ => Err(status_error(&response)),
        }
    }

    pub async fn remove_favorite(&self, recipe_id: i64) -> Result<FavoriteRemoval, ApiError> {
        let response = self
            .send(
                Method::Delete,
                &format!("/favorites/{}", recipe_id),
                "",
                None,
                Access::Required,
            )
            .await?;
        match response.status {
            200 | 204 => Ok(FavoriteRemoval::Removed),
            404 => Ok(FavoriteRemoval::NotFavorited),
            _ => Err(status_error(&response)),
        }
    }

    async fn fetch_recipes(
        &self,
        path: &str,
        query: &str,
        envelope: Envelope,
        access: Access,
    ) -> Result<RecipesResult, ApiError> {
        let response = self.send(Method::Get, path, query, None, access).await?;
        expect_success(&response)?;
        let result = shape::parse_recipes_result(&parse_body(&response)?, envelope)?;
        tracing::debug!(path, count = result.recipes.len(), "recipes received");
        Ok(result)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<Value>,
        access: Access,
    ) -> Result<ApiResponse, ApiError> {
        let token = match access {
            Access::Required => Some(self.auth.bearer()?),
            Access::Optional => self.auth.get_token()?,
        };

        let mut request = ApiRequest::new(method, self.url(path, query));
        if let Some(token) = token {
            request = request.bearer(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(self.http.execute(request).await?)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidJson(e.to_string()))
}

fn parse_body(response: &ApiResponse) -> Result<Value, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidJson(e.to_string()))
}

fn expect_success(response: &ApiResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(status_error(response))
    }
}

/// The backend's `{message}` if there is one, otherwise the raw body.
fn error_message(response: &ApiResponse) -> String {
    match serde_json::from_str::<MessageBody>(&response.body) {
        Ok(body) => body.message,
        Err(_) if response.body.trim().is_empty() => format!("HTTP {}", response.status),
        Err(_) => response.body.trim().to_string(),
    }
}

fn status_error(response: &ApiResponse) -> ApiError {
    let message = error_message(response);
    match response.status {
        401 => AuthError::Rejected(message).into(),
        404 => ApiError::NotFound(message),
        status => ApiError::Status { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(
            error_message(&response(409, r#"{"message":"User already exists"}"#)),
            "User already exists"
        );
        assert_eq!(error_message(&response(502, "Bad Gateway\n")), "Bad Gateway");
        assert_eq!(error_message(&response(500, "")), "HTTP 500");
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(&response(401, r#"{"message":"Token missing or invalid"}"#)),
            ApiError::Auth(AuthError::Rejected(m)) if m == "Token missing or invalid"
        ));
        assert!(matches!(
            status_error(&response(404, r#"{"message":"Recipe not found"}"#)),
            ApiError::NotFound(_)
        ));
        let err = status_error(&response(503, "down"));
        assert!(err.is_network());
        assert_eq!(err.to_string(), "HTTP 503: down");
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new(
            crate::http::MockClient::new(),
            "http://localhost:5000/",
            AuthContext::in_memory(),
        );
        assert_eq!(
            client.url("/recipes/filter", "time=30"),
            "http://localhost:5000/api/v1/recipes/filter?time=30"
        );
        assert_eq!(
            client.url("/favorites", ""),
            "http://localhost:5000/api/v1/favorites"
        );
    }
}
