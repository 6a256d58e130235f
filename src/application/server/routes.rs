use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;

use crate::application::server::state::AppState;
use crate::models::common::LookupError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Server is running!")
}

/// GET /api/search/users?query=<text>
pub async fn search_users(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let Some(query) = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    else {
        return LookupError::BadRequest("Query parameter is required".to_string())
            .to_response(state.status_policy);
    };

    match state.lookup.search_accounts(query).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => failure(&state, "search", err),
    }
}

/// GET /api/users/{username}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let username = path.into_inner();

    match state.lookup.get_account_with_repos(&username).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => failure(&state, "user", err),
    }
}

/// GET /api/repos/{username}/{repo}
pub async fn get_repo_commits(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (username, repo) = path.into_inner();

    match state.lookup.get_recent_commits(&username, &repo).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => failure(&state, "commits", err),
    }
}

async fn not_found() -> HttpResponse {
    LookupError::NotFound("Not Found".to_string()).to_response(Default::default())
}

fn failure(state: &AppState, operation: &str, err: LookupError) -> HttpResponse {
    debug!(operation, kind = ?err.kind(), error = %err, "Lookup failed");
    err.to_response(state.status_policy)
}

/// Configure all routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(liveness)).service(
        web::scope("/api")
            .route("/search/users", web::get().to(search_users))
            .route("/users/{username}", web::get().to(get_user))
            .route("/repos/{username}/{repo}", web::get().to(get_repo_commits)),
    );
}

/// Handler for requests that match no route.
pub fn default_service() -> actix_web::Route {
    web::route().to(not_found)
}

#[cfg(test)]
#[path = "../../../tests/application/server/routes.rs"]
mod tests;
