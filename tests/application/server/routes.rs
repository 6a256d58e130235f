use super::{configure_routes, default_service};
use crate::application::server::{AppState, security_headers};
use crate::models::common::StatusPolicy;
use crate::providers::github::GithubClient;
use crate::services::lookup::LookupService;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockito::{Matcher, Server};
use serde_json::{Value, json};
use std::time::Duration;

fn state_for(server: &Server, status_policy: StatusPolicy) -> web::Data<AppState> {
    let client =
        GithubClient::new("test-token", &server.url(), Duration::from_secs(5)).expect("client");
    web::Data::new(AppState {
        lookup: LookupService::new(client, 5),
        status_policy,
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .wrap(security_headers())
                .configure(configure_routes)
                .default_service(default_service()),
        )
        .await
    };
}

#[actix_web::test]
async fn root_reports_liveness() {
    let server = Server::new_async().await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let body = test::read_body(resp).await;
    assert_eq!(body, "Server is running!");
}

#[actix_web::test]
async fn search_without_query_is_bad_request() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    for uri in ["/api/search/users", "/api/search/users?query=", "/api/search/users?query=%20%20"] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Query parameter is required" }));
    }

    upstream.assert_async().await;
}

#[actix_web::test]
async fn search_returns_total_and_items() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/search/users")
        .match_query(Matcher::UrlEncoded("q".into(), "octocat".into()))
        .with_status(200)
        .with_body(
            json!({
                "total_count": 1,
                "incomplete_results": false,
                "items": [{ "login": "octocat", "id": 1 }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get()
        .uri("/api/search/users?query=octocat")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "total_count": 1, "items": [{ "login": "octocat", "id": 1 }] })
    );
}

#[actix_web::test]
async fn user_lookup_returns_profile_and_repos() {
    let mut server = Server::new_async().await;
    let _user = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body(
            json!({
                "login": "octocat",
                "avatar_url": "https://avatars.example/octocat",
                "followers": 3,
                "following": 1,
                "public_repos": 1,
                "bio": "Mascot",
                "email": "octocat@example.com"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _repos = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_body(
            json!([{
                "id": 7,
                "name": "Hello-World",
                "description": null,
                "html_url": "https://github.com/octocat/Hello-World",
                "created_at": "2011-01-26T19:01:12Z",
                "updated_at": "2011-01-26T19:14:43Z",
                "owner": { "login": "octocat" }
            }])
            .to_string(),
        )
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get().uri("/api/users/octocat").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "profile": {
                "login": "octocat",
                "avatar_url": "https://avatars.example/octocat",
                "followers": 3,
                "following": 1,
                "public_repos": 1,
                "bio": "Mascot"
            },
            "repos": [{
                "id": 7,
                "name": "Hello-World",
                "description": null,
                "html_url": "https://github.com/octocat/Hello-World",
                "created_at": "2011-01-26T19:01:12Z",
                "updated_at": "2011-01-26T19:14:43Z"
            }]
        })
    );
}

#[actix_web::test]
async fn empty_user_is_not_found() {
    let mut server = Server::new_async().await;
    let _user = server
        .mock("GET", "/users/ghost-user")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _repos = server
        .mock("GET", "/users/ghost-user/repos")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get().uri("/api/users/ghost-user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "User not found" }));
}

#[actix_web::test]
async fn upstream_not_found_surfaces_upstream_message() {
    let mut server = Server::new_async().await;
    let _commits = server
        .mock("GET", "/repos/octocat/nonexistent-repo/commits")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get()
        .uri("/api/repos/octocat/nonexistent-repo")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[actix_web::test]
async fn commits_are_truncated_to_five() {
    let mut server = Server::new_async().await;
    let commits: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "sha": format!("{i}"),
                "commit": {
                    "author": { "name": "Monalisa", "date": format!("2024-03-0{}T10:00:00Z", 9 - i) },
                    "message": format!("commit {i}")
                }
            })
        })
        .collect();
    let _commits = server
        .mock("GET", "/repos/octocat/Hello-World/commits")
        .with_status(200)
        .with_body(Value::Array(commits).to_string())
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get()
        .uri("/api/repos/octocat/Hello-World")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let commits = body["commits"].as_array().expect("commits array");
    assert_eq!(commits.len(), 5);
    assert_eq!(
        commits[0],
        json!({
            "committer_name": "Monalisa",
            "message": "commit 0",
            "date": "2024-03-09T10:00:00Z"
        })
    );
    assert_eq!(commits[4]["message"], "commit 4");
}

#[actix_web::test]
async fn rate_limit_collapses_to_not_found_by_default() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("x-ratelimit-remaining", "0")
        .with_body(r#"{"total_count":0,"items":[]}"#)
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get()
        .uri("/api/search/users?query=octocat")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "GitHub API rate limit exceeded" }));
}

#[actix_web::test]
async fn distinct_policy_uses_dedicated_statuses() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/search/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("x-ratelimit-remaining", "0")
        .with_body(r#"{"total_count":0,"items":[]}"#)
        .create_async()
        .await;
    let _commits = server
        .mock("GET", "/repos/octocat/Hello-World/commits")
        .with_status(500)
        .with_body(r#"{"message":"Server Error"}"#)
        .create_async()
        .await;
    let app = app!(state_for(&server, StatusPolicy::Distinct));

    let req = test::TestRequest::get()
        .uri("/api/search/users?query=octocat")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let req = test::TestRequest::get()
        .uri("/api/repos/octocat/Hello-World")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Server Error" }));
}

#[actix_web::test]
async fn unknown_route_is_json_not_found() {
    let server = Server::new_async().await;
    let app = app!(state_for(&server, StatusPolicy::Collapsed));

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Not Found" }));
}
