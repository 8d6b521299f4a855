use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use marketplace_web::web::{self, config::WebConfig, state::AppState};
use serde_json::json;
use std::{net::TcpListener, sync::Arc};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn app(api_url: &str) -> Result<Router> {
    let state = AppState::new(WebConfig::new(api_url))?;
    Ok(web::router(Arc::new(state)))
}

fn get(uri: &str, cookie: Option<&str>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    Ok(builder.body(Body::empty())?)
}

fn post_form(uri: &str, form: &str) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))?)
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok().map(ToString::to_string))
        .collect()
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn protected_path_without_cookie_redirects_to_login() -> Result<()> {
    let app = app("http://127.0.0.1:9")?;
    let response = app.oneshot(get("/dashboard/anything", None)?).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn every_default_prefix_is_guarded() -> Result<()> {
    for uri in ["/dashboard", "/admin/users", "/profile", "/posts/12"] {
        let app = app("http://127.0.0.1:9")?;
        let response = app.oneshot(get(uri, None)?).await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn public_path_is_never_redirected() -> Result<()> {
    let app = app("http://127.0.0.1:9")?;
    let response = app
        .clone()
        .oneshot(get("/public", Some("token=abc"))?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/login", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains(r#"action="/login""#));
    Ok(())
}

#[tokio::test]
async fn protected_path_with_any_cookie_passes_the_guard() -> Result<()> {
    let app = app("http://127.0.0.1:9")?;
    let response = app
        .oneshot(get("/admin/anything", Some("token=whatever"))?)
        .await?;
    // The guard lets it through; the router has no such page.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> Result<()> {
    let app = app("http://127.0.0.1:9")?;
    let response = app.oneshot(get("/login", None)?).await?;
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn login_success_sets_cookie_and_redirects() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string("username=alice&password=abcdefg1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(post_form("/login", "username=alice&password=abcdefg1")?)
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token=jwt-abc; Path=/; HttpOnly"));
    assert!(cookies[0].contains("Max-Age=3600"));
    Ok(())
}

#[tokio::test]
async fn login_failure_shows_generic_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect password"})),
        )
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(post_form("/login", "username=alice&password=nope")?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let body = body_text(response).await?;
    assert!(body.contains("Invalid username or password."));
    assert!(!body.contains("Incorrect password"));
    Ok(())
}

#[tokio::test]
async fn signup_mismatch_is_caught_before_the_api() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(post_form(
            "/signup",
            "username=bob&password=abcdefg1&confirm_password=abcdefg2&city=Lyon",
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await?.contains("Passwords do not match."));
    Ok(())
}

#[tokio::test]
async fn signup_shows_server_detail_verbatim() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Username already taken"})),
        )
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(post_form(
            "/signup",
            "username=bob&password=abcdefg1&confirm_password=abcdefg1&city=Lyon",
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await?.contains("Username already taken"));
    Ok(())
}

#[tokio::test]
async fn signup_success_redirects_to_login() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(post_form(
            "/signup",
            "username=bob&password=abcdefg1&confirm_password=abcdefg1&city=Lyon",
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn forgot_password_reports_success_and_failure() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_string(r#"{"email":"alice@example.com"}"#))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_string(r#"{"email":"bob@example.com"}"#))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app(&server.uri())?;
    let response = app
        .clone()
        .oneshot(post_form("/forgot-password", "email=alice%40example.com")?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await?
            .contains("If this email is registered, a reset link has been sent.")
    );

    let response = app
        .oneshot(post_form("/forgot-password", "email=bob%40example.com")?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(
        body_text(response)
            .await?
            .contains("Something went wrong. Try again.")
    );
    Ok(())
}

#[tokio::test]
async fn unauthorized_api_response_evicts_session_once() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(get("/dashboard", Some("token=stale"))?)
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token=; Path=/"));
    assert!(cookies[0].contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn dashboard_shows_current_user() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "alice",
            "role": "user"
        })))
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(get("/dashboard", Some("token=good"))?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(body.contains("Welcome, alice"));
    assert!(body.contains(r#"href="/dashboard/posts">Posts</a>"#));
    Ok(())
}

#[tokio::test]
async fn posts_page_renders_sorted_table() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "username": "alice"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Bike", "description": "Red bike", "price": 120.0, "city": "Lyon"},
            {"id": 2, "title": "Anvil", "description": "Heavy", "price": null, "city": "Paris"},
            {"id": 3, "title": "Chair", "description": "Oak", "price": 15.0, "city": "Nice"}
        ])))
        .mount(&server)
        .await;

    let response = app(&server.uri())?
        .oneshot(get(
            "/dashboard/posts?click=price&selected=3",
            Some("token=good"),
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    let chair = body.find("Chair").unwrap_or(usize::MAX);
    let bike = body.find("Bike").unwrap_or(usize::MAX);
    let anvil = body.find("Anvil").unwrap_or(0);
    assert!(chair < bike, "cheaper post first");
    assert!(bike < anvil, "missing price last");
    assert!(body.contains("▲"));
    assert!(body.contains("1 selected"));
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie_even_if_api_fails() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(COOKIE, "token=abc")
        .body(Body::empty())?;
    let response = app(&server.uri())?.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(set_cookies(&response).len(), 1);
    Ok(())
}

#[tokio::test]
async fn health_reports_api_state() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let response = app(&server.uri())?.oneshot(get("/health", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-app"));
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(body["name"], "marketplace-web");
    assert_eq!(body["api"], "ok");
    Ok(())
}

#[tokio::test]
async fn health_is_unavailable_when_api_is_down() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let response = app(&format!("http://127.0.0.1:{port}"))?
        .oneshot(get("/health", None)?)
        .await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
