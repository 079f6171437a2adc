use std::net::SocketAddr;

use axum::{routing::get, Router};
use time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, recipes};

pub fn build_app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            state.config.session.inactivity_ttl_minutes,
        )));

    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(recipes::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use super::*;

    fn app() -> Router {
        build_app(AppState::fake(), MemoryStore::default())
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn session_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie set")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn signup_me_logout_flow() {
        let app = app();

        // Protected route rejects before anything else runs.
        let response = app.clone().oneshot(get("/api/v1/me", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/signup",
                r#"{"email":"a@x.com","password":"secret-password","username":"ada"}"#,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(get("/api/v1/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["username"], "ada");

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/auth/logout", "{}", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // The old cookie no longer resolves to an identity.
        let response = app
            .oneshot(get("/api/v1/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_failures_share_one_response_shape() {
        let app = app();

        app.clone()
            .oneshot(post_json(
                "/api/v1/auth/signup",
                r#"{"email":"a@x.com","password":"secret-password","username":"ada"}"#,
                None,
            ))
            .await
            .unwrap();

        let wrong_password = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                r#"{"email":"a@x.com","password":"wrong-password"}"#,
                None,
            ))
            .await
            .unwrap();
        let unknown_email = app
            .oneshot(post_json(
                "/api/v1/auth/login",
                r#"{"email":"b@x.com","password":"secret-password"}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

        let wrong_password = axum::body::to_bytes(wrong_password.into_body(), usize::MAX)
            .await
            .unwrap();
        let unknown_email = axum::body::to_bytes(unknown_email.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(wrong_password, unknown_email);
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_conflict() {
        let app = app();
        let body = r#"{"email":"a@x.com","password":"secret-password","username":"ada"}"#;

        let first = app
            .clone()
            .oneshot(post_json("/api/v1/auth/signup", body, None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(post_json("/api/v1/auth/signup", body, None))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn search_and_detail_round_through_the_provider() {
        let app = app();

        let response = app
            .clone()
            .oneshot(get("/api/v1/search?query=toast", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["title"], "Toast");

        let response = app
            .clone()
            .oneshot(get("/api/v1/recipes/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get("/api/v1/recipes/999", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
