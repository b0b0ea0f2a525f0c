#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::json;
use std::sync::Arc;

use taskdash::auth::{AuthResponse, TokenService};
use taskdash::store::MemoryStore;
use taskdash::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Builds the full `/api` app the way `main` does, around the given state.
macro_rules! init_app {
    ($state:expr) => {{
        let state: taskdash::AppState = $state;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state.clone()))
                .wrap(actix_web::middleware::Logger::default())
                .service(taskdash::routes::health::health)
                .service(
                    actix_web::web::scope("/api")
                        .wrap(taskdash::auth::AuthMiddleware::new(state.tokens.clone()))
                        .configure(taskdash::routes::config),
                ),
        )
        .await
    }};
}

/// Fresh in-memory state; cost 4 keeps bcrypt fast.
pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), TokenService::new(SECRET), 4)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn signup<S, B>(app: &S, name: &str, email: &str, password: &str) -> AuthResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "signup of {} failed", email);
    test::read_body_json(resp).await
}

/// Sends a request and returns the status with the parsed JSON body.
pub async fn call_json<S, B>(app: &S, req: Request) -> (StatusCode, serde_json::Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "response body is not JSON: {:?}",
            String::from_utf8_lossy(&body)
        )
    });
    (status, json)
}
