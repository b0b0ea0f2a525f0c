//! Typed HTTP client for the dashboard API.
//!
//! [`ApiClient`] wraps every REST operation. [`session::AuthSession`] layers
//! the signup/login/profile/onboarding flows on top of it as an explicit
//! state machine.

pub mod session;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::models::{
    Acknowledgement, AnalyticsSnapshot, OnboardingRequest, ProfileResponse, SummaryRequest,
    SummaryResponse, Task, TaskInput, TaskUpdate,
};

pub use session::{AuthAction, AuthSession, AuthState, Flow, FlowStatus};

/// Errors surfaced to callers of the client.
#[derive(Debug)]
pub enum ClientError {
    /// The server answered with a non-success status and this `message`.
    Api { status: StatusCode, message: String },
    /// The request never produced a usable response.
    Transport(reqwest::Error),
    /// A protected call was attempted without a token.
    NotAuthenticated,
}

impl ClientError {
    /// True when the caller should send the user back to the login screen.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ClientError::Api { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            ClientError::NotAuthenticated => true,
            ClientError::Transport(_) => false,
        }
    }

    /// Text suitable for showing to the user as-is.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(e) => format!("Request failed: {}", e),
            ClientError::NotAuthenticated => "Not logged in".to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Api { status, message } => write!(f, "{}: {}", status, message),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin typed wrapper over the REST surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        Err(ClientError::Api { status, message })
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::parse(response).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        self.send(Method::POST, "/api/auth/signup", None, Some(request))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.send(Method::POST, "/api/auth/login", None, Some(request))
            .await
    }

    pub async fn profile(&self, token: &str) -> Result<ProfileResponse, ClientError> {
        self.send::<(), _>(Method::GET, "/api/auth/profile", Some(token), None)
            .await
    }

    pub async fn complete_onboarding(
        &self,
        token: &str,
        request: &OnboardingRequest,
    ) -> Result<Acknowledgement, ClientError> {
        self.send(Method::POST, "/api/users/onboarding", Some(token), Some(request))
            .await
    }

    pub async fn analytics(&self, token: &str) -> Result<AnalyticsSnapshot, ClientError> {
        self.send::<(), _>(Method::GET, "/api/analytics", Some(token), None)
            .await
    }

    pub async fn summary(
        &self,
        token: &str,
        data: &AnalyticsSnapshot,
    ) -> Result<SummaryResponse, ClientError> {
        let request = SummaryRequest { data: Some(data) };
        self.send(Method::POST, "/api/summary", Some(token), Some(&request))
            .await
    }

    pub async fn list_tasks(&self, token: &str) -> Result<Vec<Task>, ClientError> {
        self.send::<(), _>(Method::GET, "/api/tasks", Some(token), None)
            .await
    }

    pub async fn create_task(&self, token: &str, title: &str) -> Result<Task, ClientError> {
        let input = TaskInput {
            title: Some(title.to_string()),
        };
        self.send(Method::POST, "/api/tasks", Some(token), Some(&input))
            .await
    }

    pub async fn update_task(
        &self,
        token: &str,
        id: Uuid,
        update: &TaskUpdate,
    ) -> Result<Task, ClientError> {
        self.send(
            Method::PUT,
            &format!("/api/tasks/{}", id),
            Some(token),
            Some(update),
        )
        .await
    }

    pub async fn delete_task(&self, token: &str, id: Uuid) -> Result<Acknowledgement, ClientError> {
        self.send::<(), _>(
            Method::DELETE,
            &format!("/api/tasks/{}", id),
            Some(token),
            None,
        )
        .await
    }
}
