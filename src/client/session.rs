//! Client-side authentication state.
//!
//! Each flow (signup, login, profile fetch, onboarding) moves through
//! `Idle -> Pending -> Fulfilled | Rejected`. [`reduce`] is a pure
//! function over [`AuthState`]; [`AuthSession`] dispatches actions around
//! the [`ApiClient`] futures.

use super::{ApiClient, ClientError};
use crate::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::models::{Acknowledgement, OnboardingRequest, ProfileResponse};

/// The asynchronous operations tracked by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Signup,
    Login,
    Profile,
    Onboarding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Pending(Flow),
    /// Signup or login succeeded.
    Authenticated { flow: Flow, response: AuthResponse },
    ProfileLoaded(ProfileResponse),
    OnboardingSaved,
    Rejected { flow: Flow, message: String },
    /// The server refused the token on a protected call.
    SessionExpired { flow: Flow, message: String },
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<ProfileResponse>,
    pub token: Option<String>,
    pub error: Option<String>,
    signup: FlowStatus,
    login: FlowStatus,
    profile: FlowStatus,
    onboarding: FlowStatus,
}

impl AuthState {
    /// Starts from a token persisted by an earlier session, if any.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn flow(&self, flow: Flow) -> &FlowStatus {
        match flow {
            Flow::Signup => &self.signup,
            Flow::Login => &self.login,
            Flow::Profile => &self.profile,
            Flow::Onboarding => &self.onboarding,
        }
    }

    fn flow_mut(&mut self, flow: Flow) -> &mut FlowStatus {
        match flow {
            Flow::Signup => &mut self.signup,
            Flow::Login => &mut self.login,
            Flow::Profile => &mut self.profile,
            Flow::Onboarding => &mut self.onboarding,
        }
    }

    /// True while any flow is in flight.
    pub fn loading(&self) -> bool {
        [Flow::Signup, Flow::Login, Flow::Profile, Flow::Onboarding]
            .iter()
            .any(|flow| *self.flow(*flow) == FlowStatus::Pending)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// A logged-in user whose profile says onboarding is still open.
    pub fn needs_onboarding(&self) -> bool {
        self.user
            .as_ref()
            .map(|user| !user.onboarding_complete)
            .unwrap_or(false)
    }
}

/// Computes the next state.
pub fn reduce(mut state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Pending(flow) => {
            if matches!(flow, Flow::Signup | Flow::Login) {
                state.error = None;
            }
            *state.flow_mut(flow) = FlowStatus::Pending;
        }
        AuthAction::Authenticated { flow, response } => {
            state.token = Some(response.token);
            *state.flow_mut(flow) = FlowStatus::Fulfilled;
        }
        AuthAction::ProfileLoaded(profile) => {
            state.user = Some(profile);
            state.profile = FlowStatus::Fulfilled;
        }
        AuthAction::OnboardingSaved => {
            if let Some(user) = state.user.as_mut() {
                user.onboarding_complete = true;
            }
            state.onboarding = FlowStatus::Fulfilled;
        }
        AuthAction::Rejected { flow, message } => {
            *state.flow_mut(flow) = FlowStatus::Rejected(message.clone());
            state.error = Some(message);
        }
        AuthAction::SessionExpired { flow, message } => {
            state.user = None;
            state.token = None;
            *state.flow_mut(flow) = FlowStatus::Rejected(message.clone());
            state.error = Some(message);
        }
        AuthAction::Logout => {
            state.user = None;
            state.token = None;
        }
    }
    state
}

/// Drives the auth flows against a server.
#[derive(Debug, Clone)]
pub struct AuthSession {
    client: ApiClient,
    state: AuthState,
}

impl AuthSession {
    pub fn new(client: ApiClient, token: Option<String>) -> Self {
        Self {
            client,
            state: AuthState::with_token(token),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn dispatch(&mut self, action: AuthAction) {
        log::trace!("auth action: {:?}", action);
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    fn reject(&mut self, flow: Flow, error: &ClientError) {
        let message = error.message();
        let action = if error.requires_reauth() && !matches!(flow, Flow::Signup | Flow::Login) {
            AuthAction::SessionExpired { flow, message }
        } else {
            AuthAction::Rejected { flow, message }
        };
        self.dispatch(action);
    }

    fn token(&self) -> Result<String, ClientError> {
        self.state.token.clone().ok_or(ClientError::NotAuthenticated)
    }

    pub async fn signup(&mut self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        self.dispatch(AuthAction::Pending(Flow::Signup));
        match self.client.signup(request).await {
            Ok(response) => {
                self.dispatch(AuthAction::Authenticated {
                    flow: Flow::Signup,
                    response: response.clone(),
                });
                Ok(response)
            }
            Err(e) => {
                self.reject(Flow::Signup, &e);
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.dispatch(AuthAction::Pending(Flow::Login));
        match self.client.login(request).await {
            Ok(response) => {
                self.dispatch(AuthAction::Authenticated {
                    flow: Flow::Login,
                    response: response.clone(),
                });
                Ok(response)
            }
            Err(e) => {
                self.reject(Flow::Login, &e);
                Err(e)
            }
        }
    }

    pub async fn fetch_profile(&mut self) -> Result<ProfileResponse, ClientError> {
        self.dispatch(AuthAction::Pending(Flow::Profile));
        let result = match self.token() {
            Ok(token) => self.client.profile(&token).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(profile) => {
                self.dispatch(AuthAction::ProfileLoaded(profile.clone()));
                Ok(profile)
            }
            Err(e) => {
                self.reject(Flow::Profile, &e);
                Err(e)
            }
        }
    }

    pub async fn save_onboarding(
        &mut self,
        request: &OnboardingRequest,
    ) -> Result<Acknowledgement, ClientError> {
        self.dispatch(AuthAction::Pending(Flow::Onboarding));
        let result = match self.token() {
            Ok(token) => self.client.complete_onboarding(&token, request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(ack) => {
                self.dispatch(AuthAction::OnboardingSaved);
                Ok(ack)
            }
            Err(e) => {
                self.reject(Flow::Onboarding, &e);
                Err(e)
            }
        }
    }

    /// Discards the token. Nothing is sent to the server.
    pub fn logout(&mut self) {
        self.dispatch(AuthAction::Logout);
    }
}
